//! CLI command handlers module
//!
//! - init: profile schema creation
//! - serve: API server
//! - sync: vector index sync
//! - ask: one-off questions
//! - info: configuration display

pub mod ask;
pub mod info;
pub mod init;
pub mod serve;
pub mod sync;

use std::path::Path;
use std::sync::Arc;

pub use ask::*;
pub use info::*;
pub use init::*;
pub use serve::*;
pub use sync::*;

use crate::database::Database;
use crate::database::ProfileStore;
use crate::database::StaticProfileStore;
use crate::AppConfig;
use crate::Result;

/// Profile source: a JSON file when given, PostgreSQL otherwise.
///
/// The database pool connects lazily so the API can start before Postgres is up.
pub fn open_profile_store(config: &AppConfig, profile_file: Option<&Path>) -> Result<Arc<dyn ProfileStore>> {
    match profile_file {
        Some(path) => Ok(Arc::new(StaticProfileStore::from_json_file(path)?)),
        None => Ok(Arc::new(Database::connect_lazy(config)?)),
    }
}
