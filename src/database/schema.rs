use super::Database;
use crate::Result;

/// Tables the profile endpoints read from
pub const REQUIRED_TABLES: [&str; 5] =
    ["projects", "experiences", "skills", "education", "certificates"];

const CREATE_TABLES: [&str; 5] = [
    r"
    CREATE TABLE IF NOT EXISTS projects (
        id SERIAL PRIMARY KEY,
        title VARCHAR NOT NULL,
        description TEXT NOT NULL,
        repo_url VARCHAR,
        tech_stack TEXT[] NOT NULL DEFAULT '{}'
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS experiences (
        id SERIAL PRIMARY KEY,
        role VARCHAR NOT NULL,
        company VARCHAR NOT NULL,
        location VARCHAR NOT NULL,
        start_date DATE,
        end_date DATE,
        description TEXT[] NOT NULL DEFAULT '{}'
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS skills (
        id SERIAL PRIMARY KEY,
        name VARCHAR NOT NULL,
        category VARCHAR NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS education (
        id SERIAL PRIMARY KEY,
        institution VARCHAR NOT NULL,
        degree VARCHAR NOT NULL,
        location VARCHAR NOT NULL,
        start_date DATE NOT NULL,
        end_date DATE,
        description TEXT[] NOT NULL DEFAULT '{}'
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS certificates (
        id SERIAL PRIMARY KEY,
        title VARCHAR NOT NULL,
        issuer VARCHAR NOT NULL,
        issue_date DATE NOT NULL,
        credential_url VARCHAR,
        description VARCHAR
    )
    ",
];

impl Database {
    /// Create the profile tables. Safe to run repeatedly.
    pub async fn init_schema(&self) -> Result<()> {
        for statement in CREATE_TABLES {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        tracing::info!("Profile schema ready ({} tables)", REQUIRED_TABLES.len());
        Ok(())
    }

    /// Check if database schema is initialized
    /// Returns true if all required tables exist
    pub async fn is_schema_initialized(&self) -> Result<bool> {
        for table_name in REQUIRED_TABLES {
            let exists = sqlx::query_scalar::<_, bool>(
                r"
                SELECT EXISTS (
                    SELECT FROM information_schema.tables
                    WHERE table_schema = 'public'
                    AND table_name = $1
                )
                ",
            )
            .bind(table_name)
            .fetch_one(&self.pool)
            .await?;

            if !exists {
                tracing::debug!("Missing required table: {}", table_name);
                return Ok(false);
            }
        }

        Ok(true)
    }
}
