//! Read-only access to the resume profile
//!
//! Handlers and the query pipeline only ever read the profile, so they depend
//! on [`ProfileStore`] rather than on Postgres directly.

use std::path::Path;

use async_trait::async_trait;

use super::Database;
use crate::models::Certificate;
use crate::models::Education;
use crate::models::Experience;
use crate::models::Profile;
use crate::models::Project;
use crate::models::Skill;
use crate::Result;

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn load_profile(&self) -> Result<Profile>;

    async fn projects(&self) -> Result<Vec<Project>> {
        Ok(self.load_profile().await?.projects)
    }

    async fn experiences(&self) -> Result<Vec<Experience>> {
        Ok(self.load_profile().await?.experiences)
    }

    async fn skills(&self) -> Result<Vec<Skill>> {
        Ok(self.load_profile().await?.skills)
    }

    async fn education(&self) -> Result<Vec<Education>> {
        Ok(self.load_profile().await?.education)
    }

    async fn certificates(&self) -> Result<Vec<Certificate>> {
        Ok(self.load_profile().await?.certificates)
    }
}

#[async_trait]
impl ProfileStore for Database {
    async fn load_profile(&self) -> Result<Profile> {
        Database::load_profile(self).await
    }

    async fn projects(&self) -> Result<Vec<Project>> {
        self.list_projects().await
    }

    async fn experiences(&self) -> Result<Vec<Experience>> {
        self.list_experiences().await
    }

    async fn skills(&self) -> Result<Vec<Skill>> {
        self.list_skills().await
    }

    async fn education(&self) -> Result<Vec<Education>> {
        self.list_education().await
    }

    async fn certificates(&self) -> Result<Vec<Certificate>> {
        self.list_certificates().await
    }
}

/// Profile held in memory, loaded once from a JSON document
#[derive(Debug, Clone)]
pub struct StaticProfileStore {
    profile: Profile,
}

impl StaticProfileStore {
    #[must_use]
    pub const fn new(profile: Profile) -> Self {
        Self { profile }
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let profile: Profile = serde_json::from_str(&content)?;
        tracing::info!(
            "Loaded static profile from {} ({} projects, {} skills)",
            path.as_ref().display(),
            profile.projects.len(),
            profile.skills.len()
        );
        Ok(Self::new(profile))
    }
}

#[async_trait]
impl ProfileStore for StaticProfileStore {
    async fn load_profile(&self) -> Result<Profile> {
        Ok(self.profile.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_store_serves_sections() {
        let profile = Profile {
            skills: vec![Skill {
                id: 1,
                name: "Rust".to_string(),
                category: "Programming Language".to_string(),
            }],
            ..Profile::default()
        };
        let store = StaticProfileStore::new(profile.clone());

        assert_eq!(store.load_profile().await.unwrap(), profile);
        assert_eq!(store.skills().await.unwrap().len(), 1);
        assert!(store.projects().await.unwrap().is_empty());
    }

    #[test]
    fn test_from_json_file_accepts_partial_profile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        std::fs::write(
            &path,
            r#"{"skills": [{"id": 1, "name": "Go", "category": "Programming Language"}]}"#,
        )
        .unwrap();

        let store = StaticProfileStore::from_json_file(&path).unwrap();
        assert_eq!(store.profile.skills[0].name, "Go");
        assert!(store.profile.certificates.is_empty());
    }

    #[test]
    fn test_from_json_file_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            StaticProfileStore::from_json_file(&path),
            Err(crate::ResumeRagError::Serialization(_))
        ));
    }
}
