use super::Database;
use crate::models::Certificate;
use crate::models::Education;
use crate::models::Experience;
use crate::models::Profile;
use crate::models::Project;
use crate::models::Skill;
use crate::Result;

impl Database {
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        let projects = sqlx::query_as::<_, Project>(
            "SELECT id, title, description, repo_url, tech_stack::TEXT[] AS tech_stack FROM projects ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    pub async fn list_experiences(&self) -> Result<Vec<Experience>> {
        let experiences = sqlx::query_as::<_, Experience>(
            "SELECT id, role, company, location, start_date, end_date, description::TEXT[] AS description
             FROM experiences ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(experiences)
    }

    pub async fn list_skills(&self) -> Result<Vec<Skill>> {
        let skills = sqlx::query_as::<_, Skill>("SELECT id, name, category FROM skills ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(skills)
    }

    pub async fn list_education(&self) -> Result<Vec<Education>> {
        let education = sqlx::query_as::<_, Education>(
            "SELECT id, institution, degree, location, start_date, end_date, description::TEXT[] AS description
             FROM education ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(education)
    }

    pub async fn list_certificates(&self) -> Result<Vec<Certificate>> {
        let certificates = sqlx::query_as::<_, Certificate>(
            "SELECT id, title, issuer, issue_date, credential_url, description
             FROM certificates ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(certificates)
    }

    /// Read the whole profile aggregate
    pub async fn load_profile(&self) -> Result<Profile> {
        let (projects, experiences, skills, education, certificates) = tokio::try_join!(
            self.list_projects(),
            self.list_experiences(),
            self.list_skills(),
            self.list_education(),
            self.list_certificates(),
        )?;

        tracing::debug!(
            "Loaded profile: {} projects, {} experiences, {} skills, {} education, {} certificates",
            projects.len(),
            experiences.len(),
            skills.len(),
            education.len(),
            certificates.len()
        );

        Ok(Profile {
            projects,
            experiences,
            skills,
            education,
            certificates,
        })
    }
}
