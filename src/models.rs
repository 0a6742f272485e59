use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;
use sqlx::FromRow;

/// A portfolio project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub repo_url: Option<String>,
    pub tech_stack: Vec<String>,
}

/// A work experience entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Experience {
    pub id: i32,
    pub role: String,
    pub company: String,
    pub location: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub description: Vec<String>,
}

/// A single skill, grouped by category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Skill {
    pub id: i32,
    pub name: String,
    pub category: String,
}

/// An education entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Education {
    pub id: i32,
    pub institution: String,
    pub degree: String,
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub description: Vec<String>,
}

/// A professional certificate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Certificate {
    pub id: i32,
    pub title: String,
    pub issuer: String,
    pub issue_date: NaiveDate,
    pub credential_url: Option<String>,
    pub description: Option<String>,
}

/// The complete read-only resume aggregate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub certificates: Vec<Certificate>,
}

impl Profile {
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
            && self.experiences.is_empty()
            && self.skills.is_empty()
            && self.education.is_empty()
            && self.certificates.is_empty()
    }

    /// Skill names grouped by category, categories in first-seen order.
    pub fn skills_by_category(&self) -> Vec<(String, Vec<String>)> {
        let mut groups: Vec<(String, Vec<String>)> = Vec::new();
        for skill in &self.skills {
            match groups.iter_mut().find(|(category, _)| *category == skill.category) {
                Some((_, names)) => names.push(skill.name.clone()),
                None => groups.push((skill.category.clone(), vec![skill.name.clone()])),
            }
        }
        groups
    }
}

/// Kind of profile record a citation points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Project,
    Experience,
    Skill,
    Education,
    Certificate,
    Overview,
}

impl SourceType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Experience => "experience",
            Self::Skill => "skill",
            Self::Education => "education",
            Self::Certificate => "certificate",
            Self::Overview => "overview",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "project" => Some(Self::Project),
            "experience" => Some(Self::Experience),
            "skill" | "skills" => Some(Self::Skill),
            "education" => Some(Self::Education),
            "certificate" => Some(Self::Certificate),
            "overview" => Some(Self::Overview),
            _ => None,
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile record that contributed to an answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceCitation {
    pub title: String,
    #[serde(rename = "type")]
    pub source_type: SourceType,
    pub score: f32,
}

impl SourceCitation {
    pub fn new(title: impl Into<String>, source_type: SourceType, score: f32) -> Self {
        Self {
            title: title.into(),
            source_type,
            score: score.clamp(0.0, 1.0),
        }
    }
}

/// Human-readable date range, open-ended ranges read "Present".
pub fn format_date_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> String {
    let start = start.map_or_else(|| "Unknown".to_string(), |d| d.to_string());
    let end = end.map_or_else(|| "Present".to_string(), |d| d.to_string());
    format!("{start} to {end}")
}
