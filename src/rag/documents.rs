//! Text renderings of profile records
//!
//! Each project, experience, education entry and certificate becomes one
//! document. Skills are grouped so that each category is one document.

use crate::models::format_date_range;
use crate::models::Profile;
use crate::models::SourceType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDocument {
    pub source_type: SourceType,
    /// ID of the originating row. Skill categories use their first skill's ID.
    pub source_id: i32,
    pub title: String,
    pub text: String,
    /// Skill records covered by a skill-category document
    pub skill_names: Vec<String>,
    /// Lowercased terms that identify this record exactly
    pub entities: Vec<String>,
}

/// Render the whole profile, in section order, records in store order.
pub fn build_documents(profile: &Profile) -> Vec<ProfileDocument> {
    let mut documents = Vec::new();

    for project in &profile.projects {
        let mut text = format!("Project: {}\n{}", project.title, project.description);
        if !project.tech_stack.is_empty() {
            text.push_str(&format!("\nTech stack: {}", project.tech_stack.join(", ")));
        }
        if let Some(url) = &project.repo_url {
            text.push_str(&format!("\nRepository: {url}"));
        }

        let mut entities = words(&project.title);
        entities.extend(project.tech_stack.iter().map(|t| t.to_lowercase()));

        documents.push(ProfileDocument {
            source_type: SourceType::Project,
            source_id: project.id,
            title: project.title.clone(),
            text,
            skill_names: Vec::new(),
            entities,
        });
    }

    for experience in &profile.experiences {
        let title = format!("{} at {}", experience.role, experience.company);
        let mut text = format!(
            "Experience: {title} ({})\nDates: {}",
            experience.location,
            format_date_range(experience.start_date, experience.end_date)
        );
        push_bullets(&mut text, &experience.description);

        let mut entities = words(&experience.role);
        entities.extend(words(&experience.company));

        documents.push(ProfileDocument {
            source_type: SourceType::Experience,
            source_id: experience.id,
            title,
            text,
            skill_names: Vec::new(),
            entities,
        });
    }

    for (category, names) in profile.skills_by_category() {
        let source_id = profile
            .skills
            .iter()
            .find(|s| s.category == category)
            .map_or(0, |s| s.id);

        let mut entities = words(&category);
        entities.extend(names.iter().map(|n| n.to_lowercase()));

        documents.push(ProfileDocument {
            source_type: SourceType::Skill,
            source_id,
            title: format!("{category} Skills"),
            text: format!("Skills ({category}): {}", names.join(", ")),
            skill_names: names,
            entities,
        });
    }

    for education in &profile.education {
        let title = format!("{}, {}", education.degree, education.institution);
        let mut text = format!(
            "Education: {} at {} ({})\nDates: {}",
            education.degree,
            education.institution,
            education.location,
            format_date_range(Some(education.start_date), education.end_date)
        );
        push_bullets(&mut text, &education.description);

        let mut entities = words(&education.degree);
        entities.extend(words(&education.institution));

        documents.push(ProfileDocument {
            source_type: SourceType::Education,
            source_id: education.id,
            title,
            text,
            skill_names: Vec::new(),
            entities,
        });
    }

    for certificate in &profile.certificates {
        let mut text = format!(
            "Certificate: {} issued by {} on {}",
            certificate.title, certificate.issuer, certificate.issue_date
        );
        if let Some(description) = &certificate.description {
            text.push_str(&format!("\n{description}"));
        }
        if let Some(url) = &certificate.credential_url {
            text.push_str(&format!("\nCredential: {url}"));
        }

        let mut entities = words(&certificate.title);
        entities.extend(words(&certificate.issuer));

        documents.push(ProfileDocument {
            source_type: SourceType::Certificate,
            source_id: certificate.id,
            title: certificate.title.clone(),
            text,
            skill_names: Vec::new(),
            entities,
        });
    }

    documents
}

fn push_bullets(text: &mut String, lines: &[String]) {
    for line in lines.iter().filter(|l| !l.trim().is_empty()) {
        text.push_str(&format!("\n- {}", line.trim()));
    }
}

fn words(value: &str) -> Vec<String> {
    value
        .split(|c: char| !c.is_alphanumeric() && !"+#.".contains(c))
        .map(|w| w.trim_matches('.').to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::Experience;
    use crate::models::Project;
    use crate::models::Skill;

    fn skill(id: i32, name: &str, category: &str) -> Skill {
        Skill {
            id,
            name: name.to_string(),
            category: category.to_string(),
        }
    }

    #[test]
    fn test_skills_grouped_by_category() {
        let profile = Profile {
            skills: vec![
                skill(4, "Python", "Programming Language"),
                skill(5, "PostgreSQL", "Database"),
                skill(6, "Rust", "Programming Language"),
            ],
            ..Profile::default()
        };
        let documents = build_documents(&profile);

        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].title, "Programming Language Skills");
        assert_eq!(documents[0].source_id, 4);
        assert_eq!(documents[0].skill_names, vec!["Python", "Rust"]);
        assert_eq!(documents[0].text, "Skills (Programming Language): Python, Rust");
        assert!(documents[0].entities.contains(&"python".to_string()));
        assert_eq!(documents[1].source_id, 5);
    }

    #[test]
    fn test_project_and_experience_rendering() {
        let profile = Profile {
            projects: vec![Project {
                id: 1,
                title: "Resume API".to_string(),
                description: "Serves my resume".to_string(),
                repo_url: Some("https://github.com/me/resume".to_string()),
                tech_stack: vec!["Rust".to_string(), "Node.js".to_string()],
            }],
            experiences: vec![Experience {
                id: 2,
                role: "Backend Engineer".to_string(),
                company: "Acme".to_string(),
                location: "Remote".to_string(),
                start_date: NaiveDate::from_ymd_opt(2021, 3, 1),
                end_date: None,
                description: vec!["Built APIs".to_string(), " ".to_string()],
            }],
            ..Profile::default()
        };
        let documents = build_documents(&profile);

        assert_eq!(documents[0].source_type, SourceType::Project);
        assert!(documents[0].text.contains("Tech stack: Rust, Node.js"));
        assert!(documents[0].entities.contains(&"node.js".to_string()));

        assert_eq!(documents[1].title, "Backend Engineer at Acme");
        assert!(documents[1].text.contains("2021-03-01 to Present"));
        assert!(documents[1].text.ends_with("- Built APIs"));
    }

    #[test]
    fn test_empty_profile_has_no_documents() {
        assert!(build_documents(&Profile::default()).is_empty());
    }
}
