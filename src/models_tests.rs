//! Unit tests for data models
//!
//! Tests serialization shapes and profile helpers.

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::models::*;

    fn skill(id: i32, name: &str, category: &str) -> Skill {
        Skill {
            id,
            name: name.to_string(),
            category: category.to_string(),
        }
    }

    // ====== Source Citation Tests ======

    #[test]
    fn test_citation_serializes_type_field() {
        let citation = SourceCitation::new("Python", SourceType::Skill, 0.4);
        let json = serde_json::to_value(&citation).unwrap();

        assert_eq!(json["title"], "Python");
        assert_eq!(json["type"], "skill");
        assert!(json.get("source_type").is_none());
    }

    #[test]
    fn test_citation_score_is_clamped() {
        assert!((SourceCitation::new("a", SourceType::Project, 3.5).score - 1.0).abs() < f32::EPSILON);
        assert!(SourceCitation::new("a", SourceType::Project, -0.2).score.abs() < f32::EPSILON);
    }

    // ====== Source Type Tests ======

    #[test]
    fn test_source_type_parse_and_display() {
        for source_type in [
            SourceType::Project,
            SourceType::Experience,
            SourceType::Skill,
            SourceType::Education,
            SourceType::Certificate,
            SourceType::Overview,
        ] {
            assert_eq!(SourceType::parse(source_type.as_str()), Some(source_type));
            assert_eq!(source_type.to_string(), source_type.as_str());
        }
        assert_eq!(SourceType::parse("skills"), Some(SourceType::Skill));
        assert_eq!(SourceType::parse("hobby"), None);
    }

    // ====== Profile Tests ======

    #[test]
    fn test_profile_json_dates_and_defaults() {
        let profile: Profile = serde_json::from_str(
            r#"{
                "experiences": [{
                    "id": 1,
                    "role": "Engineer",
                    "company": "Acme",
                    "location": "Berlin",
                    "start_date": "2020-02-01",
                    "end_date": null,
                    "description": ["Shipped things"]
                }]
            }"#,
        )
        .unwrap();

        assert!(profile.projects.is_empty());
        assert_eq!(
            profile.experiences[0].start_date,
            NaiveDate::from_ymd_opt(2020, 2, 1)
        );
        assert!(!profile.is_empty());
        assert!(Profile::default().is_empty());
    }

    #[test]
    fn test_skills_by_category_keeps_first_seen_order() {
        let profile = Profile {
            skills: vec![
                skill(1, "Docker", "DevOps"),
                skill(2, "Python", "Programming Language"),
                skill(3, "Kubernetes", "DevOps"),
            ],
            ..Profile::default()
        };

        assert_eq!(
            profile.skills_by_category(),
            vec![
                (
                    "DevOps".to_string(),
                    vec!["Docker".to_string(), "Kubernetes".to_string()]
                ),
                ("Programming Language".to_string(), vec!["Python".to_string()]),
            ]
        );
    }

    #[test]
    fn test_format_date_range() {
        let start = NaiveDate::from_ymd_opt(2019, 9, 1);
        let end = NaiveDate::from_ymd_opt(2023, 6, 30);

        assert_eq!(format_date_range(start, end), "2019-09-01 to 2023-06-30");
        assert_eq!(format_date_range(start, None), "2019-09-01 to Present");
        assert_eq!(format_date_range(None, None), "Unknown to Present");
    }
}
