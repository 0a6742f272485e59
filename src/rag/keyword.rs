//! Keyword scoring used when semantic search is unavailable

use super::documents::ProfileDocument;
use crate::models::SourceType;

const MIN_TOKEN_LEN: usize = 3;

const SUBSTRING_POINTS: u32 = 1;
const SECTION_POINTS: u32 = 2;
const ENTITY_POINTS: u32 = 3;
const INTENT_POINTS: u32 = 2;

const STOP_WORDS: &[&str] = &[
    "a", "about", "all", "also", "and", "any", "are", "can", "could", "did", "does", "for",
    "from", "has", "have", "how", "into", "know", "like", "list", "me", "more", "much", "please",
    "show", "some", "tell", "than", "that", "the", "their", "them", "there", "these", "this",
    "those", "use", "used", "using", "was", "were", "what", "when", "where", "which", "who",
    "why", "will", "with", "would", "you", "your",
];

/// Words naming a section outright
fn section_of(token: &str) -> Option<SourceType> {
    match token {
        "project" | "projects" => Some(SourceType::Project),
        "experience" | "experiences" => Some(SourceType::Experience),
        "skill" | "skills" => Some(SourceType::Skill),
        "education" | "educational" => Some(SourceType::Education),
        "certificate" | "certificates" | "certification" | "certifications" => {
            Some(SourceType::Certificate)
        }
        _ => None,
    }
}

/// Words that hint at a section without naming it
fn intent_of(token: &str) -> Option<SourceType> {
    match token {
        "language" | "languages" | "programming" | "technology" | "technologies" | "tech"
        | "framework" | "frameworks" | "tool" | "tools" | "stack" | "library" | "libraries" => {
            Some(SourceType::Skill)
        }
        "work" | "worked" | "working" | "job" | "jobs" | "company" | "companies" | "role"
        | "roles" | "employer" | "employment" | "career" | "position" => {
            Some(SourceType::Experience)
        }
        "built" | "build" | "building" | "portfolio" | "repo" | "repository" | "github"
        | "side" => Some(SourceType::Project),
        "degree" | "university" | "college" | "school" | "study" | "studied" | "graduate"
        | "graduated" | "major" => Some(SourceType::Education),
        "certified" | "credential" | "credentials" | "license" | "licensed" | "course"
        | "courses" => Some(SourceType::Certificate),
        _ => None,
    }
}

/// A document that matched, with its score and any skills the query named
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordMatch {
    pub document_index: usize,
    pub score: u32,
    pub matched_skills: Vec<String>,
}

impl KeywordMatch {
    /// Relevance in 0..=1 for citation
    pub fn relevance(&self) -> f32 {
        (self.score as f32 / 10.0).min(1.0)
    }
}

/// Crude plural folding, enough for "languages" / "language"
fn stem(token: &str) -> &str {
    if token.chars().count() > 3 && token.ends_with('s') && !token.ends_with("ss") {
        &token[..token.len() - 1]
    } else {
        token
    }
}

/// Split a query into lowercase search terms.
///
/// Short tokens survive only when they are a known skill name, so "Go" and
/// "C#" still match while "do" and "is" do not.
pub fn tokenize(query: &str, known_skills: &[String]) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();

    for raw in query.split(|c: char| !c.is_alphanumeric() && !"+#.".contains(c)) {
        let token = raw.trim_matches('.').to_lowercase();
        if token.is_empty() || STOP_WORDS.contains(&token.as_str()) {
            continue;
        }
        let is_skill = known_skills.iter().any(|s| s.eq_ignore_ascii_case(&token));
        if token.chars().count() < MIN_TOKEN_LEN && !is_skill {
            continue;
        }
        if !tokens.contains(&token) {
            tokens.push(token);
        }
    }

    tokens
}

/// Lowercase and collapse runs of whitespace
fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Terms the tokenizer would split apart, such as "spring boot" or "scikit-learn"
fn is_compound(term: &str) -> bool {
    term.chars().any(|c| !c.is_alphanumeric() && !"+#.".contains(c))
}

/// `phrase` occurs in `text` with no letter or digit directly on either side.
/// Both sides are expected to be normalized already.
pub fn contains_phrase(text: &str, phrase: &str) -> bool {
    if phrase.is_empty() {
        return false;
    }

    let mut from = 0;
    while let Some(pos) = text[from..].find(phrase) {
        let start = from + pos;
        let end = start + phrase.len();
        let before = text[..start].chars().next_back();
        let after = text[end..].chars().next();
        if !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric) {
            return true;
        }
        from = start + text[start..].chars().next().map_or(1, char::len_utf8);
    }
    false
}

fn score_document(query: &str, tokens: &[String], document: &ProfileDocument) -> KeywordMatch {
    let text = document.text.to_lowercase();
    let mut score = 0;
    let mut intent = false;

    for token in tokens {
        let stemmed = stem(token);

        if text.contains(stemmed) {
            score += SUBSTRING_POINTS;
        }
        if section_of(token) == Some(document.source_type) {
            score += SECTION_POINTS;
        }
        if document
            .entities
            .iter()
            .filter(|e| !is_compound(e))
            .any(|e| e == token || stem(e) == stemmed)
        {
            score += ENTITY_POINTS;
        }
        if intent_of(token) == Some(document.source_type) {
            intent = true;
        }
    }

    // Multi-word and hyphenated names never survive tokenizing, so they are
    // looked up as phrases in the query instead.
    for entity in document.entities.iter().filter(|e| is_compound(e)) {
        if contains_phrase(query, &normalize(entity)) {
            score += ENTITY_POINTS;
        }
    }

    let mut matched_skills: Vec<String> = Vec::new();
    for name in &document.skill_names {
        if contains_phrase(query, &normalize(name)) && !matched_skills.contains(name) {
            matched_skills.push(name.clone());
        }
    }

    if intent {
        score += INTENT_POINTS;
    }

    KeywordMatch {
        document_index: 0,
        score,
        matched_skills,
    }
}

/// Score every document against the query, best first. Documents with no
/// overlap are left out; ties keep document order.
pub fn rank_documents(query: &str, documents: &[ProfileDocument]) -> Vec<KeywordMatch> {
    let known_skills: Vec<String> = documents
        .iter()
        .flat_map(|d| d.skill_names.iter().cloned())
        .collect();
    let tokens = tokenize(query, &known_skills);
    tracing::debug!("Keyword tokens for {:?}: {:?}", query, tokens);

    if tokens.is_empty() {
        return Vec::new();
    }
    let query = normalize(query);

    let mut matches: Vec<KeywordMatch> = documents
        .iter()
        .enumerate()
        .map(|(index, document)| KeywordMatch {
            document_index: index,
            ..score_document(&query, &tokens, document)
        })
        .filter(|m| m.score > 0)
        .collect();

    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Profile;
    use crate::models::Project;
    use crate::models::Skill;
    use crate::rag::documents::build_documents;

    fn sample_documents() -> Vec<ProfileDocument> {
        let profile = Profile {
            projects: vec![Project {
                id: 1,
                title: "Resume API".to_string(),
                description: "A REST service written for fun".to_string(),
                repo_url: None,
                tech_stack: vec!["Rust".to_string(), "Axum".to_string()],
            }],
            skills: vec![
                Skill {
                    id: 1,
                    name: "Python".to_string(),
                    category: "Programming Language".to_string(),
                },
                Skill {
                    id: 2,
                    name: "Go".to_string(),
                    category: "Programming Language".to_string(),
                },
                Skill {
                    id: 3,
                    name: "Docker".to_string(),
                    category: "DevOps".to_string(),
                },
            ],
            ..Profile::default()
        };
        build_documents(&profile)
    }

    #[test]
    fn test_tokenize_drops_stop_words_and_short_tokens() {
        let tokens = tokenize("What programming languages do you know?", &[]);
        assert_eq!(tokens, vec!["programming", "languages"]);
    }

    #[test]
    fn test_tokenize_keeps_short_skill_names() {
        let skills = vec!["Go".to_string(), "C#".to_string()];
        assert_eq!(tokenize("Go or C#?", &skills), vec!["go", "c#"]);
        assert_eq!(tokenize("Node.js.", &[]), vec!["node.js"]);
    }

    #[test]
    fn test_language_question_prefers_skill_category() {
        let documents = sample_documents();
        let matches = rank_documents("What programming languages do you know?", &documents);

        let best = &documents[matches[0].document_index];
        assert_eq!(best.source_type, SourceType::Skill);
        assert_eq!(best.title, "Programming Language Skills");
        assert!(matches[0].matched_skills.is_empty());
    }

    #[test]
    fn test_named_skill_is_reported() {
        let documents = sample_documents();
        let matches = rank_documents("Have you used Go?", &documents);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].matched_skills, vec!["Go"]);
    }

    #[test]
    fn test_tech_stack_entity_matches_project() {
        let documents = sample_documents();
        let matches = rank_documents("Anything built with Axum?", &documents);

        let best = &documents[matches[0].document_index];
        assert_eq!(best.source_type, SourceType::Project);
        // substring + entity + intent ("built")
        assert_eq!(matches[0].score, 6);
    }

    #[test]
    fn test_contains_phrase_respects_word_edges() {
        assert!(contains_phrase("have you used spring boot?", "spring boot"));
        assert!(contains_phrase("scikit-learn experience", "scikit-learn"));
        assert!(contains_phrase("c# or f#", "c#"));
        assert!(!contains_phrase("javascript", "java"));
        assert!(!contains_phrase("going home", "go"));
        assert!(contains_phrase("let's go, going gone", "go"));
        assert!(!contains_phrase("anything", ""));
    }

    #[test]
    fn test_multi_word_and_hyphenated_skills_are_reported() {
        let profile = Profile {
            skills: vec![
                Skill {
                    id: 1,
                    name: "Spring Boot".to_string(),
                    category: "Backend Framework".to_string(),
                },
                Skill {
                    id: 2,
                    name: "Scikit-learn".to_string(),
                    category: "AI/ML".to_string(),
                },
            ],
            ..Profile::default()
        };
        let documents = build_documents(&profile);

        let matches = rank_documents("Have you used  Spring   Boot?", &documents);
        assert_eq!(matches[0].matched_skills, vec!["Spring Boot"]);
        // spring + boot substrings, then the phrase entity
        assert_eq!(matches[0].score, 5);

        let matches = rank_documents("Do you know scikit-learn?", &documents);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].matched_skills, vec!["Scikit-learn"]);
    }

    #[test]
    fn test_no_overlap_returns_nothing() {
        let documents = sample_documents();
        assert!(rank_documents("favourite colour?", &documents).is_empty());
        assert!(rank_documents("   ", &documents).is_empty());
    }

    #[test]
    fn test_relevance_is_capped() {
        let m = KeywordMatch {
            document_index: 0,
            score: 25,
            matched_skills: Vec::new(),
        };
        assert!((m.relevance() - 1.0).abs() < f32::EPSILON);
    }
}
