//! Context assembly and answer phrasing from retrieved records

use crate::models::SourceType;
use crate::rag::SearchResult;

const NO_MATCH_ANSWER: &str = "I couldn't find anything about that in the resume. \
Try asking about projects, work experience, skills, education or certificates.";

/// Safely truncate a string at character boundary (not byte boundary)
///
/// Returns the string with a "..." suffix if it was truncated.
#[must_use]
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{truncated}...")
    } else {
        s.to_string()
    }
}

/// Assembler for creating context from search results
pub struct ContextAssembler {
    max_context_length: usize,
    max_excerpt_chars: usize,
}

impl ContextAssembler {
    #[must_use]
    pub const fn new(max_context_length: usize) -> Self {
        Self {
            max_context_length,
            max_excerpt_chars: 400,
        }
    }

    /// Context block for the answer generator
    #[must_use]
    pub fn assemble(&self, results: &[SearchResult]) -> String {
        let mut context = String::new();

        for (idx, result) in results.iter().enumerate() {
            let entry = format!(
                "[{}] {}: {}\n{}\n\n",
                idx + 1,
                label(result.source_type),
                result.title,
                result.text
            );

            if context.len() + entry.len() > self.max_context_length {
                break;
            }
            context.push_str(&entry);
        }

        context.trim_end().to_string()
    }

    /// Answer used on the semantic path when no generator is available
    #[must_use]
    pub fn templated_answer(&self, results: &[SearchResult]) -> String {
        if results.is_empty() {
            return self.no_match_answer();
        }

        let mut answer = String::from("Here's what the resume says about that:\n");
        for result in results {
            answer.push_str(&format!(
                "\n{} ({}):\n{}\n",
                result.title,
                label(result.source_type).to_lowercase(),
                truncate_str(&result.text, self.max_excerpt_chars)
            ));
        }
        answer.trim_end().to_string()
    }

    /// Lower-confidence answer built from keyword matches
    #[must_use]
    pub fn fallback_answer(&self, results: &[SearchResult]) -> String {
        if results.is_empty() {
            return self.no_match_answer();
        }

        let mut answer = String::from(
            "I couldn't run a full semantic search, but these parts of the resume look related:\n",
        );
        for result in results {
            let excerpt = result.text.split_whitespace().collect::<Vec<_>>().join(" ");
            answer.push_str(&format!(
                "\n- {}: {}",
                result.title,
                truncate_str(&excerpt, self.max_excerpt_chars)
            ));
        }
        answer
    }

    #[must_use]
    pub fn no_match_answer(&self) -> String {
        NO_MATCH_ANSWER.to_string()
    }
}

impl Default for ContextAssembler {
    fn default() -> Self {
        Self::new(4000)
    }
}

fn label(source_type: SourceType) -> &'static str {
    match source_type {
        SourceType::Project => "Project",
        SourceType::Experience => "Experience",
        SourceType::Skill => "Skills",
        SourceType::Education => "Education",
        SourceType::Certificate => "Certificate",
        SourceType::Overview => "Overview",
    }
}
