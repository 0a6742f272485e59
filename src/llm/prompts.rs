//! Prompt templates for resume questions

use super::ChatMessage;

/// Template with `{{name}}` placeholders
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
    variables: Vec<String>,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        let variables = extract_variables(&template);
        Self {
            template,
            variables,
        }
    }

    /// Substitute placeholders; unknown names are left untouched
    #[must_use]
    pub fn render(&self, values: &[(&str, &str)]) -> String {
        let mut result = self.template.clone();
        for (name, value) in values {
            if self.variables.iter().any(|v| v == name) {
                result = result.replace(&format!("{{{{{name}}}}}"), value);
            }
        }
        result
    }

    #[must_use]
    pub fn variables(&self) -> &[String] {
        &self.variables
    }
}

fn extract_variables(template: &str) -> Vec<String> {
    let mut variables = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            break;
        };
        let name = after[..close].trim();
        if !name.is_empty() && !variables.iter().any(|v| v == name) {
            variables.push(name.to_string());
        }
        rest = &after[close + 2..];
    }

    variables
}

const SYSTEM_PROMPT: &str = "You answer questions about a person's resume on their behalf. \
Use only the resume excerpts provided. If the excerpts do not contain the answer, say so. \
Answer in the first person, in a few sentences.";

pub struct ResumePrompts;

impl ResumePrompts {
    #[must_use]
    pub fn answer() -> PromptTemplate {
        PromptTemplate::new(
            r"Resume excerpts:
{{context}}

Question: {{question}}

Answer:",
        )
    }

    /// System and user messages for one grounded answer
    #[must_use]
    pub fn answer_messages(question: &str, context: &str) -> Vec<ChatMessage> {
        let user = Self::answer().render(&[("context", context), ("question", question)]);
        vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(user)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_variables() {
        let template = PromptTemplate::new("{{a}} and {{ b }} and {{a}} and {{unclosed");
        assert_eq!(template.variables(), ["a", "b"]);
    }

    #[test]
    fn test_render_leaves_unknown_placeholders() {
        let template = PromptTemplate::new("Hello {{name}}, {{other}}");
        assert_eq!(template.render(&[("name", "Ada")]), "Hello Ada, {{other}}");
    }

    #[test]
    fn test_answer_messages() {
        let messages = ResumePrompts::answer_messages("What do you know?", "[Skill] Rust");

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert!(messages[1].content.contains("[Skill] Rust"));
        assert!(messages[1].content.contains("Question: What do you know?"));
    }
}
