//! Question value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A question asked by a staff member (Value Object)
///
/// Guaranteed non-empty after trimming. The original text is kept as typed,
/// since keyword routing and the completion prompt both operate on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Question {
    content: String,
}

impl Question {
    /// Create a new question, rejecting empty or whitespace-only input
    pub fn parse(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::InvalidQuestion(
                "question must not be empty".to_string(),
            ));
        }
        Ok(Self { content })
    }

    /// Get the question content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<String> for Question {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Question::parse(value)
    }
}

impl From<Question> for String {
    fn from(q: Question) -> Self {
        q.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_creation() {
        let q = Question::parse("VPN 連不上怎麼辦？").unwrap();
        assert_eq!(q.content(), "VPN 連不上怎麼辦？");
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert!(matches!(
            Question::parse(""),
            Err(DomainError::InvalidQuestion(_))
        ));
        assert!(Question::parse("  \n\t ").is_err());
    }

    #[test]
    fn test_deserialize_rejects_blank() {
        let result: Result<Question, _> = serde_json::from_str("\"   \"");
        assert!(result.is_err());
    }
}
