//! Question text validation and list ordering

use serde::Deserialize;
use sqlx::FromRow;

use super::ValidationError;

/// Maximum length for question text, counted on the raw (untrimmed) input
pub const MAX_QUESTION_LEN: usize = 500;

/// A question record as stored.
///
/// `created_at` is kept as the stored RFC 3339 string; both sort orders
/// compare it lexicographically, which fixed-precision UTC timestamps
/// support, so there is no reason to parse it on the way through.
#[derive(Debug, Clone, FromRow)]
pub struct Question {
    pub id: i64,
    pub text: String,
    pub votes: i64,
    pub hidden: bool,
    pub created_at: String,
}

/// Validated question text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionText(String);

impl QuestionText {
    /// Validate and normalize submitted text.
    ///
    /// # Rules
    /// - Max 500 characters before trimming
    /// - Leading/trailing whitespace is stripped
    /// - Must be non-empty after trimming
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        if raw.chars().count() > MAX_QUESTION_LEN {
            return Err(ValidationError::TooLong {
                field: "text",
                max: MAX_QUESTION_LEN,
            });
        }

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "text" });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Get the normalized text as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Sort order for question listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListOrder {
    /// Newest first
    #[default]
    New,
    /// Most votes first, earlier submissions winning ties
    Top,
}
