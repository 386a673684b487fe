//! Article validation and preview derivation.
//!
//! Both the persistence layer and the HTTP handlers run input through
//! [`ArticleDraft::new`], so trimming and length rules live in one place.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Maximum topic length in characters (matches the `VARCHAR(500)` column).
pub const MAX_TOPIC_LEN: usize = 500;

/// Number of content characters kept in a listing preview.
pub const PREVIEW_LEN: usize = 200;

/// Appended to a preview when the content was truncated.
pub const PREVIEW_ELLIPSIS: &str = "...";

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Trim a topic and check it is non-empty and within [`MAX_TOPIC_LEN`].
pub fn validate_topic(topic: &str) -> Result<&str, CoreError> {
    let topic = topic.trim();
    if topic.is_empty() {
        return Err(CoreError::Validation("Topic must not be empty".into()));
    }
    if topic.chars().count() > MAX_TOPIC_LEN {
        return Err(CoreError::Validation(format!(
            "Topic must be at most {MAX_TOPIC_LEN} characters"
        )));
    }
    Ok(topic)
}

/// Trim article content and check it is non-empty.
pub fn validate_content(content: &str) -> Result<&str, CoreError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(CoreError::Validation("Content must not be empty".into()));
    }
    Ok(content)
}

/// A topic/content pair that has been trimmed and validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDraft {
    pub topic: String,
    pub content: String,
}

impl ArticleDraft {
    /// Validate raw input. The topic is checked first, so an input with
    /// both fields empty reports the topic.
    pub fn new(topic: &str, content: &str) -> Result<Self, CoreError> {
        let topic = validate_topic(topic)?;
        let content = validate_content(content)?;
        Ok(Self {
            topic: topic.to_string(),
            content: content.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Preview
// ---------------------------------------------------------------------------

/// Shortened form of `content` shown in listings.
///
/// Content of at most [`PREVIEW_LEN`] characters is returned verbatim;
/// longer content is cut to [`PREVIEW_LEN`] characters followed by
/// [`PREVIEW_ELLIPSIS`]. Counts characters, not bytes, so multi-byte text
/// is never split inside a code point.
pub fn preview(content: &str) -> String {
    match content.char_indices().nth(PREVIEW_LEN) {
        Some((cut, _)) => format!("{}{PREVIEW_ELLIPSIS}", &content[..cut]),
        None => content.to_string(),
    }
}
