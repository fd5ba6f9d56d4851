//! Comment moderation
//!
//! Free-text submissions are checked against a fixed denylist before they
//! are persisted. Matching is a case-sensitive substring search; a hit
//! rejects the whole submission with a fixed warning attached to the
//! `text` field.

/// Banned substrings
pub const BAD_WORDS: &[&str] = &["редиска", "негодяй"];

/// Warning shown when a banned word is found
pub const WARNING: &str = "Не ругайтесь!";

/// Error raised when comment text fails moderation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModerationError {
    /// The text contains a banned substring
    #[error("{0}")]
    BannedWord(&'static str),
}

/// Validate comment text against the denylist.
pub fn validate_comment_text(text: &str) -> Result<(), ModerationError> {
    for word in BAD_WORDS {
        if text.contains(word) {
            return Err(ModerationError::BannedWord(WARNING));
        }
    }
    Ok(())
}
