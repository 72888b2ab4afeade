//! Validation helpers for the notes forms.
//!
//! The predicates are pure. The page-effect helpers (`CharCounter`,
//! `highlight_field_error`, `show_toast`, `validate_required_fields`) only touch
//! the elements they are given and share no state with the dashboard.

mod counter;
mod feedback;
mod patterns;

pub use counter::{CharCounter, CounterState, Validator};
pub use feedback::{
    highlight_field_error, show_toast, validate_required_fields, FIELD_HIGHLIGHT_DURATION,
    REQUIRED_FIELDS_MESSAGE, TOAST_DURATION, TOAST_EXIT_DURATION,
};
pub use patterns::{patterns, Patterns};

pub const TITLE_MAX_CHARS: usize = 50;
pub const DESCRIPTION_MAX_CHARS: usize = 400;
pub const COMMENT_MAX_CHARS: usize = 400;

/// Non-empty, at most 50 characters, letters and spaces only.
pub fn validate_title(title: &str) -> bool {
    if title.is_empty() || title.chars().count() > TITLE_MAX_CHARS {
        return false;
    }
    patterns().text_only.is_match(title)
}

/// Optional; when present at most 400 characters of text and punctuation.
pub fn validate_description(description: &str) -> bool {
    if description.is_empty() {
        return true;
    }
    if description.chars().count() > DESCRIPTION_MAX_CHARS {
        return false;
    }
    patterns().text_with_punctuation.is_match(description)
}

pub fn validate_url(url: &str) -> bool {
    patterns().url.is_match(url)
}

/// Like a description, but a comment cannot be empty.
pub fn validate_comment(text: &str) -> bool {
    if text.is_empty() || text.chars().count() > COMMENT_MAX_CHARS {
        return false;
    }
    patterns().text_with_punctuation.is_match(text)
}
