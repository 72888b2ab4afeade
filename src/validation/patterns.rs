use once_cell::sync::Lazy;
use regex::Regex;

/// Compiled patterns shared by the notes form validators.
pub struct Patterns {
    /// Letters (accented included) and whitespace.
    pub text_only: Regex,
    /// Letters, whitespace and basic punctuation.
    pub text_with_punctuation: Regex,
    pub url: Regex,
}

static PATTERNS: Lazy<Patterns> = Lazy::new(|| Patterns {
    text_only: compile(r"^[A-Za-zÀ-ÿÇç\s]*$"),
    text_with_punctuation: compile(r#"^[A-Za-zÀ-ÿÇç\s.,!?;:\-()'"]*$"#),
    url: compile(r"^(https?://)[A-Za-z0-9_\-]+(\.[A-Za-z0-9_\-]+)+[/#?]?.*$"),
});

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|err| panic!("invalid built-in pattern {pattern}: {err}"))
}

pub fn patterns() -> &'static Patterns {
    &PATTERNS
}
