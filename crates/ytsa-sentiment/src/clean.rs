//! Comment text normalization.
//!
//! Steps run in a fixed order because each one can expose input for the
//! next: emoji, then `@mentions`, then URLs, then every remaining character
//! outside `[a-zA-Z0-9\s]`, then whitespace collapsing, then lowercasing.

use std::sync::LazyLock;

use regex::Regex;

static EMOJI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"[0-9#*]\u{FE0F}?\u{20E3}|[\p{Extended_Pictographic}\u{1F1E6}-\u{1F1FF}\u{1F3FB}-\u{1F3FF}\u{FE0E}\u{FE0F}\u{200D}\u{20E3}\u{E0020}-\u{E007F}]",
    )
    .expect("valid emoji regex")
});

static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@\w+").expect("valid mention regex"));

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+|www\.\S+").expect("valid url regex"));

static NON_ALNUM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9\s]").expect("valid non-alnum regex"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Normalizes raw comment text for classification.
///
/// Total and idempotent: `clean(&clean(x)) == clean(x)`.
#[must_use]
pub fn clean(text: &str) -> String {
    let text = EMOJI_RE.replace_all(text, "");
    let text = MENTION_RE.replace_all(&text, "");
    let text = URL_RE.replace_all(&text, "");
    let text = NON_ALNUM_RE.replace_all(&text, "");
    let text = WHITESPACE_RE.replace_all(&text, " ");
    text.trim().to_lowercase()
}

/// [`clean`] for text that may be absent; `None` maps to `""`.
#[must_use]
pub fn clean_opt(text: Option<&str>) -> String {
    text.map(clean).unwrap_or_default()
}
