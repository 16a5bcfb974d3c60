use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::InputError;

// @module: Reference text canonicalization

// @const: Any run of whitespace
static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").unwrap()
});

// @const: Characters outside the allow-list (word chars, whitespace, - . , ! ?)
static DISALLOWED_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\w\s\-.,!?]").unwrap()
});

/// Canonicalize raw text
///
/// Collapses whitespace runs to a single space and trims the ends, then drops
/// every character not in the allow-list. Dropping happens after collapsing,
/// so removed symbols between spaces can leave a double space behind; word
/// splitting is unaffected.
pub fn normalize_text(text: &str) -> String {
    let collapsed = WHITESPACE_REGEX.replace_all(text.trim(), " ");
    DISALLOWED_REGEX.replace_all(&collapsed, "").into_owned()
}

/// Split normalized text into words
pub fn split_words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Decode reference text bytes as UTF-8, stripping a leading byte order mark
pub fn decode_reference(bytes: &[u8]) -> Result<String, InputError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    String::from_utf8(bytes.to_vec())
        .map_err(|e| InputError::UndecodableText(e.utf8_error().to_string()))
}

/// Canonical comparison key for a single token
pub(crate) fn comparison_key(token: &str) -> String {
    normalize_text(token).trim().to_lowercase()
}
