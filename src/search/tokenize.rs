//! Text encoding shared by indexing and querying.
//!
//! The exact index owns its [`Encoder`] and runs both documents and queries through
//! it, so the two sides can never be tokenized differently.

use regex::Regex;
use std::sync::LazyLock;

/// Splits on runs of whitespace.
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Turns text into the tokens an index stores and a query looks up.
pub trait Encoder: Send + Sync {
    fn encode(&self, text: &str) -> Vec<String>;
}

/// Case-folds and splits on whitespace. Punctuation stays attached to its word.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceEncoder;

impl Encoder for WhitespaceEncoder {
    fn encode(&self, text: &str) -> Vec<String> {
        let lowercase = text.to_lowercase();
        WHITESPACE
            .split(&lowercase)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Every non-empty prefix of `token`, shortest first, cut on char boundaries.
///
/// "wid" → ["w", "wi", "wid"]
pub(crate) fn forward_prefixes(token: &str) -> impl Iterator<Item = &str> {
    token
        .char_indices()
        .map(|(i, c)| &token[..i + c.len_utf8()])
}

/// Splits text into lowercase alphanumeric words for approximate matching.
///
/// Unlike [`WhitespaceEncoder`], punctuation is a separator here: `Widget::new()`
/// yields ["widget", "new"].
pub(crate) fn fuzzy_words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[rstest]
    #[case("Returns the Widget count", &["returns", "the", "widget", "count"])]
    #[case("  leading\tand\n\ntrailing  ", &["leading", "and", "trailing"])]
    #[case("fn open(path: &Path)", &["fn", "open(path:", "&path)"])]
    #[case("", &[])]
    #[case(" \t\n", &[])]
    fn test_whitespace_encoder(#[case] input: &str, #[case] expected: &[&str]) {
        check!(WhitespaceEncoder.encode(input) == expected);
    }

    #[test]
    fn test_forward_prefixes() {
        let prefixes: Vec<_> = forward_prefixes("wid").collect();
        check!(prefixes == ["w", "wi", "wid"]);
    }

    #[rstest]
    #[case("日本")]
    #[case("Москва")]
    #[case("🦀x")]
    fn test_forward_prefixes_respect_char_boundaries(#[case] token: &str) {
        let prefixes: Vec<_> = forward_prefixes(token).collect();
        check!(prefixes.len() == token.chars().count());
        check!(prefixes.last() == Some(&token));
    }

    #[rstest]
    #[case("Widget::new()", &["widget", "new"])]
    #[case("close_connection", &["close", "connection"])]
    #[case("HTTP2 server", &["http2", "server"])]
    fn test_fuzzy_words(#[case] input: &str, #[case] expected: &[&str]) {
        check!(fuzzy_words(input) == expected);
    }
}
