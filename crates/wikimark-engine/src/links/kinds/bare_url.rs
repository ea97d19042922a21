use super::is_word_char;

pub struct BareUrl;

impl BareUrl {
    pub const SCHEMES: [&'static str; 2] = ["https://", "http://"];
    /// A URL directly after one of these is already part of an anchor.
    pub const ANCHORED_PREFIXES: [&'static str; 2] = ["\">", "=\""];

    pub fn is_url_char(c: char) -> bool {
        is_word_char(c) || "-./#?%=&:;@~".contains(c)
    }

    /// Length of the scheme prefix at the start of `s`, if any.
    pub fn scheme_len(s: &str) -> Option<usize> {
        Self::SCHEMES
            .iter()
            .find(|scheme| s.starts_with(*scheme))
            .map(|scheme| scheme.len())
    }

    /// True when the text before a candidate URL marks it as already linked.
    pub fn follows_anchor(before: &str) -> bool {
        Self::ANCHORED_PREFIXES
            .iter()
            .any(|prefix| before.ends_with(prefix))
    }
}
