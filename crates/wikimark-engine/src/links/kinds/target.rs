use super::is_word_char;

/// Namespace qualifier: `@` followed by a DNS-label-like token.
pub struct Target;

impl Target {
    pub const AT: char = '@';

    fn is_token_char(c: char) -> bool {
        c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'
    }

    /// Returns the byte length of the target token at the start of `s`.
    ///
    /// The token is `[0-9a-z][0-9a-z-]*[0-9a-z]` and must end on a word
    /// boundary. Trailing hyphens are left out of the token.
    pub fn token_len(s: &str) -> Option<usize> {
        let run = s
            .find(|c: char| !Self::is_token_char(c))
            .unwrap_or(s.len());
        let mut token = s[..run].trim_end_matches('-');
        loop {
            if token.len() < 2 || token.starts_with('-') {
                return None;
            }
            if !s[token.len()..].chars().next().is_some_and(is_word_char) {
                return Some(token.len());
            }
            // Ends inside a word; fall back to ending before the last hyphen.
            let cut = token.rfind('-')?;
            token = token[..cut].trim_end_matches('-');
        }
    }
}
