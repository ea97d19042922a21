use super::is_word_char;

/// CamelCase wiki word: `[A-Z][a-z]+[A-Z]\w+` ending on a word boundary.
pub struct WikiLink;

impl WikiLink {
    /// Returns the byte length of the CamelCase word at the start of `s`.
    pub fn word_len(s: &str) -> Option<usize> {
        let mut chars = s.char_indices().peekable();

        let (_, first) = chars.next()?;
        if !first.is_ascii_uppercase() {
            return None;
        }
        let mut lower = 0;
        while chars.next_if(|(_, c)| c.is_ascii_lowercase()).is_some() {
            lower += 1;
        }
        if lower == 0 {
            return None;
        }
        chars.next_if(|(_, c)| c.is_ascii_uppercase())?;

        let mut end = None;
        while let Some((i, c)) = chars.next_if(|(_, c)| is_word_char(*c)) {
            end = Some(i + c.len_utf8());
        }
        end
    }
}
