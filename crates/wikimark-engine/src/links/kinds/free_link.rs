pub struct FreeLink;

impl FreeLink {
    pub const OPEN: &'static str = "[[";
    pub const CLOSE: &'static str = "]]";
    pub const ALIAS: char = '|';
    /// Never allowed inside the brackets.
    pub const FORBIDDEN: char = ']';

    /// Splits link content into `(label, destination)`.
    ///
    /// The first `|` separates label from destination; without one the
    /// content serves as both.
    pub fn split(content: &str) -> (&str, &str) {
        content
            .split_once(Self::ALIAS)
            .unwrap_or((content, content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_without_alias() {
        assert_eq!(FreeLink::split("Foo"), ("Foo", "Foo"));
    }

    #[test]
    fn first_alias_wins() {
        assert_eq!(FreeLink::split("a|b|c"), ("a", "b|c"));
    }
}
