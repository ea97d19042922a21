//! # Link Kinds
//!
//! Each link form owns its syntax delimiters and character classes. The
//! scanner calls these; it never hardcodes `[[`, `@` or `~`.
//!
//! - **`FreeLink`**: `OPEN = "[["`, `CLOSE = "]]"`, `ALIAS = '|'`
//! - **`WikiLink`**: CamelCase word shape
//! - **`Target`**: `AT = '@'` and the DNS-label-like token
//! - **`BareUrl`**: schemes, URL characters, and the anchor prefixes it must not follow
//! - **`Escape`**: `MARKER = '~'` and the front-boundary rule

pub mod bare_url;
pub mod escape;
pub mod free_link;
pub mod target;
pub mod wiki_link;

pub use bare_url::BareUrl;
pub use escape::Escape;
pub use free_link::FreeLink;
pub use target::Target;
pub use wiki_link::WikiLink;

/// A regex-style word character: alphanumeric or underscore.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
