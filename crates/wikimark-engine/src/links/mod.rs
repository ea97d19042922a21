//! # Link Recognition and Resolution
//!
//! Cursor-based recognition of wiki link forms in text, and their
//! resolution to HTML anchors.
//!
//! ## Modules
//!
//! - **`span`**: byte ranges into the scanned text
//! - **`cursor`**: `Cursor` for char-by-char scanning with position tracking
//! - **`kinds`**: link forms that own their delimiters and character classes
//! - **`types`**: `LinkKind` and `LinkMatch`
//! - **`scanner`**: `scan_links()`, an ordered list of matchers tried left to right
//! - **`resolve`**: `resolve_link()`, title encoding and label escaping
//!
//! ## Precedence
//!
//! At each position the matchers run in order: free link with target, free
//! link, wiki word with target, wiki word, bare `@target`, bare URL. Because
//! scanning is left to right, a free link also shadows any wiki word or URL
//! inside its brackets.

pub mod cursor;
pub mod kinds;
pub mod resolve;
pub mod scanner;
pub mod span;
pub mod types;

pub use resolve::{Replacement, decode_title, encode_title, resolve_link};
pub use scanner::scan_links;
pub use span::Span;
pub use types::{LinkKind, LinkMatch};
