use super::span::Span;

/// The syntactic form a link was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// `[[label|destination]]` or `[[destination]]`.
    Free,
    /// A CamelCase word such as `WikiLink`.
    Wiki,
    /// `http://...` or `https://...` in running text.
    BareUrl,
    /// A bare `@target` mention.
    SpaceOnly,
    /// `WikiLink@target`.
    WikiTargeted,
    /// `[[label|destination]]@target`.
    FreeTargeted,
}

impl LinkKind {
    pub fn is_targeted(self) -> bool {
        matches!(
            self,
            LinkKind::SpaceOnly | LinkKind::WikiTargeted | LinkKind::FreeTargeted
        )
    }
}

/// One recognized link occurrence, borrowing from the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMatch<'a> {
    pub kind: LinkKind,
    /// Covers the whole occurrence, including a leading `~` when escaped.
    pub span: Span,
    /// Visible text of the link.
    pub raw_label: &'a str,
    /// Page (or URL) the link points at. Empty for a bare `@target`.
    pub raw_destination: &'a str,
    /// Explicit namespace qualifier, without the `@`.
    pub raw_target: Option<&'a str>,
    /// True when the occurrence was written with the escape marker.
    pub escaped: bool,
}
