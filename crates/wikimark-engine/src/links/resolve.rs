use std::borrow::Cow;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use super::types::{LinkKind, LinkMatch};
use crate::context::RenderContext;
use crate::features::WikiFeatures;

/// Bytes left unencoded in titles: alphanumerics, `-_`, and `.!~*'()#`.
///
/// `#` survives so that `[[Page#section]]` keeps its fragment.
const TITLE_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'#');

/// CSS class carried by links to local pages.
pub const WIKILINK_CLASS: &str = "wikilink";

/// Percent-encodes a title for use in a URL path.
pub fn encode_title(title: &str) -> String {
    utf8_percent_encode(title, TITLE_SAFE).to_string()
}

/// Reverses [`encode_title`]. Invalid UTF-8 is replaced, never rejected.
pub fn decode_title(encoded: &str) -> Cow<'_, str> {
    percent_decode_str(encoded).decode_utf8_lossy()
}

/// Escapes label text for HTML and neutralizes `*` and `_` so the label
/// cannot be read as emphasis if the output is fed through Markdown again.
pub fn escape_label(label: &str) -> String {
    html_escape::encode_text(label)
        .replace('*', "&#42;")
        .replace('_', "&#95;")
}

/// What a recognized link turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Replacement {
    /// Raw HTML anchor markup.
    Anchor(String),
    /// Plain text, still to be HTML-escaped by the writer.
    Literal(String),
}

/// Resolves one link occurrence.
///
/// Returns `None` when the occurrence must stay exactly as written: a
/// target-qualified link with no interlinker configured.
pub fn resolve_link(
    m: &LinkMatch<'_>,
    ctx: &RenderContext<'_>,
    features: &WikiFeatures,
) -> Option<Replacement> {
    if m.escaped {
        return Some(Replacement::Literal(literal(m)));
    }

    let (href, class) = match m.kind {
        LinkKind::Free | LinkKind::Wiki => (
            format!("{}{}", features.link_base, encode_title(m.raw_destination)),
            Some(WIKILINK_CLASS),
        ),
        LinkKind::BareUrl => (m.raw_destination.to_string(), None),
        LinkKind::SpaceOnly | LinkKind::WikiTargeted | LinkKind::FreeTargeted => {
            let target = m.raw_target?;
            let Some(interlinker) = features.interlinker.as_deref() else {
                log::debug!("no interlinker configured, leaving @{target} literal");
                return None;
            };
            let base = interlinker.base_uri(ctx, target);
            if m.kind == LinkKind::SpaceOnly {
                (base, None)
            } else {
                (format!("{base}{}", encode_title(m.raw_destination)), None)
            }
        }
    };

    Some(Replacement::Anchor(anchor(&href, m.raw_label, class)))
}

/// The text an escaped occurrence stands for, without its marker.
fn literal(m: &LinkMatch<'_>) -> String {
    match (m.kind, m.raw_target) {
        (LinkKind::WikiTargeted | LinkKind::FreeTargeted, Some(target)) => {
            format!("{}@{target}", m.raw_label)
        }
        _ => m.raw_label.to_string(),
    }
}

fn anchor(href: &str, label: &str, class: Option<&str>) -> String {
    let href = html_escape::encode_double_quoted_attribute(href);
    let label = escape_label(label);
    match class {
        Some(class) => format!(r#"<a class="{class}" href="{href}">{label}</a>"#),
        None => format!(r#"<a href="{href}">{label}</a>"#),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::scan_links;
    use crate::model::Principal;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn resolve_first(text: &str, features: WikiFeatures) -> Option<Replacement> {
        let ctx = RenderContext::new(Principal::guest()).with_wiki(features);
        let m = scan_links(text).into_iter().next().expect("a link");
        resolve_link(&m, &ctx, ctx.wiki.as_ref().expect("wiki features"))
    }

    struct ExampleSpaces;

    impl crate::features::Interlinker for ExampleSpaces {
        fn base_uri(&self, _ctx: &RenderContext<'_>, target: &str) -> String {
            format!("http://{target}.example.org/")
        }
    }

    fn space_features() -> WikiFeatures {
        WikiFeatures::new("").with_interlinker(ExampleSpaces)
    }

    #[rstest]
    #[case("Foo", "Foo")]
    #[case("Bar Zoom", "Bar%20Zoom")]
    #[case("hi#cow", "hi#cow")]
    #[case("a/b?c&d", "a%2Fb%3Fc%26d")]
    #[case("it's (ok)!*~", "it's%20(ok)!*~")]
    #[case("snake_case-name.md", "snake_case-name.md")]
    #[case("café", "caf%C3%A9")]
    fn encodes_titles(#[case] title: &str, #[case] encoded: &str) {
        assert_eq!(encode_title(title), encoded);
    }

    #[rstest]
    #[case("hello world#top")]
    #[case("Ünïcödé 日本語 page")]
    #[case("100% of [things]")]
    fn decode_reverses_encode(#[case] title: &str) {
        assert_eq!(decode_title(&encode_title(title)), title);
    }

    #[test]
    fn label_escaping_neutralizes_emphasis() {
        assert_eq!(
            escape_label("<b>_a_ & *b*</b>"),
            "&lt;b&gt;&#95;a&#95; &amp; &#42;b&#42;&lt;/b&gt;"
        );
    }

    #[test]
    fn free_link_anchor_uses_base() {
        let replacement = resolve_first("[[my label|Some Page]]", WikiFeatures::new("/wiki/"));
        assert_eq!(
            replacement,
            Some(Replacement::Anchor(
                r#"<a class="wikilink" href="/wiki/Some%20Page">my label</a>"#.to_string()
            ))
        );
    }

    #[test]
    fn bare_url_anchor_escapes_ampersand() {
        let replacement = resolve_first("http://x.org/?a=1&b=2", WikiFeatures::new(""));
        assert_eq!(
            replacement,
            Some(Replacement::Anchor(
                r#"<a href="http://x.org/?a=1&amp;b=2">http://x.org/?a=1&amp;b=2</a>"#.to_string()
            ))
        );
    }

    #[rstest]
    #[case("~WikiLink", "WikiLink")]
    #[case("~[[label|Dest]]", "label")]
    #[case("~@cdent", "@cdent")]
    #[case("~WikiLink@cdent", "WikiLink@cdent")]
    #[case("~[[Free Link]]@cdent", "Free Link@cdent")]
    fn escaped_link_is_literal(#[case] text: &str, #[case] literal: &str) {
        assert_eq!(
            resolve_first(text, space_features()),
            Some(Replacement::Literal(literal.to_string()))
        );
    }

    #[rstest]
    #[case("@cdent", r#"<a href="http://cdent.example.org/">@cdent</a>"#)]
    #[case(
        "WikiLink@cdent",
        r#"<a href="http://cdent.example.org/WikiLink">WikiLink</a>"#
    )]
    #[case(
        "[[Free Link]]@cdent",
        r#"<a href="http://cdent.example.org/Free%20Link">Free Link</a>"#
    )]
    fn targeted_links_use_interlinker(#[case] text: &str, #[case] html: &str) {
        assert_eq!(
            resolve_first(text, space_features()),
            Some(Replacement::Anchor(html.to_string()))
        );
    }

    #[test]
    fn targeted_link_without_interlinker_is_left_alone() {
        assert_eq!(resolve_first("@cdent", WikiFeatures::new("")), None);
    }
}
