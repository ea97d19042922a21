use super::{
    cursor::Cursor,
    kinds::{BareUrl, Escape, FreeLink, Target, WikiLink},
    span::Span,
    types::{LinkKind, LinkMatch},
};

type TryMatch = for<'a> fn(&mut Cursor<'a>) -> Option<LinkMatch<'a>>;

struct Matcher {
    /// Only attempted where [`Escape::is_front_boundary`] holds.
    needs_boundary: bool,
    try_match: TryMatch,
}

/// Matchers in precedence order. At any position the first one to succeed
/// consumes its span; scanning then resumes after it.
const MATCHERS: [Matcher; 6] = [
    Matcher {
        needs_boundary: true,
        try_match: try_free_targeted,
    },
    Matcher {
        needs_boundary: true,
        try_match: try_free,
    },
    Matcher {
        needs_boundary: true,
        try_match: try_wiki_targeted,
    },
    Matcher {
        needs_boundary: true,
        try_match: try_wiki,
    },
    Matcher {
        needs_boundary: true,
        try_match: try_space,
    },
    Matcher {
        needs_boundary: false,
        try_match: try_bare_url,
    },
];

/// Finds every link occurrence in `text`, left to right, without overlap.
///
/// An occurrence preceded by [`Escape::MARKER`] is still reported, with
/// `escaped` set and its span widened to cover the marker.
pub fn scan_links(text: &str) -> Vec<LinkMatch<'_>> {
    let mut cur = Cursor::new(text);
    let mut out = vec![];

    while !cur.eof() {
        let at_boundary = Escape::is_front_boundary(cur.prev());

        if at_boundary && cur.peek() == Some(Escape::MARKER) {
            let start = cur.pos();
            let mut inner = cur.clone();
            inner.bump();
            // The marker itself stands in for the front boundary.
            if let Some(mut m) = try_matchers(&mut inner, true) {
                m.span.start = start;
                m.escaped = true;
                cur = inner;
                out.push(m);
                continue;
            }
        }

        if let Some(m) = try_matchers(&mut cur, at_boundary) {
            out.push(m);
            continue;
        }
        cur.bump();
    }

    out
}

fn try_matchers<'a>(cur: &mut Cursor<'a>, at_boundary: bool) -> Option<LinkMatch<'a>> {
    MATCHERS
        .iter()
        .filter(|m| at_boundary || !m.needs_boundary)
        .find_map(|m| (m.try_match)(cur))
}

fn link<'a>(kind: LinkKind, span: Span, label: &'a str, destination: &'a str) -> LinkMatch<'a> {
    LinkMatch {
        kind,
        span,
        raw_label: label,
        raw_destination: destination,
        raw_target: None,
        escaped: false,
    }
}

/// Parses `[[content]]`, returning the trimmed content.
///
/// Content may not contain `]` and may not be blank.
fn bracketed<'a>(cur: &mut Cursor<'a>) -> Option<&'a str> {
    if !cur.starts_with(FreeLink::OPEN) {
        return None;
    }
    cur.bump_n(FreeLink::OPEN.len());
    let content = cur.eat_while(|c| c != FreeLink::FORBIDDEN);
    if !cur.starts_with(FreeLink::CLOSE) {
        return None;
    }
    cur.bump_n(FreeLink::CLOSE.len());

    let content = content.trim();
    (!content.is_empty()).then_some(content)
}

/// Parses `@token`, returning the token.
fn target<'a>(cur: &mut Cursor<'a>) -> Option<&'a str> {
    if cur.peek() != Some(Target::AT) {
        return None;
    }
    cur.bump();
    let len = Target::token_len(cur.rest())?;
    let token = &cur.rest()[..len];
    cur.bump_n(len);
    Some(token)
}

fn wiki_word<'a>(cur: &mut Cursor<'a>) -> Option<&'a str> {
    let len = WikiLink::word_len(cur.rest())?;
    let word = &cur.rest()[..len];
    cur.bump_n(len);
    Some(word)
}

fn try_free_targeted<'a>(cur: &mut Cursor<'a>) -> Option<LinkMatch<'a>> {
    let mut c = cur.clone();
    let start = c.pos();
    let content = bracketed(&mut c)?;
    let space = target(&mut c)?;
    let (label, destination) = FreeLink::split(content);

    *cur = c;
    Some(LinkMatch {
        raw_target: Some(space),
        ..link(
            LinkKind::FreeTargeted,
            Span::new(start, cur.pos()),
            label,
            destination,
        )
    })
}

fn try_free<'a>(cur: &mut Cursor<'a>) -> Option<LinkMatch<'a>> {
    let mut c = cur.clone();
    let start = c.pos();
    let content = bracketed(&mut c)?;
    // `[[x]]@` is reserved for the targeted form.
    if c.peek() == Some(Target::AT) {
        return None;
    }
    let (label, destination) = FreeLink::split(content);

    *cur = c;
    Some(link(
        LinkKind::Free,
        Span::new(start, cur.pos()),
        label,
        destination,
    ))
}

fn try_wiki_targeted<'a>(cur: &mut Cursor<'a>) -> Option<LinkMatch<'a>> {
    let mut c = cur.clone();
    let start = c.pos();
    let word = wiki_word(&mut c)?;
    let space = target(&mut c)?;

    *cur = c;
    Some(LinkMatch {
        raw_target: Some(space),
        ..link(
            LinkKind::WikiTargeted,
            Span::new(start, cur.pos()),
            word,
            word,
        )
    })
}

fn try_wiki<'a>(cur: &mut Cursor<'a>) -> Option<LinkMatch<'a>> {
    let mut c = cur.clone();
    let start = c.pos();
    let word = wiki_word(&mut c)?;
    if c.peek() == Some(Target::AT) {
        return None;
    }

    *cur = c;
    Some(link(
        LinkKind::Wiki,
        Span::new(start, cur.pos()),
        word,
        word,
    ))
}

fn try_space<'a>(cur: &mut Cursor<'a>) -> Option<LinkMatch<'a>> {
    let mut c = cur.clone();
    let start = c.pos();
    let space = target(&mut c)?;

    *cur = c;
    let span = Span::new(start, cur.pos());
    Some(LinkMatch {
        raw_target: Some(space),
        ..link(LinkKind::SpaceOnly, span, span.slice(cur.s), "")
    })
}

fn try_bare_url<'a>(cur: &mut Cursor<'a>) -> Option<LinkMatch<'a>> {
    let scheme = BareUrl::scheme_len(cur.rest())?;
    let start = cur.pos();
    if BareUrl::follows_anchor(&cur.s[..start]) {
        return None;
    }

    let mut c = cur.clone();
    c.bump_n(scheme);
    if c.eat_while(BareUrl::is_url_char).is_empty() {
        return None;
    }

    *cur = c;
    let span = Span::new(start, cur.pos());
    let url = span.slice(cur.s);
    Some(link(LinkKind::BareUrl, span, url, url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn kinds(text: &str) -> Vec<(LinkKind, &str)> {
        scan_links(text)
            .into_iter()
            .map(|m| (m.kind, m.span.slice(text)))
            .collect()
    }

    #[test]
    fn plain_text_has_no_links() {
        assert!(scan_links("nothing to see here").is_empty());
        assert!(scan_links("").is_empty());
    }

    #[test]
    fn free_link_with_label() {
        let links = scan_links("lorem [[hello world|Foo]] ipsum");
        assert_eq!(links.len(), 1);
        let m = &links[0];
        assert_eq!(m.kind, LinkKind::Free);
        assert_eq!(m.span, Span::new(6, 25));
        assert_eq!(m.raw_label, "hello world");
        assert_eq!(m.raw_destination, "Foo");
        assert_eq!(m.raw_target, None);
        assert!(!m.escaped);
    }

    #[test]
    fn free_link_outranks_wiki_word_inside_it() {
        assert_eq!(
            kinds("lorem [[hello FooBar world]] ipsum"),
            vec![(LinkKind::Free, "[[hello FooBar world]]")]
        );
    }

    #[rstest]
    #[case("lorem[[Foo]] ipsum")]
    #[case("lorem [[Foo [] Bar]] ipsum")]
    #[case("lorem [[hello [] world|Foo]] ipsum")]
    #[case("[[   ]]")]
    #[case("[[unclosed")]
    #[case("fooWikiLink")]
    #[case("{{WikiLink}}")]
    #[case("mail me at someone@example.com")]
    fn non_links(#[case] text: &str) {
        assert_eq!(kinds(text), vec![]);
    }

    #[rstest]
    #[case("This is WikiLink", LinkKind::Wiki, "WikiLink")]
    #[case("(HtmlJavascript in parens)", LinkKind::Wiki, "HtmlJavascript")]
    #[case("a|WikiLink", LinkKind::Wiki, "WikiLink")]
    #[case("Visit @cdent for more", LinkKind::SpaceOnly, "@cdent")]
    #[case("@cdent first", LinkKind::SpaceOnly, "@cdent")]
    #[case("This is WikiLink@cdent", LinkKind::WikiTargeted, "WikiLink@cdent")]
    #[case("This is [[Free Link]]@cdent", LinkKind::FreeTargeted, "[[Free Link]]@cdent")]
    #[case("see http://example.org now", LinkKind::BareUrl, "http://example.org")]
    #[case("x https://a.b/c?d=e&f#g", LinkKind::BareUrl, "https://a.b/c?d=e&f#g")]
    fn single_link(#[case] text: &str, #[case] kind: LinkKind, #[case] matched: &str) {
        assert_eq!(kinds(text), vec![(kind, matched)]);
    }

    #[test]
    fn targeted_forms_carry_target() {
        let links = scan_links("[[Free Link|Page]]@my-space and Wiki@ nope");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].raw_label, "Free Link");
        assert_eq!(links[0].raw_destination, "Page");
        assert_eq!(links[0].raw_target, Some("my-space"));
    }

    #[test]
    fn invalid_target_blocks_untargeted_form() {
        assert_eq!(kinds("WikiLink@X and [[Foo]]@Y"), vec![]);
    }

    #[rstest]
    #[case("not ~WikiLink here", "WikiLink", "~WikiLink")]
    #[case("not ~[[Foo|Bar]] here", "Foo", "~[[Foo|Bar]]")]
    #[case("Visit ~@cdent for", "@cdent", "~@cdent")]
    #[case("raw ~http://example.org", "http://example.org", "~http://example.org")]
    fn escaped_links(#[case] text: &str, #[case] label: &str, #[case] spanned: &str) {
        let links = scan_links(text);
        assert_eq!(links.len(), 1);
        assert!(links[0].escaped);
        assert_eq!(links[0].raw_label, label);
        assert_eq!(links[0].span.slice(text), spanned);
    }

    #[test]
    fn escape_marker_needs_front_boundary() {
        let links = scan_links("a~WikiLink");
        assert!(links.is_empty());
    }

    #[test]
    fn bare_url_skips_existing_anchor_text() {
        assert_eq!(kinds(r#"href="http://example.org""#), vec![]);
        assert_eq!(kinds(r#"<a x=1">http://example.org</a>"#), vec![]);
    }

    #[test]
    fn bare_url_consumes_camel_case_path() {
        assert_eq!(
            kinds("go http://example.org/CamelCase now"),
            vec![(LinkKind::BareUrl, "http://example.org/CamelCase")]
        );
    }

    #[test]
    fn multiple_links_in_order() {
        assert_eq!(
            kinds("[[One]] then TwoWords and @three-x http://four.example"),
            vec![
                (LinkKind::Free, "[[One]]"),
                (LinkKind::Wiki, "TwoWords"),
                (LinkKind::SpaceOnly, "@three-x"),
                (LinkKind::BareUrl, "http://four.example"),
            ]
        );
    }

    #[test]
    fn unicode_text_around_links() {
        let text = "café [[Über Straße]] ñ";
        let links = scan_links(text);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].raw_destination, "Über Straße");
        assert_eq!(links[0].span.slice(text), "[[Über Straße]]");
    }
}
