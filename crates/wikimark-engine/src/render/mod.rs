//! # Rendering
//!
//! `render()` turns a document's Markdown into an HTML fragment. The parser's
//! event stream goes through a fixed series of passes before being written:
//!
//! 1. raw HTML handling per [`SafeMode`]
//! 2. heading ids
//! 3. transclusion of `{{Title}}` paragraphs (wiki features only)
//! 4. link rewriting in prose (wiki features only)
//!
//! Transclusion runs before link rewriting so the text of a marker that
//! stays literal is never turned into links.
//!
//! Every event carries its byte range in the source so the later passes can
//! recover the delimiters of emphasis the parser consumed.

mod headings;
mod link_pass;
mod options;
mod safe_mode;

pub use headings::slugify;
pub use options::{RenderOptions, SafeMode};

use std::ops::Range;

use pulldown_cmark::{Event, Parser, Tag, TagEnd, html};

use crate::context::RenderContext;
use crate::model::Document;
use crate::transclude::expand_markers;

/// Renders `document` to HTML with every feature `ctx` enables.
///
/// Never fails: anything that cannot be linked or included is left as
/// written. The output carries no trailing newline.
pub fn render(document: &Document, ctx: &RenderContext<'_>) -> String {
    let _root = ctx.begin_root(&document.title);
    log::trace!(
        "rendering {} ({} bytes, depth {})",
        document.title,
        document.text.len(),
        ctx.inclusion_path().len()
    );

    let mut events = markdown_events(&document.text, &ctx.options);
    if let Some(wiki) = &ctx.wiki {
        events = expand_markers(events, document, ctx);
        events = link_pass::rewrite_links(events, &document.text, ctx, wiki);
    }
    write_html(events)
}

/// Plain Markdown conversion with no wiki features.
pub fn markdown_to_html(text: &str, options: &RenderOptions) -> String {
    write_html(markdown_events(text, options))
}

/// A parser event with the byte range of the source it came from.
pub(crate) type Spanned<'a> = (Event<'a>, Range<usize>);

fn markdown_events<'a>(text: &'a str, options: &RenderOptions) -> Vec<Spanned<'a>> {
    let events: Vec<Spanned<'a>> = Parser::new_ext(text, options.parser_options())
        .into_offset_iter()
        .collect();
    let events = safe_mode::filter_raw_html(events, options.safe_mode);
    headings::assign_heading_ids(events)
}

/// The `*`, `_`, `**` or `__` an emphasis or strong tag was written with.
pub(crate) fn emphasis_delimiter<'s>(
    event: &Event<'_>,
    range: &Range<usize>,
    source: &'s str,
) -> Option<&'s str> {
    let (width, opening) = match event {
        Event::Start(Tag::Emphasis) => (1, true),
        Event::End(TagEnd::Emphasis) => (1, false),
        Event::Start(Tag::Strong) => (2, true),
        Event::End(TagEnd::Strong) => (2, false),
        _ => return None,
    };
    let delimiter = if opening {
        source.get(range.start..range.start + width)?
    } else {
        source.get(range.end.checked_sub(width)?..range.end)?
    };
    delimiter
        .chars()
        .all(|c| c == '*' || c == '_')
        .then_some(delimiter)
}

fn write_html(events: Vec<Spanned<'_>>) -> String {
    let mut out = String::new();
    html::push_html(&mut out, events.into_iter().map(|(event, _)| event));
    let trimmed = out.trim_end_matches('\n').len();
    out.truncate(trimmed);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Principal;
    use pretty_assertions::assert_eq;

    fn plain(text: &str) -> String {
        markdown_to_html(text, &RenderOptions::default())
    }

    #[test]
    fn converts_markdown_without_trailing_newline() {
        assert_eq!(plain("# Oh Now"), r#"<h1 id="oh-now">Oh Now</h1>"#);
        assert_eq!(plain("hello *you*"), "<p>hello <em>you</em></p>");
    }

    #[test]
    fn empty_text_renders_empty() {
        assert_eq!(plain(""), "");
    }

    #[test]
    fn explicit_heading_ids_win() {
        assert_eq!(plain("# Title {#custom}"), r#"<h1 id="custom">Title</h1>"#);
    }

    #[test]
    fn repeated_headings_get_distinct_ids() {
        assert_eq!(
            plain("# A\n\n# A"),
            "<h1 id=\"a\">A</h1>\n<h1 id=\"a_1\">A</h1>"
        );
    }

    #[test]
    fn inline_html_is_escaped_by_default() {
        assert_eq!(plain("a <b>bold</b>"), "<p>a &lt;b&gt;bold&lt;/b&gt;</p>");
    }

    #[test]
    fn html_block_modes() {
        let text = "<div>boo</div>";
        let render = |mode| markdown_to_html(text, &RenderOptions::default().with_safe_mode(mode));
        assert_eq!(render(SafeMode::Escape), "<p>&lt;div&gt;boo&lt;/div&gt;</p>");
        assert_eq!(render(SafeMode::Remove), "");
        assert_eq!(render(SafeMode::Replace), "<p>[HTML_REMOVED]</p>");
        assert_eq!(render(SafeMode::Off), "<div>boo</div>");
    }

    #[test]
    fn without_wiki_features_links_stay_text() {
        let ctx = RenderContext::new(Principal::guest());
        let html = render(&Document::new("a", "see [[Foo]] and WikiWord"), &ctx);
        assert_eq!(html, "<p>see [[Foo]] and WikiWord</p>");
    }

    #[test]
    fn emphasis_delimiters_come_from_source() {
        let source = "a *b* __c__";
        let events = markdown_events(source, &RenderOptions::default());
        let delimiters: Vec<&str> = events
            .iter()
            .filter_map(|(event, range)| emphasis_delimiter(event, range, source))
            .collect();
        assert_eq!(delimiters, ["*", "*", "__", "__"]);
    }

    #[test]
    fn root_title_is_released_after_render() {
        let ctx = RenderContext::new(Principal::guest());
        render(&Document::new("a", "text"), &ctx);
        assert_eq!(ctx.root_title(), None);
    }
}
