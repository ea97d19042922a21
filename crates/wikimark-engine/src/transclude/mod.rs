//! # Transclusion
//!
//! A paragraph consisting solely of `{{Title}}` (optionally `{{Title}}@target`)
//! is replaced by the rendered content of the referenced document.
//!
//! Resolution order for a marker:
//! 1. a title already being expanded stays literal (cycle guard)
//! 2. the container comes from the target resolver when a target is given,
//!    otherwise from the current document (recipes resolve to the bag that
//!    holds the title)
//! 3. the store fetch enforces read policy
//! 4. documents of a non-renderable type become empty output
//! 5. the document is rendered recursively with its title on the stack
//!
//! Any failure in 2–4 leaves the marker as written.

mod stack;

pub use stack::{InclusionGuard, InclusionStack};

use std::sync::LazyLock;

use pulldown_cmark::{CowStr, Event, Tag, TagEnd};
use regex::Regex;

use crate::context::RenderContext;
use crate::model::{Container, Document, DocumentId};
use crate::render::{Spanned, emphasis_delimiter, render};

static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\{\{([^}]+)\}\}(?:@([0-9a-z][0-9a-z\-]*[0-9a-z]))?$")
        .expect("marker pattern is valid")
});

/// A parsed `{{Title}}@target` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InclusionMarker {
    pub title: String,
    pub target: Option<String>,
}

impl InclusionMarker {
    pub fn parse(text: &str) -> Option<Self> {
        let caps = MARKER.captures(text.trim())?;
        let title = caps.get(1)?.as_str().trim();
        if title.is_empty() {
            return None;
        }
        Some(Self {
            title: title.to_string(),
            target: caps.get(2).map(|m| m.as_str().to_string()),
        })
    }
}

/// Renders the document a marker refers to, wrapped for embedding.
///
/// Returns `None` when the marker must stay literal.
pub fn transclude(
    marker: &InclusionMarker,
    current: &Document,
    ctx: &RenderContext<'_>,
) -> Option<String> {
    let title = marker.title.as_str();
    if ctx.is_expanding(title) {
        log::debug!(
            "not transcluding {title}: already expanding {:?}",
            ctx.inclusion_path()
        );
        return None;
    }

    let Some(store) = ctx.store else {
        log::debug!("not transcluding {title}: no store");
        return None;
    };

    let id = match locate(marker, current, ctx) {
        Ok(id) => id,
        Err(reason) => {
            log::debug!("not transcluding {title}: {reason}");
            return None;
        }
    };

    let document = match store.get(&ctx.principal, &id) {
        Ok(document) => document,
        Err(e) => {
            log::debug!("not transcluding {title}: {e}");
            return None;
        }
    };

    if !ctx.options.is_renderable(&document) {
        log::debug!(
            "suppressing {title}: type {:?} is not renderable",
            document.doc_type
        );
        return Some(String::new());
    }

    let _guard = ctx.enter(title)?;
    let content = render(&document, ctx);
    Some(wrap(ctx, &document, &content))
}

/// Binds the marker's title to a container.
fn locate(
    marker: &InclusionMarker,
    current: &Document,
    ctx: &RenderContext<'_>,
) -> Result<DocumentId, String> {
    let id = DocumentId::new(marker.title.as_str());

    if let Some(target) = &marker.target {
        let resolver = ctx
            .wiki
            .as_ref()
            .and_then(|wiki| wiki.target_resolver.as_deref())
            .ok_or_else(|| format!("no target resolver for @{target}"))?;
        return resolver
            .resolve(ctx, target, id)
            .map_err(|e| e.to_string());
    }

    match &current.container {
        Some(Container::Bag(bag)) => Ok(DocumentId::in_bag(id.title, bag.as_str())),
        Some(Container::Recipe(recipe)) => {
            let store = ctx.store.ok_or("no store")?;
            let bag = store
                .bag_for_title(&ctx.principal, recipe, &id.title)
                .map_err(|e| e.to_string())?;
            Ok(DocumentId::in_bag(id.title, bag))
        }
        None => Err(format!("{} has no container to inherit", current.title)),
    }
}

fn wrap(ctx: &RenderContext<'_>, document: &Document, content: &str) -> String {
    let attr = |value: &str| html_escape::encode_double_quoted_attribute(value).into_owned();
    let container = document
        .container
        .as_ref()
        .map(Container::name)
        .unwrap_or_default();

    let source = ctx
        .wiki
        .as_ref()
        .and_then(|wiki| wiki.transclude_url.as_deref())
        .map(|builder| {
            format!(
                r#" data-source="{}""#,
                attr(&builder.source_uri(ctx, document))
            )
        })
        .unwrap_or_default();

    format!(
        r#"<article class="transclusion" data-title="{}" data-bag="{}"{source}>{content}</article>"#,
        attr(&document.title),
        attr(container),
    )
}

/// Replaces marker paragraphs in an event stream.
///
/// A marker that cannot be expanded is emitted as raw HTML so that later
/// passes leave its text exactly as written.
pub(crate) fn expand_markers<'a>(
    events: Vec<Spanned<'a>>,
    current: &Document,
    ctx: &RenderContext<'_>,
) -> Vec<Spanned<'a>> {
    let mut out = Vec::with_capacity(events.len());
    let mut iter = events.into_iter();

    while let Some((event, range)) = iter.next() {
        if !matches!(event, Event::Start(Tag::Paragraph)) {
            out.push((event, range));
            continue;
        }

        let mut body = vec![];
        let mut end = None;
        for inner in iter.by_ref() {
            if matches!(inner.0, Event::End(TagEnd::Paragraph)) {
                end = Some(inner);
                break;
            }
            body.push(inner);
        }

        let marker = plain_text(&body, &current.text)
            .and_then(|text| InclusionMarker::parse(&text).map(|m| (text, m)));
        match marker {
            Some((text, marker)) => {
                let html = transclude(&marker, current, ctx).unwrap_or_else(|| {
                    format!("<p>{}</p>", html_escape::encode_text(text.trim()))
                });
                out.push((Event::Html(CowStr::from(format!("{html}\n"))), range));
            }
            None => {
                out.push((event, range.clone()));
                out.extend(body);
                out.push(end.unwrap_or((Event::End(TagEnd::Paragraph), range)));
            }
        }
    }

    out
}

/// The paragraph's text, if it contains nothing but text and emphasis.
///
/// Emphasis delimiters are put back so `{{My *Big* Page}}` keeps its title.
fn plain_text(body: &[Spanned<'_>], source: &str) -> Option<String> {
    body.iter()
        .map(|(event, range)| match event {
            Event::Text(text) => Some(text.as_ref()),
            _ => emphasis_delimiter(event, range, source),
        })
        .collect()
}
