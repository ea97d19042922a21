use pulldown_cmark::{CowStr, Event, Tag, TagEnd};

use super::{Spanned, emphasis_delimiter};
use crate::context::RenderContext;
use crate::features::WikiFeatures;
use crate::links::kinds::BareUrl;
use crate::links::{LinkKind, LinkMatch, Replacement, Span, resolve_link, scan_links};

/// Stand-in text for an inline element whose source cannot be recovered.
const OPAQUE: &str = "\u{FFFC}";

/// Rewrites wiki links found in prose.
///
/// The inline events of each block are read back as one run of text: prose
/// as parsed, emphasis with its original delimiters, and code, raw HTML and
/// existing links as written. Links are recognized on that run, so
/// `[[My *Big* Page]]` is one link and `**Bold**WikiLink` has no boundary
/// before the wiki word. A link may swallow emphasis that opens and closes
/// inside it but never code, raw HTML, breaks or another link. Text inside
/// code blocks, links, images and raw `<a>` elements is left alone.
pub(crate) fn rewrite_links<'a>(
    events: Vec<Spanned<'a>>,
    source: &str,
    ctx: &RenderContext<'_>,
    features: &WikiFeatures,
) -> Vec<Spanned<'a>> {
    let mut out = Vec::with_capacity(events.len());
    let mut run = Run::default();
    let mut iter = events.into_iter();

    while let Some((event, range)) = iter.next() {
        match &event {
            Event::Text(text) => {
                let role = if run.anchor_depth > 0 {
                    Role::Frozen
                } else {
                    Role::Text
                };
                let text = text.to_string();
                run.push(role, &text, vec![(event, range)]);
            }
            Event::Start(Tag::Emphasis | Tag::Strong)
            | Event::End(TagEnd::Emphasis | TagEnd::Strong) => {
                let role = if matches!(event, Event::Start(_)) {
                    Role::Open
                } else {
                    Role::Close
                };
                match emphasis_delimiter(&event, &range, source) {
                    Some(delimiter) => run.push(role, delimiter, vec![(event, range)]),
                    None => run.push(Role::Frozen, OPAQUE, vec![(event, range)]),
                }
            }
            Event::Start(Tag::Link { .. } | Tag::Image { .. }) => {
                let written = source.get(range.clone()).unwrap_or(OPAQUE).to_string();
                let mut held = vec![(event, range)];
                let mut depth = 1usize;
                while depth > 0 {
                    let Some(inner) = iter.next() else { break };
                    match inner.0 {
                        Event::Start(Tag::Link { .. } | Tag::Image { .. }) => depth += 1,
                        Event::End(TagEnd::Link | TagEnd::Image) => depth -= 1,
                        _ => {}
                    }
                    held.push(inner);
                }
                run.push(Role::Frozen, &written, held);
            }
            Event::InlineHtml(html) => {
                let html = html.to_string();
                if opens_anchor(&html) {
                    run.anchor_depth += 1;
                } else if closes_anchor(&html) {
                    run.anchor_depth = run.anchor_depth.saturating_sub(1);
                }
                run.push(Role::Frozen, &html, vec![(event, range)]);
            }
            Event::Code(_) | Event::FootnoteReference(_) => {
                let written = source.get(range.clone()).unwrap_or(OPAQUE).to_string();
                run.push(Role::Frozen, &written, vec![(event, range)]);
            }
            Event::SoftBreak | Event::HardBreak => {
                run.push(Role::Frozen, "\n", vec![(event, range)]);
            }
            Event::Start(Tag::CodeBlock(_)) => {
                run.flush(&mut out, ctx, features);
                out.push((event, range));
                for inner in iter.by_ref() {
                    let done = matches!(inner.0, Event::End(TagEnd::CodeBlock));
                    out.push(inner);
                    if done {
                        break;
                    }
                }
            }
            _ => {
                run.flush(&mut out, ctx, features);
                out.push((event, range));
            }
        }
    }

    run.flush(&mut out, ctx, features);
    out
}

fn opens_anchor(html: &str) -> bool {
    let lower = html.to_ascii_lowercase();
    lower
        .strip_prefix("<a")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c == '>' || c.is_whitespace())
}

fn closes_anchor(html: &str) -> bool {
    html.to_ascii_lowercase().starts_with("</a")
}

/// How a piece of a run takes part in link recognition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    /// Prose that may be split around a link.
    Text,
    /// Emphasis delimiters, which a link may swallow in pairs.
    Open,
    Close,
    /// Context only: never part of a link.
    Frozen,
}

struct Piece<'a> {
    role: Role,
    /// Where the piece sits in [`Run::text`].
    span: Span,
    events: Vec<Spanned<'a>>,
}

/// The inline content of one block, as text plus the events behind it.
#[derive(Default)]
struct Run<'a> {
    text: String,
    pieces: Vec<Piece<'a>>,
    anchor_depth: usize,
}

impl<'a> Run<'a> {
    fn push(&mut self, role: Role, text: &str, events: Vec<Spanned<'a>>) {
        let start = self.text.len();
        self.text.push_str(text);
        self.pieces.push(Piece {
            role,
            span: Span::new(start, self.text.len()),
            events,
        });
    }

    fn flush(
        &mut self,
        out: &mut Vec<Spanned<'a>>,
        ctx: &RenderContext<'_>,
        features: &WikiFeatures,
    ) {
        let Run { text, pieces, .. } = std::mem::take(self);
        if pieces.is_empty() {
            return;
        }

        let mut links: Vec<(Span, Replacement)> = vec![];
        for m in scan_links(&text) {
            let Some(m) = fit(m, &text, &pieces) else {
                continue;
            };
            if let Some(replacement) = resolve_link(&m, ctx, features) {
                links.push((m.span, replacement));
            }
        }

        if links.is_empty() {
            out.extend(pieces.into_iter().flat_map(|piece| piece.events));
            return;
        }
        emit(&text, pieces, &links, out);
    }
}

/// Checks that a match can replace the pieces under it.
///
/// A bare URL that runs into a closing delimiter or into code is cut short
/// there instead of being dropped.
fn fit<'t>(m: LinkMatch<'t>, text: &'t str, pieces: &[Piece<'_>]) -> Option<LinkMatch<'t>> {
    let blocked = match blocking_piece(pieces, m.span) {
        None => return Some(m),
        Some(at) => at,
    };
    if m.kind != LinkKind::BareUrl {
        return None;
    }

    let url_start = m.span.end - m.raw_label.len();
    let scheme = BareUrl::scheme_len(&text[url_start..])?;
    if blocked <= url_start + scheme {
        return None;
    }
    let url = &text[url_start..blocked];
    let m = LinkMatch {
        span: Span::new(m.span.start, blocked),
        raw_label: url,
        raw_destination: url,
        ..m
    };
    blocking_piece(pieces, m.span).is_none().then_some(m)
}

/// Start of the first piece that keeps `span` from becoming a link.
fn blocking_piece(pieces: &[Piece<'_>], span: Span) -> Option<usize> {
    let mut open = vec![];
    for piece in pieces {
        if piece.span.end <= span.start || span.end <= piece.span.start {
            continue;
        }
        let inside = span.start <= piece.span.start && piece.span.end <= span.end;
        match piece.role {
            Role::Text => {}
            Role::Open if inside => open.push(piece.span.start),
            Role::Close if inside && !open.is_empty() => {
                open.pop();
            }
            Role::Open | Role::Close | Role::Frozen => {
                return Some(piece.span.start.max(span.start));
            }
        }
    }
    open.first().copied()
}

fn emit<'a>(
    text: &str,
    pieces: Vec<Piece<'a>>,
    links: &[(Span, Replacement)],
    out: &mut Vec<Spanned<'a>>,
) {
    let mut emitted = vec![false; links.len()];

    for piece in pieces {
        let overlapping: Vec<usize> = links
            .iter()
            .enumerate()
            .filter(|(_, (span, _))| span.start < piece.span.end && piece.span.start < span.end)
            .map(|(i, _)| i)
            .collect();
        if overlapping.is_empty() {
            out.extend(piece.events);
            continue;
        }

        let range = piece
            .events
            .first()
            .map(|(_, range)| range.clone())
            .unwrap_or_default();
        let mut pos = piece.span.start;
        for i in overlapping {
            let (span, replacement) = &links[i];
            if piece.role == Role::Text && span.start > pos {
                out.push((text_event(&text[pos..span.start]), range.clone()));
            }
            if !emitted[i] {
                emitted[i] = true;
                out.push((replacement_event(replacement), range.clone()));
            }
            pos = span.end;
        }
        if piece.role == Role::Text && pos < piece.span.end {
            out.push((text_event(&text[pos..piece.span.end]), range));
        }
    }
}

fn text_event(text: &str) -> Event<'static> {
    Event::Text(CowStr::from(text.to_string()))
}

fn replacement_event(replacement: &Replacement) -> Event<'static> {
    match replacement {
        Replacement::Anchor(html) => Event::InlineHtml(CowStr::from(html.clone())),
        Replacement::Literal(literal) => Event::Text(CowStr::from(literal.clone())),
    }
}
