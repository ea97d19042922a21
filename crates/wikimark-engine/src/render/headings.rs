use std::collections::HashMap;
use std::sync::LazyLock;

use pulldown_cmark::{CowStr, Event, Tag, TagEnd};
use regex::Regex;

use super::Spanned;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("valid pattern"));
static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\s]+").expect("valid pattern"));

/// Turns heading text into an id: `Oh Now!` becomes `oh-now`.
pub fn slugify(text: &str) -> String {
    let stripped = NON_WORD.replace_all(text, "");
    let lowered = stripped.trim().to_lowercase();
    let slug = SEPARATORS.replace_all(&lowered, "-");
    if slug.is_empty() {
        "section".to_string()
    } else {
        slug.into_owned()
    }
}

/// Gives every heading without an explicit `{#id}` a unique slug id.
pub(crate) fn assign_heading_ids(events: Vec<Spanned<'_>>) -> Vec<Spanned<'_>> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::with_capacity(events.len());
    let mut open: Option<usize> = None;
    let mut text = String::new();

    for (event, range) in events {
        match &event {
            Event::Start(Tag::Heading { id: None, .. }) => {
                open = Some(out.len());
                text.clear();
            }
            Event::Text(t) | Event::Code(t) if open.is_some() => text.push_str(t),
            Event::End(TagEnd::Heading(_)) => {
                if let Some(index) = open.take()
                    && let Some((Event::Start(Tag::Heading { id, .. }), _)) = out.get_mut(index)
                {
                    *id = Some(CowStr::from(unique(slugify(&text), &mut seen)));
                }
            }
            _ => {}
        }
        out.push((event, range));
    }

    out
}

fn unique(slug: String, seen: &mut HashMap<String, usize>) -> String {
    let count = seen.entry(slug.clone()).or_insert(0);
    *count += 1;
    match *count {
        1 => slug,
        n => format!("{slug}_{}", n - 1),
    }
}
