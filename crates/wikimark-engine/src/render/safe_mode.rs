use pulldown_cmark::{CowStr, Event, Tag, TagEnd};

use super::Spanned;
use super::options::SafeMode;

/// Applies `mode` to raw HTML events.
///
/// Block HTML that is escaped or replaced becomes its own paragraph.
pub(crate) fn filter_raw_html(events: Vec<Spanned<'_>>, mode: SafeMode) -> Vec<Spanned<'_>> {
    if mode == SafeMode::Off {
        return events;
    }

    let mut out = Vec::with_capacity(events.len());
    let mut block: Option<String> = None;

    for (event, range) in events {
        match event {
            Event::Start(Tag::HtmlBlock) => block = Some(String::new()),
            Event::End(TagEnd::HtmlBlock) => {
                let raw = block.take().unwrap_or_default();
                let text = match mode {
                    SafeMode::Escape => raw.trim_end().to_string(),
                    SafeMode::Replace => SafeMode::PLACEHOLDER.to_string(),
                    SafeMode::Remove | SafeMode::Off => continue,
                };
                out.push((Event::Start(Tag::Paragraph), range.clone()));
                out.push((Event::Text(CowStr::from(text)), range.clone()));
                out.push((Event::End(TagEnd::Paragraph), range));
            }
            Event::Html(html) if block.is_some() => {
                if let Some(raw) = block.as_mut() {
                    raw.push_str(&html);
                }
            }
            Event::Html(html) | Event::InlineHtml(html) => match mode {
                SafeMode::Escape => out.push((Event::Text(html), range)),
                SafeMode::Replace => out.push((Event::Text(SafeMode::PLACEHOLDER.into()), range)),
                SafeMode::Remove | SafeMode::Off => {}
            },
            other => out.push((other, range)),
        }
    }

    out
}
