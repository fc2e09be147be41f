//! Markdown rendering for work bodies and content pages.
//!
//! Uses pulldown-cmark with the GitHub-flavoured extensions authors expect
//! (tables, strikethrough, task lists, footnotes) and post-processes the event
//! stream in two ways:
//!
//! - `h2`/`h3` headings get stable, de-duplicated `id` anchors so case
//!   studies can link to "Context" or "Outcome" directly, and so the detail
//!   page can show an outline.
//! - Fenced code blocks are wrapped with a copy button that `site.js` wires up.
//!
//! Raw HTML passes through unchanged; content is authored by the site owner.

use crate::naming::slugify;
use maud::Render;
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};
use std::collections::HashMap;

/// An anchored heading found while rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    pub level: u8,
    pub id: String,
    pub text: String,
}

/// Rendered HTML plus the anchored headings it contains.
#[derive(Debug, Clone, Default)]
pub struct RenderedMarkdown {
    pub html: String,
    pub headings: Vec<Heading>,
}

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
}

/// Render markdown to HTML.
pub fn render_markdown(content: &str) -> RenderedMarkdown {
    let parser = Parser::new_ext(content, options());
    let mut headings = Vec::new();
    let events = anchor_headings(parser, &mut headings);
    let events = wrap_code_blocks(events);

    let mut out = String::with_capacity(content.len() * 2);
    html::push_html(&mut out, events.into_iter());
    RenderedMarkdown {
        html: out,
        headings,
    }
}

/// Buffer each heading's inner events, derive its slug from the text, and
/// re-emit the start tag with an `id`.
fn anchor_headings<'a>(parser: Parser<'a>, headings: &mut Vec<Heading>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut used: HashMap<String, usize> = HashMap::new();
    let mut in_heading: Option<HeadingLevel> = None;
    let mut heading_text = String::new();
    let mut buffered: Vec<Event<'a>> = Vec::new();

    for event in parser {
        match event {
            Event::Start(Tag::Heading { level, .. })
                if matches!(level, HeadingLevel::H2 | HeadingLevel::H3) =>
            {
                in_heading = Some(level);
                heading_text.clear();
                buffered.clear();
            }
            Event::End(TagEnd::Heading(level)) if in_heading == Some(level) => {
                let text = heading_text.trim().to_string();
                let id = unique_id(&mut used, &text);
                events.push(Event::Start(Tag::Heading {
                    level,
                    id: Some(id.clone().into()),
                    classes: Vec::new(),
                    attrs: Vec::new(),
                }));
                events.append(&mut buffered);
                events.push(Event::End(TagEnd::Heading(level)));
                headings.push(Heading {
                    level: level as u8,
                    id,
                    text,
                });
                in_heading = None;
            }
            Event::Text(ref t) | Event::Code(ref t) if in_heading.is_some() => {
                heading_text.push_str(t);
                buffered.push(event);
            }
            other if in_heading.is_some() => buffered.push(other),
            other => events.push(other),
        }
    }
    events
}

fn unique_id(used: &mut HashMap<String, usize>, text: &str) -> String {
    let mut base = slugify(text);
    if base.is_empty() {
        base = "section".to_string();
    }
    let count = used.entry(base.clone()).or_insert(0);
    let id = if *count == 0 {
        base.clone()
    } else {
        format!("{base}-{count}")
    };
    *count += 1;
    id
}

fn wrap_code_blocks(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut out = Vec::with_capacity(events.len());
    for event in events {
        match event {
            Event::Start(Tag::CodeBlock(ref kind)) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => {
                        info.split_whitespace().next().unwrap_or("").to_string()
                    }
                    CodeBlockKind::Indented => String::new(),
                };
                let open = if lang.is_empty() {
                    r#"<div class="code-block">"#.to_string()
                } else {
                    format!(
                        r#"<div class="code-block" data-lang="{}">"#,
                        lang.render().into_string()
                    )
                };
                out.push(Event::Html(
                    format!(
                        r#"{open}<button type="button" class="copy-code" aria-label="Copy code">Copy</button>"#
                    )
                    .into(),
                ));
                out.push(event);
            }
            Event::End(TagEnd::CodeBlock) => {
                out.push(event);
                out.push(Event::Html("</div>\n".into()));
            }
            other => out.push(other),
        }
    }
    out
}

/// Drop a leading `# Title` line.
///
/// Detail and content pages render their title from metadata, so an H1 that
/// repeats it at the top of the body would show twice.
pub fn strip_leading_h1(content: &str) -> &str {
    let trimmed = content.trim_start();
    match trimmed.strip_prefix("# ") {
        Some(rest) => rest.split_once('\n').map(|(_, body)| body).unwrap_or(""),
        None => content,
    }
}

/// Plain text of the first paragraphs, collapsed and cut at `max_chars`.
///
/// Used as a meta description fallback for pages without one.
pub fn plain_text_excerpt(content: &str, max_chars: usize) -> String {
    let mut text = String::new();
    let mut in_paragraph = false;

    for event in Parser::new_ext(content, options()) {
        match event {
            Event::Start(Tag::Paragraph) => in_paragraph = true,
            Event::End(TagEnd::Paragraph) => {
                in_paragraph = false;
                text.push(' ');
                if text.chars().count() >= max_chars {
                    break;
                }
            }
            Event::Text(t) | Event::Code(t) if in_paragraph => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak if in_paragraph => text.push(' '),
            _ => {}
        }
    }

    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let cut: String = collapsed.chars().take(max_chars.saturating_sub(1)).collect();
    let cut = match cut.rfind(' ') {
        Some(pos) if pos > 0 => &cut[..pos],
        _ => cut.as_str(),
    };
    format!("{}…", cut.trim_end_matches([',', '.', ';', ':']))
}
