//! YAML front matter for work documents and content pages.
//!
//! A document opens with a fenced YAML block:
//!
//! ```text
//! ---
//! title: "Checkout rewrite"
//! summary: "Cut p95 latency in half without a freeze."
//! date: 2025-10-01
//! tags: [Rust, Postgres]
//! featured: true
//! order: "2"
//! ---
//!
//! ## Context
//! ...
//! ```
//!
//! Work documents must carry a front matter block with non-blank `title` and
//! `summary`. Unknown keys are rejected to catch typos early. The `order`
//! field is deliberately loose: numbers and strings are both kept, anything
//! else is dropped with a warning rather than failing the build.
//!
//! Content pages may carry an optional block with `title` and `description`.

use crate::types::OrderValue;
use chrono::{DateTime, NaiveDate};
use log::warn;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("missing front matter block (expected a leading `---` fence)")]
    Missing,
    #[error("unterminated front matter block (no closing `---`)")]
    Unterminated,
    #[error("invalid front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("required field `{0}` is missing or blank")]
    MissingField(&'static str),
    #[error("invalid date `{0}` (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

/// Raw work front matter, as authored.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawWorkFrontMatter {
    title: Option<String>,
    summary: Option<String>,
    date: Option<String>,
    tags: Option<Vec<String>>,
    featured: Option<bool>,
    cover: Option<String>,
    order: Option<serde_yaml::Value>,
}

/// Validated work front matter.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkFrontMatter {
    pub title: String,
    pub summary: String,
    pub date: Option<NaiveDate>,
    pub tags: Vec<String>,
    pub featured: bool,
    pub cover: Option<String>,
    pub order: Option<OrderValue>,
}

/// Optional front matter on a content page.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageFrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Split a document into `(yaml, body)`.
///
/// Returns `Ok(None)` when the document does not open with a `---` fence.
/// The closing fence may be `---` or `...`.
pub fn split_front_matter(content: &str) -> Result<Option<(&str, &str)>, FrontMatterError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let Some(after_fence) = content.strip_prefix("---") else {
        return Ok(None);
    };
    let Some(rest) = after_fence
        .strip_prefix("\r\n")
        .or_else(|| after_fence.strip_prefix('\n'))
    else {
        // `----` or `--- text`: a thematic break, not a fence
        return Ok(None);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let fence = line.trim_end_matches(['\r', '\n']);
        if fence == "---" || fence == "..." {
            return Ok(Some((&rest[..offset], &rest[offset + line.len()..])));
        }
        offset += line.len();
    }
    Err(FrontMatterError::Unterminated)
}

/// Parse and validate the front matter of a work document.
///
/// Returns the validated fields and the markdown body that follows.
pub fn parse_work(content: &str) -> Result<(WorkFrontMatter, &str), FrontMatterError> {
    let (yaml, body) = split_front_matter(content)?.ok_or(FrontMatterError::Missing)?;
    let raw: RawWorkFrontMatter = if yaml.trim().is_empty() {
        RawWorkFrontMatter::default()
    } else {
        serde_yaml::from_str(yaml)?
    };

    let title = required(raw.title, "title")?;
    let summary = required(raw.summary, "summary")?;
    let date = raw.date.as_deref().map(parse_date).transpose()?;
    let cover = raw
        .cover
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    Ok((
        WorkFrontMatter {
            title,
            summary,
            date,
            tags: raw.tags.unwrap_or_default(),
            featured: raw.featured.unwrap_or(false),
            cover,
            order: raw.order.and_then(order_value),
        },
        body,
    ))
}

/// Parse the optional front matter of a content page.
pub fn parse_page(content: &str) -> Result<(PageFrontMatter, &str), FrontMatterError> {
    match split_front_matter(content)? {
        Some((yaml, body)) if !yaml.trim().is_empty() => Ok((serde_yaml::from_str(yaml)?, body)),
        Some((_, body)) => Ok((PageFrontMatter::default(), body)),
        None => Ok((PageFrontMatter::default(), content)),
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, FrontMatterError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(FrontMatterError::MissingField(field))
}

/// Accept a plain date or a full RFC 3339 timestamp (date part kept).
fn parse_date(text: &str) -> Result<NaiveDate, FrontMatterError> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(text).map(|dt| dt.date_naive()))
        .map_err(|_| FrontMatterError::InvalidDate(text.to_string()))
}

/// Keep numbers and strings; anything else counts as "no explicit priority".
fn order_value(raw: serde_yaml::Value) -> Option<OrderValue> {
    match raw {
        serde_yaml::Value::Null => None,
        serde_yaml::Value::Number(n) => n.as_f64().filter(|f| f.is_finite()).map(OrderValue::Number),
        serde_yaml::Value::String(s) => Some(OrderValue::Text(s)),
        other => {
            warn!("ignoring non-numeric `order` value: {other:?}");
            None
        }
    }
}
