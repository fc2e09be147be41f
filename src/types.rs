//! Shared types serialized between the scan and generate stages.
//!
//! The scan stage writes these into `manifest.json`; the generate stage reads
//! them back. Both sides must agree on the shape, so they live here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Author-supplied sort priority, exactly as written in front matter.
///
/// Authors type `order: 2` as often as `order: "2"`, so both forms are kept
/// verbatim and only turned into a number by
/// [`coerce_order`](crate::ordering::coerce_order).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderValue {
    Number(f64),
    Text(String),
}

/// One published work / case-study entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Stable identifier: content-root-relative source path (`work/alpha.md`).
    pub id: String,
    pub title: String,
    /// Path under `/work/`, derived from the source location.
    pub slug: String,
    /// Always `/work/{slug}`.
    pub permalink: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Display order is insertion order; never used for sorting.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<OrderValue>,
    /// Advisory only: feeds sitemap `lastmod`, never ordering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Relative image path or remote URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    /// Raw markdown body (front matter removed).
    #[serde(default)]
    pub body: String,
}

/// A content page generated from a markdown file in the content root.
///
/// Pages follow the `NNN-name` convention:
/// - Numbered files (`010-about.md`) appear in navigation, sorted by number
/// - Unnumbered files are generated but hidden from navigation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Title from first `# heading` in markdown, or link_title as fallback
    pub title: String,
    /// Display label in nav (filename with number stripped and dashes → spaces)
    pub link_title: String,
    /// URL slug (filename stem with number prefix stripped)
    pub slug: String,
    /// Raw markdown content
    pub body: String,
    /// Whether this page appears in navigation (has number prefix)
    pub in_nav: bool,
    /// Sort key from number prefix (for ordering)
    pub sort_key: u32,
    /// Meta description from optional front matter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Source filename relative to the content root
    #[serde(default)]
    pub source: String,
}
