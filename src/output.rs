//! CLI output formatting for both pipeline stages.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Every entity (work
//! record, page) leads with its positional index and title; filesystem paths
//! follow as indented `Source:` lines. Records are listed in display order, so
//! the scan output doubles as a preview of how the work index will read.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Featured
//! 001 Checkout rewrite (order 1)
//!     Source: work/checkout-rewrite.md
//!     Tags: Rust, Postgres, Stripe +5
//!
//! Work
//! 001 Acme portal (order 5)
//!     Source: work/clients/acme-portal.md
//!
//! Pages
//! 001 About
//!     Source: 010-about.md
//! 002 Colophon (hidden)
//!     Source: colophon.md
//!
//! Config
//!     config.toml
//!     assets/
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//! Work → work/index.html
//!     001 Checkout rewrite → work/checkout-rewrite/index.html
//!     002 Acme portal → work/clients/acme-portal/index.html (unchanged)
//!
//! Pages
//!     001 About → about/index.html
//!
//! Site
//!     404.html
//!     sitemap.xml
//!
//! Generated 2 case studies, 1 page, 2 assets (3 unchanged, 6 written (9 total))
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O beyond checking which config inputs exist.

use crate::generate::GenerateReport;
use crate::naming::WORK_ROOT;
use crate::ordering::{WorkViews, clamp_tags, coerce_order};
use crate::scan::Manifest;
use crate::types::ContentRecord;
use std::collections::HashMap;
use std::path::Path;

/// Tags shown per record in scan output before collapsing into `+N`.
const SCAN_TAG_LIMIT: usize = 3;

/// Outputs that are neither pages nor records.
const SITE_FILES: &[&str] = &["404.html", "sitemap.xml", "robots.txt", "opengraph-image.png"];

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Record header: index, title and the explicit order when there is one.
///
/// ```text
/// 001 Checkout rewrite (order 1)
/// 002 Data pipeline
/// ```
fn record_header(index: usize, record: &ContentRecord) -> String {
    let order = coerce_order(record.order.as_ref());
    if order.is_finite() {
        format!("{} {} (order {})", format_index(index), record.title, order)
    } else {
        format!("{} {}", format_index(index), record.title)
    }
}

/// `Rust, Postgres, Stripe +5`
fn tag_summary(tags: &[String]) -> String {
    let clamped = clamp_tags(tags, SCAN_TAG_LIMIT);
    let shown = clamped.shown.join(", ");
    if clamped.overflow > 0 {
        format!("{shown} +{}", clamped.overflow)
    } else {
        shown
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}...")
    }
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

// ============================================================================
// Stage 1: Scan output
// ============================================================================

fn push_record_group(lines: &mut Vec<String>, heading: &str, records: &[&ContentRecord]) {
    if records.is_empty() {
        return;
    }
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(heading.to_string());
    for (i, record) in records.iter().enumerate() {
        lines.push(record_header(i + 1, record));
        lines.push(format!("{}Source: {}", indent(1), record.id));
        if let Some(summary) = &record.summary {
            lines.push(format!("{}{}", indent(1), truncate_desc(summary.trim(), 60)));
        }
        if !record.tags.is_empty() {
            lines.push(format!("{}Tags: {}", indent(1), tag_summary(&record.tags)));
        }
    }
}

/// Format scan stage output showing discovered records and pages.
pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    let views = WorkViews::new(&manifest.records);

    push_record_group(&mut lines, "Featured", &views.featured);
    push_record_group(&mut lines, "Work", &views.rest);
    if views.is_empty() {
        lines.push("Work".to_string());
        lines.push(format!("{}(no records under {WORK_ROOT}/)", indent(1)));
    }

    if !manifest.pages.is_empty() {
        lines.push(String::new());
        lines.push("Pages".to_string());
        for (i, page) in manifest.pages.iter().enumerate() {
            let hidden = if page.in_nav { "" } else { " (hidden)" };
            lines.push(format!("{} {}{}", format_index(i + 1), page.title, hidden));
            lines.push(format!("{}Source: {}", indent(1), page.source));
        }
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("config.toml").exists() {
        lines.push(format!("{}config.toml", indent(1)));
    }
    if source_root.join(&manifest.config.assets_dir).is_dir() {
        lines.push(format!("{}{}/", indent(1), manifest.config.assets_dir));
    }

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Generate output
// ============================================================================

/// Format generate stage output: every page with its output path, in the
/// order visitors meet them. Files the cache left in place are marked.
pub fn format_generate_output(manifest: &Manifest, report: &GenerateReport) -> Vec<String> {
    let written: HashMap<&str, bool> = report
        .files
        .iter()
        .map(|f| (f.path.as_str(), f.written))
        .collect();
    let arrow = |label: String, path: String| {
        let status = match written.get(path.as_str()) {
            Some(false) => " (unchanged)",
            _ => "",
        };
        format!("{label} \u{2192} {path}{status}")
    };

    let mut lines = vec![
        arrow("Home".to_string(), "index.html".to_string()),
        arrow("Work".to_string(), format!("{WORK_ROOT}/index.html")),
    ];

    let views = WorkViews::new(&manifest.records);
    let ordered = views.featured.iter().chain(views.rest.iter());
    for (i, record) in ordered.enumerate() {
        lines.push(format!(
            "{}{}",
            indent(1),
            arrow(
                format!("{} {}", format_index(i + 1), record.title),
                format!("{WORK_ROOT}/{}/index.html", record.slug),
            )
        ));
    }

    if !manifest.pages.is_empty() {
        lines.push(String::new());
        lines.push("Pages".to_string());
        for (i, page) in manifest.pages.iter().enumerate() {
            lines.push(format!(
                "{}{}",
                indent(1),
                arrow(
                    format!("{} {}", format_index(i + 1), page.title),
                    format!("{}/index.html", page.slug),
                )
            ));
        }
    }

    lines.push(String::new());
    lines.push("Site".to_string());
    for file in SITE_FILES {
        if written.contains_key(file) {
            lines.push(format!("{}{}", indent(1), file));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}, {} ({})",
        plural(manifest.records.len(), "case study", "case studies"),
        plural(manifest.pages.len(), "page", "pages"),
        plural(report.assets, "asset", "assets"),
        report.stats
    ));

    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(manifest: &Manifest, report: &GenerateReport) {
    for line in format_generate_output(manifest, report) {
        println!("{}", line);
    }
}
