//! Content discovery and manifest generation.
//!
//! Stage 1 of the Simple Folio build pipeline. Reads the content root, parses
//! front matter, and produces a [`Manifest`] that the generate stage consumes.
//!
//! ## Directory Structure
//!
//! ```text
//! content/                          # Content root
//! ├── config.toml                   # Site configuration (optional)
//! ├── 010-about.md                  # Page (numbered = appears in nav)
//! ├── 020-contact.md                # Page with slug `contact`: contact layout
//! ├── colophon.md                   # Unnumbered = generated, hidden from nav
//! ├── assets/                       # Copied verbatim to the output root
//! │   └── favicon.svg
//! └── work/                         # One markdown file per case study
//!     ├── checkout-rewrite.md       # → /work/checkout-rewrite
//!     ├── data-pipeline/
//!     │   └── index.md              # → /work/data-pipeline
//!     └── clients/
//!         └── acme-portal.md        # → /work/clients/acme-portal
//! ```
//!
//! ## Validation
//!
//! The scanner enforces these rules:
//! - Every work document has front matter with a non-blank `title` and `summary`
//! - No two work documents resolve to the same slug
//! - Slugs are URL-safe (no whitespace, `?` or `#`)
//! - No content page claims the `work` slug or another page's slug
//!
//! Hidden files and directories (leading `.`) are skipped, so editor swap
//! files and `.drafts/` never publish.

use crate::config::{self, SiteConfig};
use crate::frontmatter::{self, FrontMatterError};
use crate::naming::{self, WORK_ROOT};
use crate::ordering::compare_records;
use crate::types::{ContentRecord, Page};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("{}: {source}", path.display())]
    FrontMatter {
        path: PathBuf,
        source: FrontMatterError,
    },
    #[error("Cannot derive a slug from {0}")]
    EmptySlug(PathBuf),
    #[error("Slug `{slug}` from {} is not URL-safe", path.display())]
    InvalidSlug { slug: String, path: PathBuf },
    #[error("Duplicate slug `{slug}`: {first} and {second}")]
    DuplicateSlug {
        slug: String,
        first: String,
        second: String,
    },
    #[error("Page slug `{0}` is already taken")]
    DuplicatePageSlug(String),
}

/// Manifest output from the scan stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Work records in display order.
    pub records: Vec<ContentRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pages: Vec<Page>,
    pub config: SiteConfig,
}

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let config = config::load_config(root)?;
    let records = scan_work(root)?;
    let pages = parse_pages(root)?;

    info!(
        "scanned {} work records and {} pages",
        records.len(),
        pages.len()
    );

    Ok(Manifest {
        records,
        pages,
        config,
    })
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("md"))
        .unwrap_or(false)
}

/// Load every work document under `work/`, sorted for display.
fn scan_work(root: &Path) -> Result<Vec<ContentRecord>, ScanError> {
    let work_dir = root.join(WORK_ROOT);
    if !work_dir.is_dir() {
        debug!("no {} directory, skipping work records", work_dir.display());
        return Ok(Vec::new());
    }

    let mut records = Vec::new();
    let mut seen: BTreeMap<String, String> = BTreeMap::new();

    let walker = WalkDir::new(&work_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e));

    for entry in walker {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() || !is_markdown(path) {
            continue;
        }

        let rel = path.strip_prefix(&work_dir).unwrap_or(path);
        let record = load_record(path, rel)?;

        if let Some(first) = seen.insert(record.slug.clone(), record.id.clone()) {
            return Err(ScanError::DuplicateSlug {
                slug: record.slug,
                first,
                second: record.id,
            });
        }
        debug!("{} → {}", record.id, record.permalink);
        records.push(record);
    }

    records.sort_by(compare_records);
    Ok(records)
}

fn load_record(path: &Path, rel: &Path) -> Result<ContentRecord, ScanError> {
    let slug = naming::derive_slug(rel).ok_or_else(|| ScanError::EmptySlug(path.to_path_buf()))?;
    if slug
        .chars()
        .any(|c| c.is_whitespace() || c == '?' || c == '#')
    {
        return Err(ScanError::InvalidSlug {
            slug,
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    let (fm, body) = frontmatter::parse_work(&content).map_err(|source| {
        ScanError::FrontMatter {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let rel_id = rel.to_string_lossy().replace('\\', "/");
    Ok(ContentRecord {
        id: format!("{WORK_ROOT}/{rel_id}"),
        title: fm.title,
        permalink: naming::permalink(&slug),
        slug,
        summary: Some(fm.summary),
        tags: fm.tags,
        featured: fm.featured,
        order: fm.order,
        date: fm.date,
        cover: fm.cover,
        body: body.to_string(),
    })
}

/// Parse all markdown files in the root directory into pages.
///
/// Each `.md` file becomes a page. Numbered files (`NNN-name.md`) appear in
/// navigation sorted by number; unnumbered files are generated but hidden.
fn parse_pages(root: &Path) -> Result<Vec<Page>, ScanError> {
    let mut md_files: Vec<PathBuf> = fs::read_dir(root)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && is_markdown(p))
        .filter(|p| {
            !p.file_name()
                .map(|n| n.to_string_lossy().starts_with('.'))
                .unwrap_or(true)
        })
        .collect();

    md_files.sort();

    let mut pages: Vec<Page> = Vec::new();
    for md_path in &md_files {
        let stem = md_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let parsed = naming::parse_entry_name(&stem);

        let slug = if parsed.name.is_empty() {
            stem.clone()
        } else {
            parsed.name.clone()
        };
        let link_title = if parsed.display_title.is_empty() {
            slug.replace('-', " ")
        } else {
            parsed.display_title
        };

        if slug == WORK_ROOT || pages.iter().any(|p| p.slug == slug) {
            return Err(ScanError::DuplicatePageSlug(slug));
        }

        let content = fs::read_to_string(md_path)?;
        let (fm, body) =
            frontmatter::parse_page(&content).map_err(|source| ScanError::FrontMatter {
                path: md_path.clone(),
                source,
            })?;

        let title = fm
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .or_else(|| {
                body.lines()
                    .find(|line| line.starts_with("# "))
                    .map(|line| line.trim_start_matches("# ").trim().to_string())
            })
            .unwrap_or_else(|| link_title.clone());

        pages.push(Page {
            title,
            link_title,
            slug,
            body: body.to_string(),
            in_nav: parsed.number.is_some(),
            sort_key: parsed.number.unwrap_or(u32::MAX),
            description: fm.description,
            source: md_path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
        });
    }

    pages.sort_by(|a, b| a.sort_key.cmp(&b.sort_key).then_with(|| a.slug.cmp(&b.slug)));
    Ok(pages)
}
