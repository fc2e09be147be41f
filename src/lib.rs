//! # Simple Folio
//!
//! A static site generator for work portfolios. Case studies live as markdown
//! files with YAML front matter; the generator turns them into a landing
//! page, a work index, one page per case study, and a handful of content pages.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan      content/  →  manifest.json    (filesystem → structured data)
//! 2. Generate  manifest  →  dist/            (final HTML site)
//! ```
//!
//! The manifest is human-readable JSON, so a scan can be inspected before
//! anything is rendered, and generation can be tested from hand-built
//! manifests without touching a content tree.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: walks `work/` and top-level pages, validates, produces the manifest |
//! | [`generate`] | Stage 2: renders every page with Maud and writes the site |
//! | [`ordering`] | Display order of work records: coercion, sorting, featured split, top-N, tag clamping |
//! | [`frontmatter`] | YAML front matter splitting and validation |
//! | [`markdown`] | Markdown to HTML with heading anchors and copyable code blocks |
//! | [`seo`] | Titles, Open Graph tags, `sitemap.xml`, `robots.txt` |
//! | [`social`] | The 1200×630 `opengraph-image.png` |
//! | [`cache`] | Content-hash render cache so unchanged files are not rewritten |
//! | [`config`] | `config.toml` loading, validation, merging, and color CSS generation |
//! | [`types`] | Shared types serialized in the manifest (`ContentRecord`, `Page`) |
//! | [`naming`] | `NNN-name` page convention, slug and permalink derivation |
//! | [`output`] | CLI output formatting for both stages |
//!
//! # Design Decisions
//!
//! ## One Ordering, Computed Once
//!
//! Records are ordered by `order` (missing or non-numeric sorts last), then
//! title with natural number handling (`Item 2` before `Item 10`), then slug,
//! then id. The comparison is a total order, so builds are deterministic
//! regardless of filesystem iteration order. Each build derives the featured
//! and non-featured views once and every page reads from them.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time HTML
//! macro system. Templates are Rust expressions, malformed markup is a build
//! error, and all interpolation is auto-escaped.
//!
//! ## Plain Output
//!
//! The generated site is static HTML with inlined CSS and a small script for
//! the theme toggle, code copy buttons and the mobile menu. It can be served
//! from any file server.

pub mod cache;
pub mod config;
pub mod frontmatter;
pub mod generate;
pub mod markdown;
pub mod naming;
pub mod ordering;
pub mod output;
pub mod scan;
pub mod seo;
pub mod social;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
