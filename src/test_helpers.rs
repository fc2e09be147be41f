//! Shared test utilities for the simple-folio test suite.
//!
//! Provides fixture setup, lookup helpers and bulk extractors that work with
//! scan-phase data structures (`Manifest`, `ContentRecord`, `Page`).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path()).unwrap();
//!
//! let record = find_record(&manifest, "checkout-rewrite");
//! assert!(record.featured);
//! assert_eq!(record_titles(&manifest)[0], "Checkout rewrite");
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::scan::Manifest;
use crate::types::{ContentRecord, Page};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Read a generated file relative to an output directory. Panics if missing.
pub fn read_output(output: &Path, rel: &str) -> String {
    std::fs::read_to_string(output.join(rel))
        .unwrap_or_else(|e| panic!("cannot read output file '{rel}': {e}"))
}

// =========================================================================
// Manifest lookups, panicking with a clear message on miss
// =========================================================================

/// Find a work record by slug. Panics if not found.
pub fn find_record<'a>(manifest: &'a Manifest, slug: &str) -> &'a ContentRecord {
    manifest
        .records
        .iter()
        .find(|r| r.slug == slug)
        .unwrap_or_else(|| {
            let slugs: Vec<&str> = manifest.records.iter().map(|r| r.slug.as_str()).collect();
            panic!("record '{slug}' not found. Available: {slugs:?}")
        })
}

/// Find a page by slug. Panics if not found.
pub fn find_page<'a>(manifest: &'a Manifest, slug: &str) -> &'a Page {
    manifest
        .pages
        .iter()
        .find(|p| p.slug == slug)
        .unwrap_or_else(|| {
            let slugs: Vec<&str> = manifest.pages.iter().map(|p| p.slug.as_str()).collect();
            panic!("page '{slug}' not found. Available: {slugs:?}")
        })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// All record titles in manifest order.
pub fn record_titles(manifest: &Manifest) -> Vec<&str> {
    manifest.records.iter().map(|r| r.title.as_str()).collect()
}
