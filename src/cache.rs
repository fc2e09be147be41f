//! Render cache for incremental builds.
//!
//! Rendering a page is cheap; rewriting an unchanged file is not free for
//! what comes after a build (rsync, CDN uploads, file watchers). This module
//! lets the generate stage skip writes whose bytes are identical to the last
//! build and remove files that a previous build produced but this one did not
//! (a deleted case study, a renamed page).
//!
//! ## Cache keys
//!
//! Entries map an output path (relative to the output directory, always with
//! `/` separators) to the SHA-256 of the bytes last written there. A write is
//! skipped when:
//! 1. The entry's hash matches the new content's hash
//! 2. The file is still on disk
//!
//! ## Storage
//!
//! The manifest is a JSON file at `<output_dir>/.render-cache.json`, so it
//! travels with the output directory when cached in CI.
//!
//! ## Bypassing the cache
//!
//! Pass `--no-cache` to `build` or `generate` to start from an empty manifest.
//! Every file is rewritten, and nothing from earlier builds is pruned.

use log::debug;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Name of the cache manifest file within the output directory.
const MANIFEST_FILENAME: &str = ".render-cache.json";

/// Version of the cache manifest format. Bump this to invalidate all
/// existing caches when the format or key computation changes.
const MANIFEST_VERSION: u32 = 1;

/// On-disk manifest mapping output paths to content hashes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderCache {
    pub version: u32,
    pub entries: BTreeMap<String, String>,
    /// Paths written or confirmed during this run. Never serialized.
    #[serde(skip)]
    touched: BTreeSet<String>,
}

impl RenderCache {
    /// Create an empty manifest (used for `--no-cache` or first build).
    pub fn empty() -> Self {
        Self {
            version: MANIFEST_VERSION,
            entries: BTreeMap::new(),
            touched: BTreeSet::new(),
        }
    }

    /// Load from the output directory. Returns an empty manifest if the
    /// file doesn't exist or can't be parsed (version mismatch, corruption).
    pub fn load(output_dir: &Path) -> Self {
        let path = manifest_path(output_dir);
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(_) => return Self::empty(),
        };
        let manifest: Self = match serde_json::from_str(&content) {
            Ok(m) => m,
            Err(e) => {
                debug!("ignoring unreadable {}: {e}", path.display());
                return Self::empty();
            }
        };
        if manifest.version != MANIFEST_VERSION {
            return Self::empty();
        }
        manifest
    }

    /// Save to the output directory.
    pub fn save(&self, output_dir: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(manifest_path(output_dir), json)
    }

    /// Write `bytes` to `output_dir/rel` unless the last build wrote the same
    /// bytes there. Returns whether the file was written.
    pub fn write_if_changed(
        &mut self,
        output_dir: &Path,
        rel: &str,
        bytes: &[u8],
        stats: &mut CacheStats,
    ) -> io::Result<bool> {
        let rel = rel.trim_start_matches('/').to_string();
        let hash = hash_bytes(bytes);
        let path = output_dir.join(&rel);
        self.touched.insert(rel.clone());

        if self.entries.get(&rel) == Some(&hash) && path.exists() {
            stats.unchanged();
            return Ok(false);
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, bytes)?;
        self.entries.insert(rel, hash);
        stats.written();
        Ok(true)
    }

    /// Delete files recorded by an earlier build that this build did not
    /// produce, and forget them.
    pub fn prune(&mut self, output_dir: &Path, stats: &mut CacheStats) -> io::Result<()> {
        let stale: Vec<String> = self
            .entries
            .keys()
            .filter(|k| !self.touched.contains(*k))
            .cloned()
            .collect();
        for rel in stale {
            let path = output_dir.join(&rel);
            if path.exists() {
                fs::remove_file(&path)?;
                remove_empty_parents(&path, output_dir);
            }
            debug!("pruned {rel}");
            self.entries.remove(&rel);
            stats.removed();
        }
        Ok(())
    }
}

/// Remove now-empty directories between `path` and `root` (exclusive).
fn remove_empty_parents(path: &Path, root: &Path) {
    let mut dir = path.parent();
    while let Some(d) = dir {
        if d == root || !d.starts_with(root) {
            break;
        }
        // fails on non-empty directories, which ends the walk
        if fs::remove_dir(d).is_err() {
            break;
        }
        dir = d.parent();
    }
}

/// SHA-256 of a byte slice, returned as a hex string.
pub fn hash_bytes(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Summary of cache performance for a build run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CacheStats {
    pub unchanged: u32,
    pub written: u32,
    pub removed: u32,
}

impl CacheStats {
    pub fn unchanged(&mut self) {
        self.unchanged += 1;
    }

    pub fn written(&mut self) {
        self.written += 1;
    }

    pub fn removed(&mut self) {
        self.removed += 1;
    }

    pub fn total(&self) -> u32 {
        self.unchanged + self.written
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unchanged > 0 {
            write!(
                f,
                "{} unchanged, {} written ({} total)",
                self.unchanged,
                self.written,
                self.total()
            )?;
        } else {
            write!(f, "{} written", self.written)?;
        }
        if self.removed > 0 {
            write!(f, ", {} removed", self.removed)?;
        }
        Ok(())
    }
}

/// Resolve the cache manifest path for an output directory.
pub fn manifest_path(output_dir: &Path) -> PathBuf {
    output_dir.join(MANIFEST_FILENAME)
}
