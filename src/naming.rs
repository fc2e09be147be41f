//! Names, slugs and permalinks derived from source locations.
//!
//! Two conventions meet here:
//!
//! - **Content pages** in the content root use the `NNN-name` convention:
//!   `020-who-am-i.md` is page number 20 with slug `who-am-i` and nav label
//!   "who am i". Unnumbered pages are generated but left out of navigation.
//! - **Work documents** under `work/` take their slug from their path:
//!   `work/clients/acme.md` → `clients/acme`, `work/acme/index.md` → `acme`.

use std::path::{Component, Path};

/// URL prefix under which every work record is published.
pub const WORK_ROOT: &str = "work";

/// Result of parsing a numbered entry name like `020-who-am-i`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Number prefix if present (e.g., `20` from `020-who-am-i`)
    pub number: Option<u32>,
    /// Raw name part after `NNN-`, dashes preserved. Empty if number-only.
    /// For unnumbered entries, this is the full input.
    pub name: String,
    /// Display title: name with dashes converted to spaces.
    pub display_title: String,
}

/// Parse an entry name following the `NNN-name` convention.
///
/// - `"020-who-am-i"` → number=Some(20), name="who-am-i", display_title="who am i"
/// - `"010-about"` → number=Some(10), name="about", display_title="about"
/// - `"001"` → number=Some(1), name="", display_title=""
/// - `"notes"` → number=None, name="notes", display_title="notes"
pub fn parse_entry_name(name: &str) -> ParsedName {
    if let Some((prefix, rest)) = name.split_once('-')
        && let Ok(num) = prefix.parse::<u32>()
    {
        return ParsedName {
            number: Some(num),
            name: rest.to_string(),
            display_title: rest.replace('-', " "),
        };
    }
    if let Ok(num) = name.parse::<u32>() {
        return ParsedName {
            number: Some(num),
            name: String::new(),
            display_title: String::new(),
        };
    }
    ParsedName {
        number: None,
        name: name.to_string(),
        display_title: name.replace('-', " "),
    }
}

/// Derive a work slug from a path relative to the `work/` directory.
///
/// The extension is dropped, a trailing `index` collapses into its parent
/// directory, and separators are normalised to `/` on every platform.
///
/// Returns `None` when nothing is left (e.g. `work/index.md` itself).
pub fn derive_slug(rel_path: &Path) -> Option<String> {
    let without_ext = rel_path.with_extension("");
    let mut segments: Vec<String> = without_ext
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().replace('\\', "/")),
            _ => None,
        })
        .flat_map(|s| {
            s.split('/')
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect();

    if segments.last().is_some_and(|s| s == "index") {
        segments.pop();
    }
    if segments.is_empty() {
        None
    } else {
        Some(segments.join("/"))
    }
}

/// Site-absolute URL path of a work record.
pub fn permalink(slug: &str) -> String {
    format!("/{WORK_ROOT}/{slug}")
}

/// Lowercase ASCII slug for anchors: alphanumeric runs joined by single dashes.
///
/// `"Ramp-up → Ship loop"` → `"ramp-up-ship-loop"`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn numbered_with_multi_word_name() {
        let p = parse_entry_name("020-who-am-i");
        assert_eq!(p.number, Some(20));
        assert_eq!(p.name, "who-am-i");
        assert_eq!(p.display_title, "who am i");
    }

    #[test]
    fn number_only_no_dash() {
        let p = parse_entry_name("001");
        assert_eq!(p.number, Some(1));
        assert_eq!(p.name, "");
        assert_eq!(p.display_title, "");
    }

    #[test]
    fn number_with_trailing_dash() {
        let p = parse_entry_name("001-");
        assert_eq!(p.number, Some(1));
        assert_eq!(p.name, "");
    }

    #[test]
    fn unnumbered_with_dashes() {
        let p = parse_entry_name("side-notes");
        assert_eq!(p.number, None);
        assert_eq!(p.name, "side-notes");
        assert_eq!(p.display_title, "side notes");
    }

    #[test]
    fn zero_prefix() {
        let p = parse_entry_name("000-home-notes");
        assert_eq!(p.number, Some(0));
        assert_eq!(p.display_title, "home notes");
    }

    // =========================================================================
    // derive_slug / permalink
    // =========================================================================

    #[test]
    fn slug_from_flat_file() {
        assert_eq!(derive_slug(Path::new("alpha.md")).as_deref(), Some("alpha"));
    }

    #[test]
    fn slug_from_nested_file() {
        assert_eq!(
            derive_slug(Path::new("clients/acme-portal.md")).as_deref(),
            Some("clients/acme-portal")
        );
    }

    #[test]
    fn slug_index_collapses_to_directory() {
        assert_eq!(
            derive_slug(Path::new("acme/index.md")).as_deref(),
            Some("acme")
        );
    }

    #[test]
    fn slug_root_index_is_none() {
        assert_eq!(derive_slug(Path::new("index.md")), None);
    }

    #[test]
    fn slug_normalises_backslashes() {
        let path = PathBuf::from("clients\\acme.md");
        assert_eq!(derive_slug(&path).as_deref(), Some("clients/acme"));
    }

    #[test]
    fn permalink_prefixes_work() {
        assert_eq!(permalink("clients/acme"), "/work/clients/acme");
    }

    // =========================================================================
    // slugify
    // =========================================================================

    #[test]
    fn slugify_collapses_punctuation() {
        assert_eq!(slugify("Ramp-up → Ship loop"), "ramp-up-ship-loop");
    }

    #[test]
    fn slugify_trims_edges() {
        assert_eq!(slugify("  Hello, World!  "), "hello-world");
    }

    #[test]
    fn slugify_empty_for_symbols_only() {
        assert_eq!(slugify("→ ✓"), "");
    }
}
