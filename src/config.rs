//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! the base layer; a sparse `config.toml` in the content root overrides just
//! the keys it names.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown by `simple-folio gen-config`
//!
//! assets_dir = "assets"        # Copied verbatim to the output root
//!
//! [site]
//! name = "Your Name"
//! title = "Your Name · Portfolio"   # <title> when a page has none of its own
//! description = "..."
//! base_url = "https://example.com"  # Absolute URLs in sitemap, robots, meta tags
//! lang = "en"
//! theme_color = "#0ea5e9"
//!
//! [home]
//! headline = "..."
//! intro = "..."
//! featured_count = 3           # Featured cards on the landing page
//!
//! [[home.highlights]]
//! title = "..."
//! description = "..."
//!
//! [work]
//! heading = "Case studies & shipped projects"
//! featured_tag_limit = 6       # Tags on a featured card before "+N"
//! row_tag_limit = 4            # Tags on a compact row card before "+N"
//!
//! [contact]
//! email = ""                   # Empty = row hidden
//! phone_display = ""
//! phone_tel = ""
//!
//! [colors.light]               # [colors.dark] takes the same keys
//! background = "#ffffff"
//! accent = "#0ea5e9"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Directory (relative to the content root) copied to the output root.
    pub assets_dir: String,
    /// Identity and SEO defaults.
    pub site: SiteMeta,
    /// Landing page copy and featured grid size.
    pub home: HomeConfig,
    /// Work index copy and card tag limits.
    pub work: WorkConfig,
    /// Contact details shown on the `contact` page.
    pub contact: ContactConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            assets_dir: "assets".to_string(),
            site: SiteMeta::default(),
            home: HomeConfig::default(),
            work: WorkConfig::default(),
            contact: ContactConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.name.trim().is_empty() {
            return Err(ConfigError::Validation("site.name must not be empty".into()));
        }
        if !(self.site.base_url.starts_with("http://") || self.site.base_url.starts_with("https://"))
        {
            return Err(ConfigError::Validation(format!(
                "site.base_url must be an absolute http(s) URL, got `{}`",
                self.site.base_url
            )));
        }
        if self.home.featured_count == 0 {
            return Err(ConfigError::Validation(
                "home.featured_count must be at least 1".into(),
            ));
        }
        if self.work.featured_tag_limit == 0 || self.work.row_tag_limit == 0 {
            return Err(ConfigError::Validation(
                "work tag limits must be at least 1".into(),
            ));
        }
        for (mode, scheme) in [("light", &self.colors.light), ("dark", &self.colors.dark)] {
            if parse_hex_color(&scheme.accent).is_none() {
                return Err(ConfigError::Validation(format!(
                    "colors.{mode}.accent must be a #rgb or #rrggbb hex color"
                )));
            }
            if scheme.fields().iter().any(|(_, v)| v.trim().is_empty()) {
                return Err(ConfigError::Validation(format!(
                    "colors.{mode} values must not be empty"
                )));
            }
        }
        Ok(())
    }
}

/// Identity and SEO defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteMeta {
    /// Person or studio name: header brand, title suffix, footer.
    pub name: String,
    /// Title used when a page has none of its own.
    pub title: String,
    /// Default meta description.
    pub description: String,
    /// Absolute origin, without trailing slash after loading.
    pub base_url: String,
    /// `<html lang>` value.
    pub lang: String,
    /// `<meta name="theme-color">` value.
    pub theme_color: String,
    /// Short line under the name on the social preview and 404 page.
    pub tagline: String,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            name: "Your Name".to_string(),
            title: "Your Name · Portfolio".to_string(),
            description: "Clean, fast, outcome-driven portfolio of shipped work.".to_string(),
            base_url: "https://example.com".to_string(),
            lang: "en".to_string(),
            theme_color: "#0ea5e9".to_string(),
            tagline: "Tool-agnostic • Quick learner • Outcome-first delivery".to_string(),
        }
    }
}

/// One highlight tile on the landing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Highlight {
    pub title: String,
    pub description: String,
}

/// Landing page settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HomeConfig {
    pub headline: String,
    pub intro: String,
    /// How many featured records the landing grid shows.
    pub featured_count: usize,
    pub highlights: Vec<Highlight>,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            headline: "Adaptable full-stack engineer. Fast learner. Outcome-first.".to_string(),
            intro: "I build clean, fast products across web stacks and keep the focus on results."
                .to_string(),
            featured_count: 3,
            highlights: vec![
                Highlight {
                    title: "Quick-learning & Adaptability".to_string(),
                    description: "Comfortable moving between stacks when the work needs it."
                        .to_string(),
                },
                Highlight {
                    title: "Full-stack + DevOps".to_string(),
                    description: "API design, SQL, containerised deployments, CI/CD.".to_string(),
                },
                Highlight {
                    title: "Quality & Automation".to_string(),
                    description: "Pragmatic testing and scripting, reliable releases.".to_string(),
                },
            ],
        }
    }
}

/// Work index settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkConfig {
    pub heading: String,
    pub intro: String,
    /// Tags shown on a featured card before the `+N` badge.
    pub featured_tag_limit: usize,
    /// Tags shown on a compact row card before the `+N` badge.
    pub row_tag_limit: usize,
    /// Badges under the work index heading.
    pub badges: Vec<String>,
}

impl Default for WorkConfig {
    fn default() -> Self {
        Self {
            heading: "Case studies & shipped projects".to_string(),
            intro: "Outcome-first case studies: how I ramp into real systems and ship safe improvements."
                .to_string(),
            featured_tag_limit: 6,
            row_tag_limit: 4,
            badges: vec![
                "Tool-agnostic".to_string(),
                "Fast ramp-up".to_string(),
                "Bug fixes → features → automation".to_string(),
            ],
        }
    }
}

/// Contact details. Empty strings hide the corresponding row or link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    pub email: String,
    /// Human-readable phone number.
    pub phone_display: String,
    /// Dialable phone number for the `tel:` link.
    pub phone_tel: String,
    /// Pre-filled `mailto:` subject.
    pub subject: String,
    /// Pre-filled `mailto:` body.
    pub body_template: String,
    pub location: String,
    /// Site path of a resume file, e.g. `/resume.pdf`.
    pub resume: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            email: String::new(),
            phone_display: String::new(),
            phone_tel: String::new(),
            subject: "Portfolio inquiry".to_string(),
            body_template: "Hi,\n\nContext:\nStack:\nWhat success looks like:\n".to_string(),
            location: String::new(),
            resume: String::new(),
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light mode color scheme.
    pub light: ColorScheme,
    /// Dark mode color scheme.
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Secondary text: eyebrows, summaries, footer.
    pub text_muted: String,
    pub border: String,
    /// Links, focus rings, icons, social preview glow.
    pub accent: String,
    /// Card surface.
    pub card: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#0a0a0a".to_string(),
            text_muted: "#525252".to_string(),
            border: "#e5e5e5".to_string(),
            accent: "#0ea5e9".to_string(),
            card: "#fafafa".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0b0b0b".to_string(),
            text: "#f5f5f5".to_string(),
            text_muted: "#a3a3a3".to_string(),
            border: "#262626".to_string(),
            accent: "#38bdf8".to_string(),
            card: "#141414".to_string(),
        }
    }

    /// CSS variable suffix paired with each value.
    fn fields(&self) -> [(&'static str, &str); 6] {
        [
            ("bg", &self.background),
            ("text", &self.text),
            ("text-muted", &self.text_muted),
            ("border", &self.border),
            ("accent", &self.accent),
            ("card", &self.card),
        ]
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values (including arrays) in overlay replace base values.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize, normalise
/// and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let mut config: SiteConfig = merged.try_into()?;
    config.site.base_url = config.site.base_url.trim_end_matches('/').to_string();
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the content root.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let overlay = load_raw_config(root)?;
    if overlay.is_some() {
        log::debug!("loaded {}", root.join("config.toml").display());
    }
    resolve_config(stock_defaults_value(), overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command. Parsing it yields
/// [`SiteConfig::default`].
pub fn stock_config_toml() -> &'static str {
    r##"# Simple Folio Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Place this file at content/config.toml.
# Unknown keys will cause an error.

# Directory (inside the content root) copied verbatim to the output root.
# Put favicon.ico, resume.pdf, profile photos and cover images here.
assets_dir = "assets"

# ---------------------------------------------------------------------------
# Site identity and SEO defaults
# ---------------------------------------------------------------------------
[site]
name = "Your Name"
# <title> for pages without their own; other pages use "Page | name".
title = "Your Name · Portfolio"
description = "Clean, fast, outcome-driven portfolio of shipped work."
# Absolute origin used in sitemap.xml, robots.txt and social meta tags.
base_url = "https://example.com"
lang = "en"
theme_color = "#0ea5e9"
tagline = "Tool-agnostic • Quick learner • Outcome-first delivery"

# ---------------------------------------------------------------------------
# Landing page
# ---------------------------------------------------------------------------
[home]
headline = "Adaptable full-stack engineer. Fast learner. Outcome-first."
intro = "I build clean, fast products across web stacks and keep the focus on results."
# Number of featured case studies in the landing grid (first one is large).
featured_count = 3

[[home.highlights]]
title = "Quick-learning & Adaptability"
description = "Comfortable moving between stacks when the work needs it."

[[home.highlights]]
title = "Full-stack + DevOps"
description = "API design, SQL, containerised deployments, CI/CD."

[[home.highlights]]
title = "Quality & Automation"
description = "Pragmatic testing and scripting, reliable releases."

# ---------------------------------------------------------------------------
# Work index
# ---------------------------------------------------------------------------
[work]
heading = "Case studies & shipped projects"
intro = "Outcome-first case studies: how I ramp into real systems and ship safe improvements."
# Tags shown on cards before collapsing the rest into a "+N" badge.
featured_tag_limit = 6
row_tag_limit = 4
badges = ["Tool-agnostic", "Fast ramp-up", "Bug fixes → features → automation"]

# ---------------------------------------------------------------------------
# Contact page (rendered for a page with slug "contact", e.g. 030-contact.md)
# Empty values hide the corresponding row or link.
# ---------------------------------------------------------------------------
[contact]
email = ""
phone_display = ""
phone_tel = ""
subject = "Portfolio inquiry"
body_template = "Hi,\n\nContext:\nStack:\nWhat success looks like:\n"
location = ""
resume = ""

# ---------------------------------------------------------------------------
# Colors - Light mode
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#0a0a0a"
text_muted = "#525252"
border = "#e5e5e5"
accent = "#0ea5e9"
card = "#fafafa"

# ---------------------------------------------------------------------------
# Colors - Dark mode (used when the visitor picks dark, or the OS prefers it)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0b0b0b"
text = "#f5f5f5"
text_muted = "#a3a3a3"
border = "#262626"
accent = "#38bdf8"
card = "#141414"
"##
}

/// Parse `#rgb` or `#rrggbb` into RGB bytes.
pub fn parse_hex_color(value: &str) -> Option<[u8; 3]> {
    let hex = value.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                rgb[i] = channel(&c.to_string().repeat(2))?;
            }
            Some(rgb)
        }
        6 => Some([
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        ]),
        _ => None,
    }
}

fn scheme_vars(scheme: &ColorScheme, indent: &str) -> String {
    scheme
        .fields()
        .iter()
        .map(|(name, value)| format!("{indent}--color-{name}: {value};"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Generate CSS custom properties from color config.
///
/// An explicit `data-theme` on `<html>` (set by the theme toggle) wins;
/// without one the OS preference decides.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    color-scheme: light;
{light}
}}

:root[data-theme="dark"] {{
    color-scheme: dark;
{dark}
}}

@media (prefers-color-scheme: dark) {{
    :root:not([data-theme="light"]) {{
        color-scheme: dark;
{dark_nested}
    }}
}}"#,
        light = scheme_vars(&colors.light, "    "),
        dark = scheme_vars(&colors.dark, "    "),
        dark_nested = scheme_vars(&colors.dark, "        "),
    )
}
