//! HTML site generation.
//!
//! Stage 2 of the Simple Folio build pipeline. Takes the scan manifest and
//! generates the final static site.
//!
//! ## Generated Pages
//!
//! - **Home** (`/index.html`): Hero, highlights and the featured grid
//! - **Work index** (`/work/index.html`): Featured cards, then every other project
//! - **Case studies** (`/work/{slug}/index.html`): One page per work record
//! - **Content pages** (`/{slug}/index.html`): Markdown pages; `contact` gets
//!   the contact card
//! - **Not found** (`/404.html`)
//!
//! Alongside the HTML: `sitemap.xml`, `robots.txt`, `opengraph-image.png` and
//! everything under the configured assets directory, copied verbatim.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── 404.html
//! ├── sitemap.xml
//! ├── robots.txt
//! ├── opengraph-image.png
//! ├── .render-cache.json          # see crate::cache
//! ├── favicon.svg                 # from assets/
//! ├── about/index.html
//! └── work/
//!     ├── index.html
//!     ├── checkout-rewrite/index.html
//!     └── clients/acme-portal/index.html
//! ```
//!
//! ## Ordering
//!
//! Views are derived once per build with [`WorkViews`]: featured and
//! non-featured records, each in display order. Every page reads from that
//! snapshot, so the home grid, the work index and the sitemap always agree.
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: Base styles (colors injected from config)
//! - `static/theme-init.js`: Applies the saved theme before first paint
//! - `static/site.js`: Theme cycling, code copy buttons, mobile menu
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::cache::{CacheStats, RenderCache};
use crate::config::{self, ConfigError, ContactConfig, SiteConfig};
use crate::markdown::{self, Heading};
use crate::naming::WORK_ROOT;
use crate::ordering::{WorkViews, clamp_tags};
use crate::scan::Manifest;
use crate::seo::{self, PageMeta};
use crate::social::{self, SocialCard};
use crate::types::{ContentRecord, Page};
use chrono::{Datelike, NaiveDate, Utc};
use log::{debug, info, warn};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Font error: {0}")]
    Font(#[from] ab_glyph::InvalidFont),
    #[error("Asset walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/site.js");
const THEME_INIT_JS: &str = include_str!("../static/theme-init.js");

/// Page slug that renders the contact card.
pub const CONTACT_SLUG: &str = "contact";

/// Tags on the large landing card and on the smaller ones beside it.
const HOME_LEAD_TAGS: usize = 8;
const HOME_SIDE_TAGS: usize = 4;

/// Meta description length for pages without one.
const EXCERPT_CHARS: usize = 160;

const FAVICON_CANDIDATES: &[&str] = &["favicon.svg", "favicon.ico", "favicon.png"];

const ICON_MOON: &str = r#"<svg viewBox="0 0 24 24" width="18" height="18" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true"><path d="M12 3a6 6 0 0 0 9 9 9 9 0 1 1-9-9Z"/></svg>"#;
const ICON_SUN: &str = r#"<svg viewBox="0 0 24 24" width="18" height="18" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true"><circle cx="12" cy="12" r="4"/><path d="M12 2v2M12 20v2M4.93 4.93l1.41 1.41M17.66 17.66l1.41 1.41M2 12h2M20 12h2M6.34 17.66l-1.41 1.41M19.07 4.93l-1.41 1.41"/></svg>"#;
const ICON_MONITOR: &str = r#"<svg viewBox="0 0 24 24" width="18" height="18" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true"><rect x="2" y="3" width="20" height="14" rx="2"/><path d="M8 21h8M12 17v4"/></svg>"#;
const ICON_MENU: &str = r#"<svg viewBox="0 0 24 24" width="18" height="18" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" aria-hidden="true"><path d="M4 6h16M4 12h16M4 18h16"/></svg>"#;

/// One file produced by a generate run.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFile {
    /// Path relative to the output directory.
    pub path: String,
    /// `false` when the render cache found identical bytes already on disk.
    pub written: bool,
}

/// What a generate run produced.
#[derive(Debug, Clone, Default)]
pub struct GenerateReport {
    pub files: Vec<GeneratedFile>,
    /// How many of `files` came from the assets directory.
    pub assets: usize,
    pub stats: CacheStats,
}

/// Generate the site from a manifest written by the scan stage.
pub fn generate(
    manifest_path: &Path,
    source_root: &Path,
    output_dir: &Path,
    use_cache: bool,
) -> Result<GenerateReport, GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&manifest_content)?;
    generate_site(
        &manifest,
        source_root,
        output_dir,
        use_cache,
        Utc::now().date_naive(),
    )
}

/// Render every output for `manifest` and write it under `output_dir`.
///
/// `build_date` feeds the footer year and sitemap `lastmod` fallbacks.
pub fn generate_site(
    manifest: &Manifest,
    source_root: &Path,
    output_dir: &Path,
    use_cache: bool,
    build_date: NaiveDate,
) -> Result<GenerateReport, GenerateError> {
    let config = &manifest.config;
    config.validate()?;
    let accent = config::parse_hex_color(&config.colors.dark.accent).ok_or_else(|| {
        ConfigError::Validation("colors.dark.accent must be a hex color".to_string())
    })?;

    let assets_dir = source_root.join(&config.assets_dir);
    let site = SiteContext::new(manifest, build_date, &assets_dir);
    let views = WorkViews::new(&manifest.records);

    let mut outputs: BTreeMap<String, Vec<u8>> = BTreeMap::new();
    outputs.insert("index.html".into(), render_home(&site, &views).into_string().into_bytes());
    outputs.insert(
        format!("{WORK_ROOT}/index.html"),
        render_work_index(&site, &views).into_string().into_bytes(),
    );

    let details: Vec<(String, Vec<u8>)> = manifest
        .records
        .par_iter()
        .map(|record| {
            (
                format!("{WORK_ROOT}/{}/index.html", record.slug),
                render_work_detail(&site, record).into_string().into_bytes(),
            )
        })
        .collect();
    outputs.extend(details);

    for page in &manifest.pages {
        outputs.insert(
            format!("{}/index.html", page.slug),
            render_page(&site, page).into_string().into_bytes(),
        );
    }

    outputs.insert("404.html".into(), render_not_found(&site).into_string().into_bytes());
    outputs.insert(
        "sitemap.xml".into(),
        seo::sitemap_xml(&config.site, &manifest.records, &manifest.pages, build_date).into_bytes(),
    );
    outputs.insert("robots.txt".into(), seo::robots_txt(&config.site).into_bytes());

    let social_tags = views
        .featured
        .first()
        .map(|r| r.tags.clone())
        .unwrap_or_else(|| config.work.badges.clone());
    let og = social::render_social_image(&SocialCard {
        accent,
        name: &config.site.name,
        headline: &config.home.headline,
        tagline: &config.site.tagline,
        tags: &social_tags,
    })?;
    outputs.insert(
        seo::OG_IMAGE_PATH.trim_start_matches('/').to_string(),
        social::encode_png(&og)?,
    );

    let assets = collect_assets(&assets_dir, &mut outputs)?;

    fs::create_dir_all(output_dir)?;
    let mut cache = if use_cache {
        RenderCache::load(output_dir)
    } else {
        RenderCache::empty()
    };
    let mut stats = CacheStats::default();
    let mut files = Vec::with_capacity(outputs.len());
    for (rel, bytes) in &outputs {
        let written = cache.write_if_changed(output_dir, rel, bytes, &mut stats)?;
        if written {
            debug!("wrote {rel}");
        }
        files.push(GeneratedFile {
            path: rel.clone(),
            written,
        });
    }
    if use_cache {
        cache.prune(output_dir, &mut stats)?;
    }
    cache.save(output_dir)?;

    info!("site generated at {} ({stats})", output_dir.display());
    Ok(GenerateReport {
        files,
        assets,
        stats,
    })
}

/// Read every non-hidden file under `dir` into `outputs`, keyed by its path
/// relative to `dir`. Assets replace generated files of the same name.
fn collect_assets(
    dir: &Path,
    outputs: &mut BTreeMap<String, Vec<u8>>,
) -> Result<usize, GenerateError> {
    if !dir.is_dir() {
        debug!("no assets directory at {}", dir.display());
        return Ok(0);
    }

    let mut count = 0;
    let walker = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'));
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(dir)
            .unwrap_or(entry.path())
            .to_string_lossy()
            .replace('\\', "/");
        if outputs.contains_key(&rel) {
            warn!("asset {rel} replaces the generated file of the same name");
        }
        outputs.insert(rel, fs::read(entry.path())?);
        count += 1;
    }
    Ok(count)
}

// ============================================================================
// Shared render context
// ============================================================================

/// Everything every page needs, computed once per build.
struct SiteContext<'a> {
    config: &'a SiteConfig,
    /// Numbered pages, in nav order.
    nav_pages: Vec<&'a Page>,
    has_contact: bool,
    css: String,
    year: i32,
    favicon: Option<String>,
}

impl<'a> SiteContext<'a> {
    fn new(manifest: &'a Manifest, build_date: NaiveDate, assets_dir: &Path) -> Self {
        let color_css = config::generate_color_css(&manifest.config.colors);
        Self {
            config: &manifest.config,
            nav_pages: manifest.pages.iter().filter(|p| p.in_nav).collect(),
            has_contact: manifest.pages.iter().any(|p| p.slug == CONTACT_SLUG),
            css: format!("{color_css}\n\n{CSS_STATIC}"),
            year: build_date.year(),
            favicon: FAVICON_CANDIDATES
                .iter()
                .find(|name| assets_dir.join(name).is_file())
                .map(|name| format!("/{name}")),
        }
    }
}

fn page_path(page: &Page) -> String {
    format!("/{}", page.slug)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(site: &SiteContext, page_meta: &PageMeta, current: &str, content: Markup) -> Markup {
    let cfg = site.config;
    html! {
        (DOCTYPE)
        html lang=(cfg.site.lang) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                meta name="theme-color" content=(cfg.site.theme_color);
                (page_meta.head_tags(&cfg.site))
                @if let Some(icon) = &site.favicon {
                    link rel="icon" href=(icon);
                }
                script { (PreEscaped(THEME_INIT_JS)) }
                style { (PreEscaped(&site.css)) }
            }
            body {
                a.skip-link href="#main" { "Skip to content" }
                (site_header(site, current))
                main.page-transition id="main" {
                    (content)
                }
                (site_footer(site))
                script { (PreEscaped(JS)) }
            }
        }
    }
}

/// A nav entry, marked current for its own path and anything below it.
fn nav_link(href: &str, label: &str, current: &str) -> Markup {
    let active = current == href || current.starts_with(&format!("{href}/"));
    html! {
        li {
            a.nav-link href=(href) aria-current=[active.then_some("page")] { (label) }
        }
    }
}

/// Renders the sticky header: brand, nav, theme cycle, mobile menu toggle
fn site_header(site: &SiteContext, current: &str) -> Markup {
    html! {
        header.site-header {
            div.container {
                a.brand href="/" { (site.config.site.name) }
                nav.site-nav aria-label="Main" {
                    input.nav-toggle type="checkbox" id="nav-toggle";
                    div.nav-panel {
                        ul {
                            (nav_link("/work", "Work", current))
                            @for page in &site.nav_pages {
                                (nav_link(&page_path(page), &page.link_title, current))
                            }
                        }
                    }
                    button.icon-button.theme-toggle type="button" data-theme-toggle="true" aria-label="Toggle theme" {
                        span.icon.icon-dark { (PreEscaped(ICON_MOON)) }
                        span.icon.icon-light { (PreEscaped(ICON_SUN)) }
                        span.icon.icon-system { (PreEscaped(ICON_MONITOR)) }
                    }
                    label.icon-button.nav-hamburger for="nav-toggle" aria-label="Toggle menu" {
                        (PreEscaped(ICON_MENU))
                    }
                }
            }
        }
    }
}

fn site_footer(site: &SiteContext) -> Markup {
    html! {
        footer.site-footer {
            div.container {
                p { "© " (site.year) " " (site.config.site.name) ". All rights reserved." }
                nav aria-label="Footer" {
                    a href="/work" { "Work" }
                    @for page in &site.nav_pages {
                        a href=(page_path(page)) { (page.link_title) }
                    }
                }
            }
        }
    }
}

/// Tags as badges; anything past `max` collapses into a `+N` badge.
fn tag_list(tags: &[String], max: usize) -> Markup {
    let clamped = clamp_tags(tags, max);
    html! {
        @if !clamped.shown.is_empty() {
            ul.tags {
                @for tag in clamped.shown {
                    li.badge { (tag) }
                }
                @if clamped.overflow > 0 {
                    li.badge.badge-more { "+" (clamped.overflow) }
                }
            }
        }
    }
}

fn featured_card(record: &ContentRecord, tag_limit: usize) -> Markup {
    html! {
        article.card.featured-card {
            p.eyebrow { "Featured" }
            h3 { a.card-link href=(record.permalink) { (record.title) } }
            @if let Some(summary) = &record.summary {
                p { (summary) }
            }
            (tag_list(&record.tags, tag_limit))
        }
    }
}

fn row_card(record: &ContentRecord, tag_limit: usize) -> Markup {
    html! {
        article.card.row-card {
            h3 { a.card-link href=(record.permalink) { (record.title) } }
            @if let Some(summary) = &record.summary {
                p { (summary) }
            }
            (tag_list(&record.tags, tag_limit))
        }
    }
}

fn cta_card(site: &SiteContext) -> Markup {
    let resume = &site.config.contact.resume;
    html! {
        @if site.has_contact || !resume.is_empty() {
            aside.card.cta {
                h3 { "Want a quick fit check?" }
                p { "I'm happy to start with a small scoped task: understand → propose → ship a safe change." }
                div.actions {
                    @if site.has_contact {
                        a.button.button-subtle href="/contact" { "Contact" }
                    }
                    @if !resume.is_empty() {
                        a.button.button-ghost href=(resume) target="_blank" rel="noreferrer" { "Resume" }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the landing page: hero, highlights, featured grid
fn render_home(site: &SiteContext, views: &WorkViews) -> Markup {
    let home = &site.config.home;
    let top = views.top_featured(home.featured_count);

    let content = html! {
        div.container {
            section.hero {
                p.eyebrow { (site.config.site.name) }
                h1 { (home.headline) }
                p.lead { (home.intro) }
                div.actions {
                    a.button href="/work" { "View work" }
                    @if site.has_contact {
                        a.button.button-subtle href="/contact" { "Get in touch" }
                    }
                }
            }
            @if !home.highlights.is_empty() {
                section.section id="highlights" {
                    div.grid.grid-3 {
                        @for highlight in &home.highlights {
                            div.card {
                                h3 { (highlight.title) }
                                p { (highlight.description) }
                            }
                        }
                    }
                }
            }
            @if let Some((lead, side)) = top.split_first() {
                (featured_grid(lead, side))
            }
        }
    };

    base_document(site, &PageMeta::website(None, "/"), "/", content)
}

/// First featured record large, the rest stacked beside it.
fn featured_grid(lead: &ContentRecord, side: &[&ContentRecord]) -> Markup {
    html! {
        section.section.featured {
            div.section-head {
                div {
                    h2 { "Featured work" }
                    p.lead { "Curated case studies that show outcomes, reliability, and how I think." }
                }
                a.button.button-subtle href="/work" { "See all" }
            }
            div.grid.featured-grid {
                article.card.card-large {
                    h3 { a.card-link href=(lead.permalink) { (lead.title) } }
                    @if let Some(summary) = &lead.summary {
                        p { (summary) }
                    }
                    (tag_list(&lead.tags, HOME_LEAD_TAGS))
                    div.actions {
                        a.button href=(lead.permalink) { "Read case study" }
                    }
                }
                div.featured-side {
                    @for record in side {
                        article.card {
                            h3 { a.card-link href=(record.permalink) { (record.title) } }
                            @if let Some(summary) = &record.summary {
                                p { (summary) }
                            }
                            (tag_list(&record.tags, HOME_SIDE_TAGS))
                            div.actions {
                                a.button.button-subtle href=(record.permalink) { "Open" }
                            }
                        }
                    }
                    @if side.is_empty() {
                        article.card.placeholder {
                            h3 { "Add more featured items" }
                            p { "Mark more case studies with " code { "featured: true" } }
                        }
                    }
                }
            }
        }
    }
}

/// Renders `/work`: featured cards, then all other projects
fn render_work_index(site: &SiteContext, views: &WorkViews) -> Markup {
    let work = &site.config.work;

    let content = html! {
        div.container {
            header.page-header {
                p.eyebrow { "Work" }
                h1 { (work.heading) }
                p.lead { (work.intro) }
                @if !work.badges.is_empty() {
                    ul.tags {
                        @for badge in &work.badges {
                            li.badge { (badge) }
                        }
                    }
                }
            }
            @if !views.featured.is_empty() {
                section.section.work-featured {
                    div.section-head {
                        div {
                            h2.section-label { "Featured" }
                            p.lead { "Deeper case studies that best represent my delivery style and outcomes." }
                        }
                        @if site.has_contact {
                            a.nav-link href="/contact" { "Discuss a role →" }
                        }
                    }
                    div.grid.grid-2 {
                        @for record in &views.featured {
                            (featured_card(record, work.featured_tag_limit))
                        }
                    }
                }
            }
            section.section.work-all {
                h2.section-label { "All projects" }
                p.lead { "The full set: smaller builds, experiments, and additional shipped work." }
                div.grid {
                    @if views.is_empty() {
                        p.empty { "No case studies yet. Check back soon." }
                    } @else {
                        @for record in &views.rest {
                            (row_card(record, work.row_tag_limit))
                        }
                    }
                }
            }
            (cta_card(site))
        }
    };

    let page_meta = PageMeta::website(Some("Work"), "/work").with_description(Some(&work.intro));
    base_document(site, &page_meta, "/work", content)
}

fn outline(headings: &[Heading]) -> Markup {
    html! {
        nav.toc aria-label="On this page" {
            p.section-label { "On this page" }
            ol {
                @for heading in headings {
                    li.toc-sub[heading.level == 3] {
                        a href={ "#" (heading.id) } { (heading.text) }
                    }
                }
            }
        }
    }
}

/// Renders one case study
fn render_work_detail(site: &SiteContext, record: &ContentRecord) -> Markup {
    let rendered = markdown::render_markdown(markdown::strip_leading_h1(&record.body));

    let content = html! {
        div.container {
            a.back-link href="/work" { "← Back to Work" }
            header.card.page-header.case-header {
                p.eyebrow { "Case Study" }
                h1 { (record.title) }
                @if let Some(date) = record.date {
                    p.meta {
                        time datetime=(date.format("%Y-%m-%d").to_string()) {
                            (date.format("%B %Y").to_string())
                        }
                    }
                }
                @if let Some(summary) = &record.summary {
                    p.lead { (summary) }
                }
                (tag_list(&record.tags, usize::MAX))
            }
            @if let Some(cover) = &record.cover {
                img.cover src=(cover) alt=(record.title) loading="lazy";
            }
            @if rendered.headings.len() >= 2 {
                (outline(&rendered.headings))
            }
            article.prose {
                (PreEscaped(&rendered.html))
            }
        }
    };

    let page_meta = PageMeta::article(&record.title, &record.permalink)
        .with_description(record.summary.as_deref())
        .with_image(record.cover.as_deref());
    base_document(site, &page_meta, &record.permalink, content)
}

/// Renders a markdown content page; the `contact` page also gets the contact card
fn render_page(site: &SiteContext, page: &Page) -> Markup {
    let rendered = markdown::render_markdown(markdown::strip_leading_h1(&page.body));
    let is_contact = page.slug == CONTACT_SLUG;
    let path = page_path(page);
    let excerpt = markdown::plain_text_excerpt(&page.body, EXCERPT_CHARS);
    let description = page.description.as_deref().or(Some(excerpt.as_str()));

    let content = html! {
        div.container {
            header.page-header {
                @if is_contact {
                    p.eyebrow { "Contact" }
                }
                h1 { (page.title) }
            }
            @if is_contact {
                (contact_card(&site.config.contact))
            }
            article.prose {
                (PreEscaped(&rendered.html))
            }
        }
    };

    let page_meta = PageMeta::website(Some(&page.title), &path).with_description(description);
    base_document(site, &page_meta, &path, content)
}

fn info_row(label: &str, value: &str, href: &str, action: &str) -> Markup {
    html! {
        div.info-row {
            div {
                div.label { (label) }
                div.value { (value) }
            }
            a.button.button-subtle href=(href) { (action) }
        }
    }
}

fn contact_card(contact: &ContactConfig) -> Markup {
    let phone_display = if contact.phone_display.is_empty() {
        &contact.phone_tel
    } else {
        &contact.phone_display
    };
    html! {
        section.section.card.contact-card {
            h2 { "Quickest way to reach me" }
            @if !contact.location.is_empty() {
                ul.tags { li.badge { (contact.location) } }
            }
            div.info-rows {
                @if !contact.email.is_empty() {
                    (info_row("Email", &contact.email, &mailto_href(contact), "Email"))
                }
                @if !contact.phone_tel.is_empty() {
                    (info_row("Phone", phone_display, &format!("tel:{}", contact.phone_tel), "Call"))
                }
            }
            div.actions {
                a.button href="/work" { "View work" }
                @if !contact.resume.is_empty() {
                    a.button.button-subtle href=(contact.resume) target="_blank" rel="noreferrer" { "Resume" }
                }
            }
        }
    }
}

/// `mailto:` link with the configured subject and body pre-filled.
fn mailto_href(contact: &ContactConfig) -> String {
    let mut params = Vec::new();
    if !contact.subject.is_empty() {
        params.push(format!("subject={}", encode_uri_component(&contact.subject)));
    }
    if !contact.body_template.is_empty() {
        params.push(format!("body={}", encode_uri_component(&contact.body_template)));
    }
    if params.is_empty() {
        format!("mailto:{}", contact.email)
    } else {
        format!("mailto:{}?{}", contact.email, params.join("&"))
    }
}

/// Bytes left alone by `encodeURIComponent`: `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

fn render_not_found(site: &SiteContext) -> Markup {
    let content = html! {
        div.container {
            div.page-header {
                h1 { "Page not found" }
                p.lead { "The page you're looking for doesn't exist (or it moved)." }
                div.actions {
                    a.button href="/" { "Go home" }
                    a.button.button-subtle href="/work" { "View work" }
                }
            }
        }
    };
    let page_meta = PageMeta::website(Some("Page not found"), "/404").noindex();
    base_document(site, &page_meta, "/404", content)
}

// ============================================================================
// Tests
// ============================================================================
