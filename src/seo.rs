//! Titles, social meta tags, `sitemap.xml` and `robots.txt`.
//!
//! Every absolute URL is built from `site.base_url`, which config loading
//! normalises to have no trailing slash.

use crate::config::SiteMeta;
use crate::types::{ContentRecord, Page};
use chrono::NaiveDate;
use maud::{Markup, html};
use std::fmt::Write as _;

/// Path of the generated social preview image.
pub const OG_IMAGE_PATH: &str = "/opengraph-image.png";

/// `"{title} | {name}"`, or the site default when there is no page title.
pub fn build_title(title: Option<&str>, site: &SiteMeta) -> String {
    match title.map(str::trim).filter(|t| !t.is_empty()) {
        Some(t) => format!("{t} | {}", site.name),
        None => site.title.clone(),
    }
}

/// Join a site-absolute path onto the base URL.
pub fn absolute_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if path.is_empty() || path == "/" {
        format!("{base}/")
    } else if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// Per-page metadata for the document `<head>`.
#[derive(Debug, Clone)]
pub struct PageMeta {
    /// Page title without the site suffix; `None` uses the site title.
    pub title: Option<String>,
    pub description: Option<String>,
    /// Site-absolute path of the page, e.g. `/work/acme`.
    pub path: String,
    /// `website` or `article`.
    pub og_type: &'static str,
    /// Image override (path or absolute URL); defaults to the generated preview.
    pub image: Option<String>,
    /// Emit `<meta name="robots" content="noindex">`.
    pub noindex: bool,
}

impl PageMeta {
    pub fn website(title: Option<&str>, path: &str) -> Self {
        Self {
            title: title.map(str::to_string),
            description: None,
            path: path.to_string(),
            og_type: "website",
            image: None,
            noindex: false,
        }
    }

    pub fn article(title: &str, path: &str) -> Self {
        Self {
            og_type: "article",
            ..Self::website(Some(title), path)
        }
    }

    pub fn with_description(mut self, description: Option<&str>) -> Self {
        self.description = description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);
        self
    }

    pub fn with_image(mut self, image: Option<&str>) -> Self {
        self.image = image.map(str::to_string);
        self
    }

    pub fn noindex(mut self) -> Self {
        self.noindex = true;
        self
    }

    /// Full `<title>` text.
    pub fn full_title(&self, site: &SiteMeta) -> String {
        build_title(self.title.as_deref(), site)
    }

    /// `<title>`, description, canonical link, Open Graph and Twitter tags.
    pub fn head_tags(&self, site: &SiteMeta) -> Markup {
        let title = self.full_title(site);
        let description = self.description.as_deref().unwrap_or(&site.description);
        let url = absolute_url(&site.base_url, &self.path);
        let image = match self.image.as_deref() {
            Some(img) if img.starts_with("http://") || img.starts_with("https://") => {
                img.to_string()
            }
            Some(img) => absolute_url(&site.base_url, img),
            None => absolute_url(&site.base_url, OG_IMAGE_PATH),
        };

        html! {
            title { (title) }
            meta name="description" content=(description);
            @if self.noindex {
                meta name="robots" content="noindex";
            }
            link rel="canonical" href=(url);
            meta property="og:type" content=(self.og_type);
            meta property="og:site_name" content=(site.name);
            meta property="og:title" content=(title);
            meta property="og:description" content=(description);
            meta property="og:url" content=(url);
            meta property="og:image" content=(image);
            meta property="og:image:width" content="1200";
            meta property="og:image:height" content="630";
            meta name="twitter:card" content="summary_large_image";
            meta name="twitter:title" content=(title);
            meta name="twitter:description" content=(description);
            meta name="twitter:image" content=(image);
        }
    }
}

fn xml_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

struct SitemapEntry {
    loc: String,
    lastmod: NaiveDate,
    changefreq: &'static str,
    priority: &'static str,
}

/// Render `sitemap.xml`.
///
/// Home and the work index change weekly; records and pages monthly. A record's
/// `date` becomes its `lastmod`; everything else uses the build date.
pub fn sitemap_xml(
    site: &SiteMeta,
    records: &[ContentRecord],
    pages: &[Page],
    build_date: NaiveDate,
) -> String {
    let base = &site.base_url;
    let mut entries = vec![
        SitemapEntry {
            loc: absolute_url(base, "/"),
            lastmod: build_date,
            changefreq: "weekly",
            priority: "1.0",
        },
        SitemapEntry {
            loc: absolute_url(base, "/work"),
            lastmod: build_date,
            changefreq: "weekly",
            priority: "0.8",
        },
    ];
    entries.extend(records.iter().map(|r| SitemapEntry {
        loc: absolute_url(base, &r.permalink),
        lastmod: r.date.unwrap_or(build_date),
        changefreq: "monthly",
        priority: "0.7",
    }));
    entries.extend(pages.iter().map(|p| SitemapEntry {
        loc: absolute_url(base, &format!("/{}", p.slug)),
        lastmod: build_date,
        changefreq: "monthly",
        priority: "0.5",
    }));

    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for e in &entries {
        let _ = write!(
            xml,
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>{}</changefreq>\n    <priority>{}</priority>\n  </url>\n",
            xml_escape(&e.loc),
            e.lastmod.format("%Y-%m-%d"),
            e.changefreq,
            e.priority,
        );
    }
    xml.push_str("</urlset>\n");
    xml
}

/// Render `robots.txt`: everything allowed, sitemap and host advertised.
pub fn robots_txt(site: &SiteMeta) -> String {
    format!(
        "User-Agent: *\nAllow: /\n\nSitemap: {}\nHost: {}\n",
        absolute_url(&site.base_url, "/sitemap.xml"),
        site.base_url.trim_end_matches('/'),
    )
}
