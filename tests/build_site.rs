//! End-to-end build of the fixture content tree: scan, write the manifest,
//! generate from it, then inspect the site on disk.

use simple_folio::{generate, scan};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

fn copy_fixtures(dst: &Path) {
    let src = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    for entry in WalkDir::new(&src) {
        let entry = entry.unwrap();
        let target = dst.join(entry.path().strip_prefix(&src).unwrap());
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).unwrap();
        } else {
            fs::copy(entry.path(), &target).unwrap();
        }
    }
}

struct Site {
    _tmp: TempDir,
    content: PathBuf,
    output: PathBuf,
    manifest_path: PathBuf,
}

impl Site {
    fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let content = tmp.path().join("content");
        copy_fixtures(&content);
        Self {
            content,
            output: tmp.path().join("dist"),
            manifest_path: tmp.path().join("manifest.json"),
            _tmp: tmp,
        }
    }

    fn build(&self) -> generate::GenerateReport {
        let manifest = scan::scan(&self.content).unwrap();
        fs::write(&self.manifest_path, serde_json::to_string_pretty(&manifest).unwrap()).unwrap();
        generate::generate(&self.manifest_path, &self.content, &self.output, true).unwrap()
    }

    fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.output.join(rel))
            .unwrap_or_else(|e| panic!("cannot read {rel}: {e}"))
    }
}

#[test]
fn home_features_top_three_in_order() {
    let site = Site::new();
    site.build();
    let html = site.read("index.html");

    let checkout = html.find("/work/checkout-rewrite").unwrap();
    let design = html.find("/work/design-system").unwrap();
    let pipeline = html.find("/work/data-pipeline").unwrap();
    assert!(checkout < design && design < pipeline);
    assert!(!html.contains("/work/item-2"));
    assert!(html.contains("Read case study"));
    assert!(html.contains("<title>Ada Example · Portfolio</title>"));
}

#[test]
fn work_index_groups_featured_before_rest() {
    let site = Site::new();
    site.build();
    let html = site.read("work/index.html");

    let featured = html.find("Deeper case studies").unwrap();
    let all = html.find("All projects").unwrap();
    let acme = html.find("/work/clients/acme-portal").unwrap();
    let item2 = html.find("/work/item-2").unwrap();
    let item10 = html.find("/work/item-10").unwrap();
    assert!(featured < all);
    assert!(all < acme && acme < item2 && item2 < item10);
}

#[test]
fn case_study_renders_markdown_body() {
    let site = Site::new();
    site.build();
    let html = site.read("work/checkout-rewrite/index.html");

    assert!(html.contains("← Back to Work"));
    assert!(html.contains("Case Study"));
    assert!(html.contains(r#"<div class="code-block" data-lang="sql">"#));
    assert!(html.contains("<table>"));
    assert!(html.contains(r#"<link rel="canonical" href="https://ada.example.com/work/checkout-rewrite">"#));
    assert_eq!(html.matches("<h1>").count(), 1);
}

#[test]
fn contact_page_links_email_and_resume() {
    let site = Site::new();
    site.build();
    let html = site.read("contact/index.html");

    assert!(html.contains("mailto:ada@example.com?subject=Project%20inquiry%20%26%20hello"));
    assert!(html.contains(r#"href="/resume.pdf""#));
    assert!(html.contains("Quickest way to reach me"));
}

#[test]
fn hidden_page_is_built_but_not_in_nav() {
    let site = Site::new();
    site.build();
    assert!(site.output.join("colophon/index.html").is_file());
    let home = site.read("index.html");
    assert!(home.contains(r#"href="/about""#));
    assert!(!home.contains(r#"href="/colophon""#));
}

#[test]
fn sitemap_and_robots_use_base_url() {
    let site = Site::new();
    site.build();
    let sitemap = site.read("sitemap.xml");
    assert!(sitemap.contains("<loc>https://ada.example.com/</loc>"));
    assert!(sitemap.contains("<loc>https://ada.example.com/work/clients/acme-portal</loc>"));
    assert!(sitemap.contains("<lastmod>2025-09-14</lastmod>"));
    assert!(!sitemap.contains(".com//"));

    let robots = site.read("robots.txt");
    assert!(robots.contains("Sitemap: https://ada.example.com/sitemap.xml"));
}

#[test]
fn social_image_is_png() {
    let site = Site::new();
    site.build();
    let bytes = fs::read(site.output.join("opengraph-image.png")).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn assets_are_copied_verbatim() {
    let site = Site::new();
    site.build();
    let original = fs::read(site.content.join("assets/resume.pdf")).unwrap();
    let copied = fs::read(site.output.join("resume.pdf")).unwrap();
    assert_eq!(original, copied);
}

#[test]
fn rebuild_without_changes_writes_nothing() {
    let site = Site::new();
    let first = site.build();
    let second = site.build();
    assert!(first.stats.written > 0);
    assert_eq!(second.stats.written, 0);
    assert!(second.files.iter().all(|f| !f.written));
}

#[test]
fn editing_one_record_rewrites_its_page() {
    let site = Site::new();
    site.build();

    let path = site.content.join("work/item-2.md");
    let edited = fs::read_to_string(&path).unwrap() + "\nOne more paragraph.\n";
    fs::write(&path, edited).unwrap();
    let report = site.build();

    let rewritten: Vec<&str> = report
        .files
        .iter()
        .filter(|f| f.written)
        .map(|f| f.path.as_str())
        .collect();
    assert_eq!(rewritten, vec!["work/item-2/index.html"]);
}

#[test]
fn duplicate_slug_fails_the_scan() {
    let site = Site::new();
    fs::create_dir_all(site.content.join("work/item-2")).unwrap();
    fs::write(
        site.content.join("work/item-2/index.md"),
        "---\ntitle: Again\nsummary: Same slug.\n---\n",
    )
    .unwrap();
    let err = scan::scan(&site.content).unwrap_err();
    assert!(matches!(err, scan::ScanError::DuplicateSlug { .. }), "{err}");
}
