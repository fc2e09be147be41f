//! Social preview image (`opengraph-image.png`).
//!
//! A 1200×630 card drawn with the `image` crate, with text rasterized from an
//! embedded DejaVu Sans through `ab_glyph`:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  ● Site name                               ┌────────────┐  │
//! │                                            │   accent   │  │
//! │  Headline, bold, up to                     │   panel    │  │
//! │  three lines                               └────────────┘  │
//! │  Tagline, up to two lines                                  │
//! │  ( tag ) ( tag ) ( tag )                                   │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! The font ships inside the binary, so output is identical for identical
//! inputs on every machine.

use ab_glyph::{Font, FontRef, InvalidFont, PxScale, ScaleFont, point};
use image::codecs::png::PngEncoder;
use image::{ImageError, Rgba, RgbaImage};

pub const WIDTH: u32 = 1200;
pub const HEIGHT: u32 = 630;

const PADDING: u32 = 72;
const PANEL_SIZE: u32 = 280;
const PANEL_RADIUS: f32 = 28.0;
const DOT_RADIUS: f32 = 7.0;
const PILL_HEIGHT: u32 = 40;
const PILL_PADDING: f32 = 18.0;
const MAX_PILLS: usize = 6;

/// Right edge of the text column; the panel sits beyond it.
const TEXT_MAX_X: u32 = WIDTH - PADDING - PANEL_SIZE - PADDING;

const NAME_SIZE: f32 = 30.0;
const HEADLINE_SIZE: f32 = 64.0;
const HEADLINE_LEADING: f32 = 76.0;
const HEADLINE_TOP: f32 = 240.0;
const HEADLINE_LINES: usize = 3;
const TAGLINE_SIZE: f32 = 28.0;
const TAGLINE_LEADING: f32 = 36.0;
const TAGLINE_LINES: usize = 2;
const PILL_TEXT_SIZE: f32 = 20.0;

const NAME_COLOR: [u8; 3] = [0xe5, 0xe5, 0xe5];
const HEADLINE_COLOR: [u8; 3] = [0xfa, 0xfa, 0xfa];
const TAGLINE_COLOR: [u8; 3] = [0xa3, 0xa3, 0xa3];
const PILL_TEXT_COLOR: [u8; 3] = [0xd4, 0xd4, 0xd4];

static REGULAR_TTF: &[u8] = include_bytes!("../static/fonts/DejaVuSans.ttf");
static BOLD_TTF: &[u8] = include_bytes!("../static/fonts/DejaVuSans-Bold.ttf");

/// Text and colors for one preview card.
#[derive(Debug, Clone, Copy)]
pub struct SocialCard<'a> {
    pub accent: [u8; 3],
    pub name: &'a str,
    pub headline: &'a str,
    pub tagline: &'a str,
    pub tags: &'a [String],
}

struct Fonts {
    regular: FontRef<'static>,
    bold: FontRef<'static>,
}

impl Fonts {
    fn load() -> Result<Self, InvalidFont> {
        Ok(Self {
            regular: FontRef::try_from_slice(REGULAR_TTF)?,
            bold: FontRef::try_from_slice(BOLD_TTF)?,
        })
    }
}

const TOP: [u8; 3] = [0x0b, 0x0b, 0x0b];
const BOTTOM: [u8; 3] = [0x0f, 0x0f, 0x0f];

fn blend(px: &mut Rgba<u8>, color: [u8; 3], alpha: f32) {
    let a = alpha.clamp(0.0, 1.0);
    for (c, target) in px.0.iter_mut().take(3).zip(color) {
        *c = (f32::from(*c) * (1.0 - a) + f32::from(target) * a).round() as u8;
    }
}

/// Piecewise-linear falloff through `(position, alpha)` stops.
fn falloff(t: f32, stops: &[(f32, f32)]) -> f32 {
    let mut prev = stops[0];
    if t <= prev.0 {
        return prev.1;
    }
    for &stop in &stops[1..] {
        if t <= stop.0 {
            let span = (stop.0 - prev.0).max(f32::EPSILON);
            return prev.1 + (stop.1 - prev.1) * (t - prev.0) / span;
        }
        prev = stop;
    }
    prev.1
}

/// Signed distance from a point to a rounded rectangle's edge (negative inside).
fn rounded_rect_distance(x: f32, y: f32, rect: (f32, f32, f32, f32), radius: f32) -> f32 {
    let (left, top, w, h) = rect;
    let cx = left + w / 2.0;
    let cy = top + h / 2.0;
    let qx = (x - cx).abs() - (w / 2.0 - radius);
    let qy = (y - cy).abs() - (h / 2.0 - radius);
    let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
    outside + qx.max(qy).min(0.0) - radius
}

fn draw_background(img: &mut RgbaImage, accent: [u8; 3]) {
    let glow_x = WIDTH as f32 * 0.2;
    let glow_y = HEIGHT as f32 * 0.2;
    for (x, y, px) in img.enumerate_pixels_mut() {
        let t = y as f32 / (HEIGHT - 1) as f32;
        for i in 0..3 {
            px.0[i] = (f32::from(TOP[i]) + (f32::from(BOTTOM[i]) - f32::from(TOP[i])) * t).round()
                as u8;
        }
        px.0[3] = 255;

        let dx = (x as f32 - glow_x) / 900.0;
        let dy = (y as f32 - glow_y) / 500.0;
        let d = (dx * dx + dy * dy).sqrt();
        blend(px, accent, falloff(d, &[(0.0, 0.25), (0.35, 0.08), (0.6, 0.0)]));
    }
}

fn draw_dot(img: &mut RgbaImage, accent: [u8; 3]) {
    let cx = PADDING as f32 + DOT_RADIUS;
    let cy = PADDING as f32 + DOT_RADIUS;
    let reach = (DOT_RADIUS + 24.0).ceil() as u32;
    let (x0, y0) = (PADDING.saturating_sub(reach), PADDING.saturating_sub(reach));
    for y in y0..(PADDING + 2 * reach).min(HEIGHT) {
        for x in x0..(PADDING + 2 * reach).min(WIDTH) {
            let d = ((x as f32 - cx).powi(2) + (y as f32 - cy).powi(2)).sqrt();
            let px = img.get_pixel_mut(x, y);
            if d <= DOT_RADIUS {
                blend(px, accent, 1.0);
            } else {
                blend(px, accent, falloff(d - DOT_RADIUS, &[(0.0, 0.5), (24.0, 0.0)]));
            }
        }
    }
}

fn draw_panel(img: &mut RgbaImage, accent: [u8; 3]) {
    let left = WIDTH - PADDING - PANEL_SIZE;
    let rect = (left as f32, PADDING as f32, PANEL_SIZE as f32, PANEL_SIZE as f32);
    let center = (
        left as f32 + PANEL_SIZE as f32 / 2.0,
        PADDING as f32 + PANEL_SIZE as f32 / 2.0,
    );
    let half = PANEL_SIZE as f32 * 0.6;

    for y in PADDING..PADDING + PANEL_SIZE {
        for x in left..left + PANEL_SIZE {
            let (fx, fy) = (x as f32 + 0.5, y as f32 + 0.5);
            let edge = rounded_rect_distance(fx, fy, rect, PANEL_RADIUS);
            if edge > 0.0 {
                continue;
            }
            let px = img.get_pixel_mut(x, y);
            let d = ((fx - center.0).powi(2) + (fy - center.1).powi(2)).sqrt() / half;
            blend(px, [255, 255, 255], 0.02);
            blend(px, accent, falloff(d, &[(0.0, 0.28), (0.55, 0.08), (1.0, 0.0)]));
            if edge > -1.0 {
                blend(px, [255, 255, 255], 0.15);
            }
        }
    }
}

/// Advance width of `text` set in `font` at `size` pixels, kerning included.
fn text_width(font: &FontRef<'_>, size: f32, text: &str) -> f32 {
    let scaled = font.as_scaled(PxScale::from(size));
    let mut width = 0.0;
    let mut prev = None;
    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(prev) = prev {
            width += scaled.kern(prev, id);
        }
        width += scaled.h_advance(id);
        prev = Some(id);
    }
    width
}

/// Rasterize one line of text with its baseline starting at `origin`.
///
/// Coverage is alpha-blended over what is already drawn; anything falling
/// outside the canvas is clipped.
fn draw_text(
    img: &mut RgbaImage,
    font: &FontRef<'_>,
    size: f32,
    origin: (f32, f32),
    color: [u8; 3],
    text: &str,
) {
    let scaled = font.as_scaled(PxScale::from(size));
    let (mut caret, baseline) = origin;
    let mut prev = None;
    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(prev) = prev {
            caret += scaled.kern(prev, id);
        }
        let glyph = id.with_scale_and_position(size, point(caret, baseline));
        caret += scaled.h_advance(id);
        prev = Some(id);

        let Some(outline) = font.outline_glyph(glyph) else {
            continue;
        };
        let bounds = outline.px_bounds();
        outline.draw(|gx, gy, coverage| {
            let x = bounds.min.x as i64 + i64::from(gx);
            let y = bounds.min.y as i64 + i64::from(gy);
            if (0..i64::from(WIDTH)).contains(&x) && (0..i64::from(HEIGHT)).contains(&y) {
                blend(img.get_pixel_mut(x as u32, y as u32), color, coverage);
            }
        });
    }
}

/// Greedy word wrap into at most `max_lines` lines of `max_width` pixels.
///
/// When text is left over, the last line is shortened and ends in `…`. A
/// single word wider than the column stays on its own line and is clipped
/// by the canvas.
fn wrap_lines(
    font: &FontRef<'_>,
    size: f32,
    text: &str,
    max_width: f32,
    max_lines: usize,
) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if current.is_empty() || text_width(font, size, &candidate) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            while !last.is_empty() && text_width(font, size, &format!("{last}…")) > max_width {
                last.pop();
            }
            let trimmed = last.trim_end().len();
            last.truncate(trimmed);
            last.push('…');
        }
    }
    lines
}

fn draw_name(img: &mut RgbaImage, fonts: &Fonts, name: &str) {
    let x = PADDING as f32 + 2.0 * DOT_RADIUS + 16.0;
    let baseline = PADDING as f32 + DOT_RADIUS + NAME_SIZE * 0.36;
    draw_text(img, &fonts.bold, NAME_SIZE, (x, baseline), NAME_COLOR, name);
}

/// Headline, then tagline directly under however many lines it took.
fn draw_copy(img: &mut RgbaImage, fonts: &Fonts, headline: &str, tagline: &str) {
    let column = (TEXT_MAX_X - PADDING) as f32;
    let left = PADDING as f32;

    let mut baseline = HEADLINE_TOP;
    let headline_lines = wrap_lines(&fonts.bold, HEADLINE_SIZE, headline, column, HEADLINE_LINES);
    for line in &headline_lines {
        draw_text(img, &fonts.bold, HEADLINE_SIZE, (left, baseline), HEADLINE_COLOR, line);
        baseline += HEADLINE_LEADING;
    }

    if !headline_lines.is_empty() {
        baseline += TAGLINE_LEADING - HEADLINE_LEADING + 24.0;
    }
    for line in wrap_lines(&fonts.regular, TAGLINE_SIZE, tagline, column, TAGLINE_LINES) {
        draw_text(img, &fonts.regular, TAGLINE_SIZE, (left, baseline), TAGLINE_COLOR, &line);
        baseline += TAGLINE_LEADING;
    }
}

/// Outlined pills sized to their labels; pills that would cross into the
/// panel column are dropped.
fn draw_pills(img: &mut RgbaImage, fonts: &Fonts, tags: &[String]) {
    let top = HEIGHT - PADDING - PILL_HEIGHT;
    let baseline = top as f32 + PILL_HEIGHT as f32 / 2.0 + PILL_TEXT_SIZE * 0.36;
    let mut x = PADDING;
    for tag in tags.iter().take(MAX_PILLS) {
        let label_width = text_width(&fonts.regular, PILL_TEXT_SIZE, tag);
        let w = (label_width + 2.0 * PILL_PADDING).ceil() as u32;
        if x + w > TEXT_MAX_X {
            break;
        }
        let rect = (x as f32, top as f32, w as f32, PILL_HEIGHT as f32);
        for py in top..top + PILL_HEIGHT {
            for px_x in x..x + w {
                let edge = rounded_rect_distance(
                    px_x as f32 + 0.5,
                    py as f32 + 0.5,
                    rect,
                    PILL_HEIGHT as f32 / 2.0,
                );
                if edge > 0.0 {
                    continue;
                }
                let px = img.get_pixel_mut(px_x, py);
                blend(px, [0, 0, 0], 0.25);
                if edge > -1.0 {
                    blend(px, [255, 255, 255], 0.18);
                }
            }
        }
        draw_text(
            img,
            &fonts.regular,
            PILL_TEXT_SIZE,
            (x as f32 + PILL_PADDING, baseline),
            PILL_TEXT_COLOR,
            tag,
        );
        x += w + 10;
    }
}

/// Draw the preview card.
pub fn render_social_image(card: &SocialCard<'_>) -> Result<RgbaImage, InvalidFont> {
    let fonts = Fonts::load()?;
    let mut img = RgbaImage::new(WIDTH, HEIGHT);
    draw_background(&mut img, card.accent);
    draw_dot(&mut img, card.accent);
    draw_name(&mut img, &fonts, card.name);
    draw_panel(&mut img, card.accent);
    draw_copy(&mut img, &fonts, card.headline, card.tagline);
    draw_pills(&mut img, &fonts, card.tags);
    Ok(img)
}

/// Encode an image as PNG bytes.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>, ImageError> {
    let mut buf = Vec::new();
    img.write_with_encoder(PngEncoder::new(&mut buf))?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCENT: [u8; 3] = [0x0e, 0xa5, 0xe9];

    fn tags() -> Vec<String> {
        ["Rust", "Postgres", "CI/CD"].map(String::from).to_vec()
    }

    fn blank() -> SocialCard<'static> {
        SocialCard {
            accent: ACCENT,
            name: "",
            headline: "",
            tagline: "",
            tags: &[],
        }
    }

    fn render(card: &SocialCard<'_>) -> RgbaImage {
        render_social_image(card).unwrap()
    }

    fn brightest_in(img: &RgbaImage, xs: std::ops::Range<u32>, ys: std::ops::Range<u32>) -> u8 {
        ys.flat_map(|y| xs.clone().map(move |x| (x, y)))
            .map(|(x, y)| img.get_pixel(x, y).0[..3].iter().copied().min().unwrap_or(0))
            .max()
            .unwrap_or(0)
    }

    #[test]
    fn image_has_social_card_dimensions() {
        let img = render(&blank());
        assert_eq!(img.dimensions(), (1200, 630));
    }

    #[test]
    fn background_is_dark_away_from_glow() {
        let img = render(&blank());
        let px = img.get_pixel(1199, 629);
        assert!(px.0[0] < 0x20 && px.0[1] < 0x20 && px.0[2] < 0x20, "{px:?}");
        assert_eq!(px.0[3], 255);
    }

    #[test]
    fn glow_tints_toward_accent() {
        let img = render(&blank());
        let glow = img.get_pixel(240, 126);
        let corner = img.get_pixel(1199, 629);
        assert!(glow.0[2] > corner.0[2] + 20, "{glow:?} vs {corner:?}");
    }

    #[test]
    fn dot_is_solid_accent() {
        let card = SocialCard { name: "Ada Example", ..blank() };
        let img = render(&card);
        let px = img.get_pixel(PADDING + 7, PADDING + 7);
        assert_eq!(&px.0[..3], &ACCENT);
    }

    #[test]
    fn panel_center_is_brighter_than_outside() {
        let img = render(&blank());
        let center = img.get_pixel(WIDTH - PADDING - PANEL_SIZE / 2, PADDING + PANEL_SIZE / 2);
        let below = img.get_pixel(WIDTH - PADDING - PANEL_SIZE / 2, PADDING + PANEL_SIZE + 40);
        assert!(center.0[2] > below.0[2], "{center:?} vs {below:?}");
    }

    #[test]
    fn headline_is_drawn_in_light_text() {
        let rows = (HEADLINE_TOP as u32 - 50)..(HEADLINE_TOP as u32 + 16);
        let empty = render(&blank());
        assert!(brightest_in(&empty, PADDING..TEXT_MAX_X, rows.clone()) < 0x80);

        let card = SocialCard { headline: "Payments at scale", ..blank() };
        let img = render(&card);
        assert!(brightest_in(&img, PADDING..TEXT_MAX_X, rows) > 0xc0);
    }

    #[test]
    fn different_headlines_give_different_images() {
        let a = SocialCard { headline: "Checkout rewrite", ..blank() };
        let b = SocialCard { headline: "Design system", ..blank() };
        let a = encode_png(&render(&a)).unwrap();
        let b = encode_png(&render(&b)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn name_and_tagline_change_the_image() {
        let plain = render(&blank());
        let named = render(&SocialCard { name: "Ada Example", ..blank() });
        let tagged = render(&SocialCard { tagline: "Backend engineer", ..blank() });
        assert_ne!(plain, named);
        assert_ne!(plain, tagged);
        assert_ne!(named, tagged);
    }

    #[test]
    fn pill_labels_change_the_image() {
        let tags = tags();
        let other: Vec<String> = ["Go", "Redis", "K8s"].map(String::from).to_vec();
        let with_tags = render(&SocialCard { tags: &tags, ..blank() });
        let with_other = render(&SocialCard { tags: &other, ..blank() });
        assert_ne!(render(&blank()), with_tags);
        assert_ne!(with_tags, with_other);
    }

    #[test]
    fn rendering_is_deterministic() {
        let tags = tags();
        let card = SocialCard {
            name: "Ada Example",
            headline: "Systems that stay up",
            tagline: "Backend and infrastructure",
            tags: &tags,
            ..blank()
        };
        let a = encode_png(&render(&card)).unwrap();
        let b = encode_png(&render(&card)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn encodes_png_signature() {
        let bytes = encode_png(&render(&blank())).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn long_headline_wraps_and_ellipsizes() {
        let fonts = Fonts::load().unwrap();
        let column = (TEXT_MAX_X - PADDING) as f32;
        let text = "word ".repeat(60);
        let lines = wrap_lines(&fonts.bold, HEADLINE_SIZE, &text, column, HEADLINE_LINES);
        assert_eq!(lines.len(), HEADLINE_LINES);
        assert!(lines.last().unwrap().ends_with('…'));
        for line in &lines {
            assert!(text_width(&fonts.bold, HEADLINE_SIZE, line) <= column, "{line}");
        }
    }

    #[test]
    fn short_text_stays_on_one_line() {
        let fonts = Fonts::load().unwrap();
        let lines = wrap_lines(&fonts.regular, TAGLINE_SIZE, "  Backend  engineer ", 600.0, 2);
        assert_eq!(lines, vec!["Backend engineer".to_string()]);
        assert!(wrap_lines(&fonts.regular, TAGLINE_SIZE, "   ", 600.0, 2).is_empty());
    }

    #[test]
    fn text_width_grows_with_text() {
        let fonts = Fonts::load().unwrap();
        let short = text_width(&fonts.regular, 20.0, "Rust");
        let long = text_width(&fonts.regular, 20.0, "Rust and Postgres");
        assert!(short > 0.0 && long > short);
        assert_eq!(text_width(&fonts.regular, 20.0, ""), 0.0);
    }

    #[test]
    fn falloff_interpolates_between_stops() {
        let stops = [(0.0, 1.0), (1.0, 0.0)];
        assert_eq!(falloff(-1.0, &stops), 1.0);
        assert!((falloff(0.5, &stops) - 0.5).abs() < 1e-6);
        assert_eq!(falloff(2.0, &stops), 0.0);
    }
}
