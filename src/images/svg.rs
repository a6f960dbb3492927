//! SVG recolor, fill injection, backdrop compositing and sizing.
//!
//! Icon SVGs routinely paint with the symbolic `currentColor` token and
//! assume the page supplies a color; rendered standalone they would be
//! invisible. The transform substitutes the configured color, guarantees a
//! paint attribute exists, and composites a theme-contrasting backdrop behind
//! the artwork.

use regex::Regex;
use std::sync::LazyLock;

use crate::host::Theme;

static CURRENT_COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)currentcolor").unwrap());

static PAINT_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\b(?:fill|stroke)\s*="#).unwrap());

static SVG_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<svg\b[^>]*>").unwrap());

static VIEWBOX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"viewBox\s*=\s*"\s*[-\d.]+[\s,]+[-\d.]+[\s,]+([\d.]+)[\s,]+([\d.]+)\s*""#)
        .unwrap()
});

// Leading whitespace keeps stroke-width from matching as a dimension.
static WIDTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\swidth\s*=\s*"([\d.]+)"#).unwrap());

static HEIGHT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\sheight\s*=\s*"([\d.]+)"#).unwrap());

static ROOT_SIZE_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\s(?:width|height)\s*=\s*"[^"]*""#).unwrap());

/// Backdrop contrasting with the active theme: white on dark themes,
/// near-black on light ones.
fn backdrop_for(theme: Theme) -> &'static str {
    if theme.is_dark() { "#ffffff" } else { "#1e1e1e" }
}

/// Apply the full transform chain for a vector preview.
pub fn transform(svg: &str, color: &str, theme: Theme, render_size: Option<u32>) -> String {
    let mut out = CURRENT_COLOR_RE.replace_all(svg, color).into_owned();

    // An SVG with no paint attribute at all inherits whatever the renderer
    // defaults to; force a root fill so the artwork stays visible.
    if !PAINT_ATTR_RE.is_match(&out) {
        out = inject_root_fill(&out, color);
    }

    let (width, height) = dimensions(&out);
    out = inject_backdrop(&out, &width, &height, backdrop_for(theme));

    if let Some(size) = render_size {
        out = set_root_size(&out, size);
    }

    out
}

/// Intrinsic dimensions: viewBox first, then width/height attributes,
/// defaulting to 24x24.
fn dimensions(svg: &str) -> (String, String) {
    if let Some(caps) = VIEWBOX_RE.captures(svg) {
        return (caps[1].to_string(), caps[2].to_string());
    }
    match (WIDTH_RE.captures(svg), HEIGHT_RE.captures(svg)) {
        (Some(w), Some(h)) => (w[1].to_string(), h[1].to_string()),
        _ => ("24".to_string(), "24".to_string()),
    }
}

fn inject_root_fill(svg: &str, color: &str) -> String {
    let Some(open) = SVG_OPEN_RE.find(svg) else {
        return svg.to_string();
    };
    let tag = open.as_str();
    let mut insert_at = open.start() + tag.len() - 1;
    if tag.ends_with("/>") {
        insert_at -= 1;
    }
    let mut out = svg.to_string();
    out.insert_str(insert_at, &format!(r#" fill="{color}""#));
    out
}

/// Insert the backdrop rect as the first child of the root element.
fn inject_backdrop(svg: &str, width: &str, height: &str, backdrop: &str) -> String {
    match SVG_OPEN_RE.find(svg) {
        Some(open) if !open.as_str().ends_with("/>") => {
            let rect = format!(
                r#"<rect x="0" y="0" width="{width}" height="{height}" rx="2" fill="{backdrop}"/>"#
            );
            let mut out = svg.to_string();
            out.insert_str(open.end(), &rect);
            out
        }
        _ => svg.to_string(),
    }
}

/// Strip any width/height attributes from the root element and pin both to
/// the requested render size.
fn set_root_size(svg: &str, size: u32) -> String {
    let Some(open) = SVG_OPEN_RE.find(svg) else {
        return svg.to_string();
    };
    let stripped = ROOT_SIZE_ATTR_RE.replace_all(open.as_str(), "").into_owned();
    let sized = if let Some(rest) = stripped.strip_suffix("/>") {
        format!(r#"{} width="{size}" height="{size}"/>"#, rest.trim_end())
    } else if let Some(rest) = stripped.strip_suffix('>') {
        format!(r#"{} width="{size}" height="{size}">"#, rest.trim_end())
    } else {
        stripped
    };

    let mut out = String::with_capacity(svg.len() + 32);
    out.push_str(&svg[..open.start()]);
    out.push_str(&sized);
    out.push_str(&svg[open.end()..]);
    out
}
