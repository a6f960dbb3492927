//! Image Acquirer
//!
//! Turns a preview reference (remote URL or embedded data) into a locally
//! renderable file. The pipeline: normalize known provider URLs, derive the
//! content-addressed cache key, probe the cache, fetch or decode the bytes,
//! classify vector vs raster, run the SVG transform chain, and persist
//! through the [`CacheStore`].
//!
//! Failures are tagged with the original reference and contained per-request;
//! a failed fetch leaves no partial cache file behind.

pub(crate) mod data_url;
mod fetch;
pub mod normalize;
pub mod svg;

use anyhow::{Context, Result};
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::cache::CacheStore;
use crate::host::Theme;
use crate::resolver::PreviewReference;

/// Why a single acquisition failed. Never aborts the surrounding pass.
#[derive(Debug, Error)]
pub enum AcquireErrorKind {
    #[error("http status {0}")]
    Status(u16),
    #[error("network: {0}")]
    Network(#[from] reqwest::Error),
    #[error("malformed reference: {0}")]
    Malformed(String),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Acquisition failure tagged with the reference that caused it.
#[derive(Debug, Error)]
#[error("failed to acquire {reference}: {kind}")]
pub struct AcquireError {
    pub reference: String,
    #[source]
    pub kind: AcquireErrorKind,
}

pub struct ImageAcquirer {
    cache: CacheStore,
    client: reqwest::Client,
    svg_color: String,
}

impl ImageAcquirer {
    pub fn new(cache: CacheStore, svg_color: impl Into<String>) -> Result<Self> {
        cache.ensure_directory();
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(fetch::FETCH_TIMEOUT)
            .build()
            .context("failed to build http client")?;
        Ok(Self {
            cache,
            client,
            svg_color: svg_color.into(),
        })
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Settings are re-read per pass; keep the recolor value in sync.
    pub fn set_svg_color(&mut self, color: &str) {
        if self.svg_color != color {
            self.svg_color = color.to_string();
        }
    }

    /// Resolve a reference to a local file, fetching and transforming on a
    /// cache miss. Identical (reference, theme, size) tuples always yield the
    /// same path.
    pub async fn acquire(
        &self,
        reference: &PreviewReference,
        theme: Theme,
        render_size: Option<u32>,
    ) -> Result<PathBuf, AcquireError> {
        self.acquire_inner(reference, theme, render_size)
            .await
            .map_err(|kind| AcquireError {
                reference: reference.as_str().to_string(),
                kind,
            })
    }

    async fn acquire_inner(
        &self,
        reference: &PreviewReference,
        theme: Theme,
        render_size: Option<u32>,
    ) -> Result<PathBuf, AcquireErrorKind> {
        match reference {
            PreviewReference::Embedded(data) => {
                self.acquire_embedded(data, theme, render_size).await
            }
            PreviewReference::Remote(url) => self.acquire_remote(url, theme, render_size).await,
        }
    }

    async fn acquire_embedded(
        &self,
        data: &str,
        theme: Theme,
        render_size: Option<u32>,
    ) -> Result<PathBuf, AcquireErrorKind> {
        // Keyed by the raw data url, not the decoded payload.
        let stem = cache_stem(data, theme, render_size);
        let (media, _) = data_url::parse(data).map_err(AcquireErrorKind::Malformed)?;
        let fallback_ext = extension_for_media(media).unwrap_or("png").to_string();
        if let Some(hit) = self.probe(&stem, &fallback_ext) {
            return Ok(hit);
        }

        let (media, bytes) = data_url::decode(data)?;
        let looks_svg = media.contains("svg")
            || std::str::from_utf8(&bytes)
                .map(|text| text.contains("<svg"))
                .unwrap_or(false);
        self.persist(&stem, bytes, looks_svg, &fallback_ext, theme, render_size)
    }

    async fn acquire_remote(
        &self,
        url: &str,
        theme: Theme,
        render_size: Option<u32>,
    ) -> Result<PathBuf, AcquireErrorKind> {
        let url = normalize::normalize_provider_url(url);
        let stem = cache_stem(&url, theme, render_size);
        let url_ext = extension_from_url(&url);
        let fallback_ext = url_ext.clone().unwrap_or_else(|| "png".to_string());
        if let Some(hit) = self.probe(&stem, &fallback_ext) {
            return Ok(hit);
        }

        let fetched = fetch::fetch_image(&self.client, &url).await?;
        let content_type = fetched.content_type.as_deref().unwrap_or("");
        let looks_svg = content_type.contains("svg")
            || url.ends_with(".svg")
            || std::str::from_utf8(&fetched.bytes)
                .map(|text| text.contains("<svg"))
                .unwrap_or(false);
        let raster_ext = sniff_extension(&fetched.bytes)
            .map(str::to_string)
            .or(url_ext)
            .unwrap_or_else(|| "png".to_string());
        self.persist(&stem, fetched.bytes, looks_svg, &raster_ext, theme, render_size)
    }

    fn persist(
        &self,
        stem: &str,
        bytes: Vec<u8>,
        looks_svg: bool,
        raster_ext: &str,
        theme: Theme,
        render_size: Option<u32>,
    ) -> Result<PathBuf, AcquireErrorKind> {
        if looks_svg {
            let text = String::from_utf8_lossy(&bytes);
            let transformed = svg::transform(&text, &self.svg_color, theme, render_size);
            let path = self.cache.entry_path(&format!("{stem}.svg"));
            self.cache.write(&path, transformed.as_bytes())?;
            debug!("🖼 cached svg preview at {}", path.display());
            Ok(path)
        } else {
            let path = self.cache.entry_path(&format!("{stem}.{raster_ext}"));
            self.cache.write(&path, &bytes)?;
            debug!("🖼 cached raster preview at {}", path.display());
            Ok(path)
        }
    }

    /// Cache probe: the derived SVG path first, then the extension-dependent
    /// binary fallback. A hit skips all network and decode work.
    fn probe(&self, stem: &str, fallback_ext: &str) -> Option<PathBuf> {
        let svg_path = self.cache.entry_path(&format!("{stem}.svg"));
        if self.cache.exists(&svg_path) {
            debug!("⚡ cache hit {}", svg_path.display());
            return Some(svg_path);
        }
        let raster_path = self.cache.entry_path(&format!("{stem}.{fallback_ext}"));
        if self.cache.exists(&raster_path) {
            debug!("⚡ cache hit {}", raster_path.display());
            return Some(raster_path);
        }
        None
    }
}

/// `<hash>-<theme>[-<size>px]`, the deterministic filename stem for a key.
fn cache_stem(key_source: &str, theme: Theme, render_size: Option<u32>) -> String {
    let hash = hex::encode(blake3::hash(key_source.as_bytes()).as_bytes());
    match render_size {
        Some(size) => format!("{hash}-{}-{size}px", theme.cache_suffix()),
        None => format!("{hash}-{}", theme.cache_suffix()),
    }
}

fn extension_for_media(media: &str) -> Option<&'static str> {
    if media.contains("svg") {
        return Some("svg");
    }
    match media {
        "image/png" => Some("png"),
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "image/x-icon" | "image/vnd.microsoft.icon" => Some("ico"),
        _ => None,
    }
}

fn extension_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segment = parsed.path_segments()?.last()?;
    let (_, ext) = segment.rsplit_once('.')?;
    (!ext.is_empty() && ext.len() <= 4 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .then(|| ext.to_ascii_lowercase())
}

fn sniff_extension(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        return Some("png");
    }
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some("jpg");
    }
    if bytes.starts_with(b"GIF8") {
        return Some("gif");
    }
    if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        return Some("webp");
    }
    if bytes.starts_with(&[0x00, 0x00, 0x01, 0x00]) {
        return Some("ico");
    }
    None
}
