//! Thumbnail download, downsampling, and reuse-safe display slots.

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use image::imageops::FilterType;
use image::ImageFormat;
use url::Url;

use crate::cache::MemoryCache;
use crate::error::SpaceLaunchError;

/// Size rows render their thumbnail at.
pub const THUMBNAIL_SIZE: ThumbnailSize = ThumbnailSize {
    width: 40,
    height: 40,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Largest image body the loader will read.
pub const MAX_IMAGE_BYTES: u64 = 8 * 1024 * 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ThumbnailSize {
    pub width: u32,
    pub height: u32,
}

/// A downsampled image, PNG-encoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Thumbnail {
    pub size: ThumbnailSize,
    pub png: Arc<Vec<u8>>,
}

/// Downloads images and keeps downsampled copies in memory.
pub struct ImageLoader {
    http: reqwest::Client,
    cache: MemoryCache<Arc<Vec<u8>>>,
    max_bytes: u64,
}

impl ImageLoader {
    pub fn new(cache: MemoryCache<Arc<Vec<u8>>>) -> Result<Self, SpaceLaunchError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SpaceLaunchError::Image(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            cache,
            max_bytes: MAX_IMAGE_BYTES,
        })
    }

    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Loads `url` scaled to fill `size`. Cached per URL and size.
    pub async fn load(&self, url: &str, size: ThumbnailSize) -> Result<Thumbnail, SpaceLaunchError> {
        let url = parse_image_url(url)?;
        let cache_key = format!("{}@{}x{}", url, size.width, size.height);
        if let Some(png) = self.cache.get(&cache_key) {
            return Ok(Thumbnail { size, png });
        }

        let resp = self.http.get(url.clone()).send().await.map_err(|e| {
            tracing::error!("Failed to download {}: {}", url, e);
            SpaceLaunchError::Image(format!("download failed: {}", e))
        })?;
        let status = resp.status();
        if !status.is_success() {
            tracing::error!("Image request {} failed with status {}", url, status);
            return Err(SpaceLaunchError::Image(format!(
                "HTTP {} for {}",
                status.as_u16(),
                url
            )));
        }
        if let Some(len) = resp.content_length() {
            if len > self.max_bytes {
                return Err(self.too_large(&url, len));
            }
        }
        let bytes = resp.bytes().await.map_err(|e| {
            tracing::error!("Failed to read image body {}: {}", url, e);
            SpaceLaunchError::Image(format!("read failed: {}", e))
        })?;
        if bytes.len() as u64 > self.max_bytes {
            return Err(self.too_large(&url, bytes.len() as u64));
        }

        let png = tokio::task::spawn_blocking(move || downsample(&bytes, size))
            .await
            .map_err(|e| SpaceLaunchError::Image(format!("resize task failed: {}", e)))??;
        let png = Arc::new(png);
        self.cache.set(cache_key, Arc::clone(&png));
        Ok(Thumbnail { size, png })
    }

    fn too_large(&self, url: &Url, len: u64) -> SpaceLaunchError {
        tracing::error!("Image {} is {} bytes, limit is {}", url, len, self.max_bytes);
        SpaceLaunchError::Image(format!(
            "image of {} bytes exceeds the {} byte limit",
            len, self.max_bytes
        ))
    }
}

/// Accepts only absolute http(s) URLs.
pub fn parse_image_url(raw: &str) -> Result<Url, SpaceLaunchError> {
    let url = Url::parse(raw)
        .map_err(|e| SpaceLaunchError::InvalidInput(format!("bad image URL {:?}: {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(SpaceLaunchError::InvalidInput(format!(
            "unsupported image URL scheme {:?}",
            other
        ))),
    }
}

/// Decodes `bytes`, scales and crops to fill `size`, and re-encodes as PNG.
pub fn downsample(bytes: &[u8], size: ThumbnailSize) -> Result<Vec<u8>, SpaceLaunchError> {
    if size.width == 0 || size.height == 0 {
        return Err(SpaceLaunchError::InvalidInput(format!(
            "thumbnail size {}x{} is empty",
            size.width, size.height
        )));
    }
    let img = image::load_from_memory(bytes)?;
    let thumb = img.resize_to_fill(size.width, size.height, FilterType::Triangle);
    let mut out = Cursor::new(Vec::new());
    thumb.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

/// Proof that a load was started for a particular binding of a slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThumbnailTicket {
    generation: u64,
    pub url: String,
    pub size: ThumbnailSize,
}

/// The image area of one reusable list cell.
///
/// Every [`prepare`](Self::prepare) clears the current image and starts a
/// new generation; a load finishing for an older generation is ignored, so
/// a recycled cell never shows the previous row's thumbnail.
#[derive(Debug, Default)]
pub struct ThumbnailSlot {
    generation: u64,
    url: Option<String>,
    image: Option<Thumbnail>,
}

impl ThumbnailSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the slot to `url`. Returns a ticket when there is something to load.
    pub fn prepare(&mut self, url: Option<&str>, size: ThumbnailSize) -> Option<ThumbnailTicket> {
        self.generation += 1;
        self.image = None;
        self.url = url
            .and_then(|raw| parse_image_url(raw).ok())
            .map(|u| u.to_string());
        self.url.as_ref().map(|url| ThumbnailTicket {
            generation: self.generation,
            url: url.clone(),
            size,
        })
    }

    /// Prepares the slot for reuse: placeholder only, pending loads invalidated.
    pub fn reset(&mut self) {
        self.prepare(None, THUMBNAIL_SIZE);
    }

    /// Delivers a load result. Returns whether the slot now shows it.
    pub fn complete(
        &mut self,
        ticket: &ThumbnailTicket,
        result: Result<Thumbnail, SpaceLaunchError>,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!("ignoring stale thumbnail for {}", ticket.url);
            return false;
        }
        match result {
            Ok(thumbnail) => {
                self.image = Some(thumbnail);
                true
            }
            Err(e) => {
                tracing::warn!("thumbnail {} failed, keeping placeholder: {}", ticket.url, e);
                false
            }
        }
    }

    pub fn image(&self) -> Option<&Thumbnail> {
        self.image.as_ref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn shows_placeholder(&self) -> bool {
        self.image.is_none()
    }
}
