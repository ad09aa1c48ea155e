use std::borrow::Cow;
use std::path::PathBuf;
use std::time::Duration;

use image::imageops::FilterType;
use image::{DynamicImage, Rgba, Rgba32FImage, RgbaImage};
use tracing::debug;

use crate::error::ExtractError;

/// Side length of the square sampling buffer. Every source is stretched to
/// exactly this size, which bounds histogram work regardless of resolution.
pub const SAMPLE_SIZE: u32 = 200;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Largest remote image body accepted before decoding.
pub const MAX_DOWNLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Where an image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Path(PathBuf),
    Url(String),
    Bytes(Vec<u8>),
}

impl ImageSource {
    /// `http://` and `https://` references are URLs, anything else a file path.
    pub fn parse(source: &str) -> Self {
        let lower = source.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(source.to_string())
        } else {
            Self::Path(PathBuf::from(source))
        }
    }

    /// Human-readable description for log events.
    pub fn describe(&self) -> String {
        match self {
            Self::Path(path) => path.display().to_string(),
            Self::Url(url) => url.clone(),
            Self::Bytes(bytes) => format!("<{} bytes>", bytes.len()),
        }
    }
}

impl From<&str> for ImageSource {
    fn from(source: &str) -> Self {
        Self::parse(source)
    }
}

/// Read or download the raw encoded bytes. This is the only await point of an
/// extraction. In-memory sources are borrowed, not copied.
pub async fn fetch_bytes(source: &ImageSource) -> Result<Cow<'_, [u8]>, ExtractError> {
    match source {
        ImageSource::Path(path) => tokio::fs::read(path)
            .await
            .map(Cow::Owned)
            .map_err(|source| ExtractError::Read {
                path: path.clone(),
                source,
            }),
        ImageSource::Url(url) => fetch_url(url).await.map(Cow::Owned),
        ImageSource::Bytes(bytes) => Ok(Cow::Borrowed(bytes.as_slice())),
    }
}

async fn fetch_url(url: &str) -> Result<Vec<u8>, ExtractError> {
    let fetch_err = |source: reqwest::Error| ExtractError::Fetch {
        url: url.to_string(),
        source,
    };

    let client = reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(fetch_err)?;
    let mut response = client.get(url).send().await.map_err(fetch_err)?;

    let status = response.status();
    if !status.is_success() {
        return Err(ExtractError::Status {
            url: url.to_string(),
            status,
        });
    }

    if let Some(len) = response.content_length() {
        check_download_len(url, len)?;
    }
    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await.map_err(fetch_err)? {
        check_download_len(url, (body.len() + chunk.len()) as u64)?;
        body.extend_from_slice(&chunk);
    }
    debug!(url, len = body.len(), "fetched remote image");
    Ok(body)
}

/// Reject bodies over [`MAX_DOWNLOAD_BYTES`]. Applied to the declared
/// `Content-Length` and to the running total while streaming.
fn check_download_len(url: &str, len: u64) -> Result<(), ExtractError> {
    if len > MAX_DOWNLOAD_BYTES as u64 {
        return Err(ExtractError::TooLarge {
            url: url.to_string(),
            limit: MAX_DOWNLOAD_BYTES,
        });
    }
    Ok(())
}

/// Decode encoded image bytes of any format the `image` crate recognizes.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, ExtractError> {
    Ok(image::load_from_memory(bytes)?)
}

/// Raster an image into the fixed square RGBA sampling buffer.
///
/// Smaller images are upscaled, non-square ones stretched. An image that is
/// already the right size is copied without filtering so its exact pixel
/// values survive.
///
/// Filtering happens on premultiplied alpha, so a pixel on the edge of a
/// transparent region keeps its color and only loses opacity.
pub fn raster_sample(img: &DynamicImage) -> RgbaImage {
    let rgba = img.to_rgba8();
    if rgba.dimensions() == (SAMPLE_SIZE, SAMPLE_SIZE) {
        return rgba;
    }
    debug!(
        width = rgba.width(),
        height = rgba.height(),
        "resizing into sampling buffer"
    );
    let premultiplied = Rgba32FImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0.map(|c| c as f32 / 255.0);
        Rgba([r * a, g * a, b * a, a])
    });
    let resized = image::imageops::resize(
        &premultiplied,
        SAMPLE_SIZE,
        SAMPLE_SIZE,
        FilterType::Triangle,
    );
    RgbaImage::from_fn(SAMPLE_SIZE, SAMPLE_SIZE, |x, y| {
        unpremultiply(resized.get_pixel(x, y).0)
    })
}

fn unpremultiply([r, g, b, a]: [f32; 4]) -> Rgba<u8> {
    fn to_u8(v: f32) -> u8 {
        (v.clamp(0.0, 1.0) * 255.0).round() as u8
    }
    let alpha = to_u8(a);
    if alpha == 0 {
        return Rgba([0, 0, 0, 0]);
    }
    Rgba([to_u8(r / a), to_u8(g / a), to_u8(b / a), alpha])
}
