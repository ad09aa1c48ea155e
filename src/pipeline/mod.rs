pub mod extract;
pub mod result;
pub mod sample;
pub mod shades;

use image::RgbaImage;
use tracing::{debug, warn};

use crate::error::ExtractError;
use self::result::ExtractionResult;
use self::sample::ImageSource;

/// Extract a palette from an image source. Never fails.
///
/// Read, fetch and decode failures, and images with no usable pixels, all
/// resolve to [`ExtractionResult::fallback`]. Each call owns its sampling
/// buffer and histogram; concurrent calls share nothing, and a call is never
/// cancelled by a newer one.
pub async fn extract_palette(source: &ImageSource) -> ExtractionResult {
    match try_extract_palette(source).await {
        Ok(result) => result,
        Err(err) => {
            warn!(
                source = %source.describe(),
                error = %err,
                "palette extraction failed, using default colors"
            );
            ExtractionResult::fallback()
        }
    }
}

/// Same pipeline as [`extract_palette`], reporting why it could not finish.
pub async fn try_extract_palette(source: &ImageSource) -> Result<ExtractionResult, ExtractError> {
    let bytes = sample::fetch_bytes(source).await?;
    let img = sample::decode(&bytes)?;
    drop(bytes);
    let buffer = sample::raster_sample(&img);
    extract_from_buffer(&buffer).ok_or(ExtractError::EmptyHistogram)
}

/// Run histogram and distinct selection on an already rastered buffer.
///
/// The buffer is sampled as-is; callers wanting the fixed sampling size
/// should go through [`sample::raster_sample`] first.
pub fn extract_from_buffer(buffer: &RgbaImage) -> Option<ExtractionResult> {
    let distinct = extract::distinct_colors(buffer);
    debug!(
        colors = ?distinct.iter().map(|c| c.to_hex()).collect::<Vec<_>>(),
        "selected distinct colors"
    );
    ExtractionResult::from_distinct(&distinct)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use image::Rgba;

    fn region_image(regions: &[([u8; 4], u32)]) -> RgbaImage {
        // rows of each color, top to bottom; row counts sum to 200
        let mut rows = Vec::new();
        for &(px, n) in regions {
            rows.extend(std::iter::repeat(px).take(n as usize));
        }
        RgbaImage::from_fn(200, 200, |_, y| Rgba(rows[y as usize]))
    }

    #[test]
    fn dominant_red_blue_with_absorbed_near_red() {
        let buffer = region_image(&[
            ([0xFF, 0x00, 0x00, 255], 120),
            ([0x00, 0x00, 0xFF, 255], 60),
            ([0xFF, 0x05, 0x05, 255], 20),
        ]);
        let result = extract_from_buffer(&buffer).unwrap();
        assert_eq!(result.primary.to_hex(), "#FF0000");
        assert_eq!(result.accent.to_hex(), "#0000FF");
        assert!(!result.palette.contains(&Color::new(0xFF, 0x05, 0x05)));
        assert_eq!(result.palette.len(), 15 + 15 + 8);
    }

    #[test]
    fn single_color_image_synthesizes_accent() {
        let buffer = region_image(&[([0x33, 0x66, 0x99, 255], 200)]);
        let result = extract_from_buffer(&buffer).unwrap();
        assert_eq!(result.primary.to_hex(), "#336699");
        assert_eq!(result.accent.to_hex(), "#CC9966");
    }

    #[test]
    fn background_noise_does_not_win() {
        // mostly white canvas, some shadow, a small green logo mark
        let buffer = region_image(&[
            ([255, 255, 255, 255], 150),
            ([5, 5, 5, 255], 30),
            ([20, 160, 60, 255], 20),
        ]);
        let result = extract_from_buffer(&buffer).unwrap();
        assert_eq!(result.primary, Color::new(20, 160, 60));
    }

    #[test]
    fn transparent_buffer_yields_nothing() {
        let buffer = RgbaImage::new(200, 200);
        assert!(extract_from_buffer(&buffer).is_none());
    }

    #[test]
    fn mid_gray_is_a_legitimate_color() {
        let buffer = region_image(&[([128, 128, 128, 255], 200)]);
        let result = extract_from_buffer(&buffer).unwrap();
        assert_eq!(result.primary.to_hex(), "#808080");
        assert_eq!(result.accent.to_hex(), "#7F7F7F");
    }

    #[tokio::test]
    async fn undecodable_bytes_fall_back() {
        let source = ImageSource::Bytes(b"definitely not a png".to_vec());
        assert!(matches!(
            try_extract_palette(&source).await,
            Err(ExtractError::Decode(_))
        ));
        assert_eq!(extract_palette(&source).await, ExtractionResult::fallback());
    }

    #[tokio::test]
    async fn missing_file_falls_back() {
        let source = ImageSource::parse("/nonexistent/logo.png");
        assert!(matches!(
            try_extract_palette(&source).await,
            Err(ExtractError::Read { .. })
        ));
        assert_eq!(extract_palette(&source).await, ExtractionResult::fallback());
    }
}
