use std::path::PathBuf;

use thiserror::Error;

/// Why an extraction could not use the image.
///
/// [`crate::pipeline::extract_palette`] never returns these; it logs them and
/// substitutes the default palette. They are exposed through
/// [`crate::pipeline::try_extract_palette`] for callers that want the reason.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read image file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch image from {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("image request to {url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("image at {url} exceeds the {limit} byte download limit")]
    TooLarge { url: String, limit: usize },

    #[error("unsupported or corrupt image")]
    Decode(#[from] image::ImageError),

    #[error("no qualifying pixels after filtering")]
    EmptyHistogram,
}
