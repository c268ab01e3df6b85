use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to decode sound {path}: {source}")]
    Sound {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
    #[error("decoded image {path} has no {width}x{height} RGBA buffer")]
    PixelBuffer {
        path: PathBuf,
        width: u32,
        height: u32,
    },
}

impl AssetError {
    pub fn path(&self) -> &PathBuf {
        match self {
            AssetError::Io { path, .. }
            | AssetError::Image { path, .. }
            | AssetError::Sound { path, .. }
            | AssetError::PixelBuffer { path, .. } => path,
        }
    }
}

/// What to do when an asset cannot be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetPolicy {
    /// Log a warning and carry on without the asset.
    Lenient,
    /// Fail startup.
    Strict,
}

impl AssetPolicy {
    /// Applies the policy to one load result: `Ok(None)` means "skipped with a warning".
    pub fn resolve<T>(self, result: Result<T, AssetError>) -> Result<Option<T>, AssetError> {
        match (result, self) {
            (Ok(value), _) => Ok(Some(value)),
            (Err(err), AssetPolicy::Lenient) => {
                tracing::warn!(path = %err.path().display(), "asset unavailable: {err}");
                Ok(None)
            }
            (Err(err), AssetPolicy::Strict) => Err(err),
        }
    }
}
