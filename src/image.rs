//! Image file handling: extension-based MIME detection and loading.

use std::{fmt, path::Path};

use tracing::debug;

use crate::{
    error::{GeminiError, Result},
    models::{Blob, Part},
};

/// File extensions accepted as images, with leading dot.
pub const SUPPORTED_EXTENSIONS: [&str; 5] = [".jpg", ".jpeg", ".png", ".gif", ".webp"];

/// Image types the API accepts as inline data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// JPEG (`.jpg`, `.jpeg`)
    Jpeg,
    /// PNG
    Png,
    /// GIF
    Gif,
    /// WebP
    Webp,
}

impl ImageFormat {
    /// The MIME type sent alongside the bytes.
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
        }
    }

    /// Detects the format from the file extension, ignoring case.
    ///
    /// Only the extension is inspected; the file contents are never decoded.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::UnsupportedImageFormat`] for any extension
    /// outside [`SUPPORTED_EXTENSIONS`], including a missing one.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        if !SUPPORTED_EXTENSIONS.contains(&extension.to_ascii_lowercase().as_str()) {
            return Err(GeminiError::UnsupportedImageFormat { extension });
        }

        mime_guess::from_path(path)
            .iter()
            .find_map(|mime| Self::from_mime(mime.essence_str()))
            .ok_or(GeminiError::UnsupportedImageFormat { extension })
    }

    /// Maps a MIME type back to a format.
    pub fn from_mime(mime_type: &str) -> Option<Self> {
        match mime_type {
            "image/jpeg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "image/gif" => Some(Self::Gif),
            "image/webp" => Some(Self::Webp),
            _ => None,
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime_type())
    }
}

/// Reads an image file asynchronously into a [`Blob`].
///
/// The file is read first, so a missing file is reported as an I/O
/// `NotFound` error even when its extension is unsupported.
pub async fn load_image(path: impl AsRef<Path>) -> Result<Blob> {
    let path = path.as_ref();
    let data = tokio::fs::read(path).await?;
    let format = ImageFormat::from_path(path)?;
    debug!(path = %path.display(), mime_type = %format, bytes = data.len(), "loaded image");
    Ok(Blob::new(data, format.mime_type()))
}

impl Blob {
    /// Reads any file into a blob, guessing the MIME type from its extension.
    ///
    /// Unknown extensions fall back to `application/octet-stream`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let mime_type = mime_guess::from_path(path).first_or_octet_stream();
        Ok(Self::new(data, mime_type.essence_str()))
    }
}

impl Part {
    /// Reads any file into an inline data part. See [`Blob::from_path`].
    pub fn file_from_path(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::InlineData {
            inline_data: Blob::from_path(path)?,
        })
    }
}
