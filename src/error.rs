//! Error types for the Gemini vision client.

use thiserror::Error;

use crate::image::SUPPORTED_EXTENSIONS;

/// Errors that can occur when using the Gemini vision client.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Generic error carrying a message.
    #[error("[Gemini Error]: {message}")]
    Base {
        /// Error message
        message: String,
    },

    /// The API key variable is unset or empty.
    #[error("{var} environment variable must be set")]
    MissingApiKey {
        /// Name of the variable that was looked up
        var: String,
    },

    /// The file extension does not map to a supported image type.
    #[error(
        "Unsupported image format. Supported formats: {}. Got: {extension}",
        SUPPORTED_EXTENSIONS.join(", ")
    )]
    UnsupportedImageFormat {
        /// The offending extension, including the leading dot (empty if none)
        extension: String,
    },

    /// Error occurred while reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error occurred during an API request.
    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Error occurred when parsing JSON.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// The API answered with a non-success status.
    #[error("Request failed with status {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message from the error envelope, or the raw body
        message: String,
    },

    /// The response did not contain any text.
    #[error("Response contained no text{}", .block_reason.as_ref().map(|r| format!(" (blocked: {r})")).unwrap_or_default())]
    EmptyResponse {
        /// Reason reported by the API when the prompt was blocked
        block_reason: Option<String>,
    },

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl GeminiError {
    /// Creates a new Base error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self::Base {
            message: message.into(),
        }
    }

    /// Returns true if the error was caused by a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

impl From<figment::Error> for GeminiError {
    fn from(error: figment::Error) -> Self {
        Self::Config(Box::new(error))
    }
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, GeminiError>;
