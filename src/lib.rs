#![deny(missing_docs)]

//! A Rust client for asking the Google Gemini AI API about images.
//!
//! Requests pair a text prompt with inline image bytes. The crate handles
//! MIME detection, base64 encoding, authentication and response parsing.

pub mod client;
pub mod config;
pub mod error;
pub mod image;
pub mod logging;
pub mod models;
pub mod vision;

pub use client::GenerativeModel;
pub use config::Config;
pub use error::{GeminiError, Result};
pub use vision::{generate_content_with_image, DEFAULT_PROMPT};
