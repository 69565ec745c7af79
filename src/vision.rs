//! Text-plus-image prompting, the crate's main entry point.

use std::path::Path;

use tracing::info;

use crate::{
    client::GenerativeModel,
    error::{GeminiError, Result},
    image::load_image,
    models::{Content, Part, Response, DEFAULT_MODEL},
};

/// Prompt used when the caller does not supply one.
pub const DEFAULT_PROMPT: &str = "What's this image about?";

/// Builds the single-turn content for an image question: the prompt text
/// followed by the image bytes.
pub async fn image_request(image_path: impl AsRef<Path>, prompt: impl Into<String>) -> Result<Content> {
    let blob = load_image(image_path).await?;
    Ok(Content::new(vec![
        Part::text(prompt),
        Part::InlineData { inline_data: blob },
    ]))
}

impl GenerativeModel {
    /// Asks the model about an image.
    ///
    /// The request carries one content with a text part and an inline-image
    /// part, and no generation config.
    ///
    /// # Errors
    ///
    /// Fails if the image cannot be read, its extension is unsupported, the
    /// API call fails, or the response holds no text.
    pub async fn generate_content_with_image(
        &self,
        image_path: impl AsRef<Path>,
        prompt: impl Into<String>,
    ) -> Result<Response> {
        let image_path = image_path.as_ref();
        info!(path = %image_path.display(), model = %self.model(), "analyzing image");

        let content = image_request(image_path, prompt).await?;
        let response = self.generate_content(vec![content], None).await?;

        if response.text().is_empty() {
            return Err(GeminiError::EmptyResponse {
                block_reason: response.block_reason().map(str::to_string),
            });
        }
        Ok(response)
    }
}

/// Asks `gemini-2.0-flash` about an image, authenticating with `GEMINI_API_KEY`.
///
/// The key is checked before the file is touched.
pub async fn generate_content_with_image(
    image_path: impl AsRef<Path>,
    prompt: impl Into<String>,
) -> Result<Response> {
    GenerativeModel::from_env(DEFAULT_MODEL)?
        .generate_content_with_image(image_path, prompt)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn image_request_puts_text_before_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.webp");
        std::fs::write(&path, b"RIFF....WEBP").unwrap();

        let content = image_request(&path, DEFAULT_PROMPT).await.unwrap();
        assert_eq!(content.role, None);
        assert_eq!(content.parts.len(), 2);
        assert_eq!(content.parts[0].as_text(), Some(DEFAULT_PROMPT));
        let blob = content.parts[1].as_inline_data().unwrap();
        assert_eq!(blob.mime_type, "image/webp");
        assert_eq!(blob.data, b"RIFF....WEBP");
    }

    #[tokio::test]
    async fn unsupported_file_fails_before_any_request() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.bmp");
        std::fs::write(&path, b"fake image data").unwrap();

        let model = GenerativeModel::new("test_key", DEFAULT_MODEL).with_base_url("http://127.0.0.1:1");
        let err = model
            .generate_content_with_image(&path, DEFAULT_PROMPT)
            .await
            .unwrap_err();
        assert!(matches!(err, GeminiError::UnsupportedImageFormat { .. }));
    }
}
