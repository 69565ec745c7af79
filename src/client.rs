//! Client implementation for the Gemini AI API.

use tracing::{debug, instrument, warn};

use crate::{
    config::{Config, API_KEY_VAR, BASE_URL_VAR, DEFAULT_API_VERSION, DEFAULT_BASE_URL},
    error::{GeminiError, Result},
    models::{
        Content, ErrorEnvelope, GenerationConfig, ModelParams, Request, RequestType, Response,
    },
};

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// A client for interacting with the Gemini AI API.
#[derive(Clone)]
pub struct GenerativeModel {
    api_key: String,
    params: ModelParams,
    base_url: String,
    api_version: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for GenerativeModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerativeModel")
            .field("params", &self.params)
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

impl GenerativeModel {
    /// Creates a new GenerativeModel with the specified API key and model.
    ///
    /// # Arguments
    ///
    /// * `api_key` - The API key for authentication
    /// * `params` - The model parameters, or just a model identifier
    pub fn new(api_key: impl Into<String>, params: impl Into<ModelParams>) -> Self {
        Self {
            api_key: api_key.into(),
            params: params.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Creates a new GenerativeModel from environment variables.
    ///
    /// # Environment Variables
    ///
    /// * `GEMINI_API_KEY` - The API key for authentication
    /// * `GEMINI_BASE_URL` - Optional service root replacing the default endpoint
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::MissingApiKey`] if the key is unset or empty.
    pub fn from_env(model: impl Into<String>) -> Result<Self> {
        let api_key = non_empty_var(API_KEY_VAR).ok_or_else(|| GeminiError::MissingApiKey {
            var: API_KEY_VAR.to_string(),
        })?;
        let model = Self::new(api_key, ModelParams::builder().model(model).build());
        Ok(match non_empty_var(BASE_URL_VAR) {
            Some(base_url) => model.with_base_url(base_url),
            None => model,
        })
    }

    /// Creates a GenerativeModel from a loaded [`Config`].
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_key.clone(), config.model.clone())
            .with_base_url(config.base_url.clone())
            .with_api_version(config.api_version.clone())
    }

    /// Points the client at a different service root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Overrides the API version path segment.
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// The model identifier requests are sent to.
    pub fn model(&self) -> &str {
        &self.params.model
    }

    fn build_url(&self, request_type: RequestType) -> String {
        format!(
            "{}/{}/models/{}:{}",
            self.base_url, self.api_version, self.params.model, request_type
        )
    }

    /// Makes a request to the Gemini AI API.
    ///
    /// The model's default generation config is applied when the request
    /// carries none.
    async fn make_request(&self, url: &str, mut request: Request) -> Result<reqwest::Response> {
        request.generation_config = request
            .generation_config
            .or_else(|| self.params.generation_config.clone());

        debug!(parts = request.part_count(), "sending request");
        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error = api_error(status.as_u16(), response.text().await);
            warn!(%error, "request failed");
            return Err(error);
        }

        debug!(status = status.as_u16(), "request succeeded");
        Ok(response)
    }

    /// Generates content from a prebuilt request.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or if the response cannot be parsed.
    #[instrument(skip_all, fields(model = %self.params.model))]
    pub async fn generate_response(&self, request: impl Into<Request>) -> Result<Response> {
        let url = self.build_url(RequestType::GenerateContent);
        let body = self.make_request(&url, request.into()).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Generates content from a list of contents and an optional config.
    ///
    /// A `None` config falls back to the model's default, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or if the response cannot be parsed.
    pub async fn generate_content(
        &self,
        contents: Vec<Content>,
        config: Option<GenerationConfig>,
    ) -> Result<Response> {
        self.generate_response(Request::new(contents, config)).await
    }

    /// Generates content from a single text prompt.
    pub async fn send_message(&self, prompt: impl Into<String>) -> Result<Response> {
        self.generate_response(Request::with_prompt(prompt)).await
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Maps a failed response to [`GeminiError::Api`], preferring the message
/// from the API's error envelope.
fn api_error<E: std::fmt::Display>(status: u16, body: std::result::Result<String, E>) -> GeminiError {
    let message = match body {
        Ok(body) => serde_json::from_str::<ErrorEnvelope>(&body)
            .map(|envelope| envelope.error.message)
            .unwrap_or(body),
        Err(e) => format!("failed to read error body: {e}"),
    };
    GeminiError::Api { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_contains_model_and_verb() {
        let model = GenerativeModel::new("key", "gemini-2.0-flash");
        assert_eq!(
            model.build_url(RequestType::GenerateContent),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let model = GenerativeModel::new("key", "m").with_base_url("http://localhost:8080/");
        assert_eq!(
            model.build_url(RequestType::GenerateContent),
            "http://localhost:8080/v1beta/models/m:generateContent"
        );
    }

    #[test]
    fn debug_output_hides_api_key() {
        let model = GenerativeModel::new("secret-key", "m");
        assert!(!format!("{model:?}").contains("secret-key"));
    }

    #[test]
    fn from_config_copies_endpoint() {
        let config = Config {
            api_key: "k".into(),
            model: "gemini-1.5-flash".into(),
            base_url: "http://proxy".into(),
            api_version: "v1".into(),
        };
        let model = GenerativeModel::from_config(&config);
        assert_eq!(model.model(), "gemini-1.5-flash");
        assert_eq!(
            model.build_url(RequestType::GenerateContent),
            "http://proxy/v1/models/gemini-1.5-flash:generateContent"
        );
    }

    #[test]
    fn unreadable_error_body_keeps_read_error() {
        let error = api_error(502, Err::<String, _>("connection reset by peer"));
        assert!(matches!(
            error,
            GeminiError::Api { status: 502, ref message }
                if message == "failed to read error body: connection reset by peer"
        ));
    }

    #[test]
    fn error_envelope_message_is_extracted() {
        let body = r#"{"error":{"code":403,"message":"Permission denied","status":"PERMISSION_DENIED"}}"#;
        let error = api_error(403, Ok::<_, String>(body.to_string()));
        assert_eq!(error.to_string(), "Request failed with status 403: Permission denied");
    }
}
