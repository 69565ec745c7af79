//! Data structures for the Gemini AI API requests and responses.

mod generation_config;
mod model_params;
mod part;
mod request;
mod request_type;
mod response;

pub use generation_config::GenerationConfig;
pub use model_params::{ModelParams, DEFAULT_MODEL};
pub use part::{Blob, Part};
pub use request::{Content, Request, Role};
pub use request_type::RequestType;
pub(crate) use response::ErrorEnvelope;
pub use response::{Candidate, FinishReason, PromptFeedback, Response, UsageMetadata};
