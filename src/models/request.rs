//! Request models for the Gemini AI API.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use super::{GenerationConfig, Part};

/// The producer of a piece of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Content written by the caller.
    User,
    /// Content generated by the model.
    Model,
}

/// An ordered collection of parts forming one turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// Who produced this content. The API treats a missing role as `user`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// The parts that make up the content.
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// Creates content without an explicit role.
    pub fn new(parts: Vec<Part>) -> Self {
        Self { role: None, parts }
    }

    /// Creates a user turn.
    pub fn user(parts: Vec<Part>) -> Self {
        Self {
            role: Some(Role::User),
            parts,
        }
    }
}

/// A request to the Gemini AI API.
#[derive(Debug, Clone, Serialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// The contents of the request.
    pub contents: Vec<Content>,
    /// Optional generation config
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl Request {
    /// Creates a request from contents and an optional config.
    pub fn new(contents: Vec<Content>, generation_config: Option<GenerationConfig>) -> Self {
        Self {
            contents,
            generation_config,
        }
    }

    /// Creates a single-turn request with the given text prompt.
    pub fn with_prompt(text: impl Into<String>) -> Self {
        Self::new(vec![Content::new(vec![Part::text(text)])], None)
    }

    /// Total number of parts across all contents.
    pub fn part_count(&self) -> usize {
        self.contents.iter().map(|c| c.parts.len()).sum()
    }
}

impl From<Vec<Content>> for Request {
    fn from(contents: Vec<Content>) -> Self {
        Self::new(contents, None)
    }
}
