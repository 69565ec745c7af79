//! Common part model used in both requests and responses.

use std::path::Path;

use base64::{engine::general_purpose::STANDARD as base64_engine, Engine};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{error::Result, image::ImageFormat};

/// A single unit of multimodal input or output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    /// A text part containing a string value
    Text {
        /// The text content of the part
        text: String,
    },
    /// A part containing inline binary data
    InlineData {
        /// The inline data content of the part
        #[serde(rename = "inlineData")]
        inline_data: Blob,
    },
}

impl Part {
    /// Creates a text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Creates an inline data part from raw bytes and a MIME type.
    pub fn inline_data(data: impl Into<Vec<u8>>, mime_type: impl Into<String>) -> Self {
        Self::InlineData {
            inline_data: Blob::new(data, mime_type),
        }
    }

    /// Reads an image file into an inline data part.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its extension is not a
    /// supported image type.
    pub fn image_from_path(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::InlineData {
            inline_data: Blob::from_image_path(path)?,
        })
    }

    /// Returns the text of a text part.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            _ => None,
        }
    }

    /// Returns the blob of an inline data part.
    pub fn as_inline_data(&self) -> Option<&Blob> {
        match self {
            Self::InlineData { inline_data } => Some(inline_data),
            _ => None,
        }
    }
}

/// Binary payload tagged with a MIME type.
///
/// On the wire the bytes travel as standard base64.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    /// The MIME type of the data
    pub mime_type: String,
    /// The raw bytes
    #[serde(serialize_with = "encode_base64", deserialize_with = "decode_base64")]
    pub data: Vec<u8>,
}

impl Blob {
    /// Creates a blob from bytes and a MIME type.
    pub fn new(data: impl Into<Vec<u8>>, mime_type: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Reads an image file and tags it with the MIME type derived from its extension.
    pub fn from_image_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let format = ImageFormat::from_path(path)?;
        Ok(Self::new(data, format.mime_type()))
    }
}

fn encode_base64<S: Serializer>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&base64_engine.encode(data))
}

fn decode_base64<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error> {
    let encoded = String::deserialize(deserializer)?;
    base64_engine
        .decode(encoded.as_bytes())
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_part_serializes_as_plain_object() {
        let value = serde_json::to_value(Part::text("What's this image about?")).unwrap();
        assert_eq!(value, json!({ "text": "What's this image about?" }));
    }

    #[test]
    fn inline_data_is_base64_encoded() {
        let part = Part::inline_data(vec![0xff, 0xd8, 0xff, 0xd9], "image/jpeg");
        let value = serde_json::to_value(&part).unwrap();
        assert_eq!(
            value,
            json!({ "inlineData": { "mimeType": "image/jpeg", "data": "/9j/2Q==" } })
        );
    }

    #[test]
    fn inline_data_decodes_from_wire_format() {
        let part: Part = serde_json::from_value(json!({
            "inlineData": { "mimeType": "image/png", "data": "iVBORw0KGgo=" }
        }))
        .unwrap();
        let blob = part.as_inline_data().unwrap();
        assert_eq!(blob.mime_type, "image/png");
        assert_eq!(blob.data, b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn invalid_base64_is_rejected() {
        let result: std::result::Result<Part, _> = serde_json::from_value(json!({
            "inlineData": { "mimeType": "image/png", "data": "not base64!" }
        }));
        assert!(result.is_err());
    }
}
