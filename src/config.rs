//! Layered configuration: defaults, an optional JSON file, then `GEMINI_*`
//! environment variables.

use std::{
    collections::BTreeMap,
    fmt,
    path::{Path, PathBuf},
};

use figment::{
    providers::{Env, Format, Json, Serialized},
    Figment,
};
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::{
    error::{GeminiError, Result},
    models::DEFAULT_MODEL,
};

/// Prefix shared by every configuration variable.
pub const ENV_PREFIX: &str = "GEMINI_";
/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
/// Environment variable overriding the service root.
pub const BASE_URL_VAR: &str = "GEMINI_BASE_URL";
/// Default API endpoint for Google's Generative AI service
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Default API version
pub const DEFAULT_API_VERSION: &str = "v1beta";

const CONFIG_DIR: &str = ".gemini-vision";
const CONFIG_FILE: &str = "config.json";

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API key sent with every request
    #[serde(deserialize_with = "scalar_string")]
    pub api_key: String,
    /// Model identifier
    #[serde(deserialize_with = "scalar_string")]
    pub model: String,
    /// Service root, without the version segment
    #[serde(deserialize_with = "scalar_string")]
    pub base_url: String,
    /// API version path segment
    #[serde(deserialize_with = "scalar_string")]
    pub api_version: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

impl Config {
    /// Loads the config from `~/.gemini-vision/config.json` (if present) and
    /// the environment.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::MissingApiKey`] if no API key was provided and
    /// [`GeminiError::Config`] if a source holds malformed values.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::default_path())
    }

    /// Loads the config, reading the JSON file at `path` when given.
    pub fn load_from(path: Option<PathBuf>) -> Result<Self> {
        Self::from_figment(Self::figment(path.as_deref()))
    }

    /// Path of the per-user config file.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            figment = figment.merge(Json::file(path));
        }
        figment.merge(Self::env())
    }

    /// `GEMINI_*` variables as untyped strings.
    ///
    /// `Env` would parse `0123` as the integer 123; every field here is a
    /// string, so values are passed through verbatim.
    fn env() -> Serialized<BTreeMap<String, String>> {
        let vars = Env::prefixed(ENV_PREFIX)
            .iter()
            .map(|(key, value)| (key.as_str().to_ascii_lowercase(), value))
            .collect::<BTreeMap<_, _>>();
        Serialized::defaults(vars)
    }

    fn from_figment(figment: Figment) -> Result<Self> {
        let config: Config = figment.extract()?;
        if config.api_key.trim().is_empty() {
            return Err(GeminiError::MissingApiKey {
                var: API_KEY_VAR.to_string(),
            });
        }
        Ok(config)
    }
}

/// Accepts any scalar where a string is expected, so `"api_key": 12345`
/// in the config file reads as `"12345"`.
fn scalar_string<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    struct ScalarVisitor;

    impl de::Visitor<'_> for ScalarVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string, number or boolean")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<String, E> {
            Ok(v)
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(ScalarVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn env_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.set_env("GEMINI_API_KEY", "test_key");
            jail.set_env("GEMINI_MODEL", "gemini-1.5-pro");

            let config = Config::load_from(None).expect("config loads");
            assert_eq!(config.api_key, "test_key");
            assert_eq!(config.model, "gemini-1.5-pro");
            assert_eq!(config.base_url, DEFAULT_BASE_URL);
            assert_eq!(config.api_version, DEFAULT_API_VERSION);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.json",
                r#"{ "api_key": "file_key", "model": "from-file", "base_url": "http://localhost:9" }"#,
            )?;
            jail.set_env("GEMINI_API_KEY", "env_key");

            let config = Config::load_from(Some(jail.directory().join("config.json")))
                .expect("config loads");
            assert_eq!(config.api_key, "env_key");
            assert_eq!(config.model, "from-file");
            assert_eq!(config.base_url, "http://localhost:9");
            Ok(())
        });
    }

    #[test]
    fn missing_file_is_ignored() {
        Jail::expect_with(|jail| {
            jail.set_env("GEMINI_API_KEY", "k");
            let config = Config::load_from(Some(jail.directory().join("absent.json")))
                .expect("config loads");
            assert_eq!(config.model, DEFAULT_MODEL);
            Ok(())
        });
    }

    #[test]
    fn empty_api_key_is_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("GEMINI_API_KEY", "");
            let err = Config::load_from(None).unwrap_err();
            assert_eq!(
                err.to_string(),
                "GEMINI_API_KEY environment variable must be set"
            );
            Ok(())
        });
    }

    #[test]
    fn numeric_and_boolean_env_values_stay_strings() {
        Jail::expect_with(|jail| {
            jail.set_env("GEMINI_API_KEY", "0123456789");
            jail.set_env("GEMINI_MODEL", "true");
            jail.set_env("GEMINI_API_VERSION", "1");

            let config = Config::load_from(None).expect("config loads");
            assert_eq!(config.api_key, "0123456789");
            assert_eq!(config.model, "true");
            assert_eq!(config.api_version, "1");
            Ok(())
        });
    }

    #[test]
    fn numeric_file_values_are_accepted() {
        Jail::expect_with(|jail| {
            jail.create_file("config.json", r#"{ "api_key": 1234567890, "model": false }"#)?;

            let config = Config::load_from(Some(jail.directory().join("config.json")))
                .expect("config loads");
            assert_eq!(config.api_key, "1234567890");
            assert_eq!(config.model, "false");
            Ok(())
        });
    }
}
