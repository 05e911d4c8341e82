use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::PantryError;

/// Environment variable holding the Gemini API key
pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
/// Environment variable holding the Spoonacular API key
pub const SPOONACULAR_API_KEY: &str = "SPOONACULAR_API_KEY";

/// Load variables from a `.env` file, from `path` or searched upward from the
/// working directory.
///
/// A missing file yields `Ok(None)`; a malformed or unreadable one is returned
/// so the caller can report it instead of failing later on a missing key.
pub fn load_env_file(path: Option<&Path>) -> Result<Option<PathBuf>, dotenvy::Error> {
    let loaded = match path {
        Some(path) => dotenvy::from_path(path).map(|_| path.to_path_buf()),
        None => dotenvy::dotenv(),
    };

    match loaded {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// The two secrets the assistant needs before it may talk to anything.
#[derive(Clone)]
pub struct Credentials {
    pub gemini_api_key: String,
    pub spoonacular_api_key: String,
}

impl Credentials {
    /// Read both keys from the process environment.
    ///
    /// Call [`load_env_file`] first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self, PantryError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve both keys through `lookup`. Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PantryError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &'static str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(PantryError::MissingCredential(name))
        };

        Ok(Credentials {
            gemini_api_key: require(GEMINI_API_KEY)?,
            spoonacular_api_key: require(SPOONACULAR_API_KEY)?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("gemini_api_key", &"<redacted>")
            .field("spoonacular_api_key", &"<redacted>")
            .finish()
    }
}

/// Non-secret settings
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Request timeout in seconds, applied to every outbound call
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Generative model settings
    #[serde(default)]
    pub gemini: GeminiConfig,
    /// Recipe search settings
    #[serde(default)]
    pub spoonacular: SpoonacularConfig,
}

/// Configuration for the Gemini provider
#[derive(Debug, Deserialize, Clone)]
pub struct GeminiConfig {
    /// Model identifier (e.g., "gemini-1.5-flash")
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL for the API endpoint (for proxies and tests)
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_gemini_base_url(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Configuration for the Spoonacular recipe search
#[derive(Debug, Deserialize, Clone)]
pub struct SpoonacularConfig {
    #[serde(default = "default_spoonacular_base_url")]
    pub base_url: String,
}

impl Default for SpoonacularConfig {
    fn default() -> Self {
        Self {
            base_url: default_spoonacular_base_url(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            gemini: GeminiConfig::default(),
            spoonacular: SpoonacularConfig::default(),
        }
    }
}

// Default value functions
fn default_timeout() -> u64 {
    30
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_spoonacular_base_url() -> String {
    "https://api.spoonacular.com".to_string()
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with PANTRY__ prefix
    /// 2. pantry.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: PANTRY__GEMINI__MODEL
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// See [`AppConfig::load`].
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("pantry").required(false))
        .add_source(
            Environment::with_prefix("PANTRY")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_values() {
        let config = AppConfig::default();
        assert_eq!(config.timeout, 30);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.gemini.model, "gemini-1.5-flash");
        assert_eq!(config.gemini.temperature, 0.7);
        assert_eq!(config.gemini.max_tokens, 2000);
        assert_eq!(config.spoonacular.base_url, "https://api.spoonacular.com");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = Config::builder()
            .add_source(File::from_str(
                "timeout = 5\n[gemini]\nmodel = \"gemini-2.5-flash\"\n",
                FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let config: AppConfig = settings.try_deserialize().unwrap();

        assert_eq!(config.timeout, 5);
        assert_eq!(config.gemini.model, "gemini-2.5-flash");
        assert_eq!(
            config.gemini.base_url,
            "https://generativelanguage.googleapis.com"
        );
        assert_eq!(config.spoonacular.base_url, "https://api.spoonacular.com");
    }

    #[test]
    fn test_credentials_present() {
        let creds = Credentials::from_lookup(lookup_from(&[
            (GEMINI_API_KEY, "gem-key"),
            (SPOONACULAR_API_KEY, " spoon-key \n"),
        ]))
        .unwrap();

        assert_eq!(creds.gemini_api_key, "gem-key");
        assert_eq!(creds.spoonacular_api_key, "spoon-key");
    }

    #[test]
    fn test_missing_gemini_key() {
        let result = Credentials::from_lookup(lookup_from(&[(SPOONACULAR_API_KEY, "spoon-key")]));
        match result {
            Err(PantryError::MissingCredential(name)) => assert_eq!(name, GEMINI_API_KEY),
            other => panic!("expected missing credential, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_spoonacular_key_is_missing() {
        let result = Credentials::from_lookup(lookup_from(&[
            (GEMINI_API_KEY, "gem-key"),
            (SPOONACULAR_API_KEY, "   "),
        ]));
        match result {
            Err(PantryError::MissingCredential(name)) => assert_eq!(name, SPOONACULAR_API_KEY),
            other => panic!("expected missing credential, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_env_file_is_not_an_error() {
        let path = std::env::temp_dir().join("pantry-chef-no-such-dir/.env");
        assert!(matches!(load_env_file(Some(&path)), Ok(None)));
    }

    #[test]
    fn test_malformed_env_file_is_reported() {
        let path = std::env::temp_dir().join(format!("pantry-chef-bad-{}.env", std::process::id()));
        std::fs::write(&path, "this line has no equals sign\n").unwrap();

        let result = load_env_file(Some(&path));
        std::fs::remove_file(&path).ok();

        let err = result.unwrap_err();
        assert!(!err.not_found());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = Credentials {
            gemini_api_key: "super-secret".to_string(),
            spoonacular_api_key: "also-secret".to_string(),
        };
        let printed = format!("{:?}", creds);
        assert!(!printed.contains("super-secret"));
        assert!(!printed.contains("also-secret"));
    }
}
