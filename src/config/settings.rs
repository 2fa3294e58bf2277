//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// GenerationConfig
// ---------------------------------------------------------------------------

/// Settings for the text-generation service (recipe narratives).
///
/// Targets any OpenAI-compatible `/v1/chat/completions` endpoint; all
/// connection details live here, nothing is hardcoded in the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Base URL of the API endpoint (e.g. `https://api.openai.com`).
    pub base_url: String,
    /// API key: `None` or empty for keyless local endpoints.
    pub api_key: Option<String>,
    /// Model identifier sent to the API.
    pub model: String,
    /// Sampling temperature (0.0 – 1.0).
    pub temperature: f32,
    /// Maximum seconds to wait for a generation response before timing out.
    pub timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".into(),
            api_key: None,
            model: "gpt-3.5-turbo".into(),
            temperature: 0.7,
            timeout_secs: 20,
        }
    }
}

// ---------------------------------------------------------------------------
// SearchConfig
// ---------------------------------------------------------------------------

/// Settings for the recipe-search service (related-recipe links).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Base URL of the search endpoint (e.g. `https://api.spoonacular.com`).
    pub base_url: String,
    /// API key passed as the `apiKey` query parameter.
    pub api_key: Option<String>,
    /// Maximum number of related recipes requested per query.
    pub max_results: usize,
    /// Maximum seconds to wait for a search response before timing out.
    pub timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.spoonacular.com".into(),
            api_key: None,
            max_results: 3,
            timeout_secs: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// VoiceConfig
// ---------------------------------------------------------------------------

/// Settings for speech capture and narration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceConfig {
    /// BCP-47 locale for single-utterance speech capture.
    pub locale: String,
    /// Base URL of the networked voice-synthesis provider.
    ///
    /// The provider is only used when `provider_api_key` is set; otherwise
    /// narration goes straight to the local fallback.
    pub provider_base_url: String,
    /// API key for the networked provider: `None` disables it.
    pub provider_api_key: Option<String>,
    /// Synthesis model identifier.
    pub model: String,
    /// Voice identity requested from the provider.
    pub voice: String,
    /// Maximum seconds to wait for a synthesis response before timing out.
    pub timeout_secs: u64,
    /// Local synthesis command for the fallback path: `None` auto-detects
    /// a platform speech command (`say`, `espeak`, …).
    pub local_command: Option<String>,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            provider_base_url: "https://api.openai.com".into(),
            provider_api_key: None,
            model: "tts-1".into(),
            voice: "alloy".into(),
            timeout_secs: 20,
            local_command: None,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use veganchef::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Text-generation service settings.
    pub generation: GenerationConfig,
    /// Recipe-search service settings.
    pub search: SearchConfig,
    /// Speech capture / narration settings.
    pub voice: VoiceConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Verify that a default `AppConfig` can be serialised to TOML and
    /// deserialised back without any data loss.
    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");

        // GenerationConfig
        assert_eq!(original.generation.base_url, loaded.generation.base_url);
        assert_eq!(original.generation.api_key, loaded.generation.api_key);
        assert_eq!(original.generation.model, loaded.generation.model);
        assert_eq!(
            original.generation.timeout_secs,
            loaded.generation.timeout_secs
        );
        assert_eq!(
            original.generation.temperature,
            loaded.generation.temperature
        );

        // SearchConfig
        assert_eq!(original.search.base_url, loaded.search.base_url);
        assert_eq!(original.search.max_results, loaded.search.max_results);
        assert_eq!(original.search.timeout_secs, loaded.search.timeout_secs);

        // VoiceConfig
        assert_eq!(original.voice.locale, loaded.voice.locale);
        assert_eq!(original.voice.voice, loaded.voice.voice);
        assert_eq!(original.voice.model, loaded.voice.model);
        assert_eq!(original.voice.local_command, loaded.voice.local_command);
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        let default = AppConfig::default();

        assert_eq!(config.generation.model, default.generation.model);
        assert_eq!(config.search.max_results, default.search.max_results);
        assert_eq!(config.voice.locale, default.voice.locale);
    }

    /// Defaults mirror the original service endpoints and the 3-result cap.
    #[test]
    fn defaults_are_sensible() {
        let config = AppConfig::default();
        assert_eq!(config.search.max_results, 3);
        assert!(config.generation.base_url.starts_with("https://"));
        assert!(config.generation.api_key.is_none());
        assert_eq!(config.voice.locale, "en-US");
    }
}
