//! Configuration settings for the lectern CLI
//!
//! Settings live in a `lectern.toml` next to the documents being
//! converted. Every field has a default so a missing or partial file is
//! never an error.

use serde::{Deserialize, Serialize};

/// Top-level settings structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Revealjs theme for generated slide decks
    pub theme: String,
    /// Word budget per slide before sections are split
    pub slide_word_budget: usize,
    /// Rendering backend settings
    pub render: RenderSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: "simple".to_string(),
            slide_word_budget: 150,
            render: RenderSettings::default(),
        }
    }
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}

/// Settings for quarto invocations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Timeout for one render invocation, in seconds
    pub timeout_secs: u64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self { timeout_secs: 300 }
    }
}
