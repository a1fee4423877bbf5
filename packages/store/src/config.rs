//! # Client configuration: `client.toml`
//!
//! Where the client finds its backends and how it tunes searches. The web
//! build embeds the file at compile time; native builds may override it from
//! the platform config directory.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8080/api"     # Spring API
//! ai_base_url = "http://localhost:8000/api"  # AI recommendation server
//!
//! [search]
//! top_n = 5
//! page_size = 50
//! low_confidence_threshold = 0.6
//!
//! [home]
//! meeting_preview = 6
//! ```
//!
//! Every field has a default, so a missing or empty file is the default
//! configuration.

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `client.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub home: HomeConfig,
}

/// Backend locations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_ai_base_url")]
    pub ai_base_url: String,
    /// User id sent with AI searches when nobody is signed in.
    #[serde(default = "default_guest_user_id")]
    pub guest_user_id: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Recommendations requested per AI search.
    #[serde(default = "default_top_n")]
    pub top_n: u32,
    /// Page size for keyword search.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Below this parse confidence the matching page warns the user.
    #[serde(default = "default_low_confidence_threshold")]
    pub low_confidence_threshold: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HomeConfig {
    #[serde(default = "default_meeting_preview")]
    pub meeting_preview: usize,
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_ai_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_guest_user_id() -> i64 {
    1
}

fn default_top_n() -> u32 {
    5
}

fn default_page_size() -> u32 {
    50
}

fn default_low_confidence_threshold() -> f64 {
    0.6
}

fn default_meeting_preview() -> usize {
    6
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            ai_base_url: default_ai_base_url(),
            guest_user_id: default_guest_user_id(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            page_size: default_page_size(),
            low_confidence_threshold: default_low_confidence_threshold(),
        }
    }
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            meeting_preview: default_meeting_preview(),
        }
    }
}

impl ClientConfig {
    /// Builder method to point both backends somewhere else.
    pub fn with_base_urls(mut self, api: impl Into<String>, ai: impl Into<String>) -> Self {
        self.api.base_url = api.into();
        self.api.ai_base_url = ai.into();
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "client.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Parse, falling back to defaults on error.
    pub fn from_toml_or_default(s: &str) -> Self {
        Self::from_toml(s).unwrap_or_else(|e| {
            tracing::warn!("Ignoring invalid {}: {}", Self::filename(), e);
            Self::default()
        })
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
