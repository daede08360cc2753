//! # Client Configuration
//!
//! Configuration for the cloud API client.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     AROMA_API_URL=https://api.example.com                              │
//! │     AROMA_API_TOKEN=...                                                │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/aroma-pos/client.toml (Linux)                            │
//! │     ~/Library/Application Support/com.aroma.pos/client.toml (macOS)    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     localhost API, auto-generated device_id                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # client.toml
//! [api]
//! base_url = "https://api.example.com"
//! api_token = "secret-token"
//! timeout_secs = 10
//!
//! [store]
//! id = "store-001"
//! name = "Downtown Branch"
//!
//! [device]
//! id = "550e8400-e29b-41d4-a716-446655440000"
//! name = "Register 1"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

// =============================================================================
// API Settings
// =============================================================================

/// Where and how to reach the cloud API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL of the cloud API (http or https).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token sent with every request, if the API requires one.
    #[serde(default)]
    pub api_token: Option<String>,

    /// Per-request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout() -> u64 {
    10
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            api_token: None,
            timeout_secs: default_timeout(),
        }
    }
}

// =============================================================================
// Store Configuration
// =============================================================================

/// Configuration for the store this terminal belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Unique store identifier.
    #[serde(default = "default_store_id")]
    pub id: String,

    /// Human-readable store name (printed on receipts).
    #[serde(default = "default_store_name")]
    pub name: String,
}

fn default_store_id() -> String {
    "default-store".to_string()
}

fn default_store_name() -> String {
    "Default Store".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            id: default_store_id(),
            name: default_store_name(),
        }
    }
}

// =============================================================================
// Device Configuration
// =============================================================================

/// Configuration for this terminal device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Unique device identifier (UUID v4).
    /// Auto-generated on first run if not provided.
    #[serde(default = "default_device_id")]
    pub id: String,

    /// Human-readable device name (e.g., "Register 1", "Back Office").
    #[serde(default = "default_device_name")]
    pub name: String,
}

fn default_device_id() -> String {
    Uuid::new_v4().to_string()
}

fn default_device_name() -> String {
    "POS Terminal".to_string()
}

impl Default for DeviceConfig {
    fn default() -> Self {
        DeviceConfig {
            id: default_device_id(),
            name: default_device_name(),
        }
    }
}

// =============================================================================
// Main Client Configuration
// =============================================================================

/// Complete client configuration.
///
/// ## Example Config File
/// ```toml
/// [api]
/// base_url = "https://api.example.com"
/// timeout_secs = 10
///
/// [store]
/// id = "store-downtown"
/// name = "Downtown Branch"
///
/// [device]
/// id = "550e8400-e29b-41d4-a716-446655440000"
/// name = "Register 1"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API endpoint settings.
    #[serde(default)]
    pub api: ApiSettings,

    /// Store configuration.
    #[serde(default)]
    pub store: StoreConfig,

    /// Device-specific configuration.
    #[serde(default)]
    pub device: DeviceConfig,
}

impl ClientConfig {
    /// Creates a new config with defaults and a generated device ID.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (client.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ApiResult<Self> {
        let mut config = Self::default();

        // Try to load from config file
        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading client config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        // Override with environment variables
        config.apply_env_overrides();

        // Validate the configuration
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load client config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ApiResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ApiError::ConfigSaveFailed("No config path available".into()))?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Client config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ApiResult<()> {
        // Device ID must be present; it identifies the terminal on every sale
        if self.device.id.is_empty() {
            return Err(ApiError::MissingDeviceId);
        }

        // Base URL must parse and be http(s)
        let url = Url::parse(&self.api.base_url)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ApiError::InvalidUrl(format!(
                "API URL must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        if self.api.timeout_secs == 0 {
            return Err(ApiError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        // API base URL
        if let Ok(url) = std::env::var("AROMA_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        // API token
        if let Ok(token) = std::env::var("AROMA_API_TOKEN") {
            self.api.api_token = Some(token);
        }

        // Request timeout
        if let Ok(timeout) = std::env::var("AROMA_API_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse::<u64>() {
                self.api.timeout_secs = secs;
            }
        }

        // Device ID
        if let Ok(id) = std::env::var("AROMA_DEVICE_ID") {
            debug!(device_id = %id, "Overriding device ID from environment");
            self.device.id = id;
        }

        // Device name
        if let Ok(name) = std::env::var("AROMA_DEVICE_NAME") {
            self.device.name = name;
        }

        // Store ID
        if let Ok(id) = std::env::var("AROMA_STORE_ID") {
            self.store.id = id;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "aroma", "pos").map(|dirs| {
            let config_dir = dirs.config_dir();
            config_dir.join("client.toml")
        })
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Returns the device ID.
    pub fn device_id(&self) -> &str {
        &self.device.id
    }

    /// Returns the store ID.
    pub fn store_id(&self) -> &str {
        &self.store.id
    }

    /// Returns the API token if configured.
    pub fn api_token(&self) -> Option<&str> {
        self.api.api_token.as_deref()
    }
}
