//! Codec settings: the active profile, read from a TOML file with an
//! environment override.
//!
//! ```toml
//! profile = "ImprovedJson"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{CodecResult, ConfigError};
use crate::profile::FormatProfile;
use crate::registry::CodecRegistry;

/// Environment variable that overrides the configured profile.
pub const PROFILE_ENV_VAR: &str = "STREAMCODEC_PROFILE";

/// Settings parsed from `streamcodec.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecSettings {
    #[serde(default)]
    pub profile: FormatProfile,
}

impl CodecSettings {
    /// Parses settings from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Loads settings from `path`, then applies the environment override.
    ///
    /// A missing file yields defaults. An unreadable file or a bad profile
    /// name is an error: a producer must not start with a guessed format.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let settings = if path.exists() {
            let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let settings = Self::from_toml_str(&contents)?;
            info!("Loaded codec settings from {:?}", path);
            settings
        } else {
            info!("No codec settings at {:?}, using defaults", path);
            Self::default()
        };
        settings.with_env_override()
    }

    /// Applies [`PROFILE_ENV_VAR`] if it is set.
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_override(std::env::var(PROFILE_ENV_VAR).ok().as_deref())
    }

    /// Replaces the profile with `value` when present.
    pub fn with_override(mut self, value: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(value) = value {
            let profile: FormatProfile = value.parse()?;
            if profile != self.profile {
                warn!("Codec profile overridden: {} -> {}", self.profile, profile);
            }
            self.profile = profile;
        }
        Ok(self)
    }

    /// Registers the configured profile on `registry`.
    pub fn apply(&self, registry: &CodecRegistry) -> CodecResult<()> {
        registry.register_profile(self.profile)
    }
}

/// Registers `profile` on the process-wide registry.
///
/// Codecs from previously registered profiles stay available for reads;
/// only the active writers change.
pub fn set_global_profile(profile: FormatProfile) -> CodecResult<()> {
    CodecRegistry::global().register_profile(profile)
}
