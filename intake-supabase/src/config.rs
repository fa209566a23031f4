//! Layered configuration for the Supabase adapter.
//!
//! Sources, highest priority first:
//! 1. Environment variables (`INTAKE_*` prefix, `__` as separator)
//! 2. `intake.toml` in the working directory
//! 3. Built-in defaults
//!
//! Figment maps `INTAKE_SUPABASE__URL` -> `supabase.url` and
//! `INTAKE_SUPABASE__ANON_KEY` -> `supabase.anon_key`.

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;

/// File read by [`IntakeConfig::load`].
pub const CONFIG_FILE: &str = "intake.toml";

const fn default_timeout_secs() -> u64 {
    30
}

/// Connection settings for one Supabase project.
///
/// Custom `Debug` implementation redacts the `anon_key` field.
#[derive(Clone, Deserialize, Serialize)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://abcd.supabase.co`.
    #[serde(default)]
    pub url: String,

    /// Public anon key, sent as `apikey` and bearer token.
    #[serde(default)]
    pub anon_key: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("url", &self.url)
            .field("anon_key", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl SupabaseConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
            ..Self::default()
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.anon_key.is_empty()
    }

    /// The project URL, normalised to end in `/` so endpoint paths join onto it.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        if !self.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "supabase".into(),
            });
        }
        let mut raw = self.url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl {
            url: self.url.clone(),
            reason: e.to_string(),
        })
    }
}

/// Everything the intake front-ends read from configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct IntakeConfig {
    #[serde(default)]
    pub supabase: SupabaseConfig,
}

impl IntakeConfig {
    /// Load from `intake.toml` (if present) and `INTAKE_*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load with an explicit TOML file in place of `intake.toml`.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::figment_with(path.as_ref())
            .extract()
            .map_err(ConfigError::from)
    }

    /// Build the figment provider chain.
    pub fn figment() -> Figment {
        Self::figment_with(Path::new(CONFIG_FILE))
    }

    fn figment_with(path: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if path.exists() {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed("INTAKE_").split("__"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = SupabaseConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.timeout_secs, 30);
        assert!(matches!(
            config.base_url(),
            Err(ConfigError::NotConfigured { .. })
        ));
    }

    #[test]
    fn debug_redacts_anon_key() {
        let config = SupabaseConfig::new("https://abcd.supabase.co", "super-secret-anon-key");
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super-secret-anon-key"));
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        let config = SupabaseConfig::new("https://abcd.supabase.co/", "key");
        assert_eq!(config.base_url().unwrap().as_str(), "https://abcd.supabase.co/");

        let config = SupabaseConfig::new("http://127.0.0.1:54321", "key");
        let url = config.base_url().unwrap();
        assert_eq!(url.join("rest/v1/signups").unwrap().as_str(), "http://127.0.0.1:54321/rest/v1/signups");
    }

    #[test]
    fn unparsable_url() {
        let config = SupabaseConfig::new("not a url", "key");
        assert!(matches!(config.base_url(), Err(ConfigError::InvalidUrl { .. })));
    }
}
