use anyhow::{Context, Result};

use crate::julep::DEFAULT_BASE_URL;

/// Application settings loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_title: String,
    pub api_description: String,
    pub api_version: String,
    pub host: String,
    pub port: u16,
    pub julep_api_key: String,
    pub julep_base_url: String,
    pub julep_model: String,
}

impl Settings {
    /// Load settings from the environment. `JULEP_API_KEY` is required;
    /// everything else has a default.
    pub fn load() -> Result<Self> {
        Ok(Self {
            api_title: env_or("API_TITLE", "Julep Research Assistant API"),
            api_description: env_or(
                "API_DESCRIPTION",
                "API for research assistant powered by Julep AI",
            ),
            api_version: env_or("API_VERSION", "0.1.0"),
            host: env_or("HOST", "0.0.0.0"),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(8001),
            julep_api_key: std::env::var("JULEP_API_KEY")
                .context("JULEP_API_KEY must be set")?,
            julep_base_url: env_or("JULEP_BASE_URL", DEFAULT_BASE_URL),
            julep_model: env_or("JULEP_MODEL", "gpt-4o"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            "API_TITLE",
            "API_DESCRIPTION",
            "API_VERSION",
            "HOST",
            "PORT",
            "JULEP_API_KEY",
            "JULEP_BASE_URL",
            "JULEP_MODEL",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn load_fails_without_api_key() {
        clear_env();
        let result = Settings::load();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("JULEP_API_KEY"));
    }

    #[test]
    #[serial]
    fn load_uses_defaults() {
        clear_env();
        std::env::set_var("JULEP_API_KEY", "test-key");

        let settings = Settings::load().unwrap();
        assert_eq!(settings.api_title, "Julep Research Assistant API");
        assert_eq!(settings.api_version, "0.1.0");
        assert_eq!(settings.host, "0.0.0.0");
        assert_eq!(settings.port, 8001);
        assert_eq!(settings.julep_api_key, "test-key");
        assert_eq!(settings.julep_base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.julep_model, "gpt-4o");

        clear_env();
    }

    #[test]
    #[serial]
    fn load_honors_overrides() {
        clear_env();
        std::env::set_var("JULEP_API_KEY", "test-key");
        std::env::set_var("JULEP_MODEL", "claude-3.5-sonnet");
        std::env::set_var("JULEP_BASE_URL", "http://localhost:9100");
        std::env::set_var("PORT", "9000");

        let settings = Settings::load().unwrap();
        assert_eq!(settings.julep_model, "claude-3.5-sonnet");
        assert_eq!(settings.julep_base_url, "http://localhost:9100");
        assert_eq!(settings.port, 9000);

        clear_env();
    }

    #[test]
    #[serial]
    fn empty_values_fall_back_to_defaults() {
        clear_env();
        std::env::set_var("JULEP_API_KEY", "test-key");
        std::env::set_var("JULEP_MODEL", "");

        let settings = Settings::load().unwrap();
        assert_eq!(settings.julep_model, "gpt-4o");

        clear_env();
    }
}
