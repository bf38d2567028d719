//! Configuration management.
//!
//! Provider credentials and model overrides come from a TOML config file
//! with environment variables taking precedence for API keys. Credentials
//! are read once at orchestrator construction and are read-only afterward.

use serde::Deserialize;

/// Main configuration for promptforge.
#[derive(Debug, Clone, Default)]
pub struct ForgeConfig {
    /// Anthropic provider settings.
    pub anthropic: ProviderConfig,
    /// `OpenAI` provider settings.
    pub openai: ProviderConfig,
    /// HTTP timeouts for provider requests.
    pub http: HttpConfig,
}

/// Per-provider settings.
///
/// A missing API key means the provider is unavailable, never an error.
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    /// API key.
    pub api_key: Option<String>,
    /// Model name override.
    pub model: Option<String>,
    /// Base URL override (for proxies and test servers).
    pub base_url: Option<String>,
}

/// HTTP timeout settings for provider requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpConfig {
    /// Request timeout in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: Option<u64>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Anthropic section.
    pub anthropic: Option<ConfigFileProvider>,
    /// `OpenAI` section.
    pub openai: Option<ConfigFileProvider>,
    /// HTTP section.
    pub http: Option<ConfigFileHttp>,
}

/// Provider section in the config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileProvider {
    /// API key.
    pub api_key: Option<String>,
    /// Model name.
    pub model: Option<String>,
    /// Base URL.
    pub base_url: Option<String>,
}

/// HTTP section in the config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileHttp {
    /// Request timeout in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: Option<u64>,
}

impl ForgeConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &std::path::Path) -> crate::Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| crate::Error::OperationFailed {
                operation: "read_config_file".to_string(),
                cause: e.to_string(),
            })?;

        let file: ConfigFile =
            toml::from_str(&contents).map_err(|e| crate::Error::OperationFailed {
                operation: "parse_config_file".to_string(),
                cause: e.to_string(),
            })?;

        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the default location and applies
    /// environment overrides.
    ///
    /// Checks the following paths in order:
    /// 1. Platform-specific config dir (`~/Library/Application Support/promptforge/` on macOS)
    /// 2. XDG config dir (`~/.config/promptforge/` for Unix compatibility)
    ///
    /// Returns default configuration (plus env overrides) if no config
    /// file is found.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default().with_env_overrides();
        };

        // Check platform-specific config dir first
        let platform_config = base_dirs
            .config_dir()
            .join("promptforge")
            .join("config.toml");
        if platform_config.exists() {
            if let Ok(config) = Self::load_from_file(&platform_config) {
                return config.with_env_overrides();
            }
        }

        // Fall back to XDG-style ~/.config/promptforge/ for Unix compatibility
        let xdg_config = base_dirs
            .home_dir()
            .join(".config")
            .join("promptforge")
            .join("config.toml");
        if xdg_config.exists() {
            if let Ok(config) = Self::load_from_file(&xdg_config) {
                return config.with_env_overrides();
            }
        }

        Self::default().with_env_overrides()
    }

    /// Converts a `ConfigFile` to `ForgeConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(anthropic) = file.anthropic {
            config.anthropic.api_key = anthropic.api_key;
            config.anthropic.model = anthropic.model;
            config.anthropic.base_url = anthropic.base_url;
        }
        if let Some(openai) = file.openai {
            config.openai.api_key = openai.api_key;
            config.openai.model = openai.model;
            config.openai.base_url = openai.base_url;
        }
        if let Some(http) = file.http {
            config.http.timeout_ms = http.timeout_ms;
            config.http.connect_timeout_ms = http.connect_timeout_ms;
        }

        config
    }

    /// Applies environment variable overrides for credentials.
    ///
    /// `ANTHROPIC_API_KEY` and `OPENAI_API_KEY` take precedence over
    /// file-configured keys.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var("ANTHROPIC_API_KEY") {
            if !key.is_empty() {
                self.anthropic.api_key = Some(key);
            }
        }
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            if !key.is_empty() {
                self.openai.api_key = Some(key);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_has_no_credentials() {
        let config = ForgeConfig::default();
        assert!(config.anthropic.api_key.is_none());
        assert!(config.openai.api_key.is_none());
        assert!(config.http.timeout_ms.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[anthropic]
api_key = "sk-ant-test"
model = "claude-3-opus-20240229"

[openai]
base_url = "http://localhost:8080/v1"

[http]
timeout_ms = 10000
"#
        )
        .unwrap();

        let config = ForgeConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.anthropic.api_key.as_deref(), Some("sk-ant-test"));
        assert_eq!(
            config.anthropic.model.as_deref(),
            Some("claude-3-opus-20240229")
        );
        assert!(config.openai.api_key.is_none());
        assert_eq!(
            config.openai.base_url.as_deref(),
            Some("http://localhost:8080/v1")
        );
        assert_eq!(config.http.timeout_ms, Some(10_000));
        assert!(config.http.connect_timeout_ms.is_none());
    }

    #[test]
    fn test_load_from_missing_file_errors() {
        let result = ForgeConfig::load_from_file(std::path::Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_invalid_toml_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml [[[").unwrap();

        let result = ForgeConfig::load_from_file(file.path());
        assert!(matches!(
            result,
            Err(crate::Error::OperationFailed { ref operation, .. })
                if operation == "parse_config_file"
        ));
    }

    #[test]
    fn test_empty_file_is_default() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = ForgeConfig::load_from_file(file.path()).unwrap();
        assert!(config.anthropic.api_key.is_none());
        assert!(config.openai.api_key.is_none());
    }
}
