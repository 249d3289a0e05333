//! TOML file configuration structures.
//!
//! These structs directly map to the `pagos-config.toml` file format.

use serde::{Deserialize, Serialize};
use url::Url;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Backend connection section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Root URL of the school payments backend.
    #[serde(default = "default_base_url")]
    pub base_url: Url,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> Url {
    "https://barton-mobile-chatbot.onrender.com"
        .parse()
        .expect("valid default url")
}

/// Simulated settlement section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Fixed processing delay in milliseconds.
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: default_settle_delay_ms(),
        }
    }
}

fn default_settle_delay_ms() -> u64 {
    1500
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parsing() {
        let toml_str = r#"
[backend]
base_url = "http://localhost:8000"

[gateway]
settle_delay_ms = 10
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.backend.base_url.as_str(), "http://localhost:8000/");
        assert_eq!(config.gateway.settle_delay_ms, 10);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(
            config.backend.base_url.as_str(),
            "https://barton-mobile-chatbot.onrender.com/"
        );
        assert_eq!(config.gateway.settle_delay_ms, 1500);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let toml_str = r#"
[gateway]
settle_delay_ms = 0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.gateway.settle_delay_ms, 0);
        assert_eq!(
            config.backend.base_url.as_str(),
            "https://barton-mobile-chatbot.onrender.com/"
        );
    }
}
