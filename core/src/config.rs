//! Connection settings shared by every accessor.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "https://cms.megaphone.fm/api";

/// Base URL, owner ids and API token for one Megaphone account.
///
/// Nothing is validated here; a bad token or id is reported by the server on
/// the first request.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
    #[serde(alias = "api_base_url")]
    pub api_base_url: String,
    #[serde(alias = "network_id")]
    pub network_id: String,
    #[serde(alias = "organization_id")]
    pub organization_id: String,
    pub token: String,
}

impl ClientConfig {
    pub fn new(
        network_id: impl Into<String>,
        organization_id: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            network_id: network_id.into(),
            organization_id: organization_id.into(),
            token: token.into(),
        }
    }

    pub fn with_api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into();
        self
    }

    /// Value of the `Authorization` header.
    pub fn authorization(&self) -> String {
        format!("Token token={}", self.token)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("", "", "")
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_base_url", &self.api_base_url)
            .field("network_id", &self.network_id)
            .field("organization_id", &self.organization_id)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_default_base_url() {
        let config = ClientConfig::new("1234", "5678", "910");
        assert_eq!(config.api_base_url, "https://cms.megaphone.fm/api");
        assert_eq!(config.network_id, "1234");
        assert_eq!(config.organization_id, "5678");
    }

    #[test]
    fn authorization_header_value() {
        let config = ClientConfig::new("1234", "5678", "910");
        assert_eq!(config.authorization(), "Token token=910");
    }

    #[test]
    fn debug_hides_token() {
        let config = ClientConfig::new("n", "o", "secret-token");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn deserializes_camel_case_with_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"networkId":"net1","token":"tok1"}"#).unwrap();
        assert_eq!(config.network_id, "net1");
        assert_eq!(config.organization_id, "");
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn deserializes_snake_case_aliases() {
        let config: ClientConfig = serde_json::from_str(
            r#"{"api_base_url":"http://localhost:3000/api","organization_id":"org1"}"#,
        )
        .unwrap();
        assert_eq!(config.api_base_url, "http://localhost:3000/api");
        assert_eq!(config.organization_id, "org1");
    }
}
