use crate::domain::credential::ShopCredential;
use crate::domain::digest::DigestAlgorithm;
use crate::error::{GatewayError, Result};
use url::Url;

pub const PRODUCTION_URL: &str = "https://pay.cashbill.pl/ws/rest";
pub const SANDBOX_URL: &str = "https://pay.cashbill.pl/testws/rest";

/// Which gateway deployment a client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Production,
    Sandbox,
}

impl Environment {
    pub fn base_url(self) -> &'static str {
        match self {
            Environment::Production => PRODUCTION_URL,
            Environment::Sandbox => SANDBOX_URL,
        }
    }
}

/// Everything a [`GatewayClient`](crate::application::client::GatewayClient) is built from.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub credential: ShopCredential,
    /// Digest the gateway uses to sign notifications.
    pub callback_digest: DigestAlgorithm,
}

impl GatewayConfig {
    pub fn new(
        environment: Environment,
        shop_id: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            base_url: environment.base_url().to_string(),
            credential: ShopCredential::new(shop_id, secret),
            callback_digest: DigestAlgorithm::default(),
        }
    }

    /// Points the client at another endpoint, e.g. a local proxy.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_callback_digest(mut self, algorithm: DigestAlgorithm) -> Self {
        self.callback_digest = algorithm;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.credential.validate()?;
        self.parsed_base_url().map(|_| ())
    }

    /// The base URL without trailing slashes, checked to be absolute http(s).
    pub(crate) fn parsed_base_url(&self) -> Result<Url> {
        let trimmed = self.base_url.trim_end_matches('/');
        let url = Url::parse(trimmed).map_err(|e| {
            GatewayError::Configuration(format!("invalid base URL {trimmed:?}: {e}"))
        })?;
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(GatewayError::Configuration(format!(
                "base URL {trimmed:?} must be an absolute http(s) URL"
            )));
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_urls() {
        let config = GatewayConfig::new(Environment::Sandbox, "shop1", "topsecret");
        assert_eq!(config.base_url, "https://pay.cashbill.pl/testws/rest");
        assert_eq!(config.callback_digest, DigestAlgorithm::Sha1);

        let config = GatewayConfig::new(Environment::Production, "shop1", "topsecret");
        assert_eq!(config.base_url, "https://pay.cashbill.pl/ws/rest");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_base_url() {
        for base_url in ["not a url", "ftp://example.com", "mailto:shop@example.com"] {
            let config = GatewayConfig::new(Environment::Sandbox, "shop1", "topsecret")
                .with_base_url(base_url);
            assert!(
                matches!(config.validate(), Err(GatewayError::Configuration(_))),
                "{base_url}"
            );
        }
    }

    #[test]
    fn test_trailing_slash_is_ignored() {
        let config = GatewayConfig::new(Environment::Sandbox, "shop1", "topsecret")
            .with_base_url("http://127.0.0.1:8080/rest/");
        assert_eq!(
            config.parsed_base_url().unwrap().as_str(),
            "http://127.0.0.1:8080/rest"
        );
    }

    #[test]
    fn test_blank_credential_is_a_configuration_error() {
        let config = GatewayConfig::new(Environment::Production, "", "topsecret");
        assert!(matches!(
            config.validate(),
            Err(GatewayError::Configuration(_))
        ));
    }
}
