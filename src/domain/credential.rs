use crate::error::{GatewayError, Result};
use std::fmt;

/// The shared secret of a shop.
///
/// It only ever feeds digests: it has no `Display`, no `Serialize`, and its
/// `Debug` output is redacted so it cannot leak through logs or error chains.
#[derive(Clone, PartialEq, Eq)]
pub struct ShopSecret(String);

impl ShopSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ShopSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ShopSecret(<redacted>)")
    }
}

/// The (shop ID, secret) pair identifying a merchant account to the gateway.
///
/// Immutable once built; a client holds exactly one for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopCredential {
    shop_id: String,
    secret: ShopSecret,
}

impl ShopCredential {
    pub fn new(shop_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            shop_id: shop_id.into(),
            secret: ShopSecret::new(secret),
        }
    }

    pub fn shop_id(&self) -> &str {
        &self.shop_id
    }

    pub fn secret(&self) -> &ShopSecret {
        &self.secret
    }

    /// Rejects blank values and a shop ID that cannot be a path segment. The
    /// messages name the field, never its content.
    pub fn validate(&self) -> Result<()> {
        if self.shop_id.trim().is_empty() {
            return Err(GatewayError::Configuration(
                "shop ID must not be empty".to_string(),
            ));
        }
        // Dot segments are dropped from request paths.
        if matches!(self.shop_id.as_str(), "." | "..") {
            return Err(GatewayError::Configuration(
                "shop ID must not be a dot segment".to_string(),
            ));
        }
        if self.secret.0.is_empty() {
            return Err(GatewayError::Configuration(
                "shop secret must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
