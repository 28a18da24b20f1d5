//! Authentication of gateway notifications.
//!
//! A notification only says "something changed for this payment". Its content is
//! never trusted as payment data: after the signature checks out, the payment is
//! fetched again from the gateway.

use super::credential::ShopSecret;
use super::digest::{DigestAlgorithm, sign_fields};
use super::payment::Payment;
use super::ports::PaymentLookup;
use crate::error::{GatewayError, Result};
use constant_time_eq::constant_time_eq;
use serde::Deserialize;
use tracing::{debug, warn};

/// Body the gateway expects in the response to a handled notification.
pub const CALLBACK_ACK: &str = "OK";

/// The fields of an inbound notification. Any of them may be absent on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CallbackNotification {
    pub cmd: Option<String>,
    pub args: Option<String>,
    pub sign: Option<String>,
}

impl CallbackNotification {
    pub fn new(cmd: impl Into<String>, args: impl Into<String>, sign: impl Into<String>) -> Self {
        Self {
            cmd: Some(cmd.into()),
            args: Some(args.into()),
            sign: Some(sign.into()),
        }
    }
}

/// Digest the gateway puts in `sign` for a `(cmd, args)` notification.
pub fn callback_sign(
    algorithm: DigestAlgorithm,
    cmd: &str,
    args: &str,
    secret: &ShopSecret,
) -> String {
    sign_fields(algorithm, [cmd, args], secret.expose())
}

#[derive(Debug, Clone)]
pub struct CallbackVerifier {
    secret: ShopSecret,
    algorithm: DigestAlgorithm,
}

impl CallbackVerifier {
    pub fn new(secret: ShopSecret, algorithm: DigestAlgorithm) -> Self {
        Self { secret, algorithm }
    }

    /// Checks the notification signature and returns the payment ID it refers to.
    ///
    /// Missing fields and an empty `args` are rejected before any digest is
    /// computed. `sign` must be the exact lowercase hex digest; the comparison
    /// runs in constant time.
    pub fn verify<'a>(&self, notification: &'a CallbackNotification) -> Result<&'a str> {
        let (Some(cmd), Some(args), Some(sign)) = (
            notification.cmd.as_deref(),
            notification.args.as_deref(),
            notification.sign.as_deref(),
        ) else {
            warn!("rejecting callback with missing fields");
            return Err(GatewayError::Authentication);
        };
        if args.is_empty() {
            warn!("rejecting callback without payment ID");
            return Err(GatewayError::Authentication);
        }

        let expected = callback_sign(self.algorithm, cmd, args, &self.secret);
        if !constant_time_eq(expected.as_bytes(), sign.as_bytes()) {
            warn!(cmd, payment_id = args, "rejecting callback with invalid signature");
            return Err(GatewayError::Authentication);
        }

        debug!(cmd, payment_id = args, "callback signature verified");
        Ok(args)
    }

    /// Verifies the notification and, only if it is authentic, fetches the
    /// payment it refers to.
    pub async fn handle<L>(
        &self,
        notification: &CallbackNotification,
        lookup: &L,
    ) -> Result<Payment>
    where
        L: PaymentLookup + ?Sized,
    {
        let payment_id = self.verify(notification)?;
        lookup.get_payment(payment_id).await
    }
}
