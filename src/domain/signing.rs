//! Signed payloads for the two outbound calls.

use super::credential::ShopSecret;
use super::digest::{DigestAlgorithm, sign_fields};
use super::payment::PaymentCreationRequest;

/// Form body of a payment creation call, keys in the order they are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedPaymentForm {
    fields: Vec<(&'static str, String)>,
}

impl SignedPaymentForm {
    pub fn fields(&self) -> &[(&'static str, String)] {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn sign(&self) -> &str {
        self.get("sign").unwrap_or_default()
    }

    /// `application/x-www-form-urlencoded` encoding of the fields.
    pub fn encode(&self) -> Result<String, serde_urlencoded::ser::Error> {
        serde_urlencoded::to_string(&self.fields)
    }
}

/// Signature of a payment creation request.
///
/// Field order is fixed by the gateway and differs from the form's key order.
pub fn payment_creation_sign(request: &PaymentCreationRequest, secret: &ShopSecret) -> String {
    sign_fields(
        DigestAlgorithm::Sha1,
        [
            request.title.as_str(),
            request.amount.amount.as_str(),
            request.amount.currency_code.as_str(),
            request.return_url.as_str(),
            request.description.as_str(),
            request.negative_return_url.as_str(),
            request.additional_data.as_str(),
            request.payment_channel.as_str(),
            request.language_code.as_str(),
            request.referer.as_str(),
        ],
        secret.expose(),
    )
}

/// Builds the signed form for a payment creation call.
pub fn sign_payment_creation(
    request: &PaymentCreationRequest,
    secret: &ShopSecret,
) -> SignedPaymentForm {
    let sign = payment_creation_sign(request, secret);
    let fields = vec![
        ("title", request.title.clone()),
        ("amount.value", request.amount.amount.clone()),
        ("amount.currencyCode", request.amount.currency_code.clone()),
        ("description", request.description.clone()),
        ("additionalData", request.additional_data.clone()),
        ("returnUrl", request.return_url.clone()),
        ("negativeReturnUrl", request.negative_return_url.clone()),
        ("paymentChannel", request.payment_channel.clone()),
        ("languageCode", request.language_code.clone()),
        ("referer", request.referer.clone()),
        ("sign", sign),
    ];
    SignedPaymentForm { fields }
}

/// Signed parameters of a payment lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedLookup {
    pub payment_id: String,
    pub sign: String,
}

pub fn sign_payment_lookup(payment_id: &str, secret: &ShopSecret) -> SignedLookup {
    SignedLookup {
        payment_id: payment_id.to_string(),
        sign: sign_fields(DigestAlgorithm::Sha1, [payment_id], secret.expose()),
    }
}
