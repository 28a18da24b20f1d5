use super::payment::{Payment, PaymentStatus};
use crate::error::{Result, TransportError};
use async_trait::async_trait;

/// Raw answer of the gateway, before any decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub type TransportResult = std::result::Result<HttpResponse, TransportError>;

/// The network collaborator of the gateway client.
///
/// Timeouts, retries and proxies are the implementation's business; the client
/// issues exactly one call per operation and never retries.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// POSTs an `application/x-www-form-urlencoded` body.
    async fn post_form(&self, url: &str, body: String) -> TransportResult;
    async fn get(&self, url: &str) -> TransportResult;
}

/// Anything that can fetch a fresh payment snapshot by ID.
#[async_trait]
pub trait PaymentLookup: Send + Sync {
    async fn get_payment(&self, payment_id: &str) -> Result<Payment>;
}

/// Last status seen for each payment.
#[async_trait]
pub trait StatusLedger: Send + Sync {
    async fn last_status(&self, payment_id: &str) -> Result<Option<PaymentStatus>>;
    async fn record(&self, payment_id: &str, status: PaymentStatus) -> Result<()>;
}

pub type HttpTransportBox = Box<dyn HttpTransport>;
pub type PaymentLookupBox = Box<dyn PaymentLookup>;
pub type StatusLedgerBox = Box<dyn StatusLedger>;

#[async_trait]
impl<T: HttpTransport + ?Sized> HttpTransport for Box<T> {
    async fn post_form(&self, url: &str, body: String) -> TransportResult {
        (**self).post_form(url, body).await
    }

    async fn get(&self, url: &str) -> TransportResult {
        (**self).get(url).await
    }
}

#[async_trait]
impl<T: PaymentLookup + ?Sized> PaymentLookup for Box<T> {
    async fn get_payment(&self, payment_id: &str) -> Result<Payment> {
        (**self).get_payment(payment_id).await
    }
}

#[async_trait]
impl<T: StatusLedger + ?Sized> StatusLedger for Box<T> {
    async fn last_status(&self, payment_id: &str) -> Result<Option<PaymentStatus>> {
        (**self).last_status(payment_id).await
    }

    async fn record(&self, payment_id: &str, status: PaymentStatus) -> Result<()> {
        (**self).record(payment_id, status).await
    }
}
