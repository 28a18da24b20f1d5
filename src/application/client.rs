use crate::config::GatewayConfig;
use crate::domain::callback::{CallbackNotification, CallbackVerifier};
use crate::domain::credential::ShopCredential;
use crate::domain::payment::{Payment, PaymentCreationRequest, PaymentCreationResult};
use crate::domain::ports::{HttpResponse, HttpTransport, PaymentLookup};
use crate::domain::signing::{sign_payment_creation, sign_payment_lookup};
use crate::error::{GatewayError, Operation, Result};
use crate::infrastructure::http::ReqwestTransport;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::future::Future;
use tracing::debug;
use url::Url;

/// Client for the payment gateway REST API.
///
/// Holds only immutable state (base URL, credential, transport), so one
/// instance can serve any number of concurrent calls.
pub struct GatewayClient<T: HttpTransport = ReqwestTransport> {
    base_url: Url,
    credential: ShopCredential,
    verifier: CallbackVerifier,
    transport: T,
}

impl GatewayClient {
    /// Creates a client using a default `reqwest` transport.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        Self::with_transport(config, ReqwestTransport::default())
    }
}

impl<T: HttpTransport> GatewayClient<T> {
    /// Creates a client with a caller-provided transport.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Configuration`] if the credential is blank or the
    /// base URL is not an absolute http(s) URL.
    pub fn with_transport(config: GatewayConfig, transport: T) -> Result<Self> {
        config.validate()?;
        let base_url = config.parsed_base_url()?;
        let verifier =
            CallbackVerifier::new(config.credential.secret().clone(), config.callback_digest);
        Ok(Self {
            base_url,
            credential: config.credential,
            verifier,
            transport,
        })
    }

    pub fn shop_id(&self) -> &str {
        self.credential.shop_id()
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn verifier(&self) -> &CallbackVerifier {
        &self.verifier
    }

    /// Registers a new payment and returns where to send the customer.
    pub async fn create_payment(
        &self,
        request: &PaymentCreationRequest,
    ) -> Result<PaymentCreationResult> {
        let operation = Operation::CreatePayment;
        let url = self.payment_url(operation, &[])?;
        let form = sign_payment_creation(request, self.credential.secret());
        let body = form.encode().map_err(|e| GatewayError::Request {
            operation,
            reason: e.to_string(),
        })?;

        debug!(shop_id = self.shop_id(), "creating payment");
        let response = self
            .transport
            .post_form(url.as_str(), body)
            .await
            .map_err(|source| GatewayError::Transport { operation, source })?;

        let created: PaymentCreationResult = decode(operation, response)?;
        debug!(payment_id = %created.id, "payment created");
        Ok(created)
    }

    /// Fetches the current state of a payment.
    pub async fn get_payment(&self, payment_id: &str) -> Result<Payment> {
        let operation = Operation::GetPayment;
        // "", "." and ".." would resolve to the creation endpoint.
        if matches!(payment_id, "" | "." | "..") {
            return Err(GatewayError::Request {
                operation,
                reason: format!("invalid payment ID {payment_id:?}"),
            });
        }
        let lookup = sign_payment_lookup(payment_id, self.credential.secret());
        let mut url = self.payment_url(operation, &[lookup.payment_id.as_str()])?;
        url.query_pairs_mut().append_pair("sign", &lookup.sign);

        debug!(shop_id = self.shop_id(), payment_id, "fetching payment");
        let response = self
            .transport
            .get(url.as_str())
            .await
            .map_err(|source| GatewayError::Transport { operation, source })?;

        decode(operation, response)
    }

    /// Authenticates a notification and returns the freshly fetched payment it
    /// refers to. Nothing is fetched when authentication fails.
    pub async fn verify_callback(&self, notification: &CallbackNotification) -> Result<Payment> {
        self.verifier.handle(notification, self).await
    }

    /// `{base}/payment/{shop_id}/{segments...}`, each segment percent-encoded.
    fn payment_url(&self, operation: Operation, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GatewayError::Request {
                operation,
                reason: "base URL cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .push("payment")
            .push(self.credential.shop_id())
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl<T: HttpTransport> PaymentLookup for GatewayClient<T> {
    async fn get_payment(&self, payment_id: &str) -> Result<Payment> {
        Self::get_payment(self, payment_id).await
    }
}

fn decode<D: DeserializeOwned>(operation: Operation, response: HttpResponse) -> Result<D> {
    if !response.is_success() {
        return Err(GatewayError::protocol(
            operation,
            format!("gateway answered HTTP {}", response.status),
        ));
    }
    serde_json::from_slice(&response.body)
        .map_err(|e| GatewayError::protocol(operation, format!("invalid response body: {e}")))
}

/// Runs `future` unless `signal` completes first, in which case the in-flight
/// call is dropped and [`GatewayError::Cancelled`] is returned.
pub async fn cancellable<T, F, C>(operation: Operation, future: F, signal: C) -> Result<T>
where
    F: Future<Output = Result<T>>,
    C: Future<Output = ()>,
{
    tokio::select! {
        biased;
        _ = signal => Err(GatewayError::Cancelled { operation }),
        result = future => result,
    }
}
