use crate::domain::ports::{HttpResponse, HttpTransport, TransportResult};
use crate::error::TransportError;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

/// [`HttpTransport`] backed by a `reqwest::Client`.
///
/// Timeout, proxy and TLS policy come from the client passed to [`ReqwestTransport::new`].
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(classify)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_form(&self, url: &str, body: String) -> TransportResult {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .map_err(classify)?;
        read(response).await
    }

    async fn get(&self, url: &str) -> TransportResult {
        let response = self.client.get(url).send().await.map_err(classify)?;
        read(response).await
    }
}

async fn read(response: reqwest::Response) -> TransportResult {
    let status = response.status().as_u16();
    let body = response.bytes().await.map_err(classify)?;
    Ok(HttpResponse {
        status,
        body: body.to_vec(),
    })
}

// The lookup URL carries a signature; keep it out of error messages.
fn classify(err: reqwest::Error) -> TransportError {
    let err = err.without_url();
    if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connect(err.to_string())
    } else {
        TransportError::Other(err.to_string())
    }
}
