//! HTTP transport for the FreshBooks XML endpoint.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use crate::config::{ClientConfig, USER_AGENT};
use crate::error::{FreshBooksError, Result};
use crate::transport::Transport;
use crate::xml::{Request, Response};

/// Password sent alongside the token; the API ignores it but Basic auth needs one.
const BASIC_AUTH_PASSWORD: &str = "X";

/// Create a configured HTTP client.
///
/// # Returns
/// A `reqwest::Client` configured with the given timeout and this crate's user agent.
pub fn create_client(timeout_secs: u64) -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Posts request documents to the XML endpoint with HTTP Basic auth.
///
/// Every call is a single attempt: failures are returned immediately.
pub struct HttpTransport {
    http: Client,
    api_url: String,
    token: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            http: create_client(config.timeout_secs)?,
            api_url: config.api_url.clone(),
            token: config.token.clone(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &Request) -> Result<Response> {
        tracing::debug!(method = request.method(), url = %self.api_url, "posting request");

        let resp = self
            .http
            .post(&self.api_url)
            .basic_auth(&self.token, Some(BASIC_AUTH_PASSWORD))
            .header(CONTENT_TYPE, "application/xml")
            .body(request.body().to_string())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(
                status = status.as_u16(),
                method = request.method(),
                "endpoint returned HTTP error"
            );
            return Err(FreshBooksError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        tracing::debug!(bytes = body.len(), "received response");
        Response::parse(body)
    }
}
