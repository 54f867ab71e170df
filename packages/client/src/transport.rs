//! Transport seam between the mapper and the network.

use async_trait::async_trait;

use crate::error::Result;
use crate::xml::{Request, Response};

/// Sends request documents and returns parsed responses.
///
/// Implementations own authentication and wire encoding. Errors they return
/// reach the caller of the resource operation unchanged.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &Request) -> Result<Response>;
}

/// Test utilities for the transport.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_support {
    use super::*;
    use crate::error::FreshBooksError;
    use std::sync::Mutex;

    /// Mock transport for testing. Returns pre-configured responses in order
    /// and records every request it is handed.
    pub struct MockTransport {
        responses: Mutex<Vec<Result<Response>>>,
        requests: Mutex<Vec<Request>>,
    }

    impl MockTransport {
        pub fn new(responses: Vec<Result<Response>>) -> Self {
            // Reverse so we can pop from the end
            let mut responses = responses;
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
                requests: Mutex::new(Vec::new()),
            }
        }

        /// Reply with each body in turn. Malformed bodies become parse errors.
        pub fn with_bodies(bodies: Vec<&str>) -> Self {
            Self::new(bodies.into_iter().map(|body| Response::parse(body)).collect())
        }

        /// Requests received so far, oldest first.
        pub fn requests(&self) -> Vec<Request> {
            self.requests
                .lock()
                .map(|requests| requests.clone())
                .unwrap_or_default()
        }

        /// `method` attributes of the requests received so far.
        pub fn methods(&self) -> Vec<String> {
            self.requests()
                .iter()
                .map(|r| r.method().to_string())
                .collect()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn send(&self, request: &Request) -> Result<Response> {
            if let Ok(mut requests) = self.requests.lock() {
                requests.push(request.clone());
            }
            let mut responses = self
                .responses
                .lock()
                .map_err(|e| FreshBooksError::Config(format!("mock lock poisoned: {e}")))?;
            responses.pop().unwrap_or_else(|| {
                Err(FreshBooksError::Config(format!(
                    "no mock response left for {}",
                    request.method()
                )))
            })
        }
    }
}
