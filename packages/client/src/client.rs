//! Parent client shared by resource entities.

use std::fmt;
use std::sync::Arc;

use crate::category::Category;
use crate::config::{ClientConfig, API_NAMESPACE};
use crate::error::Result;
use crate::http::HttpTransport;
use crate::transport::Transport;
use crate::xml::{Request, Response};

/// Handle to one FreshBooks account.
///
/// Owns the transport and the namespace context, and builds resource
/// entities. Cloning is cheap; every entity keeps its own clone as the
/// back-reference to the client that created it.
#[derive(Clone)]
pub struct FreshBooks {
    transport: Arc<dyn Transport>,
    namespace: Arc<str>,
}

impl FreshBooks {
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self::from_shared(Arc::new(transport))
    }

    /// Client over a transport the caller keeps a handle to.
    pub fn from_shared(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            namespace: Arc::from(API_NAMESPACE),
        }
    }

    /// Client talking HTTP to the endpoint described by `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self::new(HttpTransport::new(config)?))
    }

    /// Replace the XML namespace expected in responses.
    pub fn with_namespace(mut self, namespace: &str) -> Self {
        self.namespace = Arc::from(namespace);
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// A new, empty category bound to this client.
    pub fn category(&self) -> Category {
        Category::new(self.clone())
    }

    pub(crate) async fn send(&self, request: &Request) -> Result<Response> {
        self.transport.send(request).await
    }
}

impl fmt::Debug for FreshBooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FreshBooks")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}
