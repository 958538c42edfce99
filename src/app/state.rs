use crate::adapters::soap::PowerOnSoapClient;
use crate::config::PowerOnConfig;
use crate::domain::ports::PowerOnBackend;
use crate::utils::error::Result;
use std::sync::Arc;

/// Shared, read-only handler state.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn PowerOnBackend>,
}

impl AppState {
    pub fn new(backend: Arc<dyn PowerOnBackend>) -> Self {
        Self { backend }
    }

    /// State backed by the real PowerOn SOAP client.
    pub fn with_soap_client(config: &PowerOnConfig) -> Result<Self> {
        let client = PowerOnSoapClient::new(config)?;
        Ok(Self::new(Arc::new(client)))
    }
}
