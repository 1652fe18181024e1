use async_trait::async_trait;
use thiserror::Error;

use crate::contract::model::CarrierResponse;

/// Failures of the remote call. Never retried or interpreted by the domain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Request to carrier failed: {message}")]
    Request { message: String },

    #[error("Carrier returned HTTP {status}")]
    Fault { status: u16, body: String },
}

/// Transport-agnostic port for the carrier's remote procedures.
#[async_trait]
pub trait ShipmentTransport: Send + Sync {
    /// Invoke remote `operation` with a JSON-shaped payload and return the raw reply.
    async fn invoke(
        &self,
        operation: &str,
        payload: serde_json::Value,
    ) -> Result<CarrierResponse, TransportError>;
}
