use thiserror::Error;

use crate::domain::ports::TransportError;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Shipment weight must be greater than 0, got {weight}")]
    InvalidWeight { weight: f64 },

    #[error("Street '{street}' has no house number")]
    InvalidStreet { street: String },

    #[error("Web client is not configured: {what} not set")]
    NotConfigured { what: &'static str },

    #[error("Failed to encode request: {message}")]
    Encoding { message: String },

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl DomainError {
    pub fn invalid_weight(weight: f64) -> Self {
        Self::InvalidWeight { weight }
    }

    pub fn invalid_street(street: impl Into<String>) -> Self {
        Self::InvalidStreet {
            street: street.into(),
        }
    }

    pub fn not_configured(what: &'static str) -> Self {
        Self::NotConfigured { what }
    }

    pub fn encoding(message: impl Into<String>) -> Self {
        Self::Encoding {
            message: message.into(),
        }
    }
}
