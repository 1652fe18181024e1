use thiserror::Error;

pub use crate::domain::ports::TransportError;

/// Errors that are safe to expose to callers of the web client
#[derive(Error, Debug)]
pub enum Dhl24Error {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Web client is not configured: {what} not set")]
    NotConfigured { what: &'static str },

    /// Raised by the transport; passed through as is.
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl Dhl24Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_configured(what: &'static str) -> Self {
        Self::NotConfigured { what }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// True when the request never left the process.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::NotConfigured { .. })
    }
}

impl From<crate::domain::error::DomainError> for Dhl24Error {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        match domain_error {
            InvalidWeight { weight } => Self::validation(format!(
                "Shipment weight must be greater than 0, got {}",
                weight
            )),
            InvalidStreet { street } => Self::validation(format!(
                "Street \"{}\" is invalid. The street format must be something like \"Opolska 45\", where 45 is the house number.",
                street
            )),
            NotConfigured { what } => Self::not_configured(what),
            Encoding { message } => Self::internal(message),
            Transport(e) => Self::Transport(e),
        }
    }
}
