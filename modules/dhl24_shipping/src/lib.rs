// === PUBLIC CONTRACT ===
pub mod contract;

pub use contract::{client, error, model, payload};

// === CONFIGURATION ===
pub mod config;
pub use config::Dhl24Config;

// === MODULE WIRING ===
pub mod module;
pub use module::{Dhl24Shipping, MODULE_NAME};

// === INTERNAL MODULES ===
// Exposed for tests and for hosts that wire their own transport.
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod gateways;
#[doc(hidden)]
pub mod infra;
