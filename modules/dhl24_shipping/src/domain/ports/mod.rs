pub mod clock;
pub mod transport;

pub use clock::{Clock, SystemClock};
pub use transport::{ShipmentTransport, TransportError};
