pub mod envelope;
pub mod http_transport;

pub use http_transport::HttpSoapTransport;
