pub mod builder;
pub mod error;
pub mod ports;
pub mod rules;
pub mod service;
