//! Network layer - HTTP request execution
//!
//! The Network actor receives request commands and sends back formatted responses.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
pub use client::{ClientConfig, Exchange, RequestExecutor, Transport};
