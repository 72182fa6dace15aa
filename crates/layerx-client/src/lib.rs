//! Client library for the LayerX control plane.
//!
//! One typed client per interface, all sharing the same [`HttpClient`]:
//! - [`RpiClient`] for resource providers
//! - [`TpiClient`] for task providers
//! - [`BrainClient`] for schedulers

pub mod brain;
pub mod error;
pub mod http;
pub mod rpi;
pub mod tpi;
pub mod types;

pub use brain::BrainClient;
pub use error::ClientError;
pub use http::HttpClient;
pub use rpi::RpiClient;
pub use tpi::TpiClient;
