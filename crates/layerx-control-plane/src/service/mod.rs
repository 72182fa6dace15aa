//! The three client-facing interfaces over the shared state.
//!
//! Each service borrows the [`AppState`](crate::state::AppState) and adds no
//! policy of its own; transports (see [`crate::http`]) are thin wrappers.

pub mod brain_service;
pub mod resource_service;
pub mod task_service;

pub use brain_service::BrainService;
pub use resource_service::ResourceProviderService;
pub use task_service::TaskProviderService;
