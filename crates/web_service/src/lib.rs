//! HTTP surface of the branching chat relay.
//!
//! Exposes the stateless `/chat` relay, a session API over the
//! conversation data layer, persisted settings, and static front-end
//! assets.

pub mod controllers;
pub mod error;
pub mod models;
pub mod server;
pub mod sessions;

pub use error::AppError;
pub use server::AppState;
