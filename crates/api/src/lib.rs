//! Bubble API server library.
//!
//! Exposes config wiring, state, error handling, routes and the server
//! lifecycle so integration tests and the binary entrypoint share them.

pub mod error;
pub mod handlers;
pub mod page;
pub mod response;
pub mod router;
pub mod routes;
pub mod server;
pub mod state;
