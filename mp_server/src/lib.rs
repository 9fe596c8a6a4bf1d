//! Board game room server library surface.
//!
//! Exposes the API router and configuration so integration tests can build
//! the server in-process; the binary entrypoint lives in `main.rs`.

pub mod api;
pub mod config;
