//! # Web crate: HTTP surface of the feedback application
//!
//! Mounts the routes of [`feedback_api::handlers`] on an axum [`Router`](axum::Router),
//! resolves the session into a [`feedback_api::RequestContext`] for each request,
//! applies the returned [`feedback_api::Outcome`] (session identity, flash queue,
//! redirect or rendered page) and loads [`settings::Settings`] for the binary.
//!
//! The router is generic over the [`feedback_store::Store`] so the binary runs it
//! on PostgreSQL while the integration tests run it on an in-memory store. The
//! caller adds the session layer.

pub mod error;
mod routes;
mod session;
pub mod settings;
mod views;

pub use error::AppError;
pub use routes::{router, AppState};
