//! Notification dispatch service for notifly
//!
//! This crate implements the stateless dispatch endpoint: it accepts a
//! device identifier, looks up the device's registration record in the
//! injected registration store and forwards one fixed-shape notification
//! to the push relay. Each invocation is a single best-effort attempt:
//! no retries, no queuing, no idempotency key.
//!
//! # Features
//!
//! - `POST /send-notification` axum endpoint with structured JSON errors
//! - Production push relay adapter for the Expo push gateway with a
//!   bounded request timeout and optional bearer authentication
//! - Core flow behind [`logic::Dispatcher`] so tests drive it with
//!   in-memory doubles
//! - OpenAPI/Swagger documentation (with the `openapi` feature)

pub mod client;
#[cfg(feature = "openapi")]
pub mod doc;
pub mod handlers;
pub mod logic;
pub mod routes;

pub use client::{ExpoPushClient, ExpoPushError};
pub use logic::{DispatchError, DispatchRequest, Dispatcher, NotificationContent};
// Re-export the routes function to be used by the main backend service
pub use routes::routes;

#[cfg(feature = "openapi")]
pub mod openapi {
    pub use crate::doc::DispatchApiDoc;
}
