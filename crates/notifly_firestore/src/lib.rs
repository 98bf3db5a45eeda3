//! Firestore-backed registration store for notifly
//!
//! This crate provides the production adapter for the registration store
//! capability: device-to-push-handle mappings kept as documents in a
//! Firestore collection, consumed over the REST v1 documents API.
//!
//! # Features
//!
//! - Authentication with Google Cloud using service account credentials
//! - Get-by-key document reads (absent documents are `None`, not errors)
//! - Upserts with merge semantics via `updateMask`, so re-registering a
//!   device never deletes unrelated fields in its document

pub mod auth;
pub mod client;
pub mod store;

pub use client::{FirestoreClient, FirestoreError};
pub use store::FirestoreRegistrationStore;
