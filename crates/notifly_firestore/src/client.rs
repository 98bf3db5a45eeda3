//! Firestore REST client module
//!
//! This module provides a thin client for the Firestore REST v1 documents
//! API, limited to the two operations the registration store contract
//! consumes: get-by-key and patch-with-updateMask (upsert with merge
//! semantics). It also contains the pure helpers that translate between
//! [`RegistrationRecord`] and Firestore's typed-value document encoding.

use crate::auth::get_firestore_auth_token;
use chrono::{DateTime, SecondsFormat, Utc};
use notifly_common::services::RegistrationRecord;
use notifly_config::FirestoreConfig;
use reqwest::{header, Client, StatusCode};
use serde_json::{json, Map, Value};
use thiserror::Error;

const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";

/// Errors that can occur when talking to the Firestore REST API
#[derive(Error, Debug)]
pub enum FirestoreError {
    /// Error during authentication with Google Cloud
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error during HTTP request to the Firestore API
    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Missing required configuration
    #[error("Missing configuration: {0}")]
    ConfigError(String),

    /// Error returned by the Firestore API
    #[error("Firestore API error: {0}")]
    ApiError(String),
}

/// The field paths a registration upsert is allowed to touch.
///
/// Passed as the updateMask on every patch so unrelated fields in the
/// stored document survive re-registration.
pub const REGISTRATION_FIELD_PATHS: [&str; 3] = ["deviceId", "pushHandle", "createdAt"];

/// Encode a registration record as Firestore typed-value fields.
pub fn document_fields(record: &RegistrationRecord) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert(
        "deviceId".into(),
        json!({ "stringValue": record.device_id }),
    );
    fields.insert(
        "pushHandle".into(),
        json!({ "stringValue": record.push_handle }),
    );
    fields.insert(
        "createdAt".into(),
        json!({
            "timestampValue":
                record.created_at.to_rfc3339_opts(SecondsFormat::Micros, true)
        }),
    );
    fields
}

fn string_field(fields: &Value, name: &str) -> Option<String> {
    fields
        .get(name)?
        .get("stringValue")?
        .as_str()
        .map(str::to_string)
}

/// Decode a Firestore document into a registration record.
///
/// A document without a usable push handle is not a registration, so it
/// decodes to `None` the same way a missing document does.
pub fn record_from_document(document: &Value) -> Option<RegistrationRecord> {
    let fields = document.get("fields")?;
    let device_id = string_field(fields, "deviceId")?;
    let push_handle = string_field(fields, "pushHandle")?;
    let created_at = fields
        .get("createdAt")
        .and_then(|field| field.get("timestampValue"))
        .and_then(Value::as_str)
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|ts| ts.with_timezone(&Utc))
        .unwrap_or_else(Utc::now);
    Some(RegistrationRecord {
        device_id,
        push_handle,
        created_at,
    })
}

/// Client for the Firestore REST v1 documents API
pub struct FirestoreClient {
    /// HTTP client for making requests to the Firestore API
    client: Client,

    /// Configuration, including project ID and service account key path
    config: FirestoreConfig,
}

impl FirestoreClient {
    /// Creates a new Firestore client with the given configuration
    pub fn new(config: FirestoreConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn document_url(&self, collection: &str, document_id: &str) -> Result<String, FirestoreError> {
        let project_id = self.config.project_id.as_deref().ok_or_else(|| {
            FirestoreError::ConfigError("Missing project_id in FirestoreConfig".to_string())
        })?;
        Ok(format!(
            "{}/projects/{}/databases/(default)/documents/{}/{}",
            FIRESTORE_BASE_URL, project_id, collection, document_id
        ))
    }

    async fn auth_token(&self) -> Result<String, FirestoreError> {
        get_firestore_auth_token(&self.config)
            .await
            .map_err(|e| FirestoreError::AuthError(e.to_string()))
    }

    /// Fetch a document by collection and id.
    ///
    /// Returns `Ok(None)` when the document does not exist.
    pub async fn get_document(
        &self,
        collection: &str,
        document_id: &str,
    ) -> Result<Option<Value>, FirestoreError> {
        let url = self.document_url(collection, document_id)?;
        let token = self.auth_token().await?;

        let response = self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(FirestoreError::ApiError(error_text));
        }

        Ok(Some(response.json().await?))
    }

    /// Patch a document, creating it if absent.
    ///
    /// Only the paths named in `field_paths` are written; Firestore leaves
    /// every other field in the document untouched (merge, not replace).
    pub async fn patch_document(
        &self,
        collection: &str,
        document_id: &str,
        fields: Map<String, Value>,
        field_paths: &[&str],
    ) -> Result<Value, FirestoreError> {
        let url = self.document_url(collection, document_id)?;
        let token = self.auth_token().await?;

        let mask: Vec<(&str, &str)> = field_paths
            .iter()
            .map(|path| ("updateMask.fieldPaths", *path))
            .collect();

        let response = self
            .client
            .patch(&url)
            .query(&mask)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .json(&json!({ "fields": fields }))
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(FirestoreError::ApiError(error_text));
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record() -> RegistrationRecord {
        RegistrationRecord {
            device_id: "abc-123".to_string(),
            push_handle: "ExponentPushToken[xyz]".to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 30, 0).unwrap(),
        }
    }

    #[test]
    fn document_fields_use_firestore_typed_values() {
        let fields = document_fields(&record());
        assert_eq!(fields["deviceId"]["stringValue"], "abc-123");
        assert_eq!(fields["pushHandle"]["stringValue"], "ExponentPushToken[xyz]");
        assert_eq!(
            fields["createdAt"]["timestampValue"],
            "2025-06-01T12:30:00.000000Z"
        );
    }

    #[test]
    fn record_round_trips_through_document_encoding() {
        let document = json!({
            "name": "projects/demo/databases/(default)/documents/devices/abc-123",
            "fields": document_fields(&record()),
        });
        let decoded = record_from_document(&document).expect("should decode");
        assert_eq!(decoded, record());
    }

    #[test]
    fn document_without_push_handle_decodes_to_none() {
        let document = json!({
            "fields": {
                "deviceId": { "stringValue": "abc-123" },
                "name": { "stringValue": "Notification User" },
            }
        });
        assert!(record_from_document(&document).is_none());
    }

    #[test]
    fn update_mask_covers_exactly_the_record_fields() {
        let fields = document_fields(&record());
        let paths: Vec<&str> = fields.keys().map(String::as_str).collect();
        let mut expected = REGISTRATION_FIELD_PATHS.to_vec();
        expected.sort_unstable();
        let mut actual = paths;
        actual.sort_unstable();
        assert_eq!(actual, expected);
    }
}
