//! Production [`RegistrationStore`] adapter backed by Firestore.

use crate::client::{
    document_fields, record_from_document, FirestoreClient, REGISTRATION_FIELD_PATHS,
};
use notifly_common::services::{BoxFuture, BoxedError, RegistrationRecord, RegistrationStore};
use notifly_config::FirestoreConfig;
use tracing::debug;

/// Registration store over the Firestore documents API.
///
/// Reads and upserts documents in the configured collection, keyed by
/// device identifier. Upserts patch with an updateMask limited to the
/// registration fields, so re-registration never clobbers unrelated
/// fields in the stored document.
pub struct FirestoreRegistrationStore {
    client: FirestoreClient,
    collection: String,
}

impl FirestoreRegistrationStore {
    pub fn new(config: FirestoreConfig) -> Self {
        let collection = config.collection().to_string();
        Self {
            client: FirestoreClient::new(config),
            collection,
        }
    }
}

impl RegistrationStore for FirestoreRegistrationStore {
    type Error = BoxedError;

    fn fetch_registration(
        &self,
        device_id: &str,
    ) -> BoxFuture<'_, Option<RegistrationRecord>, Self::Error> {
        let device_id = device_id.to_string();
        Box::pin(async move {
            let document = self
                .client
                .get_document(&self.collection, &device_id)
                .await
                .map_err(BoxedError::new)?;
            debug!(device_id = %device_id, found = document.is_some(), "registration lookup");
            Ok(document.as_ref().and_then(record_from_document))
        })
    }

    fn upsert_registration(
        &self,
        record: RegistrationRecord,
    ) -> BoxFuture<'_, RegistrationRecord, Self::Error> {
        Box::pin(async move {
            self.client
                .patch_document(
                    &self.collection,
                    &record.device_id,
                    document_fields(&record),
                    &REGISTRATION_FIELD_PATHS,
                )
                .await
                .map_err(BoxedError::new)?;
            debug!(device_id = %record.device_id, "registration upserted");
            Ok(record)
        })
    }
}
