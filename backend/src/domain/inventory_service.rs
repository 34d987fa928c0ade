//! Box inventory lifecycle service.
//!
//! Implements creation (validation, identifier allocation, QR URL
//! assignment), tolerant lookup, partial update, and the soft-delete /
//! restore transitions over a [`BoxRepository`]. Dates come from an
//! injected clock so behaviour is testable.

use std::sync::Arc;

use chrono::NaiveDate;
use mockable::Clock;
use serde_json::json;

use crate::domain::allocator::next_box_id;
use crate::domain::box_record::{
    BoxId, BoxRecord, BoxUpdate, NewBox, DEFAULT_DESCRIPTION,
};
use crate::domain::error::Error;
use crate::domain::label::{LabelPayload, QrBaseUrl};
use crate::domain::ports::{BoxRepository, BoxRepositoryError};

/// Packer recorded when the client did not send one.
const UNKNOWN_PACKER: &str = "Unknown";

/// Upper bound on identifier allocation retries when creates race.
const MAX_ALLOCATION_ATTEMPTS: usize = 5;

/// Driving service for box records.
#[derive(Clone)]
pub struct InventoryService {
    boxes: Arc<dyn BoxRepository>,
    clock: Arc<dyn Clock>,
    base_url: QrBaseUrl,
}

impl InventoryService {
    /// Create a service over a repository, a clock, and the configured
    /// QR base URL.
    pub fn new(boxes: Arc<dyn BoxRepository>, clock: Arc<dyn Clock>, base_url: QrBaseUrl) -> Self {
        Self {
            boxes,
            clock,
            base_url,
        }
    }

    /// The base URL labels and stored QR URLs are derived from.
    pub fn base_url(&self) -> &QrBaseUrl {
        &self.base_url
    }

    fn today(&self) -> NaiveDate {
        self.clock.utc().date_naive()
    }

    fn map_repository_error(error: BoxRepositoryError) -> Error {
        Error::storage(error.to_string())
    }

    /// All records in persisted order, deleted ones included.
    pub async fn list(&self) -> Result<Vec<BoxRecord>, Error> {
        self.boxes.list().await.map_err(Self::map_repository_error)
    }

    /// Records that are not soft-deleted, in persisted order.
    pub async fn list_active(&self) -> Result<Vec<BoxRecord>, Error> {
        let mut records = self.list().await?;
        records.retain(|record| !record.deleted);
        Ok(records)
    }

    /// Look up a record by the identifier a caller supplied.
    ///
    /// Exact canonical matches and legacy renderings of the same number
    /// (`BOX-7`, `BOX-0007`) resolve to the same record. Unresolvable
    /// requests fail with a not-found error carrying the requested id
    /// verbatim.
    pub async fn get(&self, requested_id: &str) -> Result<BoxRecord, Error> {
        let Ok(box_id) = BoxId::parse(requested_id) else {
            return Err(Error::not_found(requested_id));
        };
        self.boxes
            .find(&box_id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found(requested_id))
    }

    /// Create a new record.
    ///
    /// Photo and both room lists are required. A caller-supplied identifier
    /// is honoured when well-formed and unused; otherwise the next
    /// sequential identifier is allocated.
    pub async fn create(&self, fields: NewBox) -> Result<BoxRecord, Error> {
        Self::validate_required_fields(&fields)?;

        let requested = fields
            .box_id
            .as_deref()
            .map(|requested| {
                BoxId::parse(requested).map_err(|err| {
                    Error::invalid_request(format!("box_id is invalid: {err}"))
                        .with_details(json!({ "field": "box_id", "value": requested }))
                })
            })
            .transpose()?;

        // Allocation races with other creates: the repository rejects the
        // duplicate under its own lock, and a lost race on an allocated
        // identifier is retried with a fresh one.
        for _ in 0..MAX_ALLOCATION_ATTEMPTS {
            let records = self.list().await?;
            let box_id = match &requested {
                Some(box_id) => {
                    if records.iter().any(|record| record.box_id == *box_id) {
                        return Err(Self::duplicate_id_error(box_id));
                    }
                    box_id.clone()
                }
                None => next_box_id(&records),
            };
            let record = self.assemble(box_id, fields.clone());
            match self.boxes.insert(record.clone()).await {
                Ok(()) => return Ok(record),
                Err(BoxRepositoryError::Duplicate { .. }) => {
                    if let Some(requested) = &requested {
                        return Err(Self::duplicate_id_error(requested));
                    }
                }
                Err(err) => return Err(Self::map_repository_error(err)),
            }
        }
        Err(Error::storage("could not allocate an unused box_id"))
    }

    fn duplicate_id_error(box_id: &BoxId) -> Error {
        Error::invalid_request(format!("box_id {box_id} already exists"))
            .with_details(json!({ "field": "box_id", "value": box_id.as_str() }))
    }

    fn assemble(&self, box_id: BoxId, fields: NewBox) -> BoxRecord {
        let qr_url = self.base_url.box_url(&box_id);
        BoxRecord {
            box_id,
            short_description: normalise_description(fields.short_description),
            from_room: fields.from_room,
            to_room: fields.to_room,
            photo_path: fields.photo_path,
            date_created: fields.date_created.unwrap_or_else(|| self.today()),
            date_deleted: None,
            deleted: false,
            packed_by: fields
                .packed_by
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_PACKER.to_owned()),
            qr_url,
        }
    }

    /// Apply a partial update to a record. `box_id` and `date_created`
    /// never change.
    pub async fn update(
        &self,
        requested_id: &str,
        update: BoxUpdate,
    ) -> Result<BoxRecord, Error> {
        let mut record = self.get(requested_id).await?;
        record.apply_update(update);
        self.persist_replacement(record, requested_id).await
    }

    /// Soft-delete a record. Idempotent: deleting an already-deleted box
    /// leaves it in the same terminal state.
    pub async fn soft_delete(&self, requested_id: &str) -> Result<BoxRecord, Error> {
        let mut record = self.get(requested_id).await?;
        record.soft_delete(self.today());
        self.persist_replacement(record, requested_id).await
    }

    /// Restore a soft-deleted record. Idempotent.
    pub async fn restore(&self, requested_id: &str) -> Result<BoxRecord, Error> {
        let mut record = self.get(requested_id).await?;
        record.restore();
        self.persist_replacement(record, requested_id).await
    }

    /// Build the printable label payload for a record.
    pub async fn label(&self, requested_id: &str) -> Result<LabelPayload, Error> {
        let record = self.get(requested_id).await?;
        Ok(LabelPayload::build(&record, &self.base_url))
    }

    async fn persist_replacement(
        &self,
        record: BoxRecord,
        requested_id: &str,
    ) -> Result<BoxRecord, Error> {
        let replaced = self
            .boxes
            .replace(record.clone())
            .await
            .map_err(Self::map_repository_error)?;
        if !replaced {
            // The record vanished between lookup and write.
            return Err(Error::not_found(requested_id));
        }
        Ok(record)
    }

    fn validate_required_fields(fields: &NewBox) -> Result<(), Error> {
        let mut missing = Vec::new();
        if fields.photo_path.trim().is_empty() {
            missing.push("photo_path");
        }
        if fields.from_room.trim().is_empty() {
            missing.push("from_room");
        }
        if fields.to_room.trim().is_empty() {
            missing.push("to_room");
        }
        if missing.is_empty() {
            return Ok(());
        }
        Err(
            Error::invalid_request("Photo, from_room, and to_room are required")
                .with_details(json!({ "missing": missing })),
        )
    }
}

fn normalise_description(description: Option<String>) -> String {
    description
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_owned())
}

#[cfg(test)]
#[path = "inventory_service_tests.rs"]
mod tests;
