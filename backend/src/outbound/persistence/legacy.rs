//! Stored record shapes and the legacy migration rules.
//!
//! Records parse strictly as the current shape first, then as the legacy
//! shape (a raw `id` field instead of `box_id`), and are rejected when
//! neither fits, so unreadable records fail the load instead of being
//! guessed at.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::box_record::{BoxId, BoxRecord, DEFAULT_DESCRIPTION};
use crate::domain::label::QrBaseUrl;
use crate::domain::ports::BoxRepositoryError;

/// One entry of the boxes file in either supported shape.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum StoredBox {
    /// Current schema; `deleted` and `date_deleted` default when absent.
    Current(BoxRecord),
    /// Pre-`box_id` schema.
    Legacy(LegacyBox),
}

/// The legacy record shape: raw `id`, short field names, ISO timestamp.
#[derive(Debug, Deserialize)]
pub(super) struct LegacyBox {
    id: Value,
    #[serde(default)]
    photo: Option<String>,
    #[serde(default)]
    photo_path: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    short_description: Option<String>,
    #[serde(default)]
    from: Option<String>,
    #[serde(default)]
    from_room: Option<String>,
    #[serde(default)]
    to: Option<String>,
    #[serde(default)]
    to_room: Option<String>,
    #[serde(default, rename = "createdAt")]
    created_at: Option<String>,
    #[serde(default)]
    date_created: Option<NaiveDate>,
    #[serde(default)]
    packed_by: Option<String>,
    #[serde(default)]
    deleted: Option<bool>,
}

impl LegacyBox {
    /// Rewrite a legacy record into the current shape.
    ///
    /// The raw id (string or number) becomes the canonical `BOX-NNNNNN`
    /// identifier; a non-numeric id is rejected as corrupt rather than
    /// silently renumbered. `qr_url` is recomputed from the configured base
    /// URL and `today` backs the creation date when the legacy record has
    /// none.
    pub(super) fn migrate(
        self,
        base_url: &QrBaseUrl,
        today: NaiveDate,
    ) -> Result<BoxRecord, BoxRepositoryError> {
        let box_id = self.canonical_id()?;
        let qr_url = base_url.box_url(&box_id);
        let date_created = self
            .created_at
            .as_deref()
            .and_then(date_portion)
            .or(self.date_created)
            .unwrap_or(today);

        Ok(BoxRecord {
            box_id,
            photo_path: first_present(self.photo, self.photo_path),
            short_description: {
                let description = first_present(self.description, self.short_description);
                if description.is_empty() {
                    DEFAULT_DESCRIPTION.to_owned()
                } else {
                    description
                }
            },
            from_room: first_present(self.from, self.from_room),
            to_room: first_present(self.to, self.to_room),
            date_created,
            date_deleted: None,
            deleted: self.deleted.unwrap_or(false),
            packed_by: self
                .packed_by
                .unwrap_or_else(|| "Unknown".to_owned()),
            qr_url,
        })
    }

    fn canonical_id(&self) -> Result<BoxId, BoxRepositoryError> {
        let suffix = match &self.id {
            Value::Number(number) => number.as_u64(),
            Value::String(text) => text.trim().parse().ok(),
            _ => None,
        };
        suffix.map(BoxId::from_suffix).ok_or_else(|| {
            BoxRepositoryError::corrupt(format!("legacy id {} is not numeric", self.id))
        })
    }
}

/// The calendar date portion of an ISO timestamp such as
/// `2024-11-02T09:30:00.000Z`.
fn date_portion(timestamp: &str) -> Option<NaiveDate> {
    let (date, _) = timestamp.split_once('T')?;
    date.parse().ok()
}

fn first_present(preferred: Option<String>, fallback: Option<String>) -> String {
    preferred
        .filter(|value| !value.is_empty())
        .or(fallback)
        .unwrap_or_default()
}
