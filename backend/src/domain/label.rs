//! Printable label payloads.
//!
//! The QR payload is the single source of truth: the exact string handed to
//! the QR encoder is the same string printed in the label's debug line.
//! [`LabelPayload`] builds it once and exposes it read-only so no rendering
//! surface can reformat it.

use serde::Serialize;
use url::Url;
use utoipa::ToSchema;

use crate::domain::box_record::BoxRecord;
use crate::domain::error::Error;

/// Longest description printed on a label before truncation.
const MAX_DESCRIPTION_CHARS: usize = 50;

/// Characters kept when a description is truncated, before the ellipsis.
const TRUNCATED_DESCRIPTION_CHARS: usize = 47;

/// Validated base URL under which box lookup pages are served.
///
/// The server never falls back to a request origin: an empty or non-http
/// value is a configuration error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrBaseUrl(String);

impl QrBaseUrl {
    /// Validate and normalise a configured base URL.
    ///
    /// Trailing slashes are stripped so joining with `/box/{id}` cannot
    /// produce a double slash.
    pub fn parse(value: &str) -> Result<Self, Error> {
        let trimmed = value.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(Error::configuration("QR base URL is not configured"));
        }
        let parsed = Url::parse(trimmed)
            .map_err(|err| Error::configuration(format!("QR base URL is invalid: {err}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::configuration(
                "QR base URL must be an absolute http(s) URL",
            ));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// The normalised base URL string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The canonical lookup URL for a box identifier.
    pub fn box_url(&self, box_id: impl AsRef<str>) -> String {
        format!("{}/box/{}", self.0, box_id.as_ref())
    }
}

/// Display fields rendered on a label alongside the QR image.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LabelDisplayFields {
    /// Last three digits of the box number, the label's headline.
    pub box_number_short: String,
    /// Description capped at 50 characters (47 plus `...` when longer).
    pub truncated_description: String,
    /// `from_room → to_room`.
    pub room_flow: String,
    /// Photo reference for the contents thumbnail.
    pub photo_path: String,
    /// Creation date printed in the label footer.
    pub date_created: String,
    /// Packer name printed in the label footer.
    pub packed_by: String,
}

/// A fully assembled label: one canonical QR payload plus display fields.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LabelPayload {
    qr_payload: String,
    display: LabelDisplayFields,
}

impl LabelPayload {
    /// Assemble the label payload for one box.
    ///
    /// # Examples
    /// ```
    /// use movebox_backend::domain::{LabelPayload, QrBaseUrl};
    /// # use chrono::NaiveDate;
    /// # use movebox_backend::domain::{BoxId, BoxRecord};
    /// # let record = BoxRecord {
    /// #     box_id: BoxId::from_suffix(1),
    /// #     short_description: "Mugs".to_owned(),
    /// #     from_room: "Kitchen".to_owned(),
    /// #     to_room: "Garage".to_owned(),
    /// #     photo_path: "x".to_owned(),
    /// #     date_created: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
    /// #     date_deleted: None,
    /// #     deleted: false,
    /// #     packed_by: "Sam".to_owned(),
    /// #     qr_url: "http://example.test/box/BOX-000001".to_owned(),
    /// # };
    /// let base = QrBaseUrl::parse("http://example.test").unwrap();
    /// let label = LabelPayload::build(&record, &base);
    /// assert_eq!(label.qr_payload(), "http://example.test/box/BOX-000001");
    /// ```
    pub fn build(record: &BoxRecord, base_url: &QrBaseUrl) -> Self {
        let qr_payload = base_url.box_url(&record.box_id);
        Self {
            qr_payload,
            display: LabelDisplayFields {
                box_number_short: record.box_id.short_number(),
                truncated_description: truncate_description(&record.short_description),
                room_flow: format!("{} → {}", record.from_room, record.to_room),
                photo_path: record.photo_path.clone(),
                date_created: record.date_created.to_string(),
                packed_by: record.packed_by.clone(),
            },
        }
    }

    /// Assemble one payload per box for a batch print run. Each payload is
    /// computed independently; there is no shared state between boxes.
    pub fn build_batch(records: &[BoxRecord], base_url: &QrBaseUrl) -> Vec<Self> {
        records
            .iter()
            .map(|record| Self::build(record, base_url))
            .collect()
    }

    /// The exact string to encode into the QR image **and** to print as the
    /// label's debug line. Callers must use this value verbatim for both.
    pub fn qr_payload(&self) -> &str {
        self.qr_payload.as_str()
    }

    /// Human-readable fields for the label body.
    pub fn display(&self) -> &LabelDisplayFields {
        &self.display
    }
}

/// Cap a description at 50 characters, keeping 47 plus an ellipsis when
/// longer. Counts characters, not bytes, so multi-byte text cannot be split.
fn truncate_description(description: &str) -> String {
    if description.chars().count() <= MAX_DESCRIPTION_CHARS {
        return description.to_owned();
    }
    let kept: String = description.chars().take(TRUNCATED_DESCRIPTION_CHARS).collect();
    format!("{kept}...")
}
