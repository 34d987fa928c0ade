//! Box records and their identifiers.
//!
//! ## Invariants
//! - [`BoxId`] always renders as `BOX-` followed by six digits.
//! - A record is `deleted` exactly when `date_deleted` is set; the
//!   [`BoxRecord::soft_delete`] and [`BoxRecord::restore`] transitions keep
//!   the pair in lockstep.
//! - `box_id` and `date_created` never change after creation.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::{PartialSchema, ToSchema};

/// Prefix shared by every canonical box identifier.
pub const BOX_ID_PREFIX: &str = "BOX-";

/// Width of the zero-padded numeric suffix.
pub const BOX_ID_DIGITS: usize = 6;

/// Description stored when the packer left the field empty.
pub const DEFAULT_DESCRIPTION: &str = "No description";

/// Validation failures raised when parsing a [`BoxId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoxIdError {
    /// The value does not start with the `BOX-` prefix.
    #[error("box id must start with {BOX_ID_PREFIX}")]
    MissingPrefix,
    /// The suffix is not an unsigned number.
    #[error("box id suffix must be numeric")]
    NonNumericSuffix,
}

/// Canonical box identifier in the form `BOX-NNNNNN`.
///
/// # Examples
/// ```
/// use movebox_backend::domain::BoxId;
///
/// let id = BoxId::from_suffix(7);
/// assert_eq!(id.as_str(), "BOX-000007");
/// assert_eq!(id.suffix(), 7);
/// assert_eq!(id.short_number(), "007");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BoxId {
    rendered: String,
    suffix: u64,
}

// Serialized as a plain string, so the schema delegates to `String`.
impl PartialSchema for BoxId {
    fn schema() -> utoipa::openapi::RefOr<utoipa::openapi::schema::Schema> {
        String::schema()
    }
}

impl ToSchema for BoxId {
    fn name() -> std::borrow::Cow<'static, str> {
        std::borrow::Cow::Borrowed("BoxId")
    }
}

impl BoxId {
    /// Parse a canonical or legacy-formatted identifier.
    ///
    /// Legacy requests such as `BOX-7` or `BOX-0007` resolve to the canonical
    /// six-digit rendering of the same number.
    pub fn parse(value: &str) -> Result<Self, BoxIdError> {
        let digits = value
            .strip_prefix(BOX_ID_PREFIX)
            .ok_or(BoxIdError::MissingPrefix)?;
        let suffix: u64 = digits.parse().map_err(|_| BoxIdError::NonNumericSuffix)?;
        Ok(Self::from_suffix(suffix))
    }

    /// Build the canonical identifier for a numeric suffix.
    pub fn from_suffix(suffix: u64) -> Self {
        Self {
            rendered: format!("{BOX_ID_PREFIX}{suffix:0BOX_ID_DIGITS$}"),
            suffix,
        }
    }

    /// Canonical string form, `BOX-NNNNNN`.
    pub fn as_str(&self) -> &str {
        self.rendered.as_str()
    }

    /// Numeric suffix of the identifier.
    pub fn suffix(&self) -> u64 {
        self.suffix
    }

    /// Last three characters of the numeric suffix, as printed on labels
    /// (`BOX-000001` → `001`, `BOX-123456` → `456`).
    pub fn short_number(&self) -> String {
        let digits = format!("{:0BOX_ID_DIGITS$}", self.suffix);
        let start = digits.len().saturating_sub(3);
        digits[start..].to_owned()
    }
}

impl fmt::Display for BoxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for BoxId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<String> for BoxId {
    type Error = BoxIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<BoxId> for String {
    fn from(value: BoxId) -> Self {
        value.rendered
    }
}

/// One tracked moving box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BoxRecord {
    /// Canonical identifier, immutable once created.
    pub box_id: BoxId,
    /// Free-text contents summary.
    pub short_description: String,
    /// Comma-joined list of source rooms.
    pub from_room: String,
    /// Comma-joined list of destination rooms.
    pub to_room: String,
    /// Photo of the box contents: a base64 data URL or a stored file path.
    pub photo_path: String,
    /// Calendar date the record was created, immutable.
    pub date_created: NaiveDate,
    /// Set while the record is soft-deleted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_deleted: Option<NaiveDate>,
    /// Soft-delete flag; deleted records stay in the store.
    #[serde(default)]
    pub deleted: bool,
    /// Profile name active when the box was packed.
    pub packed_by: String,
    /// Stored lookup URL so already-printed labels survive base URL changes.
    pub qr_url: String,
}

impl BoxRecord {
    /// Mark the record deleted as of `today`. Already-deleted records keep
    /// their original deletion date.
    pub fn soft_delete(&mut self, today: NaiveDate) {
        if !self.deleted {
            self.deleted = true;
            self.date_deleted = Some(today);
        }
    }

    /// Clear the soft-delete flag and its date.
    pub fn restore(&mut self) {
        self.deleted = false;
        self.date_deleted = None;
    }

    /// Apply a partial update, touching only the fields the caller supplied.
    pub fn apply_update(&mut self, update: BoxUpdate) {
        if let Some(short_description) = update.short_description {
            self.short_description = short_description;
        }
        if let Some(from_room) = update.from_room {
            self.from_room = from_room;
        }
        if let Some(to_room) = update.to_room {
            self.to_room = to_room;
        }
        if let Some(photo_path) = update.photo_path {
            self.photo_path = photo_path;
        }
    }
}

/// Fields accepted when creating a box.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewBox {
    /// Identifier chosen by the caller; allocated server-side when absent.
    pub box_id: Option<String>,
    pub photo_path: String,
    pub short_description: Option<String>,
    pub from_room: String,
    pub to_room: String,
    /// Creation date override; defaults to today.
    pub date_created: Option<NaiveDate>,
    /// Packer profile; defaults to `"Unknown"`.
    pub packed_by: Option<String>,
}

/// Partial update: absent fields are left untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoxUpdate {
    pub short_description: Option<String>,
    pub from_room: Option<String>,
    pub to_room: Option<String>,
    pub photo_path: Option<String>,
}

impl BoxUpdate {
    /// True when the update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.short_description.is_none()
            && self.from_room.is_none()
            && self.to_room.is_none()
            && self.photo_path.is_none()
    }
}
