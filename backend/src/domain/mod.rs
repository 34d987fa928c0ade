//! Domain core: records, identifier allocation, label payloads, errors.
//!
//! Everything in this module is transport agnostic. Inbound adapters map
//! [`Error`] onto HTTP responses; outbound adapters implement the traits in
//! [`ports`].

pub mod allocator;
pub mod box_record;
pub mod error;
pub mod inventory_service;
pub mod label;
pub mod ports;
pub mod profile;

pub use self::allocator::next_box_id;
pub use self::box_record::{
    BoxId, BoxIdError, BoxRecord, BoxUpdate, NewBox, DEFAULT_DESCRIPTION,
};
pub use self::error::{Error, ErrorCode};
pub use self::inventory_service::InventoryService;
pub use self::label::{LabelDisplayFields, LabelPayload, QrBaseUrl};
pub use self::profile::{ProfileName, ProfileNameError};
