//! Flat-file persistence adapters.

mod json_box_repository;
mod json_profile_repository;
mod legacy;

pub use json_box_repository::{JsonBoxRepository, BOXES_FILE};
pub use json_profile_repository::{JsonProfileRepository, PROFILES_FILE};
