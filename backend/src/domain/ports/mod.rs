//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters
//! (the record store, the profile list, the QR encoder). Each trait exposes
//! strongly typed errors so adapters map their failures into predictable
//! variants.

mod box_repository;
mod macros;
mod profile_repository;
mod qr_encoder;

pub use box_repository::{BoxRepository, BoxRepositoryError, FixtureBoxRepository};
pub use profile_repository::{
    FixtureProfileRepository, ProfileRepository, ProfileRepositoryError,
};
pub use qr_encoder::{QrEncoder, QrEncoderError};

#[cfg(test)]
pub use box_repository::MockBoxRepository;
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
#[cfg(test)]
pub use qr_encoder::MockQrEncoder;
