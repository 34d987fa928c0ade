//! Port for packer profile persistence.

use async_trait::async_trait;

use crate::domain::profile::ProfileName;

use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by profile repository adapters.
    pub enum ProfileRepositoryError {
        /// The backing file could not be read.
        Read { message: String } =>
            "profile store read failed: {message}",
        /// The backing file could not be written.
        Write { message: String } =>
            "profile store write failed: {message}",
    }
}

/// Port for the flat profile name collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// All known profile names in insertion order.
    async fn list(&self) -> Result<Vec<ProfileName>, ProfileRepositoryError>;

    /// Add a profile name; a no-op when the name already exists.
    async fn add(&self, name: ProfileName) -> Result<(), ProfileRepositoryError>;
}

/// Fixture implementation for tests that never touch persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProfileRepository;

#[async_trait]
impl ProfileRepository for FixtureProfileRepository {
    async fn list(&self) -> Result<Vec<ProfileName>, ProfileRepositoryError> {
        Ok(Vec::new())
    }

    async fn add(&self, _name: ProfileName) -> Result<(), ProfileRepositoryError> {
        Ok(())
    }
}
