//! Port for box record persistence.

use async_trait::async_trait;

use crate::domain::box_record::{BoxId, BoxRecord};

use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by box repository adapters.
    pub enum BoxRepositoryError {
        /// The backing file or database could not be read.
        Read { message: String } =>
            "box store read failed: {message}",
        /// The backing file or database could not be written.
        Write { message: String } =>
            "box store write failed: {message}",
        /// A stored record could not be parsed in any known shape.
        Corrupt { message: String } =>
            "box store holds an unreadable record: {message}",
        /// A record with the same identifier is already stored.
        Duplicate { box_id: String } =>
            "box {box_id} already exists",
    }
}

/// Port for reading and writing box records.
///
/// `list` returns records in persisted (append) order; the flat-file
/// adapter documents that order and the service never relies on it for
/// identifier allocation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BoxRepository: Send + Sync {
    /// All records, deleted ones included, in append order.
    async fn list(&self) -> Result<Vec<BoxRecord>, BoxRepositoryError>;

    /// Exact-match lookup by canonical identifier.
    async fn find(&self, box_id: &BoxId) -> Result<Option<BoxRecord>, BoxRepositoryError>;

    /// Append a brand-new record.
    ///
    /// Uniqueness is enforced here, under the adapter's own lock, so two
    /// concurrent creates cannot both store the same identifier; the loser
    /// receives [`BoxRepositoryError::Duplicate`].
    async fn insert(&self, record: BoxRecord) -> Result<(), BoxRepositoryError>;

    /// Replace the stored record carrying the same identifier.
    ///
    /// Returns `false` when no such record exists.
    async fn replace(&self, record: BoxRecord) -> Result<bool, BoxRepositoryError>;
}

/// Fixture implementation for tests that never touch persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBoxRepository;

#[async_trait]
impl BoxRepository for FixtureBoxRepository {
    async fn list(&self) -> Result<Vec<BoxRecord>, BoxRepositoryError> {
        Ok(Vec::new())
    }

    async fn find(&self, _box_id: &BoxId) -> Result<Option<BoxRecord>, BoxRepositoryError> {
        Ok(None)
    }

    async fn insert(&self, _record: BoxRecord) -> Result<(), BoxRepositoryError> {
        Ok(())
    }

    async fn replace(&self, _record: BoxRecord) -> Result<bool, BoxRepositoryError> {
        Ok(false)
    }
}
