//! Actix middleware.

pub mod trace;

pub use trace::{RequestId, Trace, REQUEST_ID_HEADER};
