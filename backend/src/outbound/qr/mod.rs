//! QR encoder adapter.
//!
//! Renders label QR codes server-side: a matrix encoder turns the canonical
//! payload string into PNG bytes.

mod matrix_encoder;

pub use matrix_encoder::MatrixQrEncoder;
