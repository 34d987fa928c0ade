//! Port for turning a canonical QR payload into a scannable image.

use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by QR encoder adapters.
    pub enum QrEncoderError {
        /// The payload could not be encoded into a QR matrix.
        Encode { message: String } =>
            "QR matrix encoding failed: {message}",
        /// The matrix could not be rendered to image bytes.
        Render { message: String } =>
            "QR image rendering failed: {message}",
    }
}

/// Port for QR image generation.
///
/// Encoding is CPU-bound and synchronous; callers run it on a blocking
/// thread and bound it with a timeout.
#[cfg_attr(test, mockall::automock)]
pub trait QrEncoder: Send + Sync {
    /// Encode the exact payload string into PNG bytes.
    fn encode_png(&self, payload: &str) -> Result<Vec<u8>, QrEncoderError>;
}
