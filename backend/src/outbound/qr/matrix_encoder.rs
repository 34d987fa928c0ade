//! Matrix QR encoder rendering payloads to PNG bytes.

use image::{GrayImage, ImageFormat, Luma};
use qrcode::{Color, EcLevel, QrCode};

use crate::domain::ports::{QrEncoder, QrEncoderError};

/// Pixels per QR module.
const MODULE_PIXELS: u32 = 4;

/// Quiet-zone width in modules on every side, per the QR specification.
const QUIET_ZONE_MODULES: u32 = 4;

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// QR encoder backed by a standard matrix encoding library.
///
/// Labels are scanned from paper at arm's length, so codes use error
/// correction level H.
#[derive(Debug, Default, Clone, Copy)]
pub struct MatrixQrEncoder;

impl QrEncoder for MatrixQrEncoder {
    fn encode_png(&self, payload: &str) -> Result<Vec<u8>, QrEncoderError> {
        let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::H)
            .map_err(|err| QrEncoderError::encode(err.to_string()))?;

        let modules = u32::try_from(code.width())
            .map_err(|err| QrEncoderError::encode(err.to_string()))?;
        let side = (modules + 2 * QUIET_ZONE_MODULES) * MODULE_PIXELS;
        let mut canvas = GrayImage::from_pixel(side, side, LIGHT);

        for (index, color) in code.to_colors().into_iter().enumerate() {
            if color != Color::Dark {
                continue;
            }
            let index = u32::try_from(index)
                .map_err(|err| QrEncoderError::render(err.to_string()))?;
            let module_x = (index % modules + QUIET_ZONE_MODULES) * MODULE_PIXELS;
            let module_y = (index / modules + QUIET_ZONE_MODULES) * MODULE_PIXELS;
            for dy in 0..MODULE_PIXELS {
                for dx in 0..MODULE_PIXELS {
                    canvas.put_pixel(module_x + dx, module_y + dy, DARK);
                }
            }
        }

        let mut bytes = Vec::new();
        canvas
            .write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|err| QrEncoderError::render(err.to_string()))?;
        Ok(bytes)
    }
}
