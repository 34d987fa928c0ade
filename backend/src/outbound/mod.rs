//! Driven adapters: persistence and QR image generation.

pub mod persistence;
pub mod qr;
