//! Shared HTTP adapter state.
//!
//! Handlers receive this bundle via `actix_web::web::Data` so they depend
//! only on the domain service and ports, and stay testable without real I/O.

use std::sync::Arc;

use crate::domain::InventoryService;
use crate::domain::ports::{ProfileRepository, QrEncoder};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Box lifecycle service.
    pub inventory: InventoryService,
    /// Profile name collection.
    pub profiles: Arc<dyn ProfileRepository>,
    /// QR image generation.
    pub qr: Arc<dyn QrEncoder>,
}

impl HttpState {
    /// Bundle the service and ports for handler injection.
    pub fn new(
        inventory: InventoryService,
        profiles: Arc<dyn ProfileRepository>,
        qr: Arc<dyn QrEncoder>,
    ) -> Self {
        Self {
            inventory,
            profiles,
            qr,
        }
    }
}
