//! HTTP inbound adapter exposing the REST surface.

pub mod boxes;
pub mod config;
pub mod detail;
pub mod error;
pub mod health;
pub mod labels;
pub mod profiles;
pub mod state;

use actix_web::web;

pub use error::{ApiError, ApiResult};
pub use state::HttpState;

/// Register every REST route on an application or test harness.
///
/// Callers supply [`HttpState`] and [`health::HealthState`] via `app_data`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(profiles::list_profiles)
        .service(profiles::create_profile)
        .service(boxes::list_boxes)
        .service(boxes::create_box)
        .service(labels::get_box_label)
        .service(labels::get_box_qr_image)
        .service(boxes::restore_box)
        .service(boxes::get_box)
        .service(boxes::update_box)
        .service(boxes::delete_box)
        .service(config::get_config)
        .service(detail::box_detail_page)
        .service(health::live)
        .service(health::ready);
}
