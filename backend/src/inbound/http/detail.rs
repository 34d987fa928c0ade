//! Box detail page: the landing target of every printed QR code.
//!
//! ```text
//! GET /box/{boxId}
//! ```
//!
//! The page is a small static shell; it reads the identifier from its own
//! path and fetches the record through the JSON API, so the HTML needs no
//! per-box templating.

use actix_web::{HttpResponse, get};

const DETAIL_PAGE: &str = include_str!("../../../assets/box-detail.html");

/// Serve the box detail page a scanned QR code lands on.
#[utoipa::path(
    get,
    path = "/box/{boxId}",
    params(("boxId" = String, Path, description = "Box identifier from the scanned QR payload")),
    responses((status = 200, description = "Box detail page", content_type = "text/html")),
    tags = ["boxes"],
    operation_id = "getBoxDetailPage"
)]
#[get("/box/{box_id}")]
pub async fn box_detail_page() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(DETAIL_PAGE)
}
