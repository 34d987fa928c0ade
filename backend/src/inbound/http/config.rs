//! Client configuration handler.
//!
//! ```text
//! GET /api/config
//! ```
//!
//! Clients compute their QR payloads from the same base URL the server
//! stores in records, so payload strings never diverge between the two.

use actix_web::{HttpResponse, get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::inbound::http::error::ApiResult;
use crate::inbound::http::state::HttpState;

/// Response body of `GET /api/config`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    /// Base URL under which box lookup pages are served.
    #[schema(example = "http://192.168.1.20:3000")]
    pub qr_base_url: String,
}

/// Expose the configured QR base URL.
#[utoipa::path(
    get,
    path = "/api/config",
    responses((status = 200, description = "Client configuration", body = ConfigResponse)),
    tags = ["config"],
    operation_id = "getConfig"
)]
#[get("/api/config")]
pub async fn get_config(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ConfigResponse {
        qr_base_url: state.inventory.base_url().as_str().to_owned(),
    }))
}
