//! Label payload and QR image handlers.
//!
//! ```text
//! GET /api/boxes/{boxId}/label
//! GET /api/boxes/{boxId}/qr.png
//! ```
//!
//! The PNG endpoint encodes the byte-identical `qrPayload` string the label
//! endpoint returns, so a printed QR and its debug line can never diverge.

use std::time::Duration;

use actix_web::{HttpResponse, get, web};
use tracing::warn;

use crate::domain::Error;
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::state::HttpState;

/// Upper bound on QR encoding; matrix encoding is fast, so hitting this
/// means the blocking pool is starved.
const QR_ENCODE_TIMEOUT: Duration = Duration::from_secs(5);

/// Printable label payload for one box.
#[utoipa::path(
    get,
    path = "/api/boxes/{boxId}/label",
    params(("boxId" = String, Path, description = "Canonical or legacy box identifier")),
    responses(
        (
            status = 200,
            description = "Canonical QR payload plus display fields",
            body = crate::domain::LabelPayload
        ),
        (status = 404, description = "No such box", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["labels"],
    operation_id = "getBoxLabel"
)]
#[get("/api/boxes/{box_id}/label")]
pub async fn get_box_label(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let label = state.inventory.label(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(label))
}

/// QR image for one box, encoding the canonical payload.
#[utoipa::path(
    get,
    path = "/api/boxes/{boxId}/qr.png",
    params(("boxId" = String, Path, description = "Canonical or legacy box identifier")),
    responses(
        (status = 200, description = "PNG image of the box lookup QR code", content_type = "image/png"),
        (status = 404, description = "No such box", body = crate::inbound::http::error::ErrorBody),
        (status = 500, description = "Encoding failed or timed out", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["labels"],
    operation_id = "getBoxQrImage"
)]
#[get("/api/boxes/{box_id}/qr.png")]
pub async fn get_box_qr_image(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let label = state.inventory.label(&path.into_inner()).await?;
    let payload = label.qr_payload().to_owned();

    let encoder = state.qr.clone();
    let encoded = tokio::time::timeout(
        QR_ENCODE_TIMEOUT,
        web::block(move || encoder.encode_png(&payload)),
    )
    .await;

    let bytes = match encoded {
        Err(_elapsed) => {
            warn!(timeout = ?QR_ENCODE_TIMEOUT, "QR encoding timed out");
            return Err(Error::internal("QR encoding timed out").into());
        }
        Ok(joined) => joined
            .map_err(|err| Error::internal(format!("QR encoding task failed: {err}")))?
            .map_err(|err| Error::internal(err.to_string()))?,
    };

    Ok(HttpResponse::Ok().content_type("image/png").body(bytes))
}
