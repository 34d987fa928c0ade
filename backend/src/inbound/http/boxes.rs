//! Box record HTTP handlers.
//!
//! ```text
//! GET    /api/boxes
//! GET    /api/boxes/{boxId}
//! POST   /api/boxes
//! PUT    /api/boxes/{boxId}
//! DELETE /api/boxes/{boxId}
//! POST   /api/boxes/{boxId}/restore
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{BoxRecord, BoxUpdate, NewBox};
use crate::inbound::http::error::{ApiResult, ErrorBody};
use crate::inbound::http::state::HttpState;

/// Box record as serialized on the wire.
///
/// `photo_url` mirrors `photo_path`: older clients read one alias, newer
/// ones the other.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BoxResponse {
    pub box_id: String,
    pub short_description: String,
    pub from_room: String,
    pub to_room: String,
    pub photo_path: String,
    pub photo_url: String,
    pub date_created: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_deleted: Option<NaiveDate>,
    pub deleted: bool,
    pub packed_by: String,
    pub qr_url: String,
}

impl From<BoxRecord> for BoxResponse {
    fn from(record: BoxRecord) -> Self {
        Self {
            box_id: record.box_id.as_str().to_owned(),
            short_description: record.short_description,
            from_room: record.from_room,
            to_room: record.to_room,
            photo_url: record.photo_path.clone(),
            photo_path: record.photo_path,
            date_created: record.date_created,
            date_deleted: record.date_deleted,
            deleted: record.deleted,
            packed_by: record.packed_by,
            qr_url: record.qr_url,
        }
    }
}

/// Request body for `POST /api/boxes`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBoxRequest {
    /// Identifier chosen by the client; allocated server-side when absent.
    #[serde(default)]
    pub box_id: Option<String>,
    #[serde(default)]
    pub photo_path: Option<String>,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub from_room: Option<String>,
    #[serde(default)]
    pub to_room: Option<String>,
    #[serde(default)]
    pub date_created: Option<NaiveDate>,
    #[serde(default)]
    pub packed_by: Option<String>,
}

impl From<CreateBoxRequest> for NewBox {
    fn from(value: CreateBoxRequest) -> Self {
        Self {
            box_id: value.box_id,
            photo_path: value.photo_path.unwrap_or_default(),
            short_description: value.short_description,
            from_room: value.from_room.unwrap_or_default(),
            to_room: value.to_room.unwrap_or_default(),
            date_created: value.date_created,
            packed_by: value.packed_by,
        }
    }
}

/// Request body for `PUT /api/boxes/{boxId}`: absent fields stay untouched.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBoxRequest {
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub from_room: Option<String>,
    #[serde(default)]
    pub to_room: Option<String>,
    #[serde(default)]
    pub photo_path: Option<String>,
}

impl From<UpdateBoxRequest> for BoxUpdate {
    fn from(value: UpdateBoxRequest) -> Self {
        Self {
            short_description: value.short_description,
            from_room: value.from_room,
            to_room: value.to_room,
            photo_path: value.photo_path,
        }
    }
}

/// Response body for delete and restore.
#[derive(Debug, Serialize, ToSchema)]
pub struct LifecycleResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "box")]
    pub record: BoxResponse,
}

/// Query parameters for `GET /api/boxes`.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct ListBoxesQuery {
    /// When true, soft-deleted boxes are omitted.
    #[serde(default)]
    pub active: bool,
}

/// List all boxes in persisted order.
#[utoipa::path(
    get,
    path = "/api/boxes",
    params(ListBoxesQuery),
    responses(
        (status = 200, description = "All box records", body = [BoxResponse]),
        (status = 500, description = "Storage failure", body = ErrorBody)
    ),
    tags = ["boxes"],
    operation_id = "listBoxes"
)]
#[get("/api/boxes")]
pub async fn list_boxes(
    state: web::Data<HttpState>,
    query: web::Query<ListBoxesQuery>,
) -> ApiResult<HttpResponse> {
    let records = if query.active {
        state.inventory.list_active().await?
    } else {
        state.inventory.list().await?
    };
    let body: Vec<BoxResponse> = records.into_iter().map(BoxResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// Fetch one box by identifier, tolerating legacy renderings.
#[utoipa::path(
    get,
    path = "/api/boxes/{boxId}",
    params(("boxId" = String, Path, description = "Canonical or legacy box identifier")),
    responses(
        (status = 200, description = "The box record", body = BoxResponse),
        (status = 404, description = "No such box", body = ErrorBody)
    ),
    tags = ["boxes"],
    operation_id = "getBox"
)]
#[get("/api/boxes/{box_id}")]
pub async fn get_box(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let record = state.inventory.get(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(BoxResponse::from(record)))
}

/// Create a box record.
#[utoipa::path(
    post,
    path = "/api/boxes",
    request_body = CreateBoxRequest,
    responses(
        (status = 200, description = "The created record", body = BoxResponse),
        (status = 400, description = "Missing photo or rooms", body = ErrorBody)
    ),
    tags = ["boxes"],
    operation_id = "createBox"
)]
#[post("/api/boxes")]
pub async fn create_box(
    state: web::Data<HttpState>,
    payload: web::Json<CreateBoxRequest>,
) -> ApiResult<HttpResponse> {
    let record = state
        .inventory
        .create(NewBox::from(payload.into_inner()))
        .await?;
    Ok(HttpResponse::Ok().json(BoxResponse::from(record)))
}

/// Partially update a box record.
#[utoipa::path(
    put,
    path = "/api/boxes/{boxId}",
    params(("boxId" = String, Path, description = "Canonical or legacy box identifier")),
    request_body = UpdateBoxRequest,
    responses(
        (status = 200, description = "The updated record", body = BoxResponse),
        (status = 404, description = "No such box", body = ErrorBody)
    ),
    tags = ["boxes"],
    operation_id = "updateBox"
)]
#[put("/api/boxes/{box_id}")]
pub async fn update_box(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateBoxRequest>,
) -> ApiResult<HttpResponse> {
    let record = state
        .inventory
        .update(&path.into_inner(), BoxUpdate::from(payload.into_inner()))
        .await?;
    Ok(HttpResponse::Ok().json(BoxResponse::from(record)))
}

/// Soft-delete a box record.
#[utoipa::path(
    delete,
    path = "/api/boxes/{boxId}",
    params(("boxId" = String, Path, description = "Canonical or legacy box identifier")),
    responses(
        (status = 200, description = "The record, now flagged deleted", body = LifecycleResponse),
        (status = 404, description = "No such box", body = ErrorBody)
    ),
    tags = ["boxes"],
    operation_id = "deleteBox"
)]
#[delete("/api/boxes/{box_id}")]
pub async fn delete_box(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let record = state.inventory.soft_delete(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(LifecycleResponse {
        success: true,
        message: "Box deleted".to_owned(),
        record: BoxResponse::from(record),
    }))
}

/// Restore a soft-deleted box record.
#[utoipa::path(
    post,
    path = "/api/boxes/{boxId}/restore",
    params(("boxId" = String, Path, description = "Canonical or legacy box identifier")),
    responses(
        (status = 200, description = "The restored record", body = LifecycleResponse),
        (status = 404, description = "No such box", body = ErrorBody)
    ),
    tags = ["boxes"],
    operation_id = "restoreBox"
)]
#[post("/api/boxes/{box_id}/restore")]
pub async fn restore_box(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let record = state.inventory.restore(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(LifecycleResponse {
        success: true,
        message: "Box restored".to_owned(),
        record: BoxResponse::from(record),
    }))
}
