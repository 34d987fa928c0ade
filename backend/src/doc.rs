//! OpenAPI documentation configuration.
//!
//! Defines [`ApiDoc`], the generated specification covering the box
//! inventory endpoints, label rendering, profiles, runtime config, and
//! health probes. Swagger UI serves the document in debug builds.

use utoipa::OpenApi;

use crate::domain::{BoxId, BoxRecord, LabelDisplayFields, LabelPayload};
use crate::inbound::http::boxes::{
    BoxResponse, CreateBoxRequest, LifecycleResponse, UpdateBoxRequest,
};
use crate::inbound::http::config::ConfigResponse;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::profiles::ProfileBody;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "MoveBox backend API",
        description = "HTTP interface for tracking moving boxes and printing QR labels."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::boxes::list_boxes,
        crate::inbound::http::boxes::get_box,
        crate::inbound::http::boxes::create_box,
        crate::inbound::http::boxes::update_box,
        crate::inbound::http::boxes::delete_box,
        crate::inbound::http::boxes::restore_box,
        crate::inbound::http::labels::get_box_label,
        crate::inbound::http::labels::get_box_qr_image,
        crate::inbound::http::profiles::list_profiles,
        crate::inbound::http::profiles::create_profile,
        crate::inbound::http::config::get_config,
        crate::inbound::http::detail::box_detail_page,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        BoxId,
        BoxRecord,
        BoxResponse,
        CreateBoxRequest,
        UpdateBoxRequest,
        LifecycleResponse,
        LabelPayload,
        LabelDisplayFields,
        ProfileBody,
        ConfigResponse,
        ErrorBody,
    )),
    tags(
        (name = "boxes", description = "Box record CRUD and lifecycle"),
        (name = "labels", description = "Printable label payloads and QR images"),
        (name = "profiles", description = "Packer profile names"),
        (name = "config", description = "Runtime configuration exposed to clients"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
