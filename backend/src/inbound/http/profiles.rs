//! Profile HTTP handlers.
//!
//! ```text
//! GET  /api/profiles
//! POST /api/profiles {"name":"Sam"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, ProfileName};
use crate::inbound::http::error::{ApiResult, ErrorBody};
use crate::inbound::http::state::HttpState;

/// Request and response body for profile creation.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ProfileBody {
    /// The packer's display name.
    #[schema(example = "Sam")]
    pub name: String,
}

/// List known profile names.
#[utoipa::path(
    get,
    path = "/api/profiles",
    responses(
        (status = 200, description = "Profile names", body = [String]),
        (status = 500, description = "Storage failure", body = ErrorBody)
    ),
    tags = ["profiles"],
    operation_id = "listProfiles"
)]
#[get("/api/profiles")]
pub async fn list_profiles(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let names = state
        .profiles
        .list()
        .await
        .map_err(|err| Error::storage(err.to_string()))?;
    let body: Vec<String> = names.into_iter().map(String::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// Create a profile; a no-op when the name already exists.
#[utoipa::path(
    post,
    path = "/api/profiles",
    request_body = ProfileBody,
    responses(
        (status = 200, description = "The stored name", body = ProfileBody),
        (status = 400, description = "Empty name", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    ),
    tags = ["profiles"],
    operation_id = "createProfile"
)]
#[post("/api/profiles")]
pub async fn create_profile(
    state: web::Data<HttpState>,
    payload: web::Json<ProfileBody>,
) -> ApiResult<HttpResponse> {
    let name = ProfileName::new(payload.into_inner().name)
        .map_err(|_| Error::invalid_request("Name is required"))?;
    state
        .profiles
        .add(name.clone())
        .await
        .map_err(|err| Error::storage(err.to_string()))?;
    Ok(HttpResponse::Ok().json(ProfileBody {
        name: name.as_str().to_owned(),
    }))
}
