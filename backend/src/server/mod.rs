//! Server construction and middleware wiring.

mod config;

pub use config::AppSettings;

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::{Clock, DefaultClock};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::{InventoryService, QrBaseUrl};
use crate::inbound::http::health::HealthState;
use crate::inbound::http::{self, HttpState};
use crate::middleware::Trace;
use crate::outbound::persistence::{JsonBoxRepository, JsonProfileRepository};
use crate::outbound::qr::MatrixQrEncoder;

/// Open the flat-file stores and assemble the shared HTTP state.
///
/// Legacy records in `boxes.json` are migrated and written back here,
/// before the first request is served.
///
/// # Errors
/// Returns [`std::io::Error`] when the base URL is invalid or a store
/// cannot be opened.
pub fn build_state(settings: &AppSettings) -> std::io::Result<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let base_url = QrBaseUrl::parse(&settings.qr_base_url())
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    let data_dir = settings.data_dir();
    let boxes = JsonBoxRepository::open(&data_dir, &base_url, clock.utc().date_naive())
        .map_err(std::io::Error::other)?;
    let profiles = JsonProfileRepository::open(&data_dir).map_err(std::io::Error::other)?;

    Ok(HttpState::new(
        InventoryService::new(Arc::new(boxes), clock, base_url),
        Arc::new(profiles),
        Arc::new(MatrixQrEncoder),
    ))
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(http::configure);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server bound to the given address.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    bind_addr: SocketAddr,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
