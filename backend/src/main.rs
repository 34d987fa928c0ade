//! Backend entry-point: wires REST endpoints, flat-file stores, and OpenAPI docs.

use std::env;
use std::net::SocketAddr;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use movebox_backend::inbound::http::health::HealthState;
use movebox_backend::server::{self, AppSettings};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;

    let http_state = web::Data::new(server::build_state(&settings)?);
    let health_state = web::Data::new(HealthState::new());

    let bind_addr = SocketAddr::from(([0, 0, 0, 0], settings.port()));
    let server = server::create_server(health_state, http_state, bind_addr)?;

    info!(
        port = settings.port(),
        data_dir = %settings.data_dir().display(),
        qr_base_url = %settings.qr_base_url(),
        "box inventory server listening"
    );
    server.await
}
