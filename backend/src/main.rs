//! Backend entry-point: loads settings, installs logging and serves the
//! people API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use people::config::AppSettings;
use people::inbound::http::health::HealthState;
use server::{ServerConfig, create_server};

fn init_tracing(json_logs: bool) {
    let builder = fmt().with_env_filter(EnvFilter::from_default_env());
    let result = if json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load configuration: {e}")))?;
    init_tracing(settings.json_logs);

    let config = ServerConfig::from_settings(&settings).map_err(std::io::Error::other)?;
    info!(
        bind_addr = %config.bind_addr(),
        age = %config.endpoints.age,
        gender = %config.endpoints.gender,
        nationality = %config.endpoints.nationality,
        "starting people service"
    );

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}
