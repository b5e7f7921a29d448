//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use tracing::info;

use people::Trace;
#[cfg(debug_assertions)]
use people::doc::ApiDoc;
use people::domain::{EnrichmentService, PeopleService};
use people::inbound::http::health::{HealthState, live, ready};
use people::inbound::http::people::api_scope;
use people::inbound::http::state::HttpState;
use people::outbound::http::ReqwestJsonFetcher;
use people::outbound::persistence::InMemoryPersonRepository;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let fetcher = ReqwestJsonFetcher::new()
        .map_err(|e| std::io::Error::other(format!("HTTP client construction failed: {e}")))?;
    let enrichment = EnrichmentService::new(Arc::new(fetcher), config.endpoints.clone());
    let people = PeopleService::new(
        enrichment,
        Arc::new(InMemoryPersonRepository::default()),
        Arc::new(DefaultClock),
    );
    Ok(web::Data::new(HttpState::new(Arc::new(people))))
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
        .service(api_scope())
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is initialised.
/// - `config`: pre-built [`ServerConfig`] carrying the bind address and provider endpoints.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when building the HTTP client or binding the
/// socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config)?;
    let bind_addr = config.bind_addr();

    let server = HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
        .bind(bind_addr)?;
    for addr in server.addrs() {
        info!(%addr, "listening");
    }
    let server = server.run();

    health_state.mark_ready();
    Ok(server)
}
