//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use courses::Trace;
#[cfg(debug_assertions)]
use courses::doc::ApiDoc;
use courses::inbound::http::health::{HealthState, live, ready};
use courses::inbound::http::state::HttpState;
use courses::inbound::http::{courses as course_routes, json_config, not_found};

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
        .app_data(json_config())
        .wrap(Trace)
        .configure(course_routes::configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = {
        let docs = SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi());
        app.service(docs)
    };

    app.default_service(web::to(not_found))
}

/// Construct the Actix HTTP server.
///
/// The health state is marked ready once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        http_state,
    } = config;
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
