//! Course service entry point: loads settings, picks a course store and
//! serves the REST API.

mod server;

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use courses::domain::CourseService;
use courses::domain::ports::{CourseRepository, RandomCourseIdGenerator};
use courses::inbound::http::health::HealthState;
use courses::inbound::http::state::HttpState;
use courses::outbound::persistence::{
    DbPool, DieselCourseRepository, InMemoryCourseRepository, PoolConfig,
};
use courses::settings::AppSettings;
use ortho_config::OrthoConfig;

use server::{ServerConfig, create_server};

/// Build the HTTP state over `repo`, creating the name index first.
async fn course_state<R>(repo: R, settings: &AppSettings) -> std::io::Result<HttpState>
where
    R: CourseRepository + 'static,
{
    if let Err(err) = repo.ensure_name_index().await {
        let message = format!("course store initialisation failed: {err}");
        return Err(std::io::Error::other(message));
    }

    let service = CourseService::new(Arc::new(repo), Arc::new(RandomCourseIdGenerator))
        .with_id_allocation_attempts(settings.id_allocation_attempts());
    Ok(HttpState::from_service(Arc::new(service)))
}

async fn build_http_state(settings: &AppSettings) -> std::io::Result<HttpState> {
    match settings.database_url() {
        Some(url) => {
            let config = PoolConfig::new(url).with_max_size(settings.max_connections());
            let pool = DbPool::new(config)
                .await
                .map_err(|err| std::io::Error::other(err.to_string()))?;
            let max_connections = settings.max_connections();
            info!(max_connections, "using PostgreSQL course store");
            course_state(DieselCourseRepository::new(pool), settings).await
        }
        None => {
            warn!("no database URL configured; courses are kept in memory");
            course_state(InMemoryCourseRepository::new(), settings).await
        }
    }
}

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

    let settings = AppSettings::load()
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    let http_state = build_http_state(&settings).await?;

    let health_state = web::Data::new(HealthState::new());
    let bind_addr = settings.bind_addr();
    let config = ServerConfig::new(bind_addr, http_state);
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "course service listening");

    let handle = server.handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            health_state.mark_unhealthy();
            handle.stop(true).await;
        }
    });

    server.await
}
