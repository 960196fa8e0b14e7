//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::Trace;
use crate::domain::CourseService;
use crate::domain::ports::{CourseIdGenerator, RandomCourseIdGenerator};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{courses, json_config, not_found};
use crate::outbound::persistence::InMemoryCourseRepository;

/// State backed by an empty in-memory store and the given id source.
pub fn in_memory_state_with<G>(ids: G) -> HttpState
where
    G: CourseIdGenerator + 'static,
{
    let service = CourseService::new(Arc::new(InMemoryCourseRepository::new()), Arc::new(ids));
    HttpState::from_service(Arc::new(service))
}

/// State backed by an empty in-memory store and random identifiers.
pub fn in_memory_state() -> HttpState {
    in_memory_state_with(RandomCourseIdGenerator)
}

/// Application wired like the server: trace middleware, JSON error handling,
/// course routes and the JSON 404 fallback.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .wrap(Trace)
        .configure(courses::configure)
        .default_service(web::to(not_found))
}
