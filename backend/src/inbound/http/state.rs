//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and only see the driving ports, so
//! they can be exercised against any repository.

use std::sync::Arc;

use crate::domain::ports::{CourseCommand, CourseQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub courses: Arc<dyn CourseQuery>,
    pub course_commands: Arc<dyn CourseCommand>,
}

impl HttpState {
    /// Use one service for both ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use courses::domain::CourseService;
    /// use courses::domain::ports::RandomCourseIdGenerator;
    /// use courses::inbound::http::state::HttpState;
    /// use courses::outbound::persistence::InMemoryCourseRepository;
    ///
    /// let service = CourseService::new(
    ///     Arc::new(InMemoryCourseRepository::new()),
    ///     Arc::new(RandomCourseIdGenerator),
    /// );
    /// let _state = HttpState::from_service(Arc::new(service));
    /// ```
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: CourseQuery + CourseCommand + 'static,
    {
        Self {
            courses: service.clone(),
            course_commands: service,
        }
    }
}
