//! Middleware installing a request-scoped [`TraceId`].
//!
//! A well-formed `trace-id` request header is reused so callers can correlate
//! their own logs; otherwise a fresh identifier is generated. The identifier
//! is echoed on every response and one summary line is logged per request.

use std::task::{Context, Poll};
use std::time::Instant;

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{error, info};

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Attaches a trace identifier to every request and response.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use courses::Trace;
///
/// let _app = App::new().wrap(Trace);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { service }))
    }
}

/// Service wrapper produced by [`Trace`].
pub struct TraceMiddleware<S> {
    service: S,
}

fn incoming_trace_id(req: &ServiceRequest) -> Option<TraceId> {
    req.headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = incoming_trace_id(&req).unwrap_or_else(TraceId::generate);
        let method = req.method().clone();
        let path = req.path().to_owned();
        let started = Instant::now();
        let fut = self.service.call(req);

        Box::pin(TraceId::scope(trace_id, async move {
            let mut res = fut.await?;
            stamp(&mut res, trace_id);
            info!(
                trace_id = %trace_id,
                method = %method,
                path = %path,
                status = res.status().as_u16(),
                elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
                "request completed"
            );
            Ok(res)
        }))
    }
}

fn stamp<B>(res: &mut ServiceResponse<B>, trace_id: TraceId) {
    match HeaderValue::from_str(&trace_id.to_string()) {
        Ok(value) => {
            res.response_mut()
                .headers_mut()
                .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
        }
        Err(error) => {
            error!(%error, trace_id = %trace_id, "failed to encode trace identifier header");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, test, web};

    async fn trace_echo() -> HttpResponse {
        let id = TraceId::current().map(|id| id.to_string()).unwrap_or_default();
        HttpResponse::Ok().body(id)
    }

    #[actix_web::test]
    async fn adds_trace_id_header() {
        let app = test::init_service(
            App::new()
                .wrap(Trace)
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

        let header = res
            .headers()
            .get(TRACE_ID_HEADER)
            .expect("trace id header")
            .to_str()
            .expect("ascii header");
        assert!(header.parse::<TraceId>().is_ok());
    }

    #[actix_web::test]
    async fn handler_sees_the_header_value() {
        let app =
            test::init_service(App::new().wrap(Trace).route("/", web::get().to(trace_echo))).await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        let header = res
            .headers()
            .get(TRACE_ID_HEADER)
            .expect("trace id header")
            .to_str()
            .expect("ascii header")
            .to_owned();

        let body = test::read_body(res).await;
        assert_eq!(std::str::from_utf8(&body).expect("utf8 body"), header);
    }

    #[actix_web::test]
    async fn reuses_a_valid_incoming_trace_id() {
        let app =
            test::init_service(App::new().wrap(Trace).route("/", web::get().to(trace_echo))).await;
        let incoming = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((TRACE_ID_HEADER, incoming))
            .to_request();
        let res = test::call_service(&app, req).await;

        let echoed = res.headers().get(TRACE_ID_HEADER);
        assert_eq!(echoed.and_then(|v| v.to_str().ok()), Some(incoming));
    }

    #[actix_web::test]
    async fn replaces_a_malformed_incoming_trace_id() {
        let app =
            test::init_service(App::new().wrap(Trace).route("/", web::get().to(trace_echo))).await;
        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((TRACE_ID_HEADER, "not-a-uuid"))
            .to_request();
        let res = test::call_service(&app, req).await;

        let header = res
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .expect("trace id header");
        assert_ne!(header, "not-a-uuid");
        assert!(header.parse::<TraceId>().is_ok());
    }
}
