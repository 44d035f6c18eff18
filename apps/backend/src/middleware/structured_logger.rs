//! One structured completion event per request.
//!
//! Emitted after the handler (and error renderer) have run, carrying method,
//! path, status, duration and the trace id installed by `RequestTrace`.
//! Severity follows the response class: 5xx at error, 4xx at warn.

use std::future::{ready, Ready};
use std::time::{Duration, Instant};

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();

        // RequestTrace stores the id as a String extension.
        let trace_id = req
            .extensions()
            .get::<String>()
            .cloned()
            .unwrap_or_else(|| "unknown".to_string());

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            // Rejected requests never produce a ServiceResponse; take the
            // status their error would render with.
            let status = match &result {
                Ok(res) => res.status(),
                Err(err) => err.as_response_error().status_code(),
            };

            log_completed(&method, &path, status, start.elapsed(), &trace_id);

            result
        })
    }
}

fn log_completed(method: &str, path: &str, status: StatusCode, elapsed: Duration, trace_id: &str) {
    let status_code = status.as_u16();
    let duration_us = elapsed.as_micros() as u64;

    // `event!` needs a const level, so the severity split is spelled out.
    if status.is_server_error() {
        error!(
            http.method = %method,
            url.path = %path,
            http.status_code = status_code,
            duration_us,
            trace_id = %trace_id,
            "request_completed"
        );
    } else if status.is_client_error() {
        warn!(
            http.method = %method,
            url.path = %path,
            http.status_code = status_code,
            duration_us,
            trace_id = %trace_id,
            "request_completed"
        );
    } else {
        info!(
            http.method = %method,
            url.path = %path,
            http.status_code = status_code,
            duration_us,
            trace_id = %trace_id,
            "request_completed"
        );
    }
}
