//! Per-request trace identity.
//!
//! Every request gets a trace id: reused from an inbound `x-trace-id` header
//! when a gateway already assigned one (and it parses as a UUID), freshly
//! generated otherwise. The id is stored in the request extensions, installed
//! as the task-local trace scope for the rest of the request, and echoed back
//! on the response so clients can quote it in bug reports.

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderName, HeaderValue},
    HttpMessage,
};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use uuid::Uuid;

use crate::trace_ctx;

pub const TRACE_ID_HEADER: &str = "x-trace-id";

/// Must run before any middleware or handler that reads the trace id.
pub struct RequestTrace;

fn inbound_trace_id(req: &ServiceRequest) -> Option<String> {
    let raw = req.headers().get(TRACE_ID_HEADER)?.to_str().ok()?;
    // Only accept well-formed UUIDs; anything else gets a fresh id.
    Uuid::try_parse(raw).ok().map(|id| id.to_string())
}

impl<S, B> Transform<S, ServiceRequest> for RequestTrace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RequestTraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestTraceMiddleware { service }))
    }
}

pub struct RequestTraceMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestTraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = inbound_trace_id(&req).unwrap_or_else(|| Uuid::new_v4().to_string());

        // Downstream extractors and the error renderer read it from here.
        req.extensions_mut().insert(trace_id.clone());

        let fut = self.service.call(req);

        // Run the remainder of the request inside the task-local trace scope
        // so trace_ctx::trace_id() resolves in handlers and error paths.
        Box::pin(trace_ctx::with_trace_id(trace_id.clone(), async move {
            let mut res = fut.await?;

            if let Ok(value) = HeaderValue::from_str(&trace_id) {
                res.headers_mut()
                    .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
            }

            Ok(res)
        }))
    }
}
