//! Test-only middleware for injecting a SharedTxn into request extensions.
//!
//! HTTP tests cannot touch the server-side HttpRequest directly, so this
//! middleware inserts a pre-created SharedTxn into every request's
//! extensions; handlers then reuse it via `with_txn()` and the test owns
//! the rollback. Built disabled, it passes requests through untouched.

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage};
use backend::db::txn::SharedTxn;
use futures_util::future::{ready, LocalBoxFuture, Ready};

#[derive(Clone)]
pub struct TestTxnInjector {
    shared: Option<SharedTxn>,
}

impl TestTxnInjector {
    pub fn new(shared: SharedTxn) -> Self {
        Self {
            shared: Some(shared),
        }
    }

    /// A pass-through injector, for apps that do not share a transaction.
    pub fn disabled() -> Self {
        Self { shared: None }
    }
}

impl<S, B> Transform<S, ServiceRequest> for TestTxnInjector
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TestTxnInjectorMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TestTxnInjectorMiddleware {
            service,
            shared: self.shared.clone(),
        }))
    }
}

pub struct TestTxnInjectorMiddleware<S> {
    service: S,
    shared: Option<SharedTxn>,
}

impl<S, B> Service<ServiceRequest> for TestTxnInjectorMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if let Some(shared) = &self.shared {
            req.extensions_mut().insert(shared.clone());
        }

        let fut = self.service.call(req);
        Box::pin(fut)
    }
}
