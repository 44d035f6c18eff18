use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use backend::db::txn::SharedTxn;
use backend::middleware::request_trace::RequestTrace;
use backend::middleware::structured_logger::StructuredLogger;
use backend::middleware::trace_span::TraceSpan;
use backend::routes;
use backend::state::app_state::AppState;
use backend::AppError;

use super::txn_injector::TestTxnInjector;

type RouteConfigFn = Box<dyn Fn(&mut web::ServiceConfig) + Send + Sync>;

/// Assembles an in-process service with the production middleware chain,
/// plus a test-only injector slot for running requests on a shared
/// transaction.
pub struct TestAppBuilder {
    state: AppState,
    route_config: Option<RouteConfigFn>,
    shared_txn: Option<SharedTxn>,
}

impl TestAppBuilder {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            route_config: None,
            shared_txn: None,
        }
    }

    /// Serve the full production route tree.
    pub fn with_prod_routes(mut self) -> Self {
        self.route_config = Some(Box::new(routes::configure) as RouteConfigFn);
        self
    }

    /// Serve a custom route set, for tests that mount a single handler.
    pub fn with_routes<F>(mut self, config_fn: F) -> Self
    where
        F: Fn(&mut web::ServiceConfig) + Send + Sync + 'static,
    {
        self.route_config = Some(Box::new(config_fn) as RouteConfigFn);
        self
    }

    /// Inject the given SharedTxn into every request the app serves.
    ///
    /// Handlers then run against the test-owned transaction instead of
    /// beginning their own, so state persists across requests and the test
    /// rolls everything back at the end.
    pub fn with_shared_txn(mut self, shared: &SharedTxn) -> Self {
        self.shared_txn = Some(shared.clone());
        self
    }

    pub async fn build(
        self,
    ) -> Result<impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>, AppError>
    {
        let state = self.state;
        let route_config = self.route_config;
        let injector = match self.shared_txn {
            Some(shared) => TestTxnInjector::new(shared),
            None => TestTxnInjector::disabled(),
        };

        let data = web::Data::new(state);

        // Same registration order as main.rs, with the injector wrapped last
        // so it runs outermost and every middleware sees the shared txn.
        let service = test::init_service(
            App::new()
                .wrap(StructuredLogger)
                .wrap(TraceSpan)
                .wrap(RequestTrace)
                .wrap(injector)
                .app_data(data)
                .configure(move |cfg| {
                    if let Some(config_fn) = &route_config {
                        config_fn(cfg);
                    }
                }),
        )
        .await;

        Ok(service)
    }
}

pub fn create_test_app(state: AppState) -> TestAppBuilder {
    TestAppBuilder::new(state)
}
