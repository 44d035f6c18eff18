//! Task-local trace context.
//!
//! `RequestTrace` opens a scope per request; anything running inside it
//! (handlers, the problem+json renderer) resolves the same trace id without
//! threading it through arguments. Outside a request scope the id is
//! `"unknown"`, which keeps non-HTTP callers (tests, CLI) working.
//!
//! Service and domain code must not import this module; the trace id is a
//! web-boundary concern.

use std::cell::RefCell;

use tokio::task_local;

const NO_TRACE: &str = "unknown";

task_local! {
    static TRACE_ID: RefCell<Option<String>>;
}

/// The trace id of the current task, or `"unknown"` outside a request scope.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(|cell| {
            cell.borrow()
                .as_ref()
                .cloned()
                .unwrap_or_else(|| NO_TRACE.to_string())
        })
        .unwrap_or_else(|_| NO_TRACE.to_string())
}

/// Run a future inside a trace scope. Used by `RequestTrace` to establish
/// the task-local for the rest of the request.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(RefCell::new(Some(trace_id)), future).await
}
