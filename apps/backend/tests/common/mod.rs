#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::{HeaderName, CONTENT_TYPE};
use actix_web::test;
use serde_json::Value;

// Logging is auto-installed for every test binary that declares this module
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

// Policy defaults to rollback but can be flipped per-binary via `POTLUCK_TXN_POLICY=commit`.
#[ctor::ctor]
fn init_txn_policy() {
    use backend::db::txn_policy::{policy_from_env, set_txn_policy, TxnPolicy};

    set_txn_policy(policy_from_env(TxnPolicy::RollbackOnOk));
}

/// The id in the problem body and the `x-trace-id` header must be the same
/// id, or log correlation is broken.
pub fn assert_trace_id_matches(json: &Value, header_trace_id: &str) {
    let trace_id_in_body = json["trace_id"]
        .as_str()
        .expect("trace_id field should be a string");
    assert_eq!(
        trace_id_in_body, header_trace_id,
        "body trace_id and x-trace-id header disagree"
    );
}

/// Validate that a response follows the ProblemDetails contract and that
/// trace_id matches the x-trace-id header.
pub async fn assert_problem_details_structure(
    resp: ServiceResponse<BoxBody>,
    expected_status: u16,
    expected_code: &str,
    expected_detail: &str,
) {
    assert_eq!(resp.status().as_u16(), expected_status);

    // read_body consumes the response, so take a header copy first.
    let headers = resp.headers().clone();

    let trace_hdr = HeaderName::from_static("x-trace-id");
    let trace_id = headers
        .get(&trace_hdr)
        .and_then(|v| v.to_str().ok())
        .expect("x-trace-id header should be present and valid UTF-8");
    assert!(
        !trace_id.is_empty(),
        "x-trace-id header should not be empty"
    );

    // Tolerate charset or other parameters after the media type.
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with("application/problem+json"),
        "Content-Type must be application/problem+json (got {content_type})"
    );

    // Retry-After belongs to 503 and nothing else.
    match expected_status {
        503 => {
            let retry_after = headers.get("Retry-After");
            assert!(
                retry_after.is_some(),
                "503 responses must have Retry-After header per RFC 7231"
            );
            assert!(
                !retry_after.unwrap().to_str().unwrap().is_empty(),
                "Retry-After should not be empty"
            );
        }
        _ => {
            assert!(
                headers.get("Retry-After").is_none(),
                "{expected_status} responses must not have Retry-After header"
            );
        }
    }

    let body = test::read_body(resp).await;
    let body_str = std::str::from_utf8(&body).expect("Response body should be valid UTF-8");

    let problem_details: Value = serde_json::from_str(body_str).unwrap_or_else(|_| {
        panic!("Failed to parse error body as ProblemDetails. Raw body: {body_str}")
    });

    for key in ["type", "title", "status", "detail", "code", "trace_id"] {
        assert!(
            problem_details.get(key).is_some(),
            "ProblemDetails body should contain '{key}'. Raw body: {body_str}"
        );
    }

    assert_eq!(problem_details["status"], expected_status);
    assert_eq!(problem_details["code"], expected_code);

    let type_url = problem_details["type"]
        .as_str()
        .expect("type field should be a string");
    assert!(
        type_url.starts_with("https://potluck.app/errors/"),
        "type should be a potluck error URL (got {type_url})"
    );

    let detail = problem_details["detail"]
        .as_str()
        .expect("detail field should be a string");
    assert!(
        detail.contains(expected_detail),
        "Expected detail to contain '{expected_detail}', got '{detail}'"
    );

    assert_trace_id_matches(&problem_details, trace_id);
}
