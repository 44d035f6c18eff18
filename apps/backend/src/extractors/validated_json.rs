use std::ops::{Deref, DerefMut};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use bytes::BytesMut;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use serde_json::Error as JsonError;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::trace_ctx;

/// JSON body extractor speaking the problem+json error contract.
///
/// actix's own `web::Json` rejects bad bodies with a plain-text 400; routes
/// here return structured problems everywhere, so body parsing has to as
/// well. Parse failures become 400 `BAD_REQUEST` with a detail naming the
/// failure category but never echoing body content.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for ValidatedJson<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let mut payload = payload.take();

        // Copy out what the future needs; it may not borrow `req`.
        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|ct| ct.to_str().ok())
            .unwrap_or_default()
            .to_string();

        Box::pin(async move {
            let trace_id = trace_ctx::trace_id();

            let mut body = BytesMut::new();
            while let Some(chunk) = payload.next().await {
                match chunk {
                    Ok(bytes) => body.extend_from_slice(&bytes),
                    Err(err) => {
                        warn!(trace_id = %trace_id, error = %err, "body read failed");
                        return Err(AppError::bad_request(
                            ErrorCode::BadRequest,
                            "Failed to read request body",
                        ));
                    }
                }
            }

            match serde_json::from_slice::<T>(&body) {
                Ok(value) => Ok(ValidatedJson(value)),
                Err(err) => {
                    debug!(
                        trace_id = %trace_id,
                        content_type = %content_type,
                        body_size = body.len(),
                        "json body rejected"
                    );
                    Err(AppError::bad_request(ErrorCode::BadRequest, detail_for(&err)))
                }
            }
        })
    }
}

/// Category and position only; the raw serde message can echo payload
/// fragments.
fn detail_for(error: &JsonError) -> String {
    match error.classify() {
        Category::Syntax => format!(
            "Invalid JSON: syntax error at line {}, column {}",
            error.line(),
            error.column()
        ),
        Category::Eof => "Invalid JSON: body ended early".to_string(),
        Category::Data => "Invalid JSON: wrong types in one or more fields".to_string(),
        Category::Io => "Invalid JSON: could not read body".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;
    use actix_web::FromRequest;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct DepositBody {
        player_id: i64,
        wallet_reference: String,
    }

    #[tokio::test]
    async fn parses_well_formed_body() {
        let (req, mut payload) = TestRequest::post()
            .insert_header(("content-type", "application/json"))
            .set_payload(r#"{"player_id": 7, "wallet_reference": "tx-1"}"#)
            .to_http_parts();

        let parsed = ValidatedJson::<DepositBody>::from_request(&req, &mut payload)
            .await
            .unwrap()
            .into_inner();

        assert_eq!(
            parsed,
            DepositBody {
                player_id: 7,
                wallet_reference: "tx-1".to_string()
            }
        );
    }

    #[tokio::test]
    async fn rejects_syntax_error_as_bad_request() {
        let (req, mut payload) = TestRequest::post()
            .insert_header(("content-type", "application/json"))
            .set_payload(r#"{"player_id": 7,"#)
            .to_http_parts();

        let err = ValidatedJson::<DepositBody>::from_request(&req, &mut payload)
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::BadRequest);
    }

    #[tokio::test]
    async fn rejects_wrong_field_type() {
        let (req, mut payload) = TestRequest::post()
            .insert_header(("content-type", "application/json"))
            .set_payload(r#"{"player_id": "seven", "wallet_reference": "tx-1"}"#)
            .to_http_parts();

        let err = ValidatedJson::<DepositBody>::from_request(&req, &mut payload)
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::BadRequest);
        assert!(err.to_string().contains("wrong types"));
    }

    #[test]
    fn eof_detail_names_the_category() {
        let err = serde_json::from_str::<DepositBody>("").unwrap_err();
        assert_eq!(detail_for(&err), "Invalid JSON: body ended early");
    }
}
