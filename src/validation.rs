use axum::{
    async_trait,
    body::{Bytes, HttpBody},
    extract::{
        rejection::{BytesRejection, JsonRejection},
        FromRequest,
    },
    http::{header::CONTENT_TYPE, Request, StatusCode},
    response::{IntoResponse, Response},
    BoxError, Json,
};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// JSON body extractor that rejects with [`ValidationError`], so handlers only
/// ever see well-formed payloads.
///
/// A body sent without any `Content-Type` header is still parsed as JSON. A
/// header naming some other media type is rejected.
#[derive(Debug)]
pub struct WebhookJson<T>(pub T);

#[async_trait]
impl<T, S, B> FromRequest<S, B> for WebhookJson<T>
where
    T: DeserializeOwned,
    B: HttpBody + Send + 'static,
    B::Data: Send,
    B::Error: Into<BoxError>,
    S: Send + Sync,
{
    type Rejection = ValidationError;

    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        if req.headers().contains_key(CONTENT_TYPE) {
            let Json(value) = Json::<T>::from_request(req, state).await?;
            return Ok(Self(value));
        }

        let bytes = Bytes::from_request(req, state).await?;
        let value = serde_json::from_slice(&bytes)?;
        Ok(Self(value))
    }
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{0}")]
    NotJsonContentType(String),
    #[error("{0}")]
    Syntax(String),
    #[error("{0}")]
    Data(String),
    #[error("{0}")]
    Body(String),
}

#[derive(Debug, Serialize)]
struct ValidationErrorBody {
    error: &'static str,
    detail: String,
}

impl From<JsonRejection> for ValidationError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => Self::Data(err.body_text()),
            JsonRejection::JsonSyntaxError(err) => Self::Syntax(err.body_text()),
            JsonRejection::MissingJsonContentType(err) => {
                Self::NotJsonContentType(err.body_text())
            }
            JsonRejection::BytesRejection(err) => Self::Body(err.body_text()),
            other => Self::Body(other.body_text()),
        }
    }
}

impl From<BytesRejection> for ValidationError {
    fn from(rejection: BytesRejection) -> Self {
        Self::Body(rejection.body_text())
    }
}

// Same wording as axum's own JSON rejections.
impl From<serde_json::Error> for ValidationError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() {
            Self::Data(format!(
                "Failed to deserialize the JSON body into the target type: {err}"
            ))
        } else {
            Self::Syntax(format!("Failed to parse the request body as JSON: {err}"))
        }
    }
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        tracing::debug!("Rejected webhook request: {}", self);

        let body = ValidationErrorBody {
            error: "validation_error",
            detail: self.to_string(),
        };
        (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
    }
}
