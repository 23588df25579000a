//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use roster_core::{
  response::MessageBody,
  service::ServiceError,
  store::StoreError,
  validate::ValidationErrors,
};
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error(transparent)]
  Validation(#[from] ValidationErrors),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn employee_not_found() -> Self { Self::NotFound("Employee not found".to_owned()) }
}

impl<E: StoreError> From<ServiceError<E>> for ApiError {
  fn from(err: ServiceError<E>) -> Self {
    match err {
      ServiceError::Validation(v) => Self::Validation(v),
      ServiceError::NotFound(_) => Self::employee_not_found(),
      ServiceError::Storage(e) => Self::Store(Box::new(e)),
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self { Self::BadRequest(rejection.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, body) = match self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, MessageBody::new(m)),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, MessageBody::new(m)),
      ApiError::Validation(v) => (
        StatusCode::BAD_REQUEST,
        MessageBody::with_errors("Validation failed", v.into_fields()),
      ),
      // The cause stays in the log; clients only learn that it failed.
      ApiError::Store(e) => {
        tracing::error!(error = %e, "storage failure");
        (StatusCode::INTERNAL_SERVER_ERROR, MessageBody::new("Server Error"))
      }
    };
    (status, Json(body)).into_response()
  }
}
