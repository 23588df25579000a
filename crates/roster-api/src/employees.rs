//! Handlers for `/employees` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/employees` | All records, insertion order |
//! | `POST`   | `/employees` | Body: record fields; returns 201 + stored record |
//! | `PUT`    | `/employees/:id` | Body: full record fields; 404 if not found |
//! | `DELETE` | `/employees/:id` | Returns `{"message":"Employee deleted"}` |
//!
//! Identifiers that are not valid UUIDs cannot name a record and get a 404.

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use roster_core::{
  employee::{Employee, EmployeeInput},
  response::MessageBody,
  service::EmployeeService,
  store::EmployeeStore,
};
use uuid::Uuid;

use crate::error::ApiError;

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
  Uuid::parse_str(raw).map_err(|_| ApiError::employee_not_found())
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /employees`
pub async fn list<S>(
  State(service): State<EmployeeService<S>>,
) -> Result<Json<Vec<Employee>>, ApiError>
where
  S: EmployeeStore + 'static,
{
  Ok(Json(service.list().await?))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /employees`: returns 201 + the stored [`Employee`].
pub async fn create<S>(
  State(service): State<EmployeeService<S>>,
  body: Result<Json<EmployeeInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: EmployeeStore + 'static,
{
  let Json(input) = body?;
  let employee = service.create(&input).await?;
  tracing::info!(id = %employee.id, "created employee");
  Ok((StatusCode::CREATED, Json(employee)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /employees/:id`. The body replaces every field of the record.
pub async fn update<S>(
  State(service): State<EmployeeService<S>>,
  Path(id): Path<String>,
  body: Result<Json<EmployeeInput>, JsonRejection>,
) -> Result<Json<Employee>, ApiError>
where
  S: EmployeeStore + 'static,
{
  let id = parse_id(&id)?;
  let Json(input) = body?;
  let employee = service.update(id, &input).await?;
  tracing::info!(%id, "updated employee");
  Ok(Json(employee))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /employees/:id`
pub async fn delete<S>(
  State(service): State<EmployeeService<S>>,
  Path(id): Path<String>,
) -> Result<Json<MessageBody>, ApiError>
where
  S: EmployeeStore + 'static,
{
  let id = parse_id(&id)?;
  service.delete(id).await?;
  tracing::info!(%id, "deleted employee");
  Ok(Json(MessageBody::new("Employee deleted")))
}
