//! JSON REST API for Roster.
//!
//! Exposes an axum [`Router`] backed by any [`roster_core::store::EmployeeStore`].
//! TLS, CORS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", roster_api::api_router(store.clone()))
//! ```

pub mod employees;
pub mod error;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, put},
};
use roster_core::{service::EmployeeService, store::EmployeeStore};

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: EmployeeStore + 'static,
{
  Router::new()
    .route("/employees", get(employees::list::<S>).post(employees::create::<S>))
    .route(
      "/employees/{id}",
      put(employees::update::<S>).delete(employees::delete::<S>),
    )
    .with_state(EmployeeService::new(store))
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
  };
  use roster_core::{employee::Employee, response::MessageBody};
  use roster_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;
  use uuid::Uuid;

  async fn app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    api_router(Arc::new(store))
  }

  async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
  }

  async fn json<T: serde::de::DeserializeOwned>(resp: Response) -> T {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  fn ann() -> Value {
    json!({
      "name": "Ann Lee",
      "address": "1 Main St",
      "email": "ann@x.com",
      "dob": "1990-01-01",
      "gender": "Female",
      "dateOfJoining": "2020-06-01",
      "maritalStatus": "Single",
      "contactNo": "5551234567"
    })
  }

  fn with(mut v: Value, key: &str, value: Value) -> Value {
    v[key] = value;
    v
  }

  async fn list(app: &Router) -> Vec<Employee> {
    let resp = send(app, "GET", "/employees", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    json(resp).await
  }

  // ── List ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn empty_list() {
    let app = app().await;
    assert!(list(&app).await.is_empty());
  }

  // ── Create ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_returns_201_and_list_shows_record() {
    let app = app().await;
    let resp = send(&app, "POST", "/employees", Some(ann())).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let created: Value = json(resp).await;
    let id = created["id"].as_str().unwrap().to_owned();
    assert!(Uuid::parse_str(&id).is_ok());
    assert_eq!(with(created.clone(), "id", Value::Null), with(ann(), "id", Value::Null));

    let all = list(&app).await;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id.to_string(), id);
    assert_eq!(all[0].fields.name, "Ann Lee");
    assert_eq!(all[0].fields.contact_no, "5551234567");
  }

  #[tokio::test]
  async fn client_supplied_id_is_ignored() {
    let app = app().await;
    let fixed = Uuid::new_v4().to_string();
    let resp = send(&app, "POST", "/employees", Some(with(ann(), "id", json!(fixed)))).await;
    let created: Employee = json(resp).await;
    assert_ne!(created.id.to_string(), fixed);
  }

  #[tokio::test]
  async fn timestamp_dates_are_stored_as_dates() {
    let app = app().await;
    let body = with(ann(), "dob", json!("1990-01-01T00:00:00.000Z"));
    let resp = send(&app, "POST", "/employees", Some(body)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = json(resp).await;
    assert_eq!(created["dob"], "1990-01-01");
  }

  #[tokio::test]
  async fn invalid_create_returns_field_errors_and_stores_nothing() {
    let app = app().await;
    let body = with(
      with(ann(), "email", json!("not-an-email")),
      "contactNo",
      json!("555"),
    );
    let resp = send(&app, "POST", "/employees", Some(body)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let err: MessageBody = json(resp).await;
    assert_eq!(err.message, "Validation failed");
    let messages: Vec<&str> = err.errors.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(
      messages,
      ["Invalid email address", "Contact Number must be exactly 10 digits"]
    );
    assert!(list(&app).await.is_empty());
  }

  #[tokio::test]
  async fn invalid_enumerations_are_rejected() {
    let app = app().await;
    for (key, value) in [("gender", "Other"), ("maritalStatus", "Engaged")] {
      let resp = send(&app, "POST", "/employees", Some(with(ann(), key, json!(value)))).await;
      assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{key}={value}");
    }
    assert!(list(&app).await.is_empty());
  }

  #[tokio::test]
  async fn missing_fields_are_reported_by_key() {
    let app = app().await;
    let resp = send(&app, "POST", "/employees", Some(json!({ "name": "Ann" }))).await;
    let err: Value = json(resp).await;
    let fields: Vec<&str> = err["errors"]
      .as_array()
      .unwrap()
      .iter()
      .map(|e| e["field"].as_str().unwrap())
      .collect();
    assert_eq!(
      fields,
      ["address", "email", "dob", "gender", "dateOfJoining", "maritalStatus", "contactNo"]
    );
  }

  #[tokio::test]
  async fn malformed_json_is_400() {
    let app = app().await;
    let req = Request::builder()
      .method("POST")
      .uri("/employees")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from("{not json"))
      .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn duplicate_email_is_rejected() {
    let app = app().await;
    send(&app, "POST", "/employees", Some(ann())).await;

    let dup = with(ann(), "email", json!("ANN@X.com"));
    let resp = send(&app, "POST", "/employees", Some(dup)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let err: MessageBody = json(resp).await;
    assert_eq!(err.summary(), "Email is already in use");
    assert_eq!(list(&app).await.len(), 1);
  }

  // ── Update ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn update_changes_exactly_one_record() {
    let app = app().await;
    let a: Employee = json(send(&app, "POST", "/employees", Some(ann())).await).await;
    let bob = with(ann(), "email", json!("bob@x.com"));
    let b: Employee = json(send(&app, "POST", "/employees", Some(bob)).await).await;

    let changed = with(ann(), "maritalStatus", json!("Married"));
    let resp = send(&app, "PUT", &format!("/employees/{}", a.id), Some(changed)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Employee = json(resp).await;
    assert_eq!(updated.id, a.id);

    let all = list(&app).await;
    assert_eq!(all, vec![updated, b]);
    assert_eq!(all[0].fields.marital_status.as_str(), "Married");
  }

  #[tokio::test]
  async fn update_missing_is_404() {
    let app = app().await;
    send(&app, "POST", "/employees", Some(ann())).await;
    let before = list(&app).await;

    let resp = send(&app, "PUT", &format!("/employees/{}", Uuid::new_v4()), Some(ann())).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let err: MessageBody = json(resp).await;
    assert_eq!(err.message, "Employee not found");
    assert_eq!(list(&app).await, before);
  }

  #[tokio::test]
  async fn update_with_non_uuid_id_is_404() {
    let app = app().await;
    let resp = send(&app, "PUT", "/employees/64a1f0c2e4b0", Some(ann())).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn invalid_update_is_400_and_not_written() {
    let app = app().await;
    let a: Employee = json(send(&app, "POST", "/employees", Some(ann())).await).await;

    let bad = with(ann(), "name", json!(""));
    let resp = send(&app, "PUT", &format!("/employees/{}", a.id), Some(bad)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(list(&app).await, vec![a]);
  }

  // ── Storage failures ────────────────────────────────────────────────────────

  #[tokio::test]
  async fn closed_store_is_500_without_details() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let app = api_router(Arc::new(store.clone()));
    store.close().await.unwrap();

    let resp = send(&app, "GET", "/employees", None).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = json(resp).await;
    assert_eq!(body, json!({ "message": "Server Error" }));

    let resp = send(&app, "POST", "/employees", Some(ann())).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = json(resp).await;
    assert_eq!(body, json!({ "message": "Server Error" }));
  }

  // ── Delete ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn delete_then_delete_again() {
    let app = app().await;
    let a: Employee = json(send(&app, "POST", "/employees", Some(ann())).await).await;
    let bob = with(ann(), "email", json!("bob@x.com"));
    let b: Employee = json(send(&app, "POST", "/employees", Some(bob)).await).await;

    let resp = send(&app, "DELETE", &format!("/employees/{}", a.id), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let msg: MessageBody = json(resp).await;
    assert_eq!(msg.message, "Employee deleted");
    assert_eq!(list(&app).await, vec![b]);

    let again = send(&app, "DELETE", &format!("/employees/{}", a.id), None).await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
  }
}
