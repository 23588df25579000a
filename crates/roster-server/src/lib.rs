//! HTTP server composition for Roster.
//!
//! Mounts the JSON API under `/api` with request tracing and permissive CORS
//! (the browser client is served from a different origin), and loads the
//! runtime [`ServerConfig`].

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use roster_core::store::EmployeeStore;
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `ROSTER_*` environment variables.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
}

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 5000 }

fn default_store_path() -> PathBuf { PathBuf::from("roster.db") }

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       default_host(),
      port:       default_port(),
      store_path: default_store_path(),
    }
  }
}

impl ServerConfig {
  /// Layer the optional TOML file at `path` under `ROSTER_*` environment
  /// variables. Missing keys fall back to the defaults.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("ROSTER"))
      .build()?
      .try_deserialize()
  }

  /// `host:port`, ready for binding.
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router for `store`.
pub fn router<S>(store: Arc<S>) -> Router
where
  S: EmployeeStore + 'static,
{
  Router::new()
    .nest("/api", roster_api::api_router(store))
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use roster_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  async fn app() -> Router {
    router(Arc::new(SqliteStore::open_in_memory().await.unwrap()))
  }

  #[tokio::test]
  async fn api_is_mounted_under_api_prefix() {
    let app = app().await;

    let req = Request::builder()
      .uri("/api/employees")
      .body(Body::empty())
      .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"[]");

    let req = Request::builder()
      .uri("/employees")
      .body(Body::empty())
      .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn example_record_roundtrips_through_full_stack() {
    let app = app().await;
    let body = serde_json::json!({
      "name": "Ann Lee",
      "address": "1 Main St",
      "email": "ann@x.com",
      "dob": "1990-01-01",
      "gender": "Female",
      "dateOfJoining": "2020-06-01",
      "maritalStatus": "Single",
      "contactNo": "5551234567"
    });

    let req = Request::builder()
      .method("POST")
      .uri("/api/employees")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(body.to_string()))
      .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let created: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let id = created["id"].as_str().unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok());

    let req = Request::builder()
      .uri("/api/employees")
      .body(Body::empty())
      .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let all: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    let mut expected = body;
    expected["id"] = serde_json::Value::String(id.to_owned());
    assert_eq!(all, serde_json::json!([expected]));
  }

  #[tokio::test]
  async fn cors_preflight_is_answered() {
    let app = app().await;
    let req = Request::builder()
      .method("OPTIONS")
      .uri("/api/employees")
      .header(header::ORIGIN, "http://localhost:3000")
      .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
      .body(Body::empty())
      .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert!(resp.status().is_success());
    assert!(resp.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
  }

  #[test]
  fn config_defaults_when_file_is_missing() {
    let missing = std::env::temp_dir().join(format!("roster-{}.toml", uuid::Uuid::new_v4()));
    let cfg = ServerConfig::load(&missing).unwrap();
    assert_eq!(cfg.host, ServerConfig::default().host);
    assert_eq!(cfg.store_path, ServerConfig::default().store_path);
  }

  #[test]
  fn config_file_overrides_defaults() {
    let path = std::env::temp_dir().join(format!("roster-{}.toml", uuid::Uuid::new_v4()));
    std::fs::write(&path, "host = \"0.0.0.0\"\nstore_path = \"/var/lib/roster/roster.db\"\n").unwrap();

    let cfg = ServerConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(cfg.host, "0.0.0.0");
    assert_eq!(cfg.store_path, PathBuf::from("/var/lib/roster/roster.db"));
    assert_eq!(cfg.address(), format!("0.0.0.0:{}", cfg.port));
  }

  #[test]
  fn tilde_expands_to_home() {
    let plain = Path::new("/data/roster.db");
    assert_eq!(expand_tilde(plain), plain.to_path_buf());
    if let Ok(home) = std::env::var("HOME") {
      assert_eq!(
        expand_tilde(Path::new("~/roster.db")),
        PathBuf::from(home).join("roster.db")
      );
    }
  }
}
