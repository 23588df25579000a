//! Async HTTP client wrapping the Roster JSON API.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, Response, StatusCode};
use roster_core::{
  employee::{Employee, EmployeeInput},
  response::MessageBody,
};
use thiserror::Error;
use uuid::Uuid;

/// Connection settings for the Roster API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// A non-success response from the server.
#[derive(Debug, Error)]
pub enum Rejection {
  /// The body was a [`MessageBody`]; `message` is its summary.
  #[error("{message}")]
  Message { status: StatusCode, message: String },

  #[error("server responded {status}")]
  Status { status: StatusCode },
}

impl Rejection {
  pub fn status(&self) -> StatusCode {
    match self {
      Self::Message { status, .. } | Self::Status { status } => *status,
    }
  }

  /// The server's own explanation, when it sent one.
  pub fn server_message(&self) -> Option<&str> {
    match self {
      Self::Message { message, .. } => Some(message.as_str()),
      Self::Status { .. } => None,
    }
  }
}

/// Async HTTP client for the Roster JSON REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  // ── Employees ─────────────────────────────────────────────────────────────

  /// `GET /api/employees`
  pub async fn list_employees(&self) -> Result<Vec<Employee>> {
    let resp = self
      .client
      .get(self.url("/employees"))
      .send()
      .await
      .context("GET /employees failed")?;

    checked(resp)
      .await?
      .json()
      .await
      .context("deserialising employees")
  }

  /// `POST /api/employees`
  pub async fn create_employee(&self, input: &EmployeeInput) -> Result<Employee> {
    let resp = self
      .client
      .post(self.url("/employees"))
      .json(input)
      .send()
      .await
      .context("POST /employees failed")?;

    checked(resp)
      .await?
      .json()
      .await
      .context("deserialising created employee")
  }

  /// `PUT /api/employees/{id}`
  pub async fn update_employee(&self, id: Uuid, input: &EmployeeInput) -> Result<Employee> {
    let resp = self
      .client
      .put(self.url(&format!("/employees/{id}")))
      .json(input)
      .send()
      .await
      .with_context(|| format!("PUT /employees/{id} failed"))?;

    checked(resp)
      .await?
      .json()
      .await
      .context("deserialising updated employee")
  }

  /// `DELETE /api/employees/{id}`
  pub async fn delete_employee(&self, id: Uuid) -> Result<MessageBody> {
    let resp = self
      .client
      .delete(self.url(&format!("/employees/{id}")))
      .send()
      .await
      .with_context(|| format!("DELETE /employees/{id} failed"))?;

    checked(resp)
      .await?
      .json()
      .await
      .context("deserialising delete confirmation")
  }
}

/// Pass successful responses through; turn the rest into a [`Rejection`].
async fn checked(resp: Response) -> Result<Response> {
  let status = resp.status();
  if status.is_success() {
    return Ok(resp);
  }
  let text = resp.text().await.unwrap_or_default();
  let rejection = match serde_json::from_str::<MessageBody>(&text) {
    Ok(body) => Rejection::Message { status, message: body.summary() },
    Err(_) => Rejection::Status { status },
  };
  tracing::debug!(%status, error = %rejection, "request rejected");
  Err(rejection.into())
}
