//! JSON message bodies shared by the API and its clients.

use serde::{Deserialize, Serialize};

use crate::validate::FieldError;

/// `{"message": "..."}`, optionally with per-field errors.
///
/// Used for delete confirmations and for every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
  pub message: String,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub errors:  Vec<FieldError>,
}

impl MessageBody {
  pub fn new(message: impl Into<String>) -> Self {
    Self { message: message.into(), errors: Vec::new() }
  }

  pub fn with_errors(message: impl Into<String>, errors: Vec<FieldError>) -> Self {
    Self { message: message.into(), errors }
  }

  /// A single line suitable for a status bar: the field messages when present,
  /// otherwise the top-level message.
  pub fn summary(&self) -> String {
    if self.errors.is_empty() {
      self.message.clone()
    } else {
      self
        .errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
    }
  }
}
