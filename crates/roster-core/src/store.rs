//! The `EmployeeStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `roster-store-sqlite`).
//! Higher layers (`roster-api`, `roster-server`) depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::employee::{Employee, EmployeeFields};

/// Errors raised by a store backend.
///
/// A backend that enforces email uniqueness itself (e.g. with a UNIQUE index)
/// reports a violation through [`StoreError::is_duplicate_email`] so callers
/// can surface it as a validation failure rather than a server error.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  fn is_duplicate_email(&self) -> bool;
}

/// Abstraction over the employee collection.
///
/// Each method addresses a single record (except [`EmployeeStore::list`]) and
/// is atomic on its own. No cross-record transactions are offered.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait EmployeeStore: Send + Sync {
  type Error: StoreError;

  /// All records in insertion order.
  fn list(&self) -> impl Future<Output = Result<Vec<Employee>, Self::Error>> + Send + '_;

  /// Retrieve a record by id. Returns `None` if not found.
  fn get(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Employee>, Self::Error>> + Send + '_;

  /// Persist a new record under a freshly assigned id.
  fn insert(
    &self,
    fields: EmployeeFields,
  ) -> impl Future<Output = Result<Employee, Self::Error>> + Send + '_;

  /// Overwrite every field of an existing record, keeping its id.
  /// Returns `None` if no record has that id.
  fn replace(
    &self,
    id: Uuid,
    fields: EmployeeFields,
  ) -> impl Future<Output = Result<Option<Employee>, Self::Error>> + Send + '_;

  /// Delete a record. Returns `false` if no record has that id.
  fn remove(&self, id: Uuid) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Whether any record other than `except` uses `email` (case-insensitive).
  fn email_taken<'a>(
    &'a self,
    email: &'a str,
    except: Option<Uuid>,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;
}
