//! [`EmployeeService`]: the four record operations over any [`EmployeeStore`].
//!
//! Every operation validates before it writes, so a rejected request leaves
//! the collection untouched. Store failures are never passed through raw; they
//! come back as one of the [`ServiceError`] kinds.

use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::{
  employee::{Employee, EmployeeFields, EmployeeInput},
  store::{EmployeeStore, StoreError},
  validate::{ValidationErrors, validate},
};

#[derive(Debug, Error)]
pub enum ServiceError<E: StoreError> {
  /// One or more fields failed validation, including duplicate emails.
  #[error(transparent)]
  Validation(#[from] ValidationErrors),

  #[error("employee not found: {0}")]
  NotFound(Uuid),

  #[error("storage error: {0}")]
  Storage(#[source] E),
}

impl<E: StoreError> ServiceError<E> {
  /// Translate a store failure, folding a uniqueness violation into
  /// [`ServiceError::Validation`].
  fn from_store(err: E) -> Self {
    if err.is_duplicate_email() {
      Self::Validation(ValidationErrors::duplicate_email())
    } else {
      Self::Storage(err)
    }
  }
}

/// The record service. Cloning is cheap; the store is shared.
pub struct EmployeeService<S> {
  store: Arc<S>,
}

impl<S> Clone for EmployeeService<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: EmployeeStore> EmployeeService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  pub fn store(&self) -> &Arc<S> { &self.store }

  /// All records, in storage order.
  pub async fn list(&self) -> Result<Vec<Employee>, ServiceError<S::Error>> {
    self.store.list().await.map_err(ServiceError::from_store)
  }

  /// Validate `input` and persist it as a new record.
  pub async fn create(
    &self,
    input: &EmployeeInput,
  ) -> Result<Employee, ServiceError<S::Error>> {
    let fields = validate(input)?;
    self.ensure_email_free(&fields, None).await?;
    self
      .store
      .insert(fields)
      .await
      .map_err(ServiceError::from_store)
  }

  /// Replace the fields of record `id` with `input`.
  ///
  /// The record must exist, and `input` must be valid as a whole; nothing is
  /// written otherwise.
  pub async fn update(
    &self,
    id: Uuid,
    input: &EmployeeInput,
  ) -> Result<Employee, ServiceError<S::Error>> {
    self
      .store
      .get(id)
      .await
      .map_err(ServiceError::from_store)?
      .ok_or(ServiceError::NotFound(id))?;

    let fields = validate(input)?;
    self.ensure_email_free(&fields, Some(id)).await?;

    // The record can vanish between the lookup and the write.
    self
      .store
      .replace(id, fields)
      .await
      .map_err(ServiceError::from_store)?
      .ok_or(ServiceError::NotFound(id))
  }

  /// Remove record `id`.
  pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError<S::Error>> {
    if self
      .store
      .remove(id)
      .await
      .map_err(ServiceError::from_store)?
    {
      Ok(())
    } else {
      Err(ServiceError::NotFound(id))
    }
  }

  async fn ensure_email_free(
    &self,
    fields: &EmployeeFields,
    except: Option<Uuid>,
  ) -> Result<(), ServiceError<S::Error>> {
    let taken = self
      .store
      .email_taken(&fields.email, except)
      .await
      .map_err(ServiceError::from_store)?;
    if taken {
      Err(ValidationErrors::duplicate_email().into())
    } else {
      Ok(())
    }
  }
}
