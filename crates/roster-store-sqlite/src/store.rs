//! [`SqliteStore`] — the SQLite implementation of [`EmployeeStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use roster_core::{
  employee::{Employee, EmployeeFields, email_key},
  store::EmployeeStore,
};

use crate::{
  Error, Result,
  encode::{EMPLOYEE_COLUMNS, EncodedFields, RawEmployee, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Roster employee store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Close the underlying connection, flushing any pending work.
  ///
  /// Other clones of this store fail with a database error afterwards.
  pub async fn close(self) -> Result<()> {
    self.conn.close().await?;
    Ok(())
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn fetch(&self, id: Uuid) -> Result<Option<Employee>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawEmployee> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE employee_id = ?1"),
            rusqlite::params![id_str],
            RawEmployee::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawEmployee::into_employee).transpose()
  }
}

/// Whether `err` is the UNIQUE index on `email_key` rejecting a write.
fn is_duplicate_email(err: &rusqlite::Error) -> bool {
  matches!(
    err,
    rusqlite::Error::SqliteFailure(e, Some(msg))
      if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        && msg.contains("email_key")
  )
}

/// Outcome of a write that may trip the email uniqueness index.
enum Write<T> {
  Done(T),
  DuplicateEmail,
}

// ─── EmployeeStore impl ──────────────────────────────────────────────────────

impl EmployeeStore for SqliteStore {
  type Error = Error;

  async fn list(&self) -> Result<Vec<Employee>> {
    let raws: Vec<RawEmployee> = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare(&format!("SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY seq"))?;
        let rows = stmt
          .query_map([], RawEmployee::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEmployee::into_employee).collect()
  }

  async fn get(&self, id: Uuid) -> Result<Option<Employee>> { self.fetch(id).await }

  async fn insert(&self, fields: EmployeeFields) -> Result<Employee> {
    let employee = Employee { id: Uuid::new_v4(), fields };

    let id_str = encode_uuid(employee.id);
    let enc = EncodedFields::new(&employee.fields);
    let email = employee.fields.email.clone();

    let outcome = self
      .conn
      .call(move |conn| {
        let res = conn.execute(
          "INSERT INTO employees (
             employee_id, name, address, email, email_key,
             dob, gender, date_of_joining, marital_status, contact_no
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          rusqlite::params![
            id_str,
            enc.name,
            enc.address,
            enc.email,
            enc.email_key,
            enc.dob,
            enc.gender,
            enc.date_of_joining,
            enc.marital_status,
            enc.contact_no,
          ],
        );
        match res {
          Ok(_) => Ok(Write::Done(())),
          Err(e) if is_duplicate_email(&e) => Ok(Write::DuplicateEmail),
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    match outcome {
      Write::Done(()) => {
        tracing::debug!(id = %employee.id, "inserted employee");
        Ok(employee)
      }
      Write::DuplicateEmail => Err(Error::DuplicateEmail(email)),
    }
  }

  async fn replace(&self, id: Uuid, fields: EmployeeFields) -> Result<Option<Employee>> {
    let id_str = encode_uuid(id);
    let enc = EncodedFields::new(&fields);
    let email = fields.email.clone();

    let outcome = self
      .conn
      .call(move |conn| {
        let res = conn.execute(
          "UPDATE employees SET
             name = ?2, address = ?3, email = ?4, email_key = ?5,
             dob = ?6, gender = ?7, date_of_joining = ?8,
             marital_status = ?9, contact_no = ?10
           WHERE employee_id = ?1",
          rusqlite::params![
            id_str,
            enc.name,
            enc.address,
            enc.email,
            enc.email_key,
            enc.dob,
            enc.gender,
            enc.date_of_joining,
            enc.marital_status,
            enc.contact_no,
          ],
        );
        match res {
          Ok(changed) => Ok(Write::Done(changed)),
          Err(e) if is_duplicate_email(&e) => Ok(Write::DuplicateEmail),
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    match outcome {
      Write::Done(0) => Ok(None),
      Write::Done(_) => {
        tracing::debug!(%id, "replaced employee");
        Ok(Some(Employee { id, fields }))
      }
      Write::DuplicateEmail => Err(Error::DuplicateEmail(email)),
    }
  }

  async fn remove(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM employees WHERE employee_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(changed > 0)
  }

  async fn email_taken(&self, email: &str, except: Option<Uuid>) -> Result<bool> {
    let key = email_key(email);
    let except_str = except.map(encode_uuid);

    let taken = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT 1 FROM employees
             WHERE email_key = ?1 AND (?2 IS NULL OR employee_id <> ?2)",
            rusqlite::params![key, except_str],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false))
      })
      .await?;

    Ok(taken)
  }
}
