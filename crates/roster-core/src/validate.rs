//! Field-level validation of employee payloads.
//!
//! [`validate`] is the single authority for what may be stored. It runs before
//! any write and reports every violated field together. The shape helpers
//! ([`is_email_shape`], [`parse_date`]) are public so the client form can
//! apply the same basic checks locally.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::employee::{EmployeeFields, EmployeeInput, Field, Gender, MaritalStatus};

// ─── Errors ──────────────────────────────────────────────────────────────────

/// A single violated field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
  pub field:   Field,
  pub message: String,
}

impl FieldError {
  pub fn new(field: Field, message: impl Into<String>) -> Self {
    Self { field, message: message.into() }
  }

  pub fn required(field: Field) -> Self {
    Self::new(field, format!("{} is required", field.label()))
  }

  pub fn duplicate_email() -> Self {
    Self::new(Field::Email, "Email is already in use")
  }
}

/// One or more violated fields, in form order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed: {}", join_messages(.0))]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
  pub fn duplicate_email() -> Self { Self(vec![FieldError::duplicate_email()]) }

  pub fn fields(&self) -> &[FieldError] { &self.0 }

  pub fn into_fields(self) -> Vec<FieldError> { self.0 }

  /// The message recorded for `field`, if it failed.
  pub fn message_for(&self, field: Field) -> Option<&str> {
    self
      .0
      .iter()
      .find(|e| e.field == field)
      .map(|e| e.message.as_str())
  }
}

fn join_messages(errors: &[FieldError]) -> String {
  errors
    .iter()
    .map(|e| e.message.as_str())
    .collect::<Vec<_>>()
    .join("; ")
}

// ─── Shape checks ────────────────────────────────────────────────────────────

/// The trimmed value, or `None` when absent or blank.
pub fn present(value: Option<&str>) -> Option<&str> {
  value.map(str::trim).filter(|v| !v.is_empty())
}

/// `local@domain.tld`.
///
/// The address must pass `validator`'s email check. On top of that, the local
/// part may not start, end, or double up on a dot, and the domain must end in
/// a top-level label of two or more letters or an IDNA `xn--` label.
pub fn is_email_shape(email: &str) -> bool {
  if !validator::validate_email(email) {
    return false;
  }
  let Some((local, domain)) = email.rsplit_once('@') else {
    return false;
  };
  if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
    return false;
  }
  domain.rsplit_once('.').is_some_and(|(_, tld)| {
    tld.len() >= 2 && (tld.chars().all(|c| c.is_ascii_alphabetic()) || tld.starts_with("xn--"))
  })
}

/// Parse `YYYY-MM-DD`, or an RFC 3339 timestamp, which is kept as its UTC date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
  let value = value.trim();
  NaiveDate::parse_from_str(value, "%Y-%m-%d")
    .ok()
    .or_else(|| {
      DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).date_naive())
    })
}

/// Exactly ten ASCII decimal digits.
pub fn is_contact_number(value: &str) -> bool {
  value.len() == 10 && value.bytes().all(|b| b.is_ascii_digit())
}

// ─── Validation ──────────────────────────────────────────────────────────────

/// Check every field of `input` and build the storable field set.
///
/// Never short-circuits: all violations are collected and returned together.
/// Email uniqueness is not checked here; it needs the store.
pub fn validate(input: &EmployeeInput) -> Result<EmployeeFields, ValidationErrors> {
  let mut errors = Vec::new();

  let name = text(input, Field::Name, &mut errors);
  let address = text(input, Field::Address, &mut errors);

  let email = text(input, Field::Email, &mut errors).and_then(|e| {
    if is_email_shape(&e) {
      Some(e)
    } else {
      errors.push(FieldError::new(Field::Email, "Invalid email address"));
      None
    }
  });

  let dob = date(input, Field::Dob, &mut errors);

  let gender = text(input, Field::Gender, &mut errors).and_then(|g| {
    Gender::parse(&g)
      .map_err(|_| errors.push(one_of(Field::Gender)))
      .ok()
  });

  let date_of_joining = date(input, Field::DateOfJoining, &mut errors);

  let marital_status =
    text(input, Field::MaritalStatus, &mut errors).and_then(|m| {
      MaritalStatus::parse(&m)
        .map_err(|_| errors.push(one_of(Field::MaritalStatus)))
        .ok()
    });

  let contact_no = text(input, Field::ContactNo, &mut errors).and_then(|c| {
    if is_contact_number(&c) {
      Some(c)
    } else {
      errors.push(FieldError::new(
        Field::ContactNo,
        "Contact Number must be exactly 10 digits",
      ));
      None
    }
  });

  match (
    name,
    address,
    email,
    dob,
    gender,
    date_of_joining,
    marital_status,
    contact_no,
  ) {
    (
      Some(name),
      Some(address),
      Some(email),
      Some(dob),
      Some(gender),
      Some(date_of_joining),
      Some(marital_status),
      Some(contact_no),
    ) if errors.is_empty() => Ok(EmployeeFields {
      name,
      address,
      email,
      dob,
      gender,
      date_of_joining,
      marital_status,
      contact_no,
    }),
    _ => Err(ValidationErrors(errors)),
  }
}

fn text(
  input: &EmployeeInput,
  field: Field,
  errors: &mut Vec<FieldError>,
) -> Option<String> {
  match present(input.get(field)) {
    Some(v) => Some(v.to_owned()),
    None => {
      errors.push(FieldError::required(field));
      None
    }
  }
}

fn date(
  input: &EmployeeInput,
  field: Field,
  errors: &mut Vec<FieldError>,
) -> Option<NaiveDate> {
  let raw = text(input, field, errors)?;
  let parsed = parse_date(&raw);
  if parsed.is_none() {
    errors.push(FieldError::new(
      field,
      format!("{} must be a valid date", field.label()),
    ));
  }
  parsed
}

fn one_of(field: Field) -> FieldError {
  let options = field.options().unwrap_or_default().join(", ");
  FieldError::new(field, format!("{} must be one of: {options}", field.label()))
}
