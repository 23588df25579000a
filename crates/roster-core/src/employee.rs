//! Employee records, the single entity kept by Roster.
//!
//! [`EmployeeFields`] is the validated field set that storage accepts;
//! [`Employee`] adds the storage-assigned identifier. Raw client payloads
//! arrive as [`EmployeeInput`] and only become [`EmployeeFields`] by passing
//! through [`crate::validate::validate`].

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use strum::{Display, EnumString, IntoStaticStr, VariantNames};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Enumerations ────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  IntoStaticStr,
  VariantNames,
)]
pub enum Gender {
  Male,
  Female,
}

impl Gender {
  pub fn as_str(self) -> &'static str { self.into() }

  pub fn parse(s: &str) -> Result<Self> {
    s.parse().map_err(|_| Error::UnknownGender(s.to_owned()))
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  IntoStaticStr,
  VariantNames,
)]
pub enum MaritalStatus {
  Single,
  Married,
  Divorced,
  Widowed,
}

impl MaritalStatus {
  pub fn as_str(self) -> &'static str { self.into() }

  pub fn parse(s: &str) -> Result<Self> {
    s.parse()
      .map_err(|_| Error::UnknownMaritalStatus(s.to_owned()))
  }
}

// ─── Field names ─────────────────────────────────────────────────────────────

/// One of the eight user-editable fields of a record.
///
/// Serialises to the JSON key used on the wire, so a [`FieldError`] can point
/// a client at the exact input that failed.
///
/// [`FieldError`]: crate::validate::FieldError
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
  Name,
  Address,
  Email,
  Dob,
  Gender,
  DateOfJoining,
  MaritalStatus,
  ContactNo,
}

impl Field {
  /// All fields in form order.
  pub const ALL: [Field; 8] = [
    Field::Name,
    Field::Address,
    Field::Email,
    Field::Dob,
    Field::Gender,
    Field::DateOfJoining,
    Field::MaritalStatus,
    Field::ContactNo,
  ];

  /// The JSON key for this field.
  pub fn key(self) -> &'static str {
    match self {
      Self::Name => "name",
      Self::Address => "address",
      Self::Email => "email",
      Self::Dob => "dob",
      Self::Gender => "gender",
      Self::DateOfJoining => "dateOfJoining",
      Self::MaritalStatus => "maritalStatus",
      Self::ContactNo => "contactNo",
    }
  }

  /// Human-readable label, used in messages and form captions.
  pub fn label(self) -> &'static str {
    match self {
      Self::Name => "Name",
      Self::Address => "Address",
      Self::Email => "Email",
      Self::Dob => "Date of Birth",
      Self::Gender => "Gender",
      Self::DateOfJoining => "Date of Joining",
      Self::MaritalStatus => "Marital Status",
      Self::ContactNo => "Contact Number",
    }
  }

  /// The closed set of accepted values for enumeration fields.
  pub fn options(self) -> Option<&'static [&'static str]> {
    match self {
      Self::Gender => Some(Gender::VARIANTS),
      Self::MaritalStatus => Some(MaritalStatus::VARIANTS),
      _ => None,
    }
  }

  pub fn is_date(self) -> bool { matches!(self, Self::Dob | Self::DateOfJoining) }
}

// ─── Validated record ────────────────────────────────────────────────────────

/// A complete, validated set of employee fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeFields {
  pub name:            String,
  pub address:         String,
  /// Stored as entered; uniqueness is checked on the lowercase form.
  pub email:           String,
  pub dob:             NaiveDate,
  pub gender:          Gender,
  pub date_of_joining: NaiveDate,
  pub marital_status:  MaritalStatus,
  pub contact_no:      String,
}

impl EmployeeFields {
  /// The key under which email uniqueness is enforced.
  pub fn email_key(&self) -> String { email_key(&self.email) }
}

/// Case-folded form of an email address, used for uniqueness checks.
pub fn email_key(email: &str) -> String { email.trim().to_lowercase() }

/// A stored employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
  /// Assigned by the store on creation; never changes.
  pub id:     Uuid,
  #[serde(flatten)]
  pub fields: EmployeeFields,
}

// ─── Raw input ───────────────────────────────────────────────────────────────

/// An unvalidated create/update payload.
///
/// Every field is optional so that a single pass of validation can report all
/// missing fields at once instead of failing on the first. Numbers are
/// accepted where text is expected (e.g. a `contactNo` sent as a JSON
/// number). An `id` key in the payload is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInput {
  #[serde(default, deserialize_with = "lenient_text")]
  pub name:            Option<String>,
  #[serde(default, deserialize_with = "lenient_text")]
  pub address:         Option<String>,
  #[serde(default, deserialize_with = "lenient_text")]
  pub email:           Option<String>,
  #[serde(default, deserialize_with = "lenient_text")]
  pub dob:             Option<String>,
  #[serde(default, deserialize_with = "lenient_text")]
  pub gender:          Option<String>,
  #[serde(default, deserialize_with = "lenient_text")]
  pub date_of_joining: Option<String>,
  #[serde(default, deserialize_with = "lenient_text")]
  pub marital_status:  Option<String>,
  #[serde(default, deserialize_with = "lenient_text")]
  pub contact_no:      Option<String>,
}

impl EmployeeInput {
  /// The raw value supplied for `field`, if any.
  pub fn get(&self, field: Field) -> Option<&str> {
    match field {
      Field::Name => self.name.as_deref(),
      Field::Address => self.address.as_deref(),
      Field::Email => self.email.as_deref(),
      Field::Dob => self.dob.as_deref(),
      Field::Gender => self.gender.as_deref(),
      Field::DateOfJoining => self.date_of_joining.as_deref(),
      Field::MaritalStatus => self.marital_status.as_deref(),
      Field::ContactNo => self.contact_no.as_deref(),
    }
  }

  /// Replace the raw value for `field`.
  pub fn set(&mut self, field: Field, value: Option<String>) {
    let slot = match field {
      Field::Name => &mut self.name,
      Field::Address => &mut self.address,
      Field::Email => &mut self.email,
      Field::Dob => &mut self.dob,
      Field::Gender => &mut self.gender,
      Field::DateOfJoining => &mut self.date_of_joining,
      Field::MaritalStatus => &mut self.marital_status,
      Field::ContactNo => &mut self.contact_no,
    };
    *slot = value;
  }
}

impl From<&EmployeeFields> for EmployeeInput {
  fn from(f: &EmployeeFields) -> Self {
    Self {
      name:            Some(f.name.clone()),
      address:         Some(f.address.clone()),
      email:           Some(f.email.clone()),
      dob:             Some(f.dob.format("%Y-%m-%d").to_string()),
      gender:          Some(f.gender.as_str().to_owned()),
      date_of_joining: Some(f.date_of_joining.format("%Y-%m-%d").to_string()),
      marital_status:  Some(f.marital_status.as_str().to_owned()),
      contact_no:      Some(f.contact_no.clone()),
    }
  }
}

/// Accept a JSON string or number as text; `null` counts as absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  match Option::<serde_json::Value>::deserialize(deserializer)? {
    None | Some(serde_json::Value::Null) => Ok(None),
    Some(serde_json::Value::String(s)) => Ok(Some(s)),
    Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
    Some(other) => Err(D::Error::custom(format!(
      "expected text, found {other}"
    ))),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn fields() -> EmployeeFields {
    EmployeeFields {
      name:            "Ann Lee".into(),
      address:         "1 Main St".into(),
      email:           "Ann@X.com".into(),
      dob:             NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
      gender:          Gender::Female,
      date_of_joining: NaiveDate::from_ymd_opt(2020, 6, 1).unwrap(),
      marital_status:  MaritalStatus::Single,
      contact_no:      "5551234567".into(),
    }
  }

  #[test]
  fn employee_serialises_with_wire_keys() {
    let employee = Employee { id: Uuid::nil(), fields: fields() };
    let json = serde_json::to_value(&employee).unwrap();
    assert_eq!(json["id"], Uuid::nil().to_string());
    assert_eq!(json["dob"], "1990-01-01");
    assert_eq!(json["dateOfJoining"], "2020-06-01");
    assert_eq!(json["maritalStatus"], "Single");
    assert_eq!(json["contactNo"], "5551234567");
    assert_eq!(json["gender"], "Female");
  }

  #[test]
  fn email_key_is_case_folded() {
    assert_eq!(fields().email_key(), "ann@x.com");
    assert_eq!(email_key("  BOB@Example.ORG "), "bob@example.org");
  }

  #[test]
  fn input_accepts_numbers_and_ignores_id() {
    let input: EmployeeInput = serde_json::from_str(
      r#"{"id":"abc","name":"Ann","contactNo":5551234567,"gender":null}"#,
    )
    .unwrap();
    assert_eq!(input.name.as_deref(), Some("Ann"));
    assert_eq!(input.contact_no.as_deref(), Some("5551234567"));
    assert_eq!(input.gender, None);
    assert_eq!(input.email, None);
  }

  #[test]
  fn input_rejects_structured_values() {
    let err = serde_json::from_str::<EmployeeInput>(r#"{"name":{"first":"Ann"}}"#);
    assert!(err.is_err());
  }

  #[test]
  fn input_from_fields_uses_iso_dates() {
    let input = EmployeeInput::from(&fields());
    assert_eq!(input.get(Field::Dob), Some("1990-01-01"));
    assert_eq!(input.get(Field::MaritalStatus), Some("Single"));
  }

  #[test]
  fn enum_parsing_is_exact() {
    assert_eq!(Gender::parse("Male").unwrap(), Gender::Male);
    assert!(matches!(Gender::parse("male"), Err(Error::UnknownGender(_))));
    assert_eq!(
      MaritalStatus::parse("Widowed").unwrap(),
      MaritalStatus::Widowed
    );
    assert_eq!(Field::Gender.options(), Some(&["Male", "Female"][..]));
  }
}
