//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Dates are stored as `YYYY-MM-DD`. Enumerations are stored by variant name.
//! UUIDs are stored as hyphenated lowercase strings.

use chrono::NaiveDate;
use roster_core::{
  Error as CoreError,
  employee::{Employee, EmployeeFields, Gender, MaritalStatus},
};
use uuid::Uuid;

use crate::Result;

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── NaiveDate ────────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|_| CoreError::InvalidDate(s.to_owned()).into())
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column values bound by INSERT and UPDATE, in schema order.
pub struct EncodedFields {
  pub name:            String,
  pub address:         String,
  pub email:           String,
  pub email_key:       String,
  pub dob:             String,
  pub gender:          &'static str,
  pub date_of_joining: String,
  pub marital_status:  &'static str,
  pub contact_no:      String,
}

impl EncodedFields {
  pub fn new(f: &EmployeeFields) -> Self {
    Self {
      name:            f.name.clone(),
      address:         f.address.clone(),
      email:           f.email.clone(),
      email_key:       f.email_key(),
      dob:             encode_date(f.dob),
      gender:          f.gender.as_str(),
      date_of_joining: encode_date(f.date_of_joining),
      marital_status:  f.marital_status.as_str(),
      contact_no:      f.contact_no.clone(),
    }
  }
}

/// The column list matching [`RawEmployee::from_row`].
pub const EMPLOYEE_COLUMNS: &str = "employee_id, name, address, email, dob, gender, \
                                    date_of_joining, marital_status, contact_no";

/// Raw strings read directly from an `employees` row.
pub struct RawEmployee {
  pub employee_id:     String,
  pub name:            String,
  pub address:         String,
  pub email:           String,
  pub dob:             String,
  pub gender:          String,
  pub date_of_joining: String,
  pub marital_status:  String,
  pub contact_no:      String,
}

impl RawEmployee {
  /// Read a row selected with [`EMPLOYEE_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      employee_id:     row.get(0)?,
      name:            row.get(1)?,
      address:         row.get(2)?,
      email:           row.get(3)?,
      dob:             row.get(4)?,
      gender:          row.get(5)?,
      date_of_joining: row.get(6)?,
      marital_status:  row.get(7)?,
      contact_no:      row.get(8)?,
    })
  }

  pub fn into_employee(self) -> Result<Employee> {
    Ok(Employee {
      id:     decode_uuid(&self.employee_id)?,
      fields: EmployeeFields {
        name:            self.name,
        address:         self.address,
        email:           self.email,
        dob:             decode_date(&self.dob)?,
        gender:          Gender::parse(&self.gender)?,
        date_of_joining: decode_date(&self.date_of_joining)?,
        marital_status:  MaritalStatus::parse(&self.marital_status)?,
        contact_no:      self.contact_no,
      },
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn dates_use_iso_format() {
    let d = NaiveDate::from_ymd_opt(2020, 6, 1).unwrap();
    assert_eq!(encode_date(d), "2020-06-01");
    assert_eq!(decode_date("2020-06-01").unwrap(), d);
    assert!(decode_date("June 1st").is_err());
  }

  #[test]
  fn unknown_enum_in_row_is_a_core_error() {
    let raw = RawEmployee {
      employee_id:     encode_uuid(Uuid::new_v4()),
      name:            "Ann".into(),
      address:         "1 Main St".into(),
      email:           "ann@x.com".into(),
      dob:             "1990-01-01".into(),
      gender:          "Other".into(),
      date_of_joining: "2020-06-01".into(),
      marital_status:  "Single".into(),
      contact_no:      "5551234567".into(),
    };
    assert!(matches!(
      raw.into_employee(),
      Err(crate::Error::Core(CoreError::UnknownGender(_)))
    ));
  }
}
