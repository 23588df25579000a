//! The employee draft being added or edited.
//!
//! Local checks cover required fields, the email shape and date validity.
//! Email uniqueness and the contact number format are left to the server.

use roster_core::{
  employee::{Employee, EmployeeInput, Field},
  validate::{FieldError, is_email_shape, parse_date, present},
};
use uuid::Uuid;

/// What a valid draft turns into when submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
  Create(EmployeeInput),
  Update(Uuid, EmployeeInput),
}

/// Draft state for one record.
#[derive(Debug, Default)]
pub struct Form {
  /// Set when the draft was loaded from a stored record.
  pub editing: Option<Uuid>,
  pub draft:   EmployeeInput,
  /// Index into [`Field::ALL`].
  pub focus:   usize,
  pub errors:  Vec<FieldError>,
}

impl Form {
  pub fn new() -> Self { Self::default() }

  pub fn focused(&self) -> Field { Field::ALL[self.focus] }

  pub fn value(&self, field: Field) -> &str { self.draft.get(field).unwrap_or_default() }

  pub fn error_for(&self, field: Field) -> Option<&str> {
    self
      .errors
      .iter()
      .find(|e| e.field == field)
      .map(|e| e.message.as_str())
  }

  // ── Navigation ────────────────────────────────────────────────────────────

  pub fn focus_next(&mut self) { self.focus = (self.focus + 1) % Field::ALL.len(); }

  pub fn focus_prev(&mut self) {
    self.focus = (self.focus + Field::ALL.len() - 1) % Field::ALL.len();
  }

  // ── Editing ───────────────────────────────────────────────────────────────

  /// Append `c` to the focused text field. Ignored on enumeration fields.
  pub fn push_char(&mut self, c: char) {
    let field = self.focused();
    if field.options().is_some() {
      return;
    }
    let mut value = self.value(field).to_owned();
    value.push(c);
    self.draft.set(field, Some(value));
  }

  pub fn backspace(&mut self) {
    let field = self.focused();
    if field.options().is_some() {
      return;
    }
    let mut value = self.value(field).to_owned();
    value.pop();
    self.draft.set(field, Some(value));
  }

  /// Step the focused enumeration field through its options.
  ///
  /// The unselected state sits between the last and the first option.
  pub fn cycle(&mut self, forward: bool) {
    let field = self.focused();
    let Some(options) = field.options() else {
      return;
    };
    let current = options.iter().position(|o| *o == self.value(field));
    let next = match (current, forward) {
      (None, true) => Some(0),
      (None, false) => Some(options.len() - 1),
      (Some(i), true) if i + 1 < options.len() => Some(i + 1),
      (Some(i), false) if i > 0 => Some(i - 1),
      (Some(_), _) => None,
    };
    self
      .draft
      .set(field, next.map(|i| options[i].to_owned()));
  }

  // ── Lifecycle ─────────────────────────────────────────────────────────────

  /// Load a stored record for editing.
  pub fn load(&mut self, employee: &Employee) {
    self.editing = Some(employee.id);
    self.draft = EmployeeInput::from(&employee.fields);
    self.focus = 0;
    self.errors.clear();
  }

  /// Clear the draft and leave edit mode.
  pub fn reset(&mut self) { *self = Self::default(); }

  /// Run the local checks, recording their errors on the form.
  ///
  /// Returns the request to send when the draft passes.
  pub fn submission(&mut self) -> Option<Submission> {
    self.errors = self.check();
    if !self.errors.is_empty() {
      return None;
    }
    let input = self.draft.clone();
    Some(match self.editing {
      Some(id) => Submission::Update(id, input),
      None => Submission::Create(input),
    })
  }

  fn check(&self) -> Vec<FieldError> {
    Field::ALL
      .into_iter()
      .filter_map(|field| {
        let Some(value) = present(self.draft.get(field)) else {
          return Some(FieldError::required(field));
        };
        if field == Field::Email && !is_email_shape(value) {
          return Some(FieldError::new(field, "Invalid email address"));
        }
        if field.is_date() && parse_date(value).is_none() {
          return Some(FieldError::new(
            field,
            format!("{} must be a valid date", field.label()),
          ));
        }
        None
      })
      .collect()
  }
}
