//! Application state machine and event dispatcher.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use roster_core::employee::Employee;

use crate::{
  client::{ApiClient, Rejection},
  form::{Form, Submission},
};

// ─── Focus ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
  /// The employee table has the keyboard.
  Table,
  /// The draft form has the keyboard.
  Form,
}

/// A request the user can trigger, named for failure reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
  Fetch,
  Add,
  Update,
  Delete,
}

impl Action {
  fn failure(self) -> &'static str {
    match self {
      Self::Fetch => "Error fetching employees. Please try again.",
      Self::Add => "Error adding employee. Please try again.",
      Self::Update => "Error updating employee. Please try again.",
      Self::Delete => "Error deleting employee. Please try again.",
    }
  }
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  pub focus:      Focus,
  /// Records as last returned by the server.
  pub employees:  Vec<Employee>,
  /// Selected row in the table.
  pub cursor:     usize,
  pub form:       Form,
  /// One-line status message shown in the status bar.
  pub status_msg: String,
  pub client:     Arc<ApiClient>,
}

impl App {
  pub fn new(client: ApiClient) -> Self {
    Self {
      focus:      Focus::Table,
      employees:  Vec::new(),
      cursor:     0,
      form:       Form::new(),
      status_msg: String::new(),
      client:     Arc::new(client),
    }
  }

  pub fn selected(&self) -> Option<&Employee> { self.employees.get(self.cursor) }

  // ── Requests ──────────────────────────────────────────────────────────────

  /// Re-fetch the employee list. Returns whether it succeeded.
  pub async fn refresh(&mut self) -> bool {
    match self.client.list_employees().await {
      Ok(employees) => {
        self.employees = employees;
        self.cursor = self.cursor.min(self.employees.len().saturating_sub(1));
        true
      }
      Err(e) => {
        self.fail(Action::Fetch, &e);
        false
      }
    }
  }

  /// Check the draft locally, then create or update it on the server.
  pub async fn submit(&mut self) {
    let Some(submission) = self.form.submission() else {
      self.status_msg = "Please correct the highlighted fields.".into();
      return;
    };

    let (action, result) = match &submission {
      Submission::Create(input) => (Action::Add, self.client.create_employee(input).await),
      Submission::Update(id, input) => {
        (Action::Update, self.client.update_employee(*id, input).await)
      }
    };

    match result {
      Ok(employee) => {
        tracing::info!(id = %employee.id, ?action, "employee saved");
        self.form.reset();
        self.focus = Focus::Table;
        if self.refresh().await {
          self.status_msg = match action {
            Action::Add => "Employee added.".into(),
            _ => "Employee updated.".into(),
          };
        }
      }
      Err(e) => self.fail(action, &e),
    }
  }

  /// Load the selected row into the form.
  pub fn edit_selected(&mut self) {
    if let Some(employee) = self.selected().cloned() {
      self.form.load(&employee);
      self.focus = Focus::Form;
      self.status_msg = format!("Editing {}", employee.fields.name);
    }
  }

  /// Delete the selected row on the server.
  pub async fn delete_selected(&mut self) {
    let Some(id) = self.selected().map(|e| e.id) else {
      return;
    };
    match self.client.delete_employee(id).await {
      Ok(body) => {
        tracing::info!(%id, "employee deleted");
        if self.form.editing == Some(id) {
          self.form.reset();
        }
        if self.refresh().await {
          self.status_msg = format!("{}.", body.message);
        }
      }
      Err(e) => self.fail(Action::Delete, &e),
    }
  }

  fn fail(&mut self, action: Action, err: &anyhow::Error) {
    let rejection = err.downcast_ref::<Rejection>();
    tracing::warn!(
      ?action,
      status = ?rejection.map(Rejection::status),
      error = %format!("{err:#}"),
      "request failed"
    );
    self.status_msg = match rejection.and_then(Rejection::server_message) {
      Some(m) => format!("{} {m}", action.failure()),
      None => action.failure().to_owned(),
    };
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    match self.focus {
      Focus::Table => self.handle_table_key(key).await,
      Focus::Form => self.handle_form_key(key).await,
    }
  }

  async fn handle_table_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Char('q') => return Ok(false),

      KeyCode::Down | KeyCode::Char('j') => {
        if self.cursor + 1 < self.employees.len() {
          self.cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.cursor = self.cursor.saturating_sub(1);
      }

      KeyCode::Enter | KeyCode::Char('e') => self.edit_selected(),
      KeyCode::Char('d') => self.delete_selected().await,

      // New record
      KeyCode::Char('n') => {
        self.form.reset();
        self.focus = Focus::Form;
        self.status_msg.clear();
      }

      KeyCode::Char('r') => {
        if self.refresh().await {
          self.status_msg.clear();
        }
      }

      KeyCode::Tab => self.focus = Focus::Form,

      _ => {}
    }
    Ok(true)
  }

  async fn handle_form_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Tab | KeyCode::Down => self.form.focus_next(),
      KeyCode::BackTab | KeyCode::Up => self.form.focus_prev(),
      KeyCode::Right => self.form.cycle(true),
      KeyCode::Left => self.form.cycle(false),
      KeyCode::Backspace => self.form.backspace(),
      KeyCode::Enter => self.submit().await,
      KeyCode::Esc => {
        self.form.reset();
        self.focus = Focus::Table;
        self.status_msg.clear();
      }
      KeyCode::Char(c) => self.form.push_char(c),
      _ => {}
    }
    Ok(true)
  }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
