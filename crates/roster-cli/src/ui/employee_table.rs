//! Employee table pane (left panel).

use ratatui::{
  Frame,
  layout::{Constraint, Rect},
  style::{Color, Modifier, Style},
  widgets::{Block, Borders, Paragraph, Row, Table, TableState},
};

use crate::app::{App, Focus};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Render the employee table into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(format!(" Employees ({}) ", app.employees.len()))
    .borders(Borders::ALL)
    .border_style(super::pane_border(app.focus == Focus::Table));

  if app.employees.is_empty() {
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
      Paragraph::new("No employees found.").style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  }

  let header = Row::new([
    "Name", "Address", "Email", "Birth", "Gender", "Joined", "Marital", "Contact",
  ])
  .style(
    Style::default()
      .fg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );

  let rows = app.employees.iter().map(|e| {
    let fields = &e.fields;
    let editing = app.form.editing == Some(e.id);
    let row = Row::new([
      fields.name.clone(),
      fields.address.clone(),
      fields.email.clone(),
      fields.dob.format(DATE_FORMAT).to_string(),
      fields.gender.to_string(),
      fields.date_of_joining.format(DATE_FORMAT).to_string(),
      fields.marital_status.to_string(),
      fields.contact_no.clone(),
    ]);
    if editing {
      row.style(Style::default().fg(Color::Yellow))
    } else {
      row
    }
  });

  let widths = [
    Constraint::Fill(2),
    Constraint::Fill(2),
    Constraint::Fill(3),
    Constraint::Length(10),
    Constraint::Length(6),
    Constraint::Length(10),
    Constraint::Length(8),
    Constraint::Length(10),
  ];

  let table = Table::new(rows, widths)
    .header(header)
    .block(block)
    .row_highlight_style(
      Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD),
    );

  let mut state = TableState::default().with_selected(Some(app.cursor));
  f.render_stateful_widget(table, area, &mut state);
}
