//! Draft form pane (right panel).

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};
use roster_core::employee::Field;

use crate::app::{App, Focus};

/// Render the form into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let form = &app.form;
  let focused_pane = app.focus == Focus::Form;

  let title = if form.editing.is_some() {
    " Edit Employee "
  } else {
    " Add Employee "
  };
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(super::pane_border(focused_pane));

  let inner = block.inner(area);
  f.render_widget(block, area);

  let mut lines: Vec<Line> = Vec::new();
  for (i, field) in Field::ALL.into_iter().enumerate() {
    let focused = focused_pane && i == form.focus;
    let value = form.value(field);

    let label_style = if focused {
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::Gray)
    };

    let shown = match field.options() {
      Some(_) if value.is_empty() => "< Select >".to_string(),
      Some(_) => format!("< {value} >"),
      None if focused => format!("{value}_"),
      None => value.to_string(),
    };

    let mut spans = vec![
      Span::styled(format!("{:<16}", field.label()), label_style),
      Span::raw(shown),
    ];
    if field.is_date() && value.is_empty() {
      spans.push(Span::styled(
        "yyyy-MM-dd",
        Style::default().fg(Color::DarkGray),
      ));
    }
    lines.push(Line::from(spans));

    if let Some(message) = form.error_for(field) {
      lines.push(Line::from(Span::styled(
        format!("{:<16}{message}", ""),
        Style::default().fg(Color::Red),
      )));
    }
  }

  let action = if form.editing.is_some() { "Update" } else { "Add" };
  lines.push(Line::from(""));
  lines.push(Line::from(Span::styled(
    format!("[Enter] {action}  [Esc] Reset"),
    Style::default().fg(Color::DarkGray),
  )));

  f.render_widget(Paragraph::new(lines), inner);
}
