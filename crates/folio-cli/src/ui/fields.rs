//! Input boxes, inline errors and the submit button.

use folio_core::submission::Field;
use ratatui::{
  Frame,
  layout::{Alignment, Rect},
  style::{Color, Modifier, Style},
  text::Line,
  widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, Focus};

fn label(field: Field) -> &'static str {
  match field {
    Field::Name => " Name * ",
    Field::Email => " Email * ",
    Field::Subject => " Subject * ",
    Field::Message => " Message * ",
  }
}

fn placeholder(field: Field) -> &'static str {
  match field {
    Field::Name => "Your name",
    Field::Email => "your.email@example.com",
    Field::Subject => "What is this about?",
    Field::Message => "Your message...",
  }
}

/// Render `field`'s input into `area` and its error (if any) into `error_area`.
pub fn draw_input(
  f: &mut Frame,
  area: Rect,
  error_area: Rect,
  app: &App,
  field: Field,
) {
  let focused = app.focus == Focus::Field(field);
  let error = app.form.field_error(field);
  let value = app.form.value(field);

  let border = match (error, focused) {
    (Some(_), _) => Style::default().fg(Color::Red),
    (None, true) => Style::default().fg(Color::Cyan),
    (None, false) => Style::default().fg(Color::DarkGray),
  };
  let block = Block::default()
    .title(label(field))
    .borders(Borders::ALL)
    .border_style(border);
  let inner = block.inner(area);

  let body = if value.is_empty() {
    Paragraph::new(placeholder(field))
      .style(Style::default().fg(Color::DarkGray))
  } else {
    Paragraph::new(value)
  };
  f.render_widget(body.block(block), area);

  if focused {
    // Cursor sits after the last character of the last line.
    let last = value.rsplit('\n').next().unwrap_or_default();
    let row = value.matches('\n').count() as u16;
    let col = last.chars().count() as u16;
    f.set_cursor_position((
      inner.x + col.min(inner.width.saturating_sub(1)),
      inner.y + row.min(inner.height.saturating_sub(1)),
    ));
  }

  if let Some(message) = error {
    f.render_widget(
      Paragraph::new(Line::styled(
        format!(" {message}"),
        Style::default().fg(Color::Red),
      )),
      error_area,
    );
  }
}

pub fn draw_submit(f: &mut Frame, area: Rect, app: &App) {
  let focused = app.focus == Focus::Submit;
  let (text, style) = if app.form.can_submit() {
    let base = Style::default().fg(Color::White).bg(Color::Blue);
    let style = if focused {
      base.add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
      base
    };
    ("Send Message", style)
  } else {
    ("Sending…", Style::default().fg(Color::Black).bg(Color::Gray))
  };

  let block = Block::default()
    .borders(Borders::ALL)
    .border_style(if focused {
      Style::default().fg(Color::Cyan)
    } else {
      Style::default().fg(Color::DarkGray)
    });
  f.render_widget(
    Paragraph::new(text)
      .alignment(Alignment::Center)
      .style(style)
      .block(block),
    area,
  );
}
