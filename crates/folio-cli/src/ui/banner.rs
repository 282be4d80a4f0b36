//! Success / failure banner above the form.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::Line,
  widgets::{Block, Borders, Paragraph},
};

use crate::{app::App, form::FormStatus};

/// Rows reserved for the banner in the current state.
pub fn height(app: &App) -> u16 {
  match app.form.status() {
    FormStatus::Success { .. } | FormStatus::Error { .. } => 4,
    FormStatus::Idle | FormStatus::Submitting => 0,
  }
}

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let (color, title, detail) = match app.form.status() {
    FormStatus::Success { .. } => (
      Color::Green,
      "Message sent successfully!",
      if app.notice.is_empty() {
        "I'll get back to you as soon as possible."
      } else {
        app.notice.as_str()
      },
    ),
    FormStatus::Error { message, .. } => {
      (Color::Red, "Failed to send message", message.as_str())
    }
    FormStatus::Idle | FormStatus::Submitting => return,
  };

  let block = Block::default()
    .borders(Borders::ALL)
    .border_style(Style::default().fg(color));
  let lines = vec![
    Line::styled(
      title,
      Style::default().fg(color).add_modifier(Modifier::BOLD),
    ),
    Line::styled(detail, Style::default().fg(color)),
  ];
  f.render_widget(Paragraph::new(lines).block(block), area);
}
