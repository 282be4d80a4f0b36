//! TUI rendering — header, form body, status bar.

pub mod banner;
pub mod fields;

use folio_core::submission::Field;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};

use crate::{
  app::{App, Focus},
  form::FormStatus,
};

/// Widest the form column grows on large terminals.
const FORM_WIDTH: u16 = 72;

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // form
      Constraint::Length(1), // status bar
    ])
    .split(f.area());

  draw_header(f, rows[0]);
  draw_form(f, centered(rows[1], FORM_WIDTH), app);
  draw_status(f, rows[2], app);
}

fn centered(area: Rect, width: u16) -> Rect {
  let width = width.min(area.width);
  Rect {
    x: area.x + (area.width - width) / 2,
    width,
    ..area
  }
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect) {
  let title = Span::styled(
    " folio  contact",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(Line::from(title)), inner);
}

// ─── Form ─────────────────────────────────────────────────────────────────────

fn draw_form(f: &mut Frame, area: Rect, app: &App) {
  let banner_height = banner::height(app);
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(banner_height),
      Constraint::Length(3), // name
      Constraint::Length(1),
      Constraint::Length(3), // email
      Constraint::Length(1),
      Constraint::Length(3), // subject
      Constraint::Length(1),
      Constraint::Length(8), // message
      Constraint::Length(1),
      Constraint::Length(3), // submit
      Constraint::Min(0),
    ])
    .split(area);

  banner::draw(f, rows[0], app);
  fields::draw_input(f, rows[1], rows[2], app, Field::Name);
  fields::draw_input(f, rows[3], rows[4], app, Field::Email);
  fields::draw_input(f, rows[5], rows[6], app, Field::Subject);
  fields::draw_input(f, rows[7], rows[8], app, Field::Message);
  fields::draw_submit(f, rows[9], app);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let mode_label = match app.form.status() {
    FormStatus::Idle => "EDIT",
    FormStatus::Submitting => "SENDING",
    FormStatus::Success { .. } => "SENT",
    FormStatus::Error { .. } => "ERROR",
  };
  let hints = match app.focus {
    Focus::Submit => "Enter send  Tab/↑↓ move  Ctrl-S send  Esc quit",
    Focus::Field(Field::Message) => {
      "Type to edit  Enter newline  Tab/↑↓ move  Ctrl-S send  Esc quit"
    }
    Focus::Field(_) => "Type to edit  Enter next  Tab/↑↓ move  Ctrl-S send  Esc quit",
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(
    format!("  {hints}"),
    Style::default().fg(Color::DarkGray),
  );

  f.render_widget(
    Paragraph::new(Line::from(vec![mode_span, hint_span]))
      .style(Style::default().bg(Color::Black)),
    area,
  );
}
