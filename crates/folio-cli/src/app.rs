//! Application state and key dispatcher.

use std::{sync::Arc, time::Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use folio_core::submission::Field;
use tokio::sync::mpsc::UnboundedSender;

use crate::{
  client::ApiClient,
  form::{ContactForm, FormEvent, FormStatus, SubmitOutcome},
};

// ─── Focus ────────────────────────────────────────────────────────────────────

/// Which control receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
  Field(Field),
  Submit,
}

impl Focus {
  const ORDER: [Focus; 5] = [
    Focus::Field(Field::Name),
    Focus::Field(Field::Email),
    Focus::Field(Field::Subject),
    Focus::Field(Field::Message),
    Focus::Submit,
  ];

  fn position(self) -> usize {
    Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
  }

  pub fn next(self) -> Self {
    Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
  }

  pub fn prev(self) -> Self {
    let len = Self::ORDER.len();
    Self::ORDER[(self.position() + len - 1) % len]
  }
}

// ─── App ──────────────────────────────────────────────────────────────────────

pub struct App {
  pub form:   ContactForm,
  pub focus:  Focus,
  /// Server message from the last accepted submission.
  pub notice: String,
  client:     Arc<ApiClient>,
  /// Where spawned submissions report back.
  outbox:     UnboundedSender<SubmitOutcome>,
}

impl App {
  pub fn new(client: ApiClient, outbox: UnboundedSender<SubmitOutcome>) -> Self {
    Self {
      form: ContactForm::new(),
      focus: Focus::Field(Field::Name),
      notice: String::new(),
      client: Arc::new(client),
      outbox,
    }
  }

  // ── Submission ────────────────────────────────────────────────────────────

  /// Start a submission on a background task, unless one is in flight.
  pub fn submit(&mut self) {
    let Some(payload) = self.form.apply(FormEvent::Submit) else {
      return;
    };
    let client = Arc::clone(&self.client);
    let outbox = self.outbox.clone();
    tokio::spawn(async move {
      let outcome = client.submit(&payload).await;
      // The receiver only goes away when the UI has exited.
      let _ = outbox.send(outcome);
    });
  }

  /// Feed a finished submission back into the form. Responses that arrive
  /// while nothing is in flight leave both the form and the notice alone.
  pub fn receive(&mut self, outcome: SubmitOutcome, at: Instant) {
    if self.form.status() != &FormStatus::Submitting {
      return;
    }
    let notice = match &outcome {
      SubmitOutcome::Accepted { message, id: Some(id) } => {
        Some(format!("{message} (ref {id})"))
      }
      SubmitOutcome::Accepted { message, id: None } => Some(message.clone()),
      _ => None,
    };
    self.form.apply(FormEvent::Responded { outcome, at });
    if let Some(notice) = notice
      && matches!(self.form.status(), FormStatus::Success { .. })
    {
      self.notice = notice;
    }
  }

  pub fn tick(&mut self, now: Instant) { self.form.apply(FormEvent::Tick(now)); }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
      KeyCode::Char('c') if ctrl => return false,
      KeyCode::Esc => return false,
      KeyCode::Char('s') if ctrl => self.submit(),

      KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
      KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),

      KeyCode::Enter => match self.focus {
        Focus::Submit => self.submit(),
        Focus::Field(Field::Message) => self.edit(|value| value.push('\n')),
        Focus::Field(_) => self.focus = self.focus.next(),
      },

      KeyCode::Backspace => self.edit(|value| {
        value.pop();
      }),
      KeyCode::Char(c) if !ctrl => self.edit(|value| value.push(c)),

      _ => {}
    }
    true
  }

  fn edit(&mut self, change: impl FnOnce(&mut String)) {
    let Focus::Field(field) = self.focus else {
      return;
    };
    let mut value = self.form.value(field).to_owned();
    change(&mut value);
    self.form.apply(FormEvent::Edit { field, value });
  }
}
