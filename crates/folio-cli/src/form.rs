//! Contact form state machine.
//!
//! All transitions go through [`ContactForm::apply`]; the status enum makes
//! combinations like "submitting with an error banner" unrepresentable.

use std::time::{Duration, Instant};

use folio_core::submission::{Field, FieldError, SubmissionInput};

/// How long the success banner stays up before the form returns to idle.
pub const SUCCESS_DISPLAY: Duration = Duration::from_secs(5);

// ─── Status ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
  Idle,
  Submitting,
  Success {
    since: Instant,
  },
  Error {
    message:      String,
    /// Inline errors from server-side validation; empty for other failures.
    field_errors: Vec<FieldError>,
  },
}

/// How the endpoint answered a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
  Accepted {
    message: String,
    id:      Option<String>,
  },
  /// Client error carrying per-field details.
  Rejected {
    message:      String,
    field_errors: Vec<FieldError>,
  },
  /// Anything else: server error, unreachable server, garbled response.
  Failed {
    message: String,
  },
}

#[derive(Debug, Clone)]
pub enum FormEvent {
  Submit,
  Edit { field: Field, value: String },
  Responded { outcome: SubmitOutcome, at: Instant },
  Tick(Instant),
}

// ─── Form ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ContactForm {
  values: SubmissionInput,
  status: FormStatus,
}

impl Default for ContactForm {
  fn default() -> Self {
    Self {
      values: SubmissionInput::default(),
      status: FormStatus::Idle,
    }
  }
}

impl ContactForm {
  pub fn new() -> Self { Self::default() }

  pub fn status(&self) -> &FormStatus { &self.status }

  pub fn value(&self, field: Field) -> &str { self.values.value(field) }

  /// The submit control is disabled while a request is in flight.
  pub fn can_submit(&self) -> bool {
    !matches!(self.status, FormStatus::Submitting)
  }

  /// Inline error for `field`, if the last attempt flagged it.
  pub fn field_error(&self, field: Field) -> Option<&str> {
    match &self.status {
      FormStatus::Error { field_errors, .. } => field_errors
        .iter()
        .find(|e| e.field == field)
        .map(|e| e.message.as_str()),
      _ => None,
    }
  }

  /// Apply `event`. Returns the payload to send when it starts a submission.
  pub fn apply(&mut self, event: FormEvent) -> Option<SubmissionInput> {
    match event {
      FormEvent::Submit => {
        if !self.can_submit() {
          return None;
        }
        self.status = FormStatus::Submitting;
        Some(self.values.clone())
      }

      FormEvent::Edit { field, value } => {
        self.values.set(field, value);
        if let FormStatus::Error { field_errors, .. } = &mut self.status {
          field_errors.retain(|e| e.field != field);
        }
        None
      }

      FormEvent::Responded { outcome, at } => {
        if self.status != FormStatus::Submitting {
          return None;
        }
        self.status = match outcome {
          SubmitOutcome::Accepted { .. } => {
            self.values = SubmissionInput::default();
            FormStatus::Success { since: at }
          }
          SubmitOutcome::Rejected {
            message,
            field_errors,
          } => FormStatus::Error {
            message,
            field_errors,
          },
          SubmitOutcome::Failed { message } => FormStatus::Error {
            message,
            field_errors: Vec::new(),
          },
        };
        None
      }

      FormEvent::Tick(now) => {
        if let FormStatus::Success { since } = self.status
          && now.saturating_duration_since(since) >= SUCCESS_DISPLAY
        {
          self.status = FormStatus::Idle;
        }
        None
      }
    }
  }
}
