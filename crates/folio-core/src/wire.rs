//! JSON payloads exchanged between the contact endpoint and its clients.

use serde::{Deserialize, Serialize};

use crate::submission::FieldError;

pub const LOGGED_MESSAGE: &str =
  "Message logged (dev mode - no email configured)";
pub const DELIVERED_MESSAGE: &str = "Message sent successfully!";
pub const STATUS_MESSAGE: &str =
  "Contact API is working. Use POST to send messages.";

pub const VALIDATION_FAILED: &str = "Validation failed";
pub const SEND_FAILED: &str = "Failed to send message";
pub const INVALID_BODY: &str = "Invalid request body";
pub const UNEXPECTED_ERROR: &str = "Unexpected error";

/// `200` body for an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessBody {
  pub success: bool,
  pub message: String,
  /// Provider identifier; present only when the email was delivered.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id:      Option<String>,
}

impl SuccessBody {
  pub fn logged() -> Self {
    Self {
      success: true,
      message: LOGGED_MESSAGE.to_owned(),
      id:      None,
    }
  }

  pub fn delivered(id: String) -> Self {
    Self {
      success: true,
      message: DELIVERED_MESSAGE.to_owned(),
      id:      Some(id),
    }
  }
}

/// `4xx`/`5xx` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
  pub error:   String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub details: Option<ErrorDetails>,
}

/// Either itemised field errors or a free-text diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetails {
  Fields(Vec<FieldError>),
  Reason(String),
}

/// `GET /contact` liveness body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBody {
  pub message: String,
}
