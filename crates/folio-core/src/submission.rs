//! Contact submissions and the schema that validates them.
//!
//! A [`SubmissionInput`] is whatever the client sent, decoded leniently. It
//! only becomes a [`ValidatedSubmission`] through [`validate`], which checks
//! every field independently and reports failures in declaration order.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumIter, IntoEnumIterator, IntoStaticStr};
use validator::{Validate, ValidationError, ValidationErrors};

// ─── Fields ──────────────────────────────────────────────────────────────────

/// One of the four contact form fields, in declaration order.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumIter,
  IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Field {
  Name,
  Email,
  Subject,
  Message,
}

impl Field {
  /// The JSON key and wire name of this field.
  pub fn as_str(self) -> &'static str { self.into() }

  /// Human-readable reason reported when this field fails its constraint.
  pub fn constraint_message(self) -> &'static str {
    match self {
      Field::Name => "Name must be at least 2 characters",
      Field::Email => "Invalid email address",
      Field::Subject => "Subject must be at least 5 characters",
      Field::Message => "Message must be at least 10 characters",
    }
  }
}

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
  pub field:   Field,
  pub message: String,
}

impl FieldError {
  fn for_field(field: Field) -> Self {
    Self {
      field,
      message: field.constraint_message().to_owned(),
    }
  }
}

// ─── Email shape ─────────────────────────────────────────────────────────────

/// Dotted domain ending in an alphabetic TLD of at least two letters.
static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$",
  )
  .expect("email shape pattern is valid")
});

/// Tighter than the `email` rule: no leading dot, no `..`, and a real TLD.
fn email_shape(value: &str) -> Result<(), ValidationError> {
  if value.starts_with('.')
    || value.contains("..")
    || !EMAIL_SHAPE.is_match(value)
  {
    return Err(ValidationError::new("email_shape"));
  }
  Ok(())
}

// ─── Candidate input ─────────────────────────────────────────────────────────

/// An untrusted submission as received from a client.
///
/// Also used by the form client as its editable value buffer. Failure
/// messages come from [`Field::constraint_message`].
#[derive(
  Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate,
)]
pub struct SubmissionInput {
  #[validate(length(min = 2))]
  #[serde(default)]
  pub name:    String,
  #[validate(email, custom(function = email_shape))]
  #[serde(default)]
  pub email:   String,
  #[validate(length(min = 5))]
  #[serde(default)]
  pub subject: String,
  #[validate(length(min = 10))]
  #[serde(default)]
  pub message: String,
}

impl SubmissionInput {
  /// Decode a raw JSON body.
  ///
  /// Absent, `null` and non-string values become empty strings so that they
  /// fail their field's constraint instead of the whole request. Non-object
  /// bodies decode as an empty submission. Unknown keys are ignored.
  pub fn from_json(body: &Value) -> Self {
    let text = |field: Field| {
      body
        .get(field.as_str())
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
    };
    Self {
      name:    text(Field::Name),
      email:   text(Field::Email),
      subject: text(Field::Subject),
      message: text(Field::Message),
    }
  }

  pub fn value(&self, field: Field) -> &str {
    match field {
      Field::Name => &self.name,
      Field::Email => &self.email,
      Field::Subject => &self.subject,
      Field::Message => &self.message,
    }
  }

  pub fn set(&mut self, field: Field, value: String) {
    match field {
      Field::Name => self.name = value,
      Field::Email => self.email = value,
      Field::Subject => self.subject = value,
      Field::Message => self.message = value,
    }
  }

  fn trimmed(&self) -> Self {
    Self {
      name:    self.name.trim().to_owned(),
      email:   self.email.trim().to_owned(),
      subject: self.subject.trim().to_owned(),
      message: self.message.trim().to_owned(),
    }
  }
}

// ─── Validated record ────────────────────────────────────────────────────────

/// A submission whose every field passed the schema. Immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedSubmission {
  name:    String,
  email:   String,
  subject: String,
  message: String,
}

impl ValidatedSubmission {
  pub fn name(&self) -> &str { &self.name }

  pub fn email(&self) -> &str { &self.email }

  pub fn subject(&self) -> &str { &self.subject }

  pub fn message(&self) -> &str { &self.message }
}

// ─── Schema ──────────────────────────────────────────────────────────────────

/// Classify `input` as valid or invalid.
///
/// Values are trimmed before checking. On failure the returned list holds one
/// [`FieldError`] per failing field, ordered as the fields are declared.
pub fn validate(
  input: &SubmissionInput,
) -> Result<ValidatedSubmission, Vec<FieldError>> {
  let candidate = input.trimmed();
  match candidate.validate() {
    Ok(()) => Ok(ValidatedSubmission {
      name:    candidate.name,
      email:   candidate.email,
      subject: candidate.subject,
      message: candidate.message,
    }),
    Err(errors) => Err(ordered_errors(&errors)),
  }
}

fn ordered_errors(errors: &ValidationErrors) -> Vec<FieldError> {
  let by_field = errors.field_errors();
  Field::iter()
    .filter(|field| by_field.contains_key(field.as_str()))
    .map(FieldError::for_field)
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn input(name: &str, email: &str, subject: &str, message: &str) -> SubmissionInput {
    SubmissionInput {
      name:    name.into(),
      email:   email.into(),
      subject: subject.into(),
      message: message.into(),
    }
  }

  fn fields(errors: &[FieldError]) -> Vec<Field> {
    errors.iter().map(|e| e.field).collect()
  }

  #[test]
  fn valid_input_produces_record() {
    let record = validate(&input(
      "Jo",
      "jo@x.com",
      "Hello there",
      "This is a test message.",
    ))
    .unwrap();
    assert_eq!(record.name(), "Jo");
    assert_eq!(record.email(), "jo@x.com");
    assert_eq!(record.subject(), "Hello there");
    assert_eq!(record.message(), "This is a test message.");
  }

  #[test]
  fn values_are_trimmed() {
    let record = validate(&input(
      "  Jo  ",
      " jo@x.com\n",
      "\tHello there",
      "This is a test message.   ",
    ))
    .unwrap();
    assert_eq!(record.name(), "Jo");
    assert_eq!(record.email(), "jo@x.com");
    assert_eq!(record.subject(), "Hello there");
    assert_eq!(record.message(), "This is a test message.");
  }

  #[test]
  fn whitespace_does_not_count_towards_length() {
    let errors =
      validate(&input(" J ", "jo@x.com", "Hello there", "0123456789"))
        .unwrap_err();
    assert_eq!(fields(&errors), vec![Field::Name]);
  }

  #[test]
  fn single_bad_field_yields_single_error() {
    let cases = [
      (input("J", "jo@x.com", "Hello", "0123456789"), Field::Name),
      (input("Jo", "not-an-email", "Hello", "0123456789"), Field::Email),
      (input("Jo", "jo@x", "Hello", "0123456789"), Field::Email),
      (input("Jo", "jo@localhost", "Hello", "0123456789"), Field::Email),
      (input("Jo", "a@b.c", "Hello", "0123456789"), Field::Email),
      (input("Jo", "jo..x@x.com", "Hello", "0123456789"), Field::Email),
      (input("Jo", ".jo@x.com", "Hello", "0123456789"), Field::Email),
      (input("Jo", "jo@x.com", "Hey", "0123456789"), Field::Subject),
      (input("Jo", "jo@x.com", "Hello", "too short"), Field::Message),
    ];
    for (candidate, field) in cases {
      let errors = validate(&candidate).unwrap_err();
      assert_eq!(errors.len(), 1, "{candidate:?}");
      assert_eq!(errors[0].field, field);
      assert_eq!(errors[0].message, field.constraint_message());
    }
  }

  #[test]
  fn common_address_shapes_are_accepted() {
    for email in ["jo@x.com", "jo.smith+site@mail.example.co.uk", "o'neil@x.io"] {
      let candidate = input("Jo", email, "Hello there", "0123456789");
      assert!(validate(&candidate).is_ok(), "{email}");
    }
  }

  #[test]
  fn lengths_count_unicode_scalar_values() {
    let errors =
      validate(&input("👍", "jo@x.com", "Hello", "0123456789")).unwrap_err();
    assert_eq!(fields(&errors), vec![Field::Name]);

    assert!(validate(&input("👍👍", "jo@x.com", "Hello", "0123456789")).is_ok());
    assert!(validate(&input("Zoë", "jo@x.com", "Ünïcö", "éééééééééé")).is_ok());
  }

  #[test]
  fn multiple_errors_follow_declaration_order() {
    let errors =
      validate(&input("J", "jo@x.com", "Hi", "short")).unwrap_err();
    assert_eq!(
      fields(&errors),
      vec![Field::Name, Field::Subject, Field::Message]
    );
    assert_eq!(errors[0].message, "Name must be at least 2 characters");
    assert_eq!(errors[1].message, "Subject must be at least 5 characters");
    assert_eq!(errors[2].message, "Message must be at least 10 characters");
  }

  #[test]
  fn empty_input_fails_every_field() {
    let errors = validate(&SubmissionInput::default()).unwrap_err();
    assert_eq!(
      fields(&errors),
      vec![Field::Name, Field::Email, Field::Subject, Field::Message]
    );
  }

  #[test]
  fn validation_is_idempotent() {
    let good = input("Jo", "jo@x.com", "Hello there", "This is a test message.");
    let bad = input("J", "nope", "Hi", "short");
    assert_eq!(validate(&good), validate(&good));
    assert_eq!(validate(&bad), validate(&bad));
  }

  #[test]
  fn from_json_treats_missing_and_mistyped_as_empty() {
    let body = json!({ "name": "Jo", "email": 42, "subject": null });
    let decoded = SubmissionInput::from_json(&body);
    assert_eq!(decoded, input("Jo", "", "", ""));

    let errors = validate(&decoded).unwrap_err();
    assert_eq!(
      fields(&errors),
      vec![Field::Email, Field::Subject, Field::Message]
    );
  }

  #[test]
  fn from_json_ignores_unknown_keys() {
    let body = json!({
      "name": "Jo",
      "email": "jo@x.com",
      "subject": "Hello there",
      "message": "This is a test message.",
      "phone": "555-0100",
    });
    assert!(validate(&SubmissionInput::from_json(&body)).is_ok());
  }

  #[test]
  fn from_json_non_object_is_empty() {
    assert_eq!(
      SubmissionInput::from_json(&json!(["Jo"])),
      SubmissionInput::default()
    );
  }

  #[test]
  fn field_errors_serialize_with_lowercase_names() {
    let value = serde_json::to_value(FieldError::for_field(Field::Subject))
      .unwrap();
    assert_eq!(
      value,
      json!({
        "field": "subject",
        "message": "Subject must be at least 5 characters",
      })
    );
  }

  #[test]
  fn set_and_value_address_the_same_field() {
    let mut values = SubmissionInput::default();
    for field in Field::iter() {
      values.set(field, field.to_string());
    }
    assert_eq!(values.value(Field::Message), "message");
    assert_eq!(values.email, "email");
  }
}
