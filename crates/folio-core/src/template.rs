//! HTML body for contact notification emails.

use tera::{Context, Tera};

use crate::{Result, submission::ValidatedSubmission};

const TEMPLATE_NAME: &str = "contact.html";
const TEMPLATE_SOURCE: &str = include_str!("../templates/contact.html");

/// Renders a [`ValidatedSubmission`] into the notification HTML.
///
/// The template name ends in `.html`, so Tera autoescapes every value.
#[derive(Debug, Clone)]
pub struct EmailTemplate {
  tera: Tera,
}

impl EmailTemplate {
  pub fn new() -> Result<Self> {
    let mut tera = Tera::default();
    tera.add_raw_template(TEMPLATE_NAME, TEMPLATE_SOURCE)?;
    Ok(Self { tera })
  }

  pub fn render(&self, submission: &ValidatedSubmission) -> Result<String> {
    let context = Context::from_serialize(submission)?;
    Ok(self.tera.render(TEMPLATE_NAME, &context)?)
  }
}
