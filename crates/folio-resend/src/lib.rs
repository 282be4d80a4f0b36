//! Resend-backed implementation of [`folio_core::mailer::Mailer`].
//!
//! Use [`ResendMailer::new`] with a [`ResendConfig`]. The API key is supplied
//! per call, so one mailer serves every request.

mod error;
mod mailer;

pub use error::Error;
pub use mailer::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT, ResendConfig, ResendMailer};
