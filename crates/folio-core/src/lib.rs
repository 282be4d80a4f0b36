//! Core types for the folio contact pipeline.
//!
//! This crate holds the submission schema, the [`mailer::Mailer`] seam and
//! the [`dispatch::Dispatcher`] that decides between provider delivery and
//! the log-only fallback. It opens no sockets: the HTTP endpoint lives in
//! `folio-api` and the provider client in `folio-resend`.

pub mod dispatch;
pub mod error;
pub mod mailer;
pub mod submission;
pub mod template;
pub mod wire;

pub use error::{Error, Result};
