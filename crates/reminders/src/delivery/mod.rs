//! Mail transport seam.
//!
//! The batch runner composes one consolidated message per user and hands it
//! to a [`Mailer`]; the SMTP implementation lives in [`email`]. The trait
//! keeps the engine transport-agnostic; tests and alternative transports
//! plug in without touching the runner.

use async_trait::async_trait;

pub mod email;

pub use email::EmailError;

/// A transport capable of delivering one plain-text message to one mailbox.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send `subject`/`body` to `to`. An `Err` means nothing was delivered
    /// and the caller must not record the send.
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailError>;
}
