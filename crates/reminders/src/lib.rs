//! Trellis planting reminder engine.
//!
//! This crate turns growing profiles and plant data into consolidated
//! reminder emails, exactly once per (user, reminder type, target date):
//!
//! - [`ScheduleAggregator`] — merges derived planting dates across the
//!   encyclopedia, a user's seed inventory, and their wishlist.
//! - [`message`] — composes the one consolidated email per user per run.
//! - [`delivery`] — the [`Mailer`] transport seam and its SMTP
//!   implementation.
//! - [`ReminderBatchRunner`] — the per-user resolve → aggregate → match →
//!   dedupe → send → log pipeline.
//! - [`ReminderScheduler`] — periodic loop driving the runner.

pub mod aggregate;
pub mod delivery;
pub mod message;
pub mod runner;
pub mod scheduler;

pub use aggregate::ScheduleAggregator;
pub use delivery::email::{EmailConfig, EmailDelivery};
pub use delivery::Mailer;
pub use runner::{ReminderBatchRunner, RunSummary};
pub use scheduler::ReminderScheduler;
