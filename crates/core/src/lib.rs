//! Trellis domain logic.
//!
//! Pure types and functions shared by the database layer, the reminder
//! engine, and any future API or CLI tooling. This crate has zero internal
//! dependencies and performs no I/O:
//!
//! - [`frost`] — last-frost date resolution from profile overrides and
//!   hardiness-zone reference data.
//! - [`schedule`] — week-offset arithmetic turning a frost anchor into
//!   concrete planting dates.
//! - [`reminder`] — reminder types, planting events, window matching,
//!   dedup keys, and toggle scope precedence.

pub mod frost;
pub mod reminder;
pub mod schedule;
pub mod types;
