//! Reminder types, planting events, window matching, and dedup keys.
//!
//! The three reminder types map onto the plantable stages of
//! [`Stage`](crate::schedule::Stage); harvest is calendar-only and never
//! reminded. Everything here is pure; log reads and writes live in the
//! database layer, and the send itself in the reminder engine.

use std::collections::{BTreeMap, HashSet};

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::schedule::Stage;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Forward-looking reminder window when the profile leaves lead days unset.
pub const DEFAULT_LEAD_DAYS: i32 = 7;

// ---------------------------------------------------------------------------
// ReminderType
// ---------------------------------------------------------------------------

/// The three reminder types this engine tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderType {
    IndoorStart,
    DirectSow,
    Transplant,
}

impl ReminderType {
    /// All reminder types, in bucket presentation order.
    pub const ALL: [Self; 3] = [Self::IndoorStart, Self::DirectSow, Self::Transplant];

    /// Stable string form used in the `planting_reminder_log` table and in
    /// dedup keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::IndoorStart => "indoor_start",
            Self::DirectSow => "direct_sow",
            Self::Transplant => "transplant",
        }
    }

    /// Parse the stable string form back into a type.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "indoor_start" => Some(Self::IndoorStart),
            "direct_sow" => Some(Self::DirectSow),
            "transplant" => Some(Self::Transplant),
            _ => None,
        }
    }

    /// Human-readable bucket heading for the consolidated email.
    pub fn label(self) -> &'static str {
        match self {
            Self::IndoorStart => "Start seeds indoors",
            Self::DirectSow => "Sow outdoors",
            Self::Transplant => "Transplant out",
        }
    }

    /// The reminder type for a schedule stage, if that stage is remindable.
    pub fn for_stage(stage: Stage) -> Option<Self> {
        match stage {
            Stage::IndoorStart => Some(Self::IndoorStart),
            Stage::DirectSow => Some(Self::DirectSow),
            Stage::Transplant => Some(Self::Transplant),
            Stage::Harvest => None,
        }
    }
}

// ---------------------------------------------------------------------------
// PlantingEvent
// ---------------------------------------------------------------------------

/// Which data source produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSource {
    /// A shared encyclopedia guide (calendar browsing).
    Guide,
    /// One of the user's inventory seeds.
    Inventory,
    /// One of the user's wishlist items.
    Wishlist,
}

/// One derived date for one plant: the unit the window matcher, the
/// deduplicator, and the mail composer all operate on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlantingEvent {
    pub plant_label: String,
    pub variety: Option<String>,
    pub category: Option<String>,
    pub stage: Stage,
    pub date: NaiveDate,
    pub source: EventSource,
}

impl PlantingEvent {
    /// The reminder type for this event, when its stage is remindable.
    pub fn reminder_type(&self) -> Option<ReminderType> {
        ReminderType::for_stage(self.stage)
    }

    /// `"Tomato (Brandywine)"`, or just the plant label without a variety.
    /// Used in email bodies and log snapshots.
    pub fn display_label(&self) -> String {
        match &self.variety {
            Some(variety) => format!("{} ({variety})", self.plant_label),
            None => self.plant_label.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Toggle scopes
// ---------------------------------------------------------------------------

/// Per-type enable flags, used for both the profile-level (global) scope and
/// the per-seed override scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReminderToggles {
    pub indoor_start: bool,
    pub direct_sow: bool,
    pub transplant: bool,
}

impl ReminderToggles {
    /// The flag for one reminder type.
    pub fn get(self, reminder_type: ReminderType) -> bool {
        match reminder_type {
            ReminderType::IndoorStart => self.indoor_start,
            ReminderType::DirectSow => self.direct_sow,
            ReminderType::Transplant => self.transplant,
        }
    }

    /// Whether any type is enabled.
    pub fn any(self) -> bool {
        self.indoor_start || self.direct_sow || self.transplant
    }
}

/// Resolve whether a reminder type is enabled for one item.
///
/// Global and per-item toggles are mutually exclusive scopes, never
/// additive: when the user's global toggle for a type is on, it governs
/// every item; only when it is off does an item's own override flag take
/// effect. Items without override flags (wishlist, encyclopedia) pass
/// `None` and are governed by the global scope alone.
pub fn stage_enabled(
    global: ReminderToggles,
    item: Option<ReminderToggles>,
    reminder_type: ReminderType,
) -> bool {
    if global.get(reminder_type) {
        return true;
    }
    item.is_some_and(|toggles| toggles.get(reminder_type))
}

// ---------------------------------------------------------------------------
// Window matching
// ---------------------------------------------------------------------------

/// Whether `date` falls in the closed interval `[today, today + lead_days]`.
pub fn in_window(date: NaiveDate, today: NaiveDate, lead_days: i32) -> bool {
    date >= today && date <= today + Duration::days(i64::from(lead_days))
}

/// Select the events due within the user's reminder window.
///
/// Inclusive on both ends: an event dated exactly `today` and one dated
/// exactly `today + lead_days` are both due.
pub fn match_window(
    events: &[PlantingEvent],
    today: NaiveDate,
    lead_days: i32,
) -> Vec<PlantingEvent> {
    events
        .iter()
        .filter(|event| in_window(event.date, today, lead_days))
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Deduplication
// ---------------------------------------------------------------------------

/// The dedup key for one (reminder type, target date) pair.
///
/// Calendar date only: two runs on the same day produce identical keys for
/// the same target regardless of the time of day either run executed.
pub fn dedup_key(reminder_type: ReminderType, target_date: NaiveDate) -> String {
    format!("{}-{}", reminder_type.as_str(), target_date.format("%Y-%m-%d"))
}

/// Strip candidates whose (type, date) key has already been logged.
///
/// Events whose stage carries no reminder type are dropped too; they can
/// never be sent, so they must never reach the send path.
pub fn filter_new(candidates: Vec<PlantingEvent>, logged: &HashSet<String>) -> Vec<PlantingEvent> {
    candidates
        .into_iter()
        .filter(|event| {
            event
                .reminder_type()
                .is_some_and(|rt| !logged.contains(&dedup_key(rt, event.date)))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

/// Group due events into per-type buckets for message composition.
///
/// Bucket order follows [`ReminderType::ALL`]; within a bucket, events sort
/// by date then plant label so the email reads chronologically.
pub fn group_by_type(events: &[PlantingEvent]) -> BTreeMap<ReminderType, Vec<&PlantingEvent>> {
    let mut buckets: BTreeMap<ReminderType, Vec<&PlantingEvent>> = BTreeMap::new();
    for event in events {
        if let Some(rt) = event.reminder_type() {
            buckets.entry(rt).or_default().push(event);
        }
    }
    for bucket in buckets.values_mut() {
        bucket.sort_by(|a, b| (a.date, &a.plant_label).cmp(&(b.date, &b.plant_label)));
    }
    buckets
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
