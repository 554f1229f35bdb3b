//! Schedule aggregation across the three plant data sources.
//!
//! The calendar path merges encyclopedia guides with the user's inventory
//! and wishlist; the reminder path covers only plants the user owns or
//! wants, and applies stage-toggle filtering here, before window matching,
//! so a disabled stage can never consume a reminder-log row just because its
//! date happened to fall in the window.

use std::collections::HashSet;

use chrono::NaiveDate;
use sqlx::PgPool;
use trellis_core::reminder::{
    stage_enabled, EventSource, PlantingEvent, ReminderToggles, ReminderType,
};
use trellis_core::schedule::{calculate, PlantScheduleOffsets};
use trellis_core::types::DbId;
use trellis_db::models::growing_profile::ReminderCandidate;
use trellis_db::models::inventory::InventorySeedWithGuide;
use trellis_db::models::plant_guide::PlantGuide;
use trellis_db::models::wishlist::WishlistItemWithGuide;
use trellis_db::repositories::{InventorySeedRepo, PlantGuideRepo, WishlistRepo};

// ---------------------------------------------------------------------------
// ScheduleAggregator
// ---------------------------------------------------------------------------

/// Merges derived planting dates into one normalized event list per user.
pub struct ScheduleAggregator;

impl ScheduleAggregator {
    /// All events for the calendar view: encyclopedia guides (optionally
    /// filtered to one category; `None` is "all"), plus the user's inventory
    /// and wishlist. Sorted by plant label for rendering.
    pub async fn calendar_events(
        pool: &PgPool,
        user_id: DbId,
        last_frost: NaiveDate,
        category: Option<&str>,
    ) -> Result<Vec<PlantingEvent>, sqlx::Error> {
        let guides = PlantGuideRepo::list(pool, category).await?;
        let seeds = InventorySeedRepo::list_active_for_user(pool, user_id).await?;
        let wishes = WishlistRepo::list_unpurchased_for_user(pool, user_id).await?;
        Ok(build_calendar_events(&guides, &seeds, &wishes, last_frost))
    }

    /// Reminder candidates for one user: inventory and wishlist events whose
    /// stage toggle resolves enabled. Encyclopedia guides never feed the
    /// reminder path: reminders are about plants the user owns or wants,
    /// not the whole shared encyclopedia.
    pub async fn reminder_events(
        pool: &PgPool,
        candidate: &ReminderCandidate,
        last_frost: NaiveDate,
    ) -> Result<Vec<PlantingEvent>, sqlx::Error> {
        let seeds = InventorySeedRepo::list_active_for_user(pool, candidate.user_id).await?;
        let wishes = WishlistRepo::list_unpurchased_for_user(pool, candidate.user_id).await?;
        Ok(build_reminder_events(
            candidate.global_toggles(),
            &seeds,
            &wishes,
            last_frost,
        ))
    }
}

// ---------------------------------------------------------------------------
// Event assembly (pure)
// ---------------------------------------------------------------------------

/// Key under which inventory/wishlist items deduplicate against each other.
type SeenPair = (String, Option<String>);

fn seen_pair(name: &str, variety: Option<&str>) -> SeenPair {
    (name.to_string(), variety.map(str::to_string))
}

/// Push one event per non-null derived date.
fn push_events(
    events: &mut Vec<PlantingEvent>,
    label: &str,
    variety: Option<&str>,
    category: Option<&str>,
    source: EventSource,
    last_frost: NaiveDate,
    offsets: &PlantScheduleOffsets,
) {
    for (stage, date) in calculate(last_frost, offsets).stages() {
        events.push(PlantingEvent {
            plant_label: label.to_string(),
            variety: variety.map(str::to_string),
            category: category.map(str::to_string),
            stage,
            date,
            source,
        });
    }
}

/// Assemble calendar events from already-fetched rows.
///
/// The (name, variety) seen-set spans the inventory and wishlist passes:
/// inventory always runs first, so a pair appearing in both yields only the
/// inventory-derived events. Encyclopedia guides are exempt; the calendar
/// shows a guide alongside the user's own copy of the same plant.
pub fn build_calendar_events(
    guides: &[PlantGuide],
    seeds: &[InventorySeedWithGuide],
    wishes: &[WishlistItemWithGuide],
    last_frost: NaiveDate,
) -> Vec<PlantingEvent> {
    let mut events = Vec::new();

    for guide in guides {
        push_events(
            &mut events,
            &guide.name,
            guide.variety.as_deref(),
            guide.category.as_deref(),
            EventSource::Guide,
            last_frost,
            &guide.offsets(),
        );
    }

    let mut seen: HashSet<SeenPair> = HashSet::new();
    for seed in seeds {
        if !seen.insert(seen_pair(&seed.name, seed.variety.as_deref())) {
            continue;
        }
        push_events(
            &mut events,
            &seed.name,
            seed.variety.as_deref(),
            seed.display_category(),
            EventSource::Inventory,
            last_frost,
            &seed.effective_offsets(),
        );
    }
    for wish in wishes {
        if !seen.insert(seen_pair(&wish.name, wish.variety.as_deref())) {
            continue;
        }
        push_events(
            &mut events,
            &wish.name,
            wish.variety.as_deref(),
            wish.display_category(),
            EventSource::Wishlist,
            last_frost,
            &wish.effective_offsets(),
        );
    }

    events.sort_by(|a, b| (&a.plant_label, &a.variety, a.date).cmp(&(&b.plant_label, &b.variety, b.date)));
    events
}

/// Assemble reminder candidates from already-fetched rows, keeping only
/// stages whose toggle resolves enabled (global scope first, per-seed
/// overrides only where the global toggle for that type is off). Wishlist
/// items carry no overrides and answer to the global scope alone.
pub fn build_reminder_events(
    global: ReminderToggles,
    seeds: &[InventorySeedWithGuide],
    wishes: &[WishlistItemWithGuide],
    last_frost: NaiveDate,
) -> Vec<PlantingEvent> {
    let mut events = Vec::new();
    let mut seen: HashSet<SeenPair> = HashSet::new();

    for seed in seeds {
        if !seen.insert(seen_pair(&seed.name, seed.variety.as_deref())) {
            continue;
        }
        let dates = calculate(last_frost, &seed.effective_offsets());
        for (stage, date) in dates.stages() {
            let Some(reminder_type) = ReminderType::for_stage(stage) else {
                continue;
            };
            if !stage_enabled(global, Some(seed.item_toggles()), reminder_type) {
                continue;
            }
            events.push(PlantingEvent {
                plant_label: seed.name.clone(),
                variety: seed.variety.clone(),
                category: seed.display_category().map(str::to_string),
                stage,
                date,
                source: EventSource::Inventory,
            });
        }
    }

    for wish in wishes {
        if !seen.insert(seen_pair(&wish.name, wish.variety.as_deref())) {
            continue;
        }
        let dates = calculate(last_frost, &wish.effective_offsets());
        for (stage, date) in dates.stages() {
            let Some(reminder_type) = ReminderType::for_stage(stage) else {
                continue;
            };
            if !stage_enabled(global, None, reminder_type) {
                continue;
            }
            events.push(PlantingEvent {
                plant_label: wish.name.clone(),
                variety: wish.variety.clone(),
                category: wish.display_category().map(str::to_string),
                stage,
                date,
                source: EventSource::Wishlist,
            });
        }
    }

    events
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use trellis_core::schedule::Stage;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn frost() -> NaiveDate {
        date(2025, 4, 15)
    }

    fn seed(name: &str, variety: Option<&str>) -> InventorySeedWithGuide {
        InventorySeedWithGuide {
            id: 1,
            user_id: 1,
            plant_guide_id: None,
            name: name.to_string(),
            variety: variety.map(str::to_string),
            category: None,
            indoor_start_weeks: None,
            outdoor_start_weeks: None,
            transplant_weeks: None,
            harvest_weeks: None,
            remind_indoor_start: false,
            remind_direct_sow: false,
            remind_transplant: false,
            guide_category: None,
            guide_indoor_start_weeks: None,
            guide_outdoor_start_weeks: None,
            guide_transplant_weeks: None,
            guide_harvest_weeks: None,
        }
    }

    fn wish(name: &str, variety: Option<&str>) -> WishlistItemWithGuide {
        WishlistItemWithGuide {
            id: 1,
            user_id: 1,
            plant_guide_id: None,
            name: name.to_string(),
            variety: variety.map(str::to_string),
            category: None,
            indoor_start_weeks: None,
            outdoor_start_weeks: None,
            transplant_weeks: None,
            harvest_weeks: None,
            guide_category: None,
            guide_indoor_start_weeks: None,
            guide_outdoor_start_weeks: None,
            guide_transplant_weeks: None,
            guide_harvest_weeks: None,
        }
    }

    fn all_on() -> ReminderToggles {
        ReminderToggles {
            indoor_start: true,
            direct_sow: true,
            transplant: true,
        }
    }

    // -- offset precedence ----------------------------------------------------

    #[test]
    fn linked_guide_offsets_beat_custom_offsets() {
        let mut s = seed("Tomato", None);
        s.plant_guide_id = Some(42);
        s.outdoor_start_weeks = Some(99);
        s.guide_outdoor_start_weeks = Some(2);

        let events = build_reminder_events(all_on(), &[s], &[], frost());
        assert_eq!(events.len(), 1);
        // Two weeks after frost, never ninety-nine.
        assert_eq!(events[0].date, date(2025, 4, 29));
    }

    #[test]
    fn linked_guide_is_authoritative_even_where_null() {
        // The guide link wins in full: a custom transplant offset on the
        // seed must not fill the guide's missing transplant offset.
        let mut s = seed("Tomato", None);
        s.plant_guide_id = Some(42);
        s.transplant_weeks = Some(3);
        s.guide_outdoor_start_weeks = Some(1);

        let events = build_reminder_events(all_on(), &[s], &[], frost());
        assert_matches!(events.as_slice(), [only] if only.stage == Stage::DirectSow);
    }

    #[test]
    fn custom_offsets_apply_without_guide_link() {
        let mut s = seed("Landrace bean", None);
        s.outdoor_start_weeks = Some(1);

        let events = build_reminder_events(all_on(), &[s], &[], frost());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].date, date(2025, 4, 22));
    }

    // -- toggle scopes --------------------------------------------------------

    #[test]
    fn per_seed_override_only_reaches_opted_in_seed() {
        // Global indoor-start off; one seed opts in, the other carries no
        // flags. Only the opted-in seed may produce an indoor-start event.
        let mut opted_in = seed("Pepper", None);
        opted_in.indoor_start_weeks = Some(8);
        opted_in.remind_indoor_start = true;

        let mut silent = seed("Tomato", None);
        silent.indoor_start_weeks = Some(6);

        let events = build_reminder_events(
            ReminderToggles::default(),
            &[opted_in, silent],
            &[],
            frost(),
        );
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].plant_label, "Pepper");
        assert_eq!(events[0].stage, Stage::IndoorStart);
    }

    #[test]
    fn global_toggle_covers_seeds_without_flags() {
        let mut s = seed("Carrot", None);
        s.outdoor_start_weeks = Some(0);

        let global = ReminderToggles {
            direct_sow: true,
            ..Default::default()
        };
        let events = build_reminder_events(global, &[s], &[], frost());
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn disabled_stage_is_dropped_before_any_matching() {
        let mut s = seed("Tomato", None);
        s.indoor_start_weeks = Some(8);
        s.outdoor_start_weeks = Some(0);

        let global = ReminderToggles {
            direct_sow: true,
            ..Default::default()
        };
        let events = build_reminder_events(global, &[s], &[], frost());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].stage, Stage::DirectSow);
    }

    #[test]
    fn wishlist_answers_to_global_scope_only() {
        let mut w = wish("Artichoke", None);
        w.outdoor_start_weeks = Some(0);

        let none = build_reminder_events(ReminderToggles::default(), &[], &[w.clone()], frost());
        assert!(none.is_empty());

        let global = ReminderToggles {
            direct_sow: true,
            ..Default::default()
        };
        let some = build_reminder_events(global, &[], &[w], frost());
        assert_eq!(some.len(), 1);
        assert_eq!(some[0].source, EventSource::Wishlist);
    }

    #[test]
    fn harvest_dates_never_become_reminder_candidates() {
        let mut s = seed("Squash", None);
        s.outdoor_start_weeks = Some(0);
        s.harvest_weeks = Some(8);

        let events = build_reminder_events(all_on(), &[s], &[], frost());
        let stages: Vec<Stage> = events.iter().map(|e| e.stage).collect();
        assert!(!stages.contains(&Stage::Harvest));
        assert_eq!(events.len(), 1);
    }

    // -- cross-pass dedup -----------------------------------------------------

    #[test]
    fn inventory_wins_over_wishlist_for_same_pair() {
        let mut s = seed("Tomato", Some("Brandywine"));
        s.outdoor_start_weeks = Some(0);
        let mut w = wish("Tomato", Some("Brandywine"));
        w.outdoor_start_weeks = Some(4);

        let events = build_reminder_events(all_on(), &[s], &[w], frost());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].source, EventSource::Inventory);
        assert_eq!(events[0].date, frost());
    }

    #[test]
    fn different_varieties_are_distinct_pairs() {
        let mut s = seed("Tomato", Some("Brandywine"));
        s.outdoor_start_weeks = Some(0);
        let mut w = wish("Tomato", Some("Sungold"));
        w.outdoor_start_weeks = Some(0);

        let events = build_reminder_events(all_on(), &[s], &[w], frost());
        assert_eq!(events.len(), 2);
    }

    // -- calendar assembly ----------------------------------------------------

    #[test]
    fn calendar_sorts_by_plant_label() {
        let guide = PlantGuide {
            id: 1,
            name: "Zinnia".to_string(),
            variety: None,
            category: Some("flowers".to_string()),
            indoor_start_weeks: None,
            outdoor_start_weeks: Some(1),
            transplant_weeks: None,
            harvest_weeks: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let mut s = seed("Basil", None);
        s.outdoor_start_weeks = Some(2);

        let events = build_calendar_events(&[guide], &[s], &[], frost());
        let labels: Vec<&str> = events.iter().map(|e| e.plant_label.as_str()).collect();
        assert_eq!(labels, vec!["Basil", "Zinnia"]);
    }

    #[test]
    fn calendar_keeps_guide_next_to_owned_copy() {
        // The seen-set covers inventory/wishlist only: a guide for the same
        // plant still renders alongside the user's own seed.
        let guide = PlantGuide {
            id: 1,
            name: "Tomato".to_string(),
            variety: None,
            category: None,
            indoor_start_weeks: None,
            outdoor_start_weeks: Some(1),
            transplant_weeks: None,
            harvest_weeks: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let mut s = seed("Tomato", None);
        s.outdoor_start_weeks = Some(1);

        let events = build_calendar_events(&[guide], &[s], &[], frost());
        assert_eq!(events.len(), 2);
        assert!(events.iter().any(|e| e.source == EventSource::Guide));
        assert!(events.iter().any(|e| e.source == EventSource::Inventory));
    }

    #[test]
    fn calendar_includes_harvest_events() {
        let mut s = seed("Squash", None);
        s.outdoor_start_weeks = Some(0);
        s.harvest_weeks = Some(8);

        let events = build_calendar_events(&[], &[s], &[], frost());
        assert_eq!(events.len(), 2);
        assert!(events.iter().any(|e| e.stage == Stage::Harvest));
    }
}
