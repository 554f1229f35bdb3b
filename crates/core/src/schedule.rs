//! Week-offset arithmetic: from a last-frost anchor to planting dates.
//!
//! Offsets are stored with two different sign conventions, preserved here
//! exactly as the settings UI writes them:
//!
//! - `indoor_start_weeks` is entered as unsigned "weeks before frost"; the
//!   stored sign is ignored and the value is always subtracted.
//! - `outdoor_start_weeks` and `transplant_weeks` are signed weeks relative
//!   to frost (negative legitimately lands before frost).
//! - `harvest_weeks` counts forward from the resolved outdoor-start date,
//!   falling back to the transplant date when no outdoor start exists.
//!
//! Every field is independently nullable; a missing offset simply means no
//! date is derivable for that stage.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Offsets
// ---------------------------------------------------------------------------

/// The week-offsets a plant carries, from an encyclopedia guide or from an
/// inventory/wishlist item's own custom columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantScheduleOffsets {
    /// Unsigned weeks before last frost to start seeds indoors.
    pub indoor_start_weeks: Option<i32>,
    /// Signed weeks relative to last frost for direct sowing outdoors.
    pub outdoor_start_weeks: Option<i32>,
    /// Signed weeks relative to last frost for transplanting out.
    pub transplant_weeks: Option<i32>,
    /// Weeks from the outdoor-start (or transplant) date to first harvest.
    pub harvest_weeks: Option<i32>,
}

impl PlantScheduleOffsets {
    /// Whether any stage offset is present at all.
    pub fn is_empty(&self) -> bool {
        self.indoor_start_weeks.is_none()
            && self.outdoor_start_weeks.is_none()
            && self.transplant_weeks.is_none()
            && self.harvest_weeks.is_none()
    }
}

// ---------------------------------------------------------------------------
// Stages
// ---------------------------------------------------------------------------

/// A derivable stage in a plant's season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    IndoorStart,
    DirectSow,
    Transplant,
    Harvest,
}

impl Stage {
    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::IndoorStart => "Start seeds indoors",
            Self::DirectSow => "Sow outdoors",
            Self::Transplant => "Transplant out",
            Self::Harvest => "First harvest",
        }
    }
}

// ---------------------------------------------------------------------------
// Derived dates
// ---------------------------------------------------------------------------

/// Concrete dates derived from one set of offsets against one frost anchor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlantingDates {
    pub indoor_start: Option<NaiveDate>,
    pub outdoor_start: Option<NaiveDate>,
    pub transplant: Option<NaiveDate>,
    pub harvest: Option<NaiveDate>,
}

impl PlantingDates {
    /// Iterate the non-null dates with their stage.
    pub fn stages(&self) -> impl Iterator<Item = (Stage, NaiveDate)> {
        [
            (Stage::IndoorStart, self.indoor_start),
            (Stage::DirectSow, self.outdoor_start),
            (Stage::Transplant, self.transplant),
            (Stage::Harvest, self.harvest),
        ]
        .into_iter()
        .filter_map(|(stage, date)| date.map(|d| (stage, d)))
    }
}

/// Derive planting dates from a last-frost anchor and a set of offsets.
///
/// Pure arithmetic: no clamping, no re-projection. Dates may land outside
/// the anchor's year; that is the caller's concern if it matters to them.
pub fn calculate(last_frost: NaiveDate, offsets: &PlantScheduleOffsets) -> PlantingDates {
    let indoor_start = offsets
        .indoor_start_weeks
        .map(|w| last_frost - Duration::weeks(i64::from(w.abs())));
    let outdoor_start = offsets
        .outdoor_start_weeks
        .map(|w| last_frost + Duration::weeks(i64::from(w)));
    let transplant = offsets
        .transplant_weeks
        .map(|w| last_frost + Duration::weeks(i64::from(w)));

    // Outdoor start is the preferred harvest base; transplant is the
    // fallback. No base date means no harvest date.
    let harvest = match (offsets.harvest_weeks, outdoor_start.or(transplant)) {
        (Some(w), Some(base)) => Some(base + Duration::weeks(i64::from(w))),
        _ => None,
    };

    PlantingDates {
        indoor_start,
        outdoor_start,
        transplant,
        harvest,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn frost() -> NaiveDate {
        date(2025, 4, 15)
    }

    // -- indoor start ---------------------------------------------------------

    #[test]
    fn indoor_start_subtracts_weeks() {
        let dates = calculate(
            frost(),
            &PlantScheduleOffsets {
                indoor_start_weeks: Some(8),
                ..Default::default()
            },
        );
        assert_eq!(dates.indoor_start, Some(date(2025, 2, 18)));
    }

    #[test]
    fn indoor_start_ignores_stored_sign() {
        // The UI stores weeks-before-frost unsigned; a negative value that
        // slipped into storage must still mean "before".
        let positive = calculate(
            frost(),
            &PlantScheduleOffsets {
                indoor_start_weeks: Some(6),
                ..Default::default()
            },
        );
        let negative = calculate(
            frost(),
            &PlantScheduleOffsets {
                indoor_start_weeks: Some(-6),
                ..Default::default()
            },
        );
        assert_eq!(positive.indoor_start, negative.indoor_start);
        assert_eq!(positive.indoor_start, Some(date(2025, 3, 4)));
    }

    // -- outdoor start / transplant -------------------------------------------

    #[test]
    fn outdoor_start_is_signed_addition() {
        let after = calculate(
            frost(),
            &PlantScheduleOffsets {
                outdoor_start_weeks: Some(2),
                ..Default::default()
            },
        );
        assert_eq!(after.outdoor_start, Some(date(2025, 4, 29)));

        let before = calculate(
            frost(),
            &PlantScheduleOffsets {
                outdoor_start_weeks: Some(-3),
                ..Default::default()
            },
        );
        assert_eq!(before.outdoor_start, Some(date(2025, 3, 25)));
    }

    #[test]
    fn transplant_is_signed_addition() {
        let dates = calculate(
            frost(),
            &PlantScheduleOffsets {
                transplant_weeks: Some(-1),
                ..Default::default()
            },
        );
        assert_eq!(dates.transplant, Some(date(2025, 4, 8)));
    }

    #[test]
    fn zero_offset_lands_on_frost_day() {
        let dates = calculate(
            frost(),
            &PlantScheduleOffsets {
                outdoor_start_weeks: Some(0),
                ..Default::default()
            },
        );
        assert_eq!(dates.outdoor_start, Some(frost()));
    }

    // -- harvest --------------------------------------------------------------

    #[test]
    fn harvest_prefers_outdoor_start_base() {
        let dates = calculate(
            frost(),
            &PlantScheduleOffsets {
                outdoor_start_weeks: Some(0),
                transplant_weeks: Some(2),
                harvest_weeks: Some(10),
                ..Default::default()
            },
        );
        // Base is the outdoor start (Apr 15), not the transplant (Apr 29).
        assert_eq!(dates.harvest, Some(date(2025, 6, 24)));
    }

    #[test]
    fn harvest_falls_back_to_transplant_base() {
        let dates = calculate(
            frost(),
            &PlantScheduleOffsets {
                transplant_weeks: Some(2),
                harvest_weeks: Some(4),
                ..Default::default()
            },
        );
        assert_eq!(dates.harvest, Some(date(2025, 5, 27)));
    }

    #[test]
    fn harvest_is_none_without_base_date() {
        let dates = calculate(
            frost(),
            &PlantScheduleOffsets {
                indoor_start_weeks: Some(8),
                harvest_weeks: Some(10),
                ..Default::default()
            },
        );
        assert_eq!(dates.harvest, None);
    }

    #[test]
    fn harvest_is_none_without_harvest_weeks() {
        let dates = calculate(
            frost(),
            &PlantScheduleOffsets {
                outdoor_start_weeks: Some(0),
                ..Default::default()
            },
        );
        assert_eq!(dates.harvest, None);
    }

    // -- full scenario --------------------------------------------------------

    #[test]
    fn worked_example_against_mid_april_frost() {
        let dates = calculate(
            frost(),
            &PlantScheduleOffsets {
                indoor_start_weeks: Some(8),
                outdoor_start_weeks: Some(0),
                transplant_weeks: Some(2),
                harvest_weeks: Some(12),
            },
        );
        assert_eq!(dates.indoor_start, Some(date(2025, 2, 18)));
        assert_eq!(dates.outdoor_start, Some(date(2025, 4, 15)));
        assert_eq!(dates.transplant, Some(date(2025, 4, 29)));
        assert_eq!(dates.harvest, Some(date(2025, 7, 8)));
    }

    #[test]
    fn empty_offsets_derive_nothing() {
        let offsets = PlantScheduleOffsets::default();
        assert!(offsets.is_empty());
        let dates = calculate(frost(), &offsets);
        assert_eq!(dates, PlantingDates::default());
        assert_eq!(dates.stages().count(), 0);
    }
}
