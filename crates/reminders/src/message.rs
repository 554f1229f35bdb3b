//! Consolidated reminder email composition.
//!
//! One message per user per run: every due (plant, stage) pair lands in the
//! same email, grouped into the three reminder-type buckets. Never one email
//! per plant.

use std::collections::BTreeMap;

use trellis_core::reminder::{PlantingEvent, ReminderType};

/// Subject prefix for all engine mail.
const SUBJECT_PREFIX: &str = "[Trellis]";

/// A composed email, ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailContent {
    pub subject: String,
    pub body: String,
}

/// Compose the consolidated reminder email from per-type buckets.
///
/// Buckets arrive pre-sorted (date, then label) from
/// [`group_by_type`](trellis_core::reminder::group_by_type); composition
/// preserves that order so the email reads chronologically within each
/// section.
pub fn compose(
    display_name: &str,
    buckets: &BTreeMap<ReminderType, Vec<&PlantingEvent>>,
) -> EmailContent {
    let total: usize = buckets.values().map(Vec::len).sum();
    let subject = if total == 1 {
        format!("{SUBJECT_PREFIX} 1 planting task coming up")
    } else {
        format!("{SUBJECT_PREFIX} {total} planting tasks coming up")
    };

    let mut body = String::new();
    if display_name.is_empty() {
        body.push_str("Hi,\n\n");
    } else {
        body.push_str(&format!("Hi {display_name},\n\n"));
    }
    body.push_str("Here's what your garden needs soon:\n");

    for reminder_type in ReminderType::ALL {
        let Some(events) = buckets.get(&reminder_type) else {
            continue;
        };
        if events.is_empty() {
            continue;
        }
        body.push_str(&format!("\n{}:\n", reminder_type.label()));
        for event in events {
            body.push_str(&format!(
                "  - {} — {}\n",
                event.display_label(),
                event.date.format("%b %-d")
            ));
        }
    }

    body.push_str("\nHappy growing!\n");

    EmailContent { subject, body }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use trellis_core::reminder::{group_by_type, EventSource};
    use trellis_core::schedule::Stage;

    fn event(label: &str, variety: Option<&str>, stage: Stage, day: u32) -> PlantingEvent {
        PlantingEvent {
            plant_label: label.to_string(),
            variety: variety.map(str::to_string),
            category: None,
            stage,
            date: NaiveDate::from_ymd_opt(2025, 4, day).unwrap(),
            source: EventSource::Inventory,
        }
    }

    #[test]
    fn groups_all_types_into_one_body() {
        let events = vec![
            event("Tomato", Some("Brandywine"), Stage::Transplant, 20),
            event("Carrot", None, Stage::DirectSow, 16),
            event("Basil", None, Stage::IndoorStart, 15),
        ];
        let buckets = group_by_type(&events);
        let content = compose("Sam", &buckets);

        assert_eq!(content.subject, "[Trellis] 3 planting tasks coming up");
        assert!(content.body.starts_with("Hi Sam,"));
        assert!(content.body.contains("Start seeds indoors:\n  - Basil — Apr 15"));
        assert!(content.body.contains("Sow outdoors:\n  - Carrot — Apr 16"));
        assert!(content
            .body
            .contains("Transplant out:\n  - Tomato (Brandywine) — Apr 20"));
    }

    #[test]
    fn singular_subject_for_one_task() {
        let events = vec![event("Kale", None, Stage::DirectSow, 16)];
        let content = compose("", &group_by_type(&events));
        assert_eq!(content.subject, "[Trellis] 1 planting task coming up");
        assert!(content.body.starts_with("Hi,\n"));
    }

    #[test]
    fn bucket_sections_read_chronologically() {
        let events = vec![
            event("Zinnia", None, Stage::DirectSow, 22),
            event("Aster", None, Stage::DirectSow, 16),
        ];
        let content = compose("Sam", &group_by_type(&events));
        let aster = content.body.find("Aster").unwrap();
        let zinnia = content.body.find("Zinnia").unwrap();
        assert!(aster < zinnia);
    }

    #[test]
    fn plants_sharing_date_and_type_share_one_section() {
        let events = vec![
            event("Kale", None, Stage::DirectSow, 16),
            event("Carrot", None, Stage::DirectSow, 16),
        ];
        let content = compose("Sam", &group_by_type(&events));
        assert_eq!(content.body.matches("Sow outdoors:").count(), 1);
        assert!(content.body.contains("Carrot"));
        assert!(content.body.contains("Kale"));
    }
}
