//! "Near end" reminders for a doctor's examination queue.

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

use crate::models::QueueItem;

/// How long before the end of an examination the reminder appears.
pub const REMINDER_LEAD_MINUTES: i64 = 5;

/// A reminder the browser shows after `show_in_ms` for `duration_ms`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueReminder {
    pub id: String,
    pub queue_id: i64,
    pub patient_name: String,
    pub end_at: NaiveDateTime,
    pub show_in_ms: i64,
    pub duration_ms: i64,
}

/// Compute reminders for every queue item that has not ended yet.
///
/// An item already over, or with less than a second of reminder left, is
/// skipped.
pub fn reminders(items: &[QueueItem], now: NaiveDateTime) -> Vec<QueueReminder> {
    let lead = Duration::minutes(REMINDER_LEAD_MINUTES);

    items
        .iter()
        .filter_map(|item| {
            let end_at = item.end_at?;
            let time_left = end_at - now;
            if time_left <= Duration::zero() {
                return None;
            }

            let show_in = (time_left - lead).max(Duration::zero());
            let duration = time_left - show_in;
            if duration < Duration::seconds(1) {
                return None;
            }

            Some(QueueReminder {
                id: format!("queue-{}", item.id),
                queue_id: item.id,
                patient_name: item.patient_name.clone().unwrap_or_default(),
                end_at,
                show_in_ms: show_in.num_milliseconds(),
                duration_ms: duration.num_milliseconds(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 16)
            .and_then(|d| d.and_hms_opt(h, m, s))
            .unwrap()
    }

    fn item(id: i64, end_at: NaiveDateTime) -> QueueItem {
        QueueItem {
            id,
            patient_name: Some("Nguyễn Văn A".into()),
            end_at: Some(end_at),
            ..QueueItem::default()
        }
    }

    #[test]
    fn far_end_is_delayed_until_five_minutes_before() {
        let out = reminders(&[item(7, at(9, 30, 0))], at(9, 0, 0));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "queue-7");
        assert_eq!(out[0].show_in_ms, 25 * 60 * 1000);
        assert_eq!(out[0].duration_ms, 5 * 60 * 1000);
    }

    #[test]
    fn near_end_shows_immediately_for_the_remaining_time() {
        let out = reminders(&[item(1, at(9, 2, 0))], at(9, 0, 0));
        assert_eq!(out[0].show_in_ms, 0);
        assert_eq!(out[0].duration_ms, 2 * 60 * 1000);
    }

    #[test]
    fn ended_or_too_short_items_are_skipped() {
        let now = at(9, 0, 0);
        let items = [
            item(1, at(8, 59, 0)),
            item(2, now),
            item(3, now + Duration::milliseconds(500)),
            QueueItem {
                id: 4,
                ..QueueItem::default()
            },
        ];
        assert!(reminders(&items, now).is_empty());
    }
}
