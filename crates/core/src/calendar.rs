//! Date arithmetic for the schedule calendar.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;

use crate::status::SCHEDULE_STEP_MINUTES;

/// Monday-to-Sunday week containing a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekRange {
    pub fn containing(day: NaiveDate) -> Self {
        let offset = i64::from(day.weekday().num_days_from_monday());
        let start = day - Duration::days(offset);
        Self {
            start,
            end: start + Duration::days(6),
        }
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take(7)
    }

    pub fn previous(&self) -> Self {
        Self::containing(self.start - Duration::days(7))
    }

    pub fn next(&self) -> Self {
        Self::containing(self.start + Duration::days(7))
    }
}

/// Index of the calendar slot a time falls into (0 = 00:00..00:15).
pub fn slot_index(at: NaiveDateTime) -> i64 {
    i64::from(at.hour() * 60 + at.minute()) / SCHEDULE_STEP_MINUTES
}

/// Number of slots an appointment covers, at least one.
///
/// Partially covered slots count as whole slots.
pub fn slot_span(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    let minutes = (end - start).num_minutes();
    if minutes <= 0 {
        return 1;
    }
    ((minutes + SCHEDULE_STEP_MINUTES - 1) / SCHEDULE_STEP_MINUTES).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_starts_on_monday() {
        // 2024-05-16 is a Thursday.
        let week = WeekRange::containing(date(2024, 5, 16));
        assert_eq!(week.start, date(2024, 5, 13));
        assert_eq!(week.end, date(2024, 5, 19));
        assert_eq!(week.days().count(), 7);
    }

    #[test]
    fn sunday_belongs_to_the_preceding_monday() {
        let week = WeekRange::containing(date(2024, 5, 19));
        assert_eq!(week.start, date(2024, 5, 13));
    }

    #[test]
    fn neighbouring_weeks() {
        let week = WeekRange::containing(date(2024, 1, 3));
        assert_eq!(week.previous().start, date(2023, 12, 25));
        assert_eq!(week.next().start, date(2024, 1, 8));
    }

    #[test]
    fn slots_are_fifteen_minutes() {
        let at = date(2024, 5, 16).and_hms_opt(8, 40, 0).unwrap();
        assert_eq!(slot_index(at), 34);

        let end = date(2024, 5, 16).and_hms_opt(9, 0, 0).unwrap();
        assert_eq!(slot_span(at, end), 2);
        assert_eq!(slot_span(end, at), 1);
    }
}
