use chrono::{DateTime, Datelike, Utc};
use vitals_core::RawSample;

use super::{at, days, minutes, overlapping};

/// A 45 minute morning workout on even days of the month; odd days have none.
pub fn samples(start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<RawSample> {
    let out = days(start, end)
        .filter(|d| d.day() % 2 == 0)
        .map(|date| {
            let from = at(date, 7, 0);
            RawSample::new(
                "HKWorkoutTypeIdentifier",
                0.75,
                "hours",
                from,
                from + minutes(45),
                "mock-watch",
            )
        })
        .collect();
    overlapping(out, start, end)
}
