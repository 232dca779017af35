use chrono::{DateTime, Utc};
use vitals_core::RawSample;

use super::{at, days, minutes, overlapping};

/// Nightly ring session 23:00-06:30 and an overlapping, lower-priority phone
/// estimate 22:45-06:15.
pub fn samples(start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<RawSample> {
    let mut out = Vec::new();
    for date in days(start, end) {
        let ring_from = at(date, 23, 0);
        out.push(
            RawSample::new(
                "HKCategoryTypeIdentifierSleepAnalysis",
                450.0,
                "min",
                ring_from,
                ring_from + minutes(450),
                "mock-ring",
            )
            .with_priority(2),
        );
        let phone_from = at(date, 22, 45);
        out.push(RawSample::new(
            "com.google.sleep.segment",
            450.0 * 60.0,
            "s",
            phone_from,
            phone_from + minutes(450),
            "mock-phone",
        ));
    }
    overlapping(out, start, end)
}
