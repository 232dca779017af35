use chrono::{DateTime, Utc};
use vitals_core::RawSample;

use super::{at, days, minutes, overlapping};

/// Hourly phone counts 08:00-20:00 plus half-hourly watch counts 09:00-12:00.
/// The watch ranks higher, so the morning overlap exercises reconciliation.
pub fn samples(start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<RawSample> {
    let mut out = Vec::new();
    for date in days(start, end) {
        for hour in 8..20u32 {
            let from = at(date, hour, 0);
            let value = f64::from(300 + (hour * 37) % 200);
            out.push(
                RawSample::new(
                    "HKQuantityTypeIdentifierStepCount",
                    value,
                    "count",
                    from,
                    from + minutes(60),
                    "mock-phone",
                )
                .with_priority(1)
                .observed_at(from + minutes(61)),
            );
        }
        for slot in 0..6i64 {
            let from = at(date, 9, 0) + minutes(slot * 30);
            out.push(
                RawSample::new(
                    "com.google.step_count.delta",
                    180.0,
                    "steps",
                    from,
                    from + minutes(30),
                    "mock-watch",
                )
                .with_priority(2),
            );
        }
    }
    overlapping(out, start, end)
}
