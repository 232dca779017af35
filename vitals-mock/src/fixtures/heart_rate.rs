use chrono::{DateTime, TimeDelta, Utc};
use vitals_core::RawSample;

use super::{at, days, minutes, overlapping};

/// Watch readings every 10 minutes 06:00-22:00; a chest strap duplicates the
/// 18:00-18:40 readings one second later with a higher priority.
pub fn samples(start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<RawSample> {
    let mut out = Vec::new();
    for date in days(start, end) {
        for i in 0..96i64 {
            let ts = at(date, 6, 0) + minutes(i * 10);
            let bpm = 60.0 + ((i * 7) % 30) as f64;
            out.push(RawSample::new(
                "HKQuantityTypeIdentifierHeartRate",
                bpm,
                "count/min",
                ts,
                ts,
                "mock-watch",
            ));
        }
        for i in 0..5i64 {
            let ts = at(date, 18, 0) + minutes(i * 10) + TimeDelta::seconds(1);
            out.push(
                RawSample::new("heart_rate", 2.0, "Hz", ts, ts, "mock-strap").with_priority(3),
            );
        }
    }
    overlapping(out, start, end)
}
