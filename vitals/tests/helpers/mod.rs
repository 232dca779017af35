
pub use mock_source::MockSource;

use std::sync::Arc;

use vitals::{RawSample, SampleSource, Vitals, VitalsBuilder};

// ---------- Lightweight fixtures and helpers for tests ----------

/// Recording source ids used across tests.
pub const PHONE: &str = "phone";
pub const WATCH: &str = "watch";
#[allow(dead_code)]
pub const RING: &str = "ring";

/// Construct a UTC `DateTime` from components for readability in tests.
pub fn dt(y: i32, m: u32, d: u32, hh: u32, mm: u32, ss: u32) -> chrono::DateTime<chrono::Utc> {
    let date = chrono::NaiveDate::from_ymd_opt(y, m, d).expect("invalid date");
    let naive = date
        .and_hms_opt(hh, mm, ss)
        .expect("invalid time components");
    chrono::DateTime::<chrono::Utc>::from_naive_utc_and_offset(naive, chrono::Utc)
}

/// Calendar date shorthand.
pub fn day(y: i32, m: u32, d: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(y, m, d).expect("invalid date")
}

/// Step count sample over `[start, end)`.
pub fn steps(
    value: f64,
    start: chrono::DateTime<chrono::Utc>,
    end: chrono::DateTime<chrono::Utc>,
    source: &str,
    priority: i32,
) -> RawSample {
    RawSample::new("steps", value, "count", start, end, source).with_priority(priority)
}

/// Instantaneous heart-rate sample in bpm.
#[allow(dead_code)]
pub fn bpm(value: f64, at: chrono::DateTime<chrono::Utc>, source: &str) -> RawSample {
    RawSample::new("heart_rate", value, "bpm", at, at, source)
}

/// Duration sample (sleep or workout) whose value is its own length in seconds.
#[allow(dead_code)]
pub fn session(
    metric: &str,
    start: chrono::DateTime<chrono::Utc>,
    end: chrono::DateTime<chrono::Utc>,
    source: &str,
) -> RawSample {
    let secs = (end - start).num_seconds() as f64;
    RawSample::new(metric, secs, "s", start, end, source)
}

/// A builder preloaded with `source`.
pub fn vitals_with(source: Arc<dyn SampleSource>) -> VitalsBuilder {
    Vitals::builder().source(source)
}
