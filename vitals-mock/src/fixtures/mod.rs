use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use vitals_core::RawSample;

pub mod heart_rate;
pub mod sleep;
pub mod steps;
pub mod workout;

// Days whose fixtures may overlap `[start, end)`; sleep starts the evening before.
fn days(start: DateTime<Utc>, end: DateTime<Utc>) -> impl Iterator<Item = NaiveDate> {
    let first = start.date_naive().pred_opt().unwrap_or(start.date_naive());
    let last = end.date_naive();
    first.iter_days().take_while(move |d| *d <= last)
}

fn at(date: NaiveDate, h: u32, m: u32) -> DateTime<Utc> {
    let time = NaiveTime::from_hms_opt(h, m, 0).unwrap_or(NaiveTime::MIN);
    date.and_time(time).and_utc()
}

fn minutes(n: i64) -> TimeDelta {
    TimeDelta::minutes(n)
}

fn overlapping(samples: Vec<RawSample>, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<RawSample> {
    samples
        .into_iter()
        .filter(|s| {
            if s.start == s.end {
                s.start >= start && s.start < end
            } else {
                s.end > start && s.start < end
            }
        })
        .collect()
}
