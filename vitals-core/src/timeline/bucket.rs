use std::collections::BTreeMap;

use chrono::NaiveDate;
use vitals_types::{MetricKind, NormalizedRecord};

use super::calendar::CalendarConfig;

/// Records grouped by local calendar day, ascending.
pub type DayBuckets = BTreeMap<NaiveDate, Vec<NormalizedRecord>>;

/// Split `records` into local calendar days.
///
/// Positive-length interval records are cut at local midnights and their
/// value apportioned by overlapped duration. Instants and point-metric records
/// land in the day containing their start.
#[must_use]
pub fn bucket(records: &[NormalizedRecord], calendar: &CalendarConfig) -> DayBuckets {
    let mut days = DayBuckets::new();
    for rec in records {
        if rec.is_instant() || rec.metric.kind() == MetricKind::Point {
            days.entry(calendar.date_of(rec.start))
                .or_default()
                .push(rec.clone());
            continue;
        }

        let last_day = calendar.date_of(rec.end);
        let mut day = calendar.date_of(rec.start);
        loop {
            let (day_start, day_end) = calendar.day_bounds(day);
            let from = rec.start.max(day_start);
            let to = rec.end.min(day_end);
            if to > from {
                let part = if from == rec.start && to == rec.end {
                    rec.clone()
                } else {
                    rec.with_span(from, to, rec.apportion(from, to))
                };
                days.entry(day).or_default().push(part);
            }
            if rec.end <= day_end || day >= last_day {
                break;
            }
            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }
    }
    days
}
