use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use vitals_types::{DailySummary, Measurement, MetricKind, MetricType, NormalizedRecord, VitalsConfig};

use super::bucket::DayBuckets;
use super::calendar::CalendarConfig;

/// Knobs for [`aggregate_day`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateOptions {
    /// Longest span a single point sample is weighted for.
    pub max_hold: TimeDelta,
    /// End of the day being aggregated; caps the last point sample's hold.
    pub day_end: Option<DateTime<Utc>>,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            max_hold: TimeDelta::minutes(10),
            day_end: None,
        }
    }
}

impl AggregateOptions {
    /// Options derived from the orchestrator configuration.
    #[must_use]
    pub fn from_config(cfg: &VitalsConfig) -> Self {
        Self {
            max_hold: TimeDelta::from_std(cfg.max_heart_rate_hold)
                .unwrap_or_else(|_| TimeDelta::minutes(10)),
            day_end: None,
        }
    }

    /// Same options bounded by `end`.
    #[must_use]
    pub const fn with_day_end(mut self, end: DateTime<Utc>) -> Self {
        self.day_end = Some(end);
        self
    }
}

/// Aggregate one day's reconciled, bucketed records of `metric`.
///
/// Steps, sleep and workout are summed. Heart rate is averaged with each
/// sample weighted by how long it holds until the next one, capped at
/// `max_hold` and at the day's end. No contributing record yields
/// [`Measurement::Absent`], never zero.
#[must_use]
pub fn aggregate_day(
    metric: MetricType,
    records: &[NormalizedRecord],
    opts: &AggregateOptions,
) -> Measurement<f64> {
    let mut contributing: Vec<&NormalizedRecord> =
        records.iter().filter(|r| r.metric == metric).collect();
    if contributing.is_empty() {
        return Measurement::Absent;
    }

    match metric.kind() {
        MetricKind::Cumulative | MetricKind::Duration => {
            Measurement::Measured(contributing.iter().map(|r| r.value).sum::<f64>().max(0.0))
        }
        MetricKind::Point => {
            contributing.sort_by(|a, b| a.start.cmp(&b.start));
            Measurement::Measured(time_weighted_mean(&contributing, opts))
        }
    }
}

fn time_weighted_mean(samples: &[&NormalizedRecord], opts: &AggregateOptions) -> f64 {
    let mut weighted = 0.0;
    let mut total = 0.0;
    for (i, s) in samples.iter().enumerate() {
        // A cap past the representable range bounds nothing.
        let bounds = [
            s.start.checked_add_signed(opts.max_hold),
            samples.get(i + 1).map(|next| next.start),
            opts.day_end,
        ];
        let w = bounds
            .into_iter()
            .flatten()
            .min()
            .map_or(0, |hold_end| (hold_end - s.start).num_milliseconds().max(0))
            as f64;
        weighted += s.value * w;
        total += w;
    }
    if total > 0.0 {
        weighted / total
    } else {
        // Every hold collapsed; fall back to the plain mean.
        samples.iter().map(|s| s.value).sum::<f64>() / samples.len() as f64
    }
}

/// Build the summary of `date` from per-metric day buckets.
///
/// Metrics missing from `per_metric` (not requested, or failed) stay absent.
#[must_use]
pub fn summarize_day(
    date: NaiveDate,
    per_metric: &BTreeMap<MetricType, DayBuckets>,
    calendar: &CalendarConfig,
    opts: &AggregateOptions,
) -> DailySummary {
    let (_, day_end) = calendar.day_bounds(date);
    let opts = opts.with_day_end(day_end);
    let mut summary = DailySummary::empty(date);
    for (metric, buckets) in per_metric {
        let records = buckets.get(&date).map_or(&[][..], Vec::as_slice);
        summary.set(*metric, aggregate_day(*metric, records, &opts));
    }
    summary
}
