//! Raw samples as delivered by a source and their normalized form.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::metric::MetricType;

/// A measurement exactly as the external source produced it.
///
/// Metric identifiers and units are free-form strings; the normalizer maps
/// them onto [`MetricType`] and its canonical unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    /// Source-specific metric identifier (e.g. `HKQuantityTypeIdentifierStepCount`).
    pub metric: String,
    /// Numeric value in `unit`.
    pub value: f64,
    /// Source-specific unit string (e.g. `count/min`).
    pub unit: String,
    /// Interval start (UTC).
    pub start: DateTime<Utc>,
    /// Interval end (UTC). Equal to `start` for instantaneous samples.
    pub end: DateTime<Utc>,
    /// Recording source (phone sensor, wearable, manual entry...).
    pub source_id: String,
    /// Priority the source assigned itself; higher wins conflicts.
    pub source_priority: i32,
    /// When the source recorded the sample, if known.
    pub observed_at: Option<DateTime<Utc>>,
}

impl RawSample {
    /// Build a sample with priority 0 and no observation time.
    pub fn new(
        metric: impl Into<String>,
        value: f64,
        unit: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        source_id: impl Into<String>,
    ) -> Self {
        Self {
            metric: metric.into(),
            value,
            unit: unit.into(),
            start,
            end,
            source_id: source_id.into(),
            source_priority: 0,
            observed_at: None,
        }
    }

    /// Set the self-reported source priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: i32) -> Self {
        self.source_priority = priority;
        self
    }

    /// Set the observation instant.
    #[must_use]
    pub const fn observed_at(mut self, at: DateTime<Utc>) -> Self {
        self.observed_at = Some(at);
        self
    }
}

/// A sample converted to its canonical metric type and unit.
///
/// Invariants: `start <= end`; `value` is finite, non-negative and expressed in
/// `metric.canonical_unit()`; timestamps are UTC instants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// Metric type.
    pub metric: MetricType,
    /// Value in the canonical unit (count, bpm, seconds).
    pub value: f64,
    /// Interval start (UTC).
    pub start: DateTime<Utc>,
    /// Interval end (UTC).
    pub end: DateTime<Utc>,
    /// Recording source.
    pub source_id: String,
    /// Effective priority after applying configured overrides.
    pub source_priority: i32,
    /// When the source recorded the sample, if known.
    pub observed_at: Option<DateTime<Utc>>,
}

impl NormalizedRecord {
    /// Length of the record's interval.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Interval length in fractional seconds.
    #[must_use]
    pub fn duration_seconds(&self) -> f64 {
        span_seconds(self.start, self.end)
    }

    /// True when the record covers a single instant.
    #[must_use]
    pub fn is_instant(&self) -> bool {
        self.start == self.end
    }

    /// Midpoint of the interval.
    #[must_use]
    pub fn midpoint(&self) -> DateTime<Utc> {
        self.start + self.duration() / 2
    }

    /// Instant used for recency comparisons: the observation time, else `end`.
    #[must_use]
    pub fn recency(&self) -> DateTime<Utc> {
        self.observed_at.unwrap_or(self.end)
    }

    /// A copy of this record restricted to `[start, end]` carrying `value`.
    #[must_use]
    pub fn with_span(&self, start: DateTime<Utc>, end: DateTime<Utc>, value: f64) -> Self {
        Self {
            metric: self.metric,
            value,
            start,
            end,
            source_id: self.source_id.clone(),
            source_priority: self.source_priority,
            observed_at: self.observed_at,
        }
    }

    /// Share of `value` attributable to `[start, end)`, by overlapped duration.
    ///
    /// Instants carry their full value.
    #[must_use]
    pub fn apportion(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
        let total = self.duration_seconds();
        if total <= 0.0 {
            return self.value;
        }
        self.value * (span_seconds(start, end) / total)
    }
}

fn span_seconds(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64 / 1000.0
}
