//! Metric identity, canonical units and metric sets.

use core::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// The closed set of health metrics handled by the pipeline.
///
/// The metric type determines the canonical unit every value is normalized to
/// and the reduction used when aggregating a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricType {
    /// Step counts over an interval.
    Steps,
    /// Heart rate point samples.
    HeartRate,
    /// Sleep-state intervals.
    Sleep,
    /// Workout sessions.
    Workout,
}

/// How values of a metric combine over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// A count accumulated over the record's interval (summed, never averaged).
    Cumulative,
    /// An instantaneous rate sample (averaged over time).
    Point,
    /// A span of time whose value is its duration.
    Duration,
}

/// Canonical unit per metric type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalUnit {
    /// Dimensionless count.
    Count,
    /// Beats per minute.
    BeatsPerMinute,
    /// Seconds.
    Seconds,
}

impl MetricType {
    /// All metric types in canonical order.
    pub const ALL: [Self; 4] = [Self::Steps, Self::HeartRate, Self::Sleep, Self::Workout];

    /// Stable lowercase label used in logs and serialized forms.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Steps => "steps",
            Self::HeartRate => "heart_rate",
            Self::Sleep => "sleep",
            Self::Workout => "workout",
        }
    }

    /// Canonical unit values of this metric are expressed in after normalization.
    #[must_use]
    pub const fn canonical_unit(self) -> CanonicalUnit {
        match self {
            Self::Steps => CanonicalUnit::Count,
            Self::HeartRate => CanonicalUnit::BeatsPerMinute,
            Self::Sleep | Self::Workout => CanonicalUnit::Seconds,
        }
    }

    /// Combination semantics of this metric.
    #[must_use]
    pub const fn kind(self) -> MetricKind {
        match self {
            Self::Steps => MetricKind::Cumulative,
            Self::HeartRate => MetricKind::Point,
            Self::Sleep | Self::Workout => MetricKind::Duration,
        }
    }

    /// Rate-type metrics must never be zero-filled.
    #[must_use]
    pub const fn is_rate(self) -> bool {
        matches!(self.kind(), MetricKind::Point)
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for CanonicalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Count => "count",
            Self::BeatsPerMinute => "bpm",
            Self::Seconds => "s",
        })
    }
}

bitflags! {
    /// A set of metric types.
    ///
    /// Used to scope requests and to report which summary fields had
    /// contributing data on a given day.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct MetricSet: u8 {
        /// Steps.
        const STEPS = 1;
        /// Heart rate.
        const HEART_RATE = 1 << 1;
        /// Sleep.
        const SLEEP = 1 << 2;
        /// Workout.
        const WORKOUT = 1 << 3;
    }
}

impl MetricSet {
    /// The single-element set for `metric`.
    #[must_use]
    pub const fn of(metric: MetricType) -> Self {
        match metric {
            MetricType::Steps => Self::STEPS,
            MetricType::HeartRate => Self::HEART_RATE,
            MetricType::Sleep => Self::SLEEP,
            MetricType::Workout => Self::WORKOUT,
        }
    }

    /// Whether `metric` is a member of this set.
    #[must_use]
    pub const fn has(self, metric: MetricType) -> bool {
        self.contains(Self::of(metric))
    }

    /// Add `metric` to the set.
    pub fn add(&mut self, metric: MetricType) {
        self.insert(Self::of(metric));
    }

    /// Iterate member metric types in canonical order.
    pub fn metrics(self) -> impl Iterator<Item = MetricType> {
        MetricType::ALL.into_iter().filter(move |m| self.has(*m))
    }
}

impl From<MetricType> for MetricSet {
    fn from(metric: MetricType) -> Self {
        Self::of(metric)
    }
}

impl FromIterator<MetricType> for MetricSet {
    fn from_iter<I: IntoIterator<Item = MetricType>>(iter: I) -> Self {
        let mut set = Self::empty();
        for m in iter {
            set.add(m);
        }
        set
    }
}
