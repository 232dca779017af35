//! Per-day summaries, trend series and calendar date ranges.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::FillPolicy;
use crate::error::VitalsError;
use crate::measurement::Measurement;
use crate::metric::{MetricSet, MetricType};

/// Inclusive range of calendar days `start..=end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DateRangeRepr", into = "DateRangeRepr")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Serialize, Deserialize)]
struct DateRangeRepr {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<DateRangeRepr> for DateRange {
    type Error = VitalsError;

    fn try_from(r: DateRangeRepr) -> Result<Self, Self::Error> {
        Self::new(r.start, r.end)
    }
}

impl From<DateRange> for DateRangeRepr {
    fn from(r: DateRange) -> Self {
        Self {
            start: r.start,
            end: r.end,
        }
    }
}

impl DateRange {
    /// Build a range, rejecting `end < start`.
    ///
    /// # Errors
    /// Returns `InvalidRange` when `end` precedes `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, VitalsError> {
        if end < start {
            return Err(VitalsError::InvalidRange(format!(
                "end {end} is before start {start}"
            )));
        }
        Ok(Self { start, end })
    }

    /// A one-day range.
    #[must_use]
    pub const fn single(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    /// First day (inclusive).
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day (inclusive).
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days in the range (at least 1).
    #[must_use]
    pub fn len_days(&self) -> usize {
        usize::try_from((self.end - self.start).num_days() + 1).unwrap_or(usize::MAX)
    }

    /// Whether `day` lies within the range.
    #[must_use]
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Iterate every day in the range in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

/// Aggregated view of one calendar day.
///
/// Fields without contributing records are [`Measurement::Absent`];
/// `availability` lists the metrics that had data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    /// Calendar day in the configured timezone.
    pub date: NaiveDate,
    /// Total steps.
    pub total_steps: Measurement<f64>,
    /// Total workout duration in seconds.
    pub total_workout_seconds: Measurement<f64>,
    /// Time-weighted average heart rate in bpm.
    pub average_heart_rate: Measurement<f64>,
    /// Total sleep duration in seconds.
    pub total_sleep_seconds: Measurement<f64>,
    /// Metrics with at least one contributing record.
    pub availability: MetricSet,
}

impl DailySummary {
    /// A summary with every field absent.
    #[must_use]
    pub const fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            total_steps: Measurement::Absent,
            total_workout_seconds: Measurement::Absent,
            average_heart_rate: Measurement::Absent,
            total_sleep_seconds: Measurement::Absent,
            availability: MetricSet::empty(),
        }
    }

    /// The field holding `metric`'s aggregate.
    #[must_use]
    pub const fn get(&self, metric: MetricType) -> Measurement<f64> {
        match metric {
            MetricType::Steps => self.total_steps,
            MetricType::HeartRate => self.average_heart_rate,
            MetricType::Sleep => self.total_sleep_seconds,
            MetricType::Workout => self.total_workout_seconds,
        }
    }

    /// Replace `metric`'s aggregate, keeping `availability` in sync.
    pub fn set(&mut self, metric: MetricType, value: Measurement<f64>) {
        let slot = match metric {
            MetricType::Steps => &mut self.total_steps,
            MetricType::HeartRate => &mut self.average_heart_rate,
            MetricType::Sleep => &mut self.total_sleep_seconds,
            MetricType::Workout => &mut self.total_workout_seconds,
        };
        *slot = value;
        if value.is_measured() {
            self.availability.add(metric);
        } else {
            self.availability.remove(MetricSet::of(metric));
        }
    }
}

/// One day's aggregate within a trend series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Calendar day.
    pub date: NaiveDate,
    /// Metric type.
    pub metric: MetricType,
    /// Aggregated value; `Absent` marks a gap.
    pub value: Measurement<f64>,
}

/// Ordered per-day values of one metric over a contiguous range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    /// Metric type.
    pub metric: MetricType,
    /// Covered range; `points` has one entry per day.
    pub range: DateRange,
    /// Fill policy applied after aggregation.
    pub fill: FillPolicy,
    /// Points in ascending date order.
    pub points: Vec<TrendPoint>,
}

impl TrendSeries {
    /// Points without data and without a fill substitute.
    pub fn gaps(&self) -> impl Iterator<Item = &TrendPoint> {
        self.points.iter().filter(|p| p.value.is_absent())
    }

    /// Number of gap markers.
    #[must_use]
    pub fn gap_count(&self) -> usize {
        self.gaps().count()
    }

    /// The point for `date`, if within range.
    #[must_use]
    pub fn point(&self, date: NaiveDate) -> Option<&TrendPoint> {
        self.points.iter().find(|p| p.date == date)
    }
}
