//! The per-metric pipeline: normalize → reconcile → bucket, then aggregate.
//!
//! Every stage is a pure function. A metric's raw samples flow through
//! [`run_metric_pipeline`] into [`MetricTimeline`], which the orchestrator
//! aggregates per day once all metrics have been joined.

/// Daily aggregation of bucketed records.
pub mod aggregate;
/// Splitting records into calendar days.
pub mod bucket;
/// Timezone-aware calendar used for day boundaries.
pub mod calendar;
/// Raw sample normalization to canonical units.
pub mod normalize;
/// Total order used to resolve conflicting records.
pub mod order;
/// Overlap and duplicate resolution.
pub mod reconcile;
/// Trend series, gap fill and smoothing.
pub mod trend;

use vitals_types::{MetricType, RawSample, SampleRejection, SourcePriorities};

use self::bucket::DayBuckets;
use self::calendar::CalendarConfig;
use self::reconcile::ReconcileOptions;

/// Output of the per-metric pipeline: reconciled records split into days.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetricTimeline {
    /// Reconciled records keyed by local calendar day.
    pub buckets: DayBuckets,
    /// Samples dropped during normalization.
    pub rejections: Vec<SampleRejection>,
}

/// Run normalize → reconcile → bucket over one metric's raw samples.
///
/// Samples that fail normalization are collected as rejections; the rest of
/// the batch still flows through.
#[must_use]
pub fn run_metric_pipeline(
    metric: MetricType,
    samples: &[RawSample],
    priorities: &SourcePriorities,
    reconcile_opts: &ReconcileOptions,
    calendar: &CalendarConfig,
) -> MetricTimeline {
    let batch = normalize::normalize_batch(metric, samples, priorities);
    let records = reconcile::reconcile(metric, batch.records, reconcile_opts);
    MetricTimeline {
        buckets: bucket::bucket(&records, calendar),
        rejections: batch.rejections,
    }
}
