//! vitals-core
//!
//! Core types, the source trait, and the pure pipeline stages shared across the
//! vitals ecosystem.
//!
//! - `types`: re-exported data structures (samples, records, summaries, trends).
//! - `connector`: the `SampleSource` trait implemented by data-source adapters.
//! - `timeline`: normalize → reconcile → bucket → aggregate, plus trend helpers.
//!
//! Every stage under `timeline` is a synchronous, pure function of its inputs,
//! so per-metric pipelines can run concurrently without shared state. Only the
//! `SampleSource` trait is async; it assumes a Tokio 1.x runtime in practice
//! because the `vitals` orchestrator drives it with Tokio timers.
//!
#![warn(missing_docs)]

/// The async trait implemented by raw-sample sources.
pub mod connector;
/// Pipeline stages: normalization, reconciliation, bucketing, aggregation, trends.
pub mod timeline;
pub mod types;

pub use connector::SampleSource;
pub use timeline::aggregate::{AggregateOptions, aggregate_day, summarize_day};
pub use timeline::bucket::{DayBuckets, bucket};
pub use timeline::calendar::CalendarConfig;
pub use timeline::normalize::{NormalizedBatch, identify_metric, normalize, normalize_batch};
pub use timeline::order::ConflictOrder;
pub use timeline::reconcile::{ReconcileOptions, reconcile};
pub use timeline::trend::{apply_fill, build_trend, rolling_mean};
pub use timeline::{MetricTimeline, run_metric_pipeline};
pub use types::*;
