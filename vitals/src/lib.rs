//! Vitals turns raw, overlapping health samples into daily summaries and trends.
//!
//! Overview
//! - Fans out one fetch per requested metric to a `vitals_core::SampleSource`.
//! - Runs each metric through normalize → reconcile → bucket independently.
//! - Joins once, then aggregates per calendar day in the configured timezone.
//! - Keeps "no data" (`Measurement::Absent`) distinct from a measured zero.
//!
//! Key behaviors and trade-offs
//! - Conflicts: overlapping records are never summed. A total order picks the
//!   winner per time segment: source priority, then coverage, then the
//!   configured tie-break (most recent observation by default).
//! - Partial failure: a denied, unavailable, timed-out or unsupported metric
//!   degrades to absent and is reported as a `MetricDiagnostic`; the request
//!   fails only when every metric was denied, the range or calendar is invalid,
//!   the request deadline elapses, or the caller cancels.
//! - Concurrency: fetches are bounded by `max_concurrent_fetches`; excess
//!   fetches queue. Each is capped by `source_timeout`.
//! - Gaps: trend series keep explicit gap markers unless a fill policy is
//!   requested; filled points are tagged `Filled` so they are never mistaken
//!   for measurements. Heart rate is never zero-filled.
//!
//! Examples
//! Building the façade:
//! ```rust,ignore
//! use std::sync::Arc;
//! use vitals::{Vitals, TieBreak};
//!
//! let vitals = Vitals::builder()
//!     .source(Arc::new(HealthConnectSource::new()))
//!     .calendar("America/New_York")
//!     .max_concurrent_fetches(2)
//!     .prefer_sources(&["pixel-watch", "phone"])
//!     .tie_break(TieBreak::MostRecentObservation)
//!     .build()?;
//! ```
//!
//! A daily summary and a filled trend:
//! ```rust,ignore
//! use vitals::{DateRange, FillPolicy, MetricType};
//!
//! let report = vitals.summary(day).await?;
//! if let Some(steps) = report.summary.total_steps.measured() {
//!     println!("{steps} steps");
//! }
//!
//! let trend = vitals
//!     .trend(MetricType::Sleep, DateRange::new(from, to)?, FillPolicy::CarryForward)
//!     .await?;
//! ```
//!
//! Cancelling an in-flight request:
//! ```rust,ignore
//! use vitals::CancellationToken;
//!
//! let token = CancellationToken::new();
//! let pending = vitals.summary_with_cancel(day, &token);
//! token.cancel(); // pending resolves to Err(VitalsError::Cancelled)
//! ```
//!
//! See `vitals/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod router;

pub use core::{Vitals, VitalsBuilder};
pub use router::util::{collapse_failures, join_with_deadline, with_cancellation};
pub use tokio_util::sync::CancellationToken;

// Re-export core types for convenience
pub use vitals_core::{
    CalendarConfig,
    CanonicalUnit,
    ConflictOrder,
    DailySummary,
    DateRange,
    FillPolicy,
    FillSource,
    Measurement,
    MetricDiagnostic,
    MetricKind,
    MetricSet,
    MetricType,
    NormalizedRecord,
    RawSample,
    SampleRejection,
    // Source contract
    SampleSource,
    SourceKey,
    SourcePriorities,
    SummariesReport,
    SummaryReport,
    TieBreak,
    TrendPoint,
    TrendReport,
    TrendSeries,
    VitalsConfig,
    VitalsError,
    rolling_mean,
};
