//! Vitals-specific data transfer objects and configuration primitives.
//!
//! Everything in this crate is plain data: the pipeline in `vitals-core` and the
//! orchestrator in `vitals` produce and consume these types, and callers persist
//! them in whatever format they like via `serde`.
#![warn(missing_docs)]

mod config;
mod error;
mod measurement;
mod metric;
mod priority;
mod records;
mod reports;
mod summary;

pub use config::{FillPolicy, TieBreak, VitalsConfig};
pub use error::VitalsError;
pub use measurement::{FillSource, Measurement};
pub use metric::{CanonicalUnit, MetricKind, MetricSet, MetricType};
pub use priority::{SourceKey, SourcePriorities};
pub use records::{NormalizedRecord, RawSample};
pub use reports::{MetricDiagnostic, SampleRejection, SummariesReport, SummaryReport, TrendReport};
pub use summary::{DailySummary, DateRange, TrendPoint, TrendSeries};
