//! Re-export of foundational types from `vitals-types`.
// Consolidated re-exports so downstream crates can depend on `vitals-core` only

pub use vitals_types::{
    CanonicalUnit, DailySummary, DateRange, FillPolicy, FillSource, Measurement, MetricDiagnostic,
    MetricKind, MetricSet, MetricType, NormalizedRecord, RawSample, SampleRejection, SourceKey,
    SourcePriorities, SummariesReport, SummaryReport, TieBreak, TrendPoint, TrendReport,
    TrendSeries, VitalsConfig, VitalsError,
};
