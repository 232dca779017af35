//! Report envelopes produced by the orchestrator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::VitalsError;
use crate::metric::MetricType;
use crate::summary::{DailySummary, TrendSeries};

/// A metric that could not be fetched; its fields are absent in the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricDiagnostic {
    /// Metric that failed.
    pub metric: MetricType,
    /// Why it failed.
    pub error: VitalsError,
}

/// A raw sample dropped during normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRejection {
    /// Metric whose fetch delivered the sample.
    pub metric: MetricType,
    /// Recording source of the sample.
    pub source_id: String,
    /// Sample start, for locating it in source data.
    pub start: DateTime<Utc>,
    /// Why it was dropped.
    pub error: VitalsError,
}

/// Summary of a single day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    /// The day's aggregates.
    pub summary: DailySummary,
    /// Per-metric failures encountered while building the summary.
    pub diagnostics: Vec<MetricDiagnostic>,
    /// Samples dropped during normalization.
    pub rejections: Vec<SampleRejection>,
}

/// Summaries for every day of a range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SummariesReport {
    /// One summary per day, ascending.
    pub summaries: Vec<DailySummary>,
    /// Per-metric failures encountered while building the summaries.
    pub diagnostics: Vec<MetricDiagnostic>,
    /// Samples dropped during normalization.
    pub rejections: Vec<SampleRejection>,
}

/// Trend series for one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    /// The series, with explicit gaps or fill markers.
    pub series: TrendSeries,
    /// Per-metric failures encountered while building the series.
    pub diagnostics: Vec<MetricDiagnostic>,
    /// Samples dropped during normalization.
    pub rejections: Vec<SampleRejection>,
}
