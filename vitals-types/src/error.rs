use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::metric::MetricType;

/// Unified error type for the vitals workspace.
///
/// Variants fall into three scopes. Sample-level errors are recorded as
/// rejections and never escape normalization. Metric-level errors degrade one
/// metric to absent and surface as diagnostics. Request-level errors are
/// returned to the caller with no partial result.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum VitalsError {
    /// A sample violated a structural invariant (end before start, non-finite
    /// or negative value).
    #[error("malformed sample: {0}")]
    MalformedSample(String),

    /// The sample's unit has no conversion to the metric's canonical unit.
    #[error("unsupported unit '{unit}' for {metric}")]
    UnsupportedUnit {
        /// Metric the sample was identified as.
        metric: MetricType,
        /// Unit string as delivered.
        unit: String,
    },

    /// The sample's metric identifier is not recognized.
    #[error("unsupported metric identifier '{identifier}'")]
    UnsupportedMetric {
        /// Identifier as delivered.
        identifier: String,
    },

    /// The calendar/timezone identifier could not be resolved.
    #[error("invalid calendar configuration: {0}")]
    InvalidCalendarConfig(String),

    /// The source refused to return data for this metric.
    #[error("authorization denied for {metric}")]
    AuthorizationDenied {
        /// Metric whose read access was denied.
        metric: MetricType,
    },

    /// The source could not serve this metric right now.
    #[error("source unavailable for {metric}: {msg}")]
    SourceUnavailable {
        /// Metric being fetched.
        metric: MetricType,
        /// Human-readable reason.
        msg: String,
    },

    /// A single fetch exceeded the configured source timeout.
    #[error("source {source_name} timed out fetching {metric}")]
    SourceTimeout {
        /// Source name.
        source_name: String,
        /// Metric being fetched.
        metric: MetricType,
    },

    /// The source does not provide this metric at all.
    #[error("source does not provide {metric}")]
    Unsupported {
        /// Metric that was requested.
        metric: MetricType,
    },

    /// The requested date or time range is invalid.
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// The caller cancelled the request.
    #[error("request cancelled")]
    Cancelled,

    /// The overall request exceeded its deadline.
    #[error("request timed out")]
    RequestTimeout,

    /// Every requested metric was denied; contains the individual denials.
    #[error("authorization denied for all requested metrics: {0:?}")]
    AllAuthorizationDenied(Vec<VitalsError>),

    /// Invalid input argument or configuration.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl VitalsError {
    /// Helper: build a `MalformedSample` error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedSample(msg.into())
    }

    /// Helper: build a `SourceUnavailable` error.
    pub fn unavailable(metric: MetricType, msg: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            metric,
            msg: msg.into(),
        }
    }

    /// Helper: build a `SourceTimeout` error.
    pub fn source_timeout(source_name: impl Into<String>, metric: MetricType) -> Self {
        Self::SourceTimeout {
            source_name: source_name.into(),
            metric,
        }
    }

    /// True for errors that concern a single sample.
    #[must_use]
    pub const fn is_sample_level(&self) -> bool {
        matches!(
            self,
            Self::MalformedSample(_) | Self::UnsupportedUnit { .. } | Self::UnsupportedMetric { .. }
        )
    }

    /// True for errors that must fail the whole request without partial output.
    #[must_use]
    pub const fn is_request_fatal(&self) -> bool {
        matches!(
            self,
            Self::InvalidCalendarConfig(_)
                | Self::InvalidRange(_)
                | Self::Cancelled
                | Self::RequestTimeout
                | Self::AllAuthorizationDenied(_)
                | Self::InvalidArg(_)
        )
    }

    /// Flatten nested `AllAuthorizationDenied` structures into a plain vector.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::AllAuthorizationDenied(list) => {
                list.into_iter().flat_map(Self::flatten).collect()
            }
            other => vec![other],
        }
    }
}
