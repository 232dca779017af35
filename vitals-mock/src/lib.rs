//! Mock sample sources for tests and demos.
//!
//! - [`MockSource`] serves deterministic fixture data for every metric, with
//!   switches to deny, fail, slow down or drop individual metrics.
//! - [`DynamicMockSource`] defers every fetch to a [`DynamicMockController`]
//!   so tests can script returns, failures and hangs per metric.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use vitals_core::{MetricSet, MetricType, RawSample, SampleSource, VitalsError};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockController, DynamicMockSource, FetchLogEntry, MockBehavior};

/// Fixture-backed source. Every metric is served from static patterns that
/// repeat daily, with overlapping recording sources to exercise reconciliation.
#[derive(Debug, Clone)]
pub struct MockSource {
    supported: MetricSet,
    denied: MetricSet,
    unavailable: MetricSet,
    latency: Option<Duration>,
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSource {
    /// Serve every metric without failures.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            supported: MetricSet::all(),
            denied: MetricSet::empty(),
            unavailable: MetricSet::empty(),
            latency: None,
        }
    }

    /// Report `metric` as not provided by this source.
    #[must_use]
    pub fn without(mut self, metric: MetricType) -> Self {
        self.supported.remove(MetricSet::of(metric));
        self
    }

    /// Deny read access to `metric`.
    #[must_use]
    pub fn deny(mut self, metric: MetricType) -> Self {
        self.denied.add(metric);
        self
    }

    /// Fail fetches of `metric` as unavailable.
    #[must_use]
    pub fn unavailable(mut self, metric: MetricType) -> Self {
        self.unavailable.add(metric);
        self
    }

    /// Sleep for `latency` before answering each fetch.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    fn forced_failure(&self, metric: MetricType) -> Result<(), VitalsError> {
        if self.denied.has(metric) {
            return Err(VitalsError::AuthorizationDenied { metric });
        }
        if self.unavailable.has(metric) {
            return Err(VitalsError::unavailable(
                metric,
                format!("forced failure: {metric}"),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl SampleSource for MockSource {
    fn name(&self) -> &'static str {
        "vitals-mock"
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn supports_metric(&self, metric: MetricType) -> bool {
        self.supported.has(metric)
    }

    async fn fetch_raw_samples(
        &self,
        metric: MetricType,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<RawSample>, VitalsError> {
        if end < start {
            return Err(VitalsError::InvalidRange(format!(
                "fetch window ends at {end} before it starts at {start}"
            )));
        }
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.forced_failure(metric)?;
        Ok(match metric {
            MetricType::Steps => fixtures::steps::samples(start, end),
            MetricType::HeartRate => fixtures::heart_rate::samples(start, end),
            MetricType::Sleep => fixtures::sleep::samples(start, end),
            MetricType::Workout => fixtures::workout::samples(start, end),
        })
    }
}
