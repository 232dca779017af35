use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{MetricType, RawSample, SourceKey, VitalsError};

/// Main source trait implemented by platform adapters (HealthKit, Health
/// Connect, vendor clouds...). Exposes capability discovery and a single pull
/// query per metric.
#[async_trait]
pub trait SampleSource: Send + Sync {
    /// A stable identifier used in logs and diagnostics (e.g. "vitals-healthkit").
    fn name(&self) -> &'static str;

    /// Canonical key constructed from the static name.
    fn key(&self) -> SourceKey {
        SourceKey::new(self.name())
    }

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Whether this source *claims* to provide `metric`.
    ///
    /// Default: every metric. Sources that cannot serve a metric should return
    /// `false` so the orchestrator reports it as unsupported without a fetch.
    fn supports_metric(&self, metric: MetricType) -> bool {
        let _ = metric;
        true
    }

    /// Fetch raw samples of `metric` overlapping `[start, end)`.
    ///
    /// Samples may come from several recording sources and may overlap.
    ///
    /// # Errors
    /// - `AuthorizationDenied` when read access to `metric` is not granted.
    /// - `SourceUnavailable` when the source cannot answer right now.
    /// - `InvalidRange` when the source rejects the time window.
    async fn fetch_raw_samples(
        &self,
        metric: MetricType,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<RawSample>, VitalsError>;
}
