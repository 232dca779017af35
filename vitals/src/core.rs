use std::sync::Arc;
use std::time::Duration;

use chrono::TimeDelta;
use vitals_core::{
    AggregateOptions, CalendarConfig, FillPolicy, MetricType, ReconcileOptions, SampleSource,
    SourcePriorities, TieBreak, VitalsConfig, VitalsError,
};

/// Query façade that fans per-metric fetches out to a sample source and
/// assembles daily summaries and trend series.
pub struct Vitals {
    pub(crate) source: Arc<dyn SampleSource>,
    pub(crate) cfg: VitalsConfig,
    pub(crate) calendar: CalendarConfig,
    pub(crate) reconcile: ReconcileOptions,
    pub(crate) aggregate: AggregateOptions,
}

/// Builder for constructing a `Vitals` façade with custom configuration.
pub struct VitalsBuilder {
    source: Option<Arc<dyn SampleSource>>,
    cfg: VitalsConfig,
}

impl Default for VitalsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl VitalsBuilder {
    /// Create a new builder with sensible defaults.
    ///
    /// Behavior and trade-offs:
    /// - Starts without a source; you must set one via [`source`](Self::source).
    /// - Defaults: UTC calendar, 4 concurrent fetches, 10s per-fetch timeout,
    ///   no request deadline, gaps left unfilled, most recent observation wins ties.
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: None,
            cfg: VitalsConfig::default(),
        }
    }

    /// Set the sample source every fetch is sent to.
    #[must_use]
    pub fn source(mut self, source: Arc<dyn SampleSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Replace the whole configuration, e.g. one deserialized from a file.
    ///
    /// Modifiers called afterwards still apply on top of it.
    #[must_use]
    pub fn config(mut self, cfg: VitalsConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Set the calendar used for day boundaries.
    ///
    /// Accepts an IANA zone (`Europe/Berlin`), `UTC`, or a fixed offset
    /// (`+05:30`). Validated by [`build`](Self::build).
    #[must_use]
    pub fn calendar(mut self, id: impl Into<String>) -> Self {
        self.cfg.calendar = id.into();
        self
    }

    /// Bound the number of fetches in flight at once.
    ///
    /// Behavior and trade-offs:
    /// - Excess fetches queue rather than being dropped.
    /// - Lower values protect rate-limited sources at the cost of latency.
    #[must_use]
    pub const fn max_concurrent_fetches(mut self, n: usize) -> Self {
        self.cfg.max_concurrent_fetches = n;
        self
    }

    /// Set the per-fetch timeout.
    ///
    /// A fetch that exceeds it degrades its metric to absent with a
    /// `SourceTimeout` diagnostic; the rest of the request proceeds.
    #[must_use]
    pub const fn source_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.source_timeout = timeout;
        self
    }

    /// Set an overall deadline for a request's fan-out and join.
    ///
    /// When exceeded, the request fails with `RequestTimeout` and no partial
    /// result.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Default fill policy for [`Vitals::trend_default`].
    #[must_use]
    pub const fn fill_policy(mut self, policy: FillPolicy) -> Self {
        self.cfg.fill_policy = policy;
        self
    }

    /// Tie-break between conflicting records with equal priority and coverage.
    #[must_use]
    pub const fn tie_break(mut self, tie_break: TieBreak) -> Self {
        self.cfg.tie_break = tie_break;
        self
    }

    /// Rank recording sources, most preferred first.
    ///
    /// Ranked sources outrank every self-reported priority; unknown sources
    /// keep their own.
    #[must_use]
    pub fn prefer_sources<S: AsRef<str>>(mut self, source_ids: &[S]) -> Self {
        self.cfg.source_priorities = SourcePriorities::new(source_ids);
        self
    }

    /// Heart-rate samples whose midpoints are this close are duplicates.
    #[must_use]
    pub const fn point_tolerance(mut self, tolerance: Duration) -> Self {
        self.cfg.point_tolerance = tolerance;
        self
    }

    /// Longest span a single heart-rate sample is weighted for in daily averages.
    #[must_use]
    pub const fn max_heart_rate_hold(mut self, hold: Duration) -> Self {
        self.cfg.max_heart_rate_hold = hold;
        self
    }

    /// Build the `Vitals` façade.
    ///
    /// # Errors
    /// - `InvalidArg` if no source was set, the concurrency bound is zero, the
    ///   source timeout is zero, a duration does not fit a calendar delta, or
    ///   the heart-rate hold exceeds one day.
    /// - `InvalidCalendarConfig` if the calendar identifier cannot be resolved.
    pub fn build(self) -> Result<Vitals, VitalsError> {
        let Some(source) = self.source else {
            return Err(VitalsError::InvalidArg(
                "no source configured; set one via source(...)".to_string(),
            ));
        };
        if self.cfg.max_concurrent_fetches == 0 {
            return Err(VitalsError::InvalidArg(
                "max_concurrent_fetches must be at least 1".to_string(),
            ));
        }
        if self.cfg.source_timeout.is_zero() {
            return Err(VitalsError::InvalidArg(
                "source_timeout must be positive".to_string(),
            ));
        }
        let calendar = CalendarConfig::parse(&self.cfg.calendar)?;
        let point_tolerance = delta("point_tolerance", self.cfg.point_tolerance)?;
        let max_hold = delta("max_heart_rate_hold", self.cfg.max_heart_rate_hold)?;
        if max_hold > TimeDelta::days(1) {
            return Err(VitalsError::InvalidArg(
                "max_heart_rate_hold must not exceed one day".to_string(),
            ));
        }

        let reconcile = ReconcileOptions {
            point_tolerance,
            ..ReconcileOptions::from_config(&self.cfg)
        };
        let aggregate = AggregateOptions {
            max_hold,
            ..AggregateOptions::from_config(&self.cfg)
        };

        Ok(Vitals {
            source,
            cfg: self.cfg,
            calendar,
            reconcile,
            aggregate,
        })
    }
}

fn delta(field: &str, d: Duration) -> Result<TimeDelta, VitalsError> {
    TimeDelta::from_std(d).map_err(|_| VitalsError::InvalidArg(format!("{field} is too large")))
}

impl Vitals {
    /// Wrap a source future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "vitals::core::source_call_with_timeout",
            skip(fut),
            fields(
                source = source_name,
                metric = %metric,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn source_call_with_timeout<T, Fut>(
        source_name: &'static str,
        metric: MetricType,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, VitalsError>
    where
        Fut: core::future::Future<Output = Result<T, VitalsError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(VitalsError::source_timeout(source_name, metric)))
    }

    /// Start building a new `Vitals` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use vitals::Vitals;
    ///
    /// let vitals = Vitals::builder()
    ///     .source(Arc::new(HealthKitSource::new()))
    ///     .calendar("Europe/Berlin")
    ///     .prefer_sources(&["apple-watch", "iphone"])
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> VitalsBuilder {
        VitalsBuilder::new()
    }

    /// The effective configuration.
    #[must_use]
    pub const fn config(&self) -> &VitalsConfig {
        &self.cfg
    }

    /// The resolved calendar.
    #[must_use]
    pub const fn calendar(&self) -> &CalendarConfig {
        &self.calendar
    }
}

/// Await `fut`, failing with `RequestTimeout` once `deadline` elapses.
pub(crate) async fn with_request_deadline<F, T>(
    deadline: Option<Duration>,
    fut: F,
) -> Result<T, VitalsError>
where
    F: core::future::Future<Output = T>,
{
    match deadline {
        Some(d) => tokio::time::timeout(d, fut)
            .await
            .map_err(|_| VitalsError::RequestTimeout),
        None => Ok(fut.await),
    }
}
