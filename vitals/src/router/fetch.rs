use std::collections::BTreeMap;

use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use vitals_core::{
    DateRange, DayBuckets, MetricDiagnostic, MetricSet, MetricType, SampleRejection, VitalsError,
    run_metric_pipeline,
};

use crate::Vitals;
use crate::router::util::{collapse_failures, join_with_deadline, with_cancellation};

/// Joined result of one fan-out: per-metric day buckets for the metrics that
/// succeeded, plus diagnostics and rejections for everything else.
#[derive(Debug, Default)]
pub(crate) struct FanOut {
    pub(crate) buckets: BTreeMap<MetricType, DayBuckets>,
    pub(crate) diagnostics: Vec<MetricDiagnostic>,
    pub(crate) rejections: Vec<SampleRejection>,
}

impl Vitals {
    /// Fetch and pipeline every metric in `metrics` over `range`.
    ///
    /// One task per supported metric, bounded by `max_concurrent_fetches`;
    /// each fetch runs under `source_timeout` and the join under the optional
    /// `request_timeout`. Per-metric failures become diagnostics.
    ///
    /// # Errors
    /// `InvalidArg` for an empty metric set, `Cancelled`, `RequestTimeout`,
    /// `AllAuthorizationDenied`, or a request-fatal error from the source.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "vitals::router::fan_out",
            skip(self, cancel),
            fields(start = %range.start(), end = %range.end(), metrics = ?metrics),
        )
    )]
    pub(crate) async fn fan_out(
        &self,
        metrics: MetricSet,
        range: DateRange,
        cancel: &CancellationToken,
    ) -> Result<FanOut, VitalsError> {
        if metrics.is_empty() {
            return Err(VitalsError::InvalidArg("no metrics requested".to_string()));
        }
        if cancel.is_cancelled() {
            return Err(VitalsError::Cancelled);
        }

        let (start, end) = self.calendar.range_bounds(&range);
        let requested: Vec<MetricType> = metrics.metrics().collect();
        let mut errors: Vec<(MetricType, VitalsError)> = Vec::new();

        let permits = Semaphore::new(self.cfg.max_concurrent_fetches);
        let permits = &permits;
        let mut tasks = Vec::new();
        for &metric in &requested {
            if !self.source.supports_metric(metric) {
                errors.push((metric, VitalsError::Unsupported { metric }));
                continue;
            }
            let source = self.source.clone();
            tasks.push(async move {
                let fetched = {
                    let _permit = match permits.acquire().await {
                        Ok(p) => p,
                        Err(_) => {
                            return (metric, Err(VitalsError::Other("fetch limiter closed".into())));
                        }
                    };
                    Self::source_call_with_timeout(
                        source.name(),
                        metric,
                        self.cfg.source_timeout,
                        source.fetch_raw_samples(metric, start, end),
                    )
                    .await
                };
                let outcome = fetched.map(|samples| {
                    run_metric_pipeline(
                        metric,
                        &samples,
                        &self.cfg.source_priorities,
                        &self.reconcile,
                        &self.calendar,
                    )
                });
                (metric, outcome)
            });
        }

        let joined = with_cancellation(
            cancel,
            join_with_deadline(tasks, self.cfg.request_timeout),
        )
        .await;
        let results = match joined {
            Ok(results) => results,
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::info!(target: "vitals::router", error = %e, "request abandoned");
                return Err(e);
            }
        };

        let mut out = FanOut::default();
        for (metric, res) in results {
            match res {
                Ok(timeline) => {
                    out.buckets.insert(metric, timeline.buckets);
                    out.rejections.extend(timeline.rejections);
                }
                Err(e) => errors.push((metric, e)),
            }
        }

        let flat: Vec<VitalsError> = errors.iter().map(|(_, e)| e.clone()).collect();
        if let Some(fatal) = collapse_failures(requested.len(), &flat) {
            return Err(fatal);
        }

        errors.sort_by_key(|(m, _)| *m);
        for (metric, error) in errors {
            #[cfg(feature = "tracing")]
            tracing::warn!(target: "vitals::router", metric = %metric, error = %error, "metric degraded to absent");
            out.diagnostics.push(MetricDiagnostic { metric, error });
        }
        Ok(out)
    }
}
