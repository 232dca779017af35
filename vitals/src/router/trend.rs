use std::collections::BTreeMap;

use tokio_util::sync::CancellationToken;
use vitals_core::{
    DateRange, FillPolicy, MetricSet, MetricType, TrendReport, VitalsError, aggregate_day,
    apply_fill, build_trend,
};

use crate::Vitals;

impl Vitals {
    /// Per-day series of `metric` over `range` with gaps handled by `fill`.
    ///
    /// # Errors
    /// See [`Vitals::trend_with_cancel`].
    pub async fn trend(
        &self,
        metric: MetricType,
        range: DateRange,
        fill: FillPolicy,
    ) -> Result<TrendReport, VitalsError> {
        self.trend_with_cancel(metric, range, fill, &CancellationToken::new())
            .await
    }

    /// [`Vitals::trend`] using the configured default fill policy.
    ///
    /// # Errors
    /// See [`Vitals::trend_with_cancel`].
    pub async fn trend_default(
        &self,
        metric: MetricType,
        range: DateRange,
    ) -> Result<TrendReport, VitalsError> {
        self.trend_with_cancel(metric, range, self.cfg.fill_policy, &CancellationToken::new())
            .await
    }

    /// [`Vitals::trend_default`] that aborts with `Cancelled` when `cancel` fires.
    ///
    /// # Errors
    /// See [`Vitals::trend_with_cancel`].
    pub async fn trend_default_with_cancel(
        &self,
        metric: MetricType,
        range: DateRange,
        cancel: &CancellationToken,
    ) -> Result<TrendReport, VitalsError> {
        self.trend_with_cancel(metric, range, self.cfg.fill_policy, cancel)
            .await
    }

    /// [`Vitals::trend`] that aborts with `Cancelled` when `cancel` fires.
    ///
    /// A failed fetch yields an all-gap series plus one diagnostic.
    ///
    /// # Errors
    /// - `InvalidArg` for zero fill on a rate metric, checked before fetching.
    /// - `AllAuthorizationDenied` when the metric was denied.
    /// - `InvalidRange` when the source rejects the window.
    /// - `RequestTimeout` / `Cancelled` when the request is abandoned.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "vitals::router",
            skip(self, cancel),
            fields(metric = %metric, start = %range.start(), end = %range.end(), fill = ?fill),
        )
    )]
    pub async fn trend_with_cancel(
        &self,
        metric: MetricType,
        range: DateRange,
        fill: FillPolicy,
        cancel: &CancellationToken,
    ) -> Result<TrendReport, VitalsError> {
        if fill == FillPolicy::ZeroFill && metric.is_rate() {
            return Err(VitalsError::InvalidArg(format!(
                "zero fill is not allowed for rate metric {metric}"
            )));
        }

        let fan = self.fan_out(MetricSet::of(metric), range, cancel).await?;
        let mut values = BTreeMap::new();
        if let Some(buckets) = fan.buckets.get(&metric) {
            for day in range.days() {
                let records = buckets.get(&day).map_or(&[][..], Vec::as_slice);
                let (_, day_end) = self.calendar.day_bounds(day);
                let opts = self.aggregate.with_day_end(day_end);
                values.insert(day, aggregate_day(metric, records, &opts));
            }
        }

        let series = apply_fill(build_trend(metric, range, &values), fill)?;
        Ok(TrendReport {
            series,
            diagnostics: fan.diagnostics,
            rejections: fan.rejections,
        })
    }
}
