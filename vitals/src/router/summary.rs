use chrono::NaiveDate;
use tokio_util::sync::CancellationToken;
use vitals_core::{
    DateRange, MetricSet, SummariesReport, SummaryReport, VitalsError, summarize_day,
};

use crate::Vitals;

impl Vitals {
    /// Daily summary of every metric for `date`.
    ///
    /// # Errors
    /// See [`Vitals::summaries_with_cancel`].
    pub async fn summary(&self, date: NaiveDate) -> Result<SummaryReport, VitalsError> {
        self.summary_for_with_cancel(date, MetricSet::all(), &CancellationToken::new())
            .await
    }

    /// [`Vitals::summary`] that aborts with `Cancelled` when `cancel` fires.
    ///
    /// # Errors
    /// See [`Vitals::summaries_with_cancel`].
    pub async fn summary_with_cancel(
        &self,
        date: NaiveDate,
        cancel: &CancellationToken,
    ) -> Result<SummaryReport, VitalsError> {
        self.summary_for_with_cancel(date, MetricSet::all(), cancel)
            .await
    }

    /// Daily summary of the metrics in `metrics` for `date`; others stay absent.
    ///
    /// # Errors
    /// See [`Vitals::summaries_with_cancel`].
    pub async fn summary_for(
        &self,
        date: NaiveDate,
        metrics: MetricSet,
    ) -> Result<SummaryReport, VitalsError> {
        self.summary_for_with_cancel(date, metrics, &CancellationToken::new())
            .await
    }

    /// [`Vitals::summary_for`] that aborts with `Cancelled` when `cancel` fires.
    ///
    /// # Errors
    /// See [`Vitals::summaries_with_cancel`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "vitals::router",
            skip(self, cancel),
            fields(date = %date, metrics = ?metrics),
        )
    )]
    pub async fn summary_for_with_cancel(
        &self,
        date: NaiveDate,
        metrics: MetricSet,
        cancel: &CancellationToken,
    ) -> Result<SummaryReport, VitalsError> {
        let report = self
            .summaries_with_cancel(DateRange::single(date), metrics, cancel)
            .await?;
        let summary = report
            .summaries
            .into_iter()
            .next()
            .ok_or_else(|| VitalsError::Other(format!("no summary assembled for {date}")))?;
        Ok(SummaryReport {
            summary,
            diagnostics: report.diagnostics,
            rejections: report.rejections,
        })
    }

    /// One summary per day of `range`, ascending.
    ///
    /// # Errors
    /// See [`Vitals::summaries_with_cancel`].
    pub async fn summaries(
        &self,
        range: DateRange,
        metrics: MetricSet,
    ) -> Result<SummariesReport, VitalsError> {
        self.summaries_with_cancel(range, metrics, &CancellationToken::new())
            .await
    }

    /// [`Vitals::summaries`] that aborts with `Cancelled` when `cancel` fires.
    ///
    /// Metrics that fail (denied, unavailable, timed out, unsupported) are
    /// absent in every summary and listed once in `diagnostics`.
    ///
    /// # Errors
    /// - `InvalidArg` when `metrics` is empty.
    /// - `AllAuthorizationDenied` when every requested metric was denied.
    /// - `InvalidRange` when the source rejects the window.
    /// - `RequestTimeout` / `Cancelled` when the request is abandoned.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "vitals::router",
            skip(self, cancel),
            fields(start = %range.start(), end = %range.end(), metrics = ?metrics),
        )
    )]
    pub async fn summaries_with_cancel(
        &self,
        range: DateRange,
        metrics: MetricSet,
        cancel: &CancellationToken,
    ) -> Result<SummariesReport, VitalsError> {
        let fan = self.fan_out(metrics, range, cancel).await?;
        let summaries = range
            .days()
            .map(|day| summarize_day(day, &fan.buckets, &self.calendar, &self.aggregate))
            .collect();
        Ok(SummariesReport {
            summaries,
            diagnostics: fan.diagnostics,
            rejections: fan.rejections,
        })
    }
}
