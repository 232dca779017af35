use std::collections::BTreeMap;

use chrono::NaiveDate;
use vitals_types::{
    DateRange, FillPolicy, FillSource, Measurement, MetricType, TrendPoint, TrendSeries,
    VitalsError,
};

/// One point per day of `range`, taken from `values`.
///
/// Days missing from `values` become explicit [`Measurement::Absent`] gaps.
#[must_use]
pub fn build_trend(
    metric: MetricType,
    range: DateRange,
    values: &BTreeMap<NaiveDate, Measurement<f64>>,
) -> TrendSeries {
    let points = range
        .days()
        .map(|date| TrendPoint {
            date,
            metric,
            value: values.get(&date).copied().unwrap_or_default(),
        })
        .collect();
    TrendSeries {
        metric,
        range,
        fill: FillPolicy::None,
        points,
    }
}

/// Replace gaps according to `policy`; substituted points are tagged `Filled`.
///
/// `CarryForward` leaves leading gaps absent.
///
/// # Errors
/// Returns `InvalidArg` for `ZeroFill` on a rate metric (heart rate).
pub fn apply_fill(mut series: TrendSeries, policy: FillPolicy) -> Result<TrendSeries, VitalsError> {
    match policy {
        FillPolicy::None => {}
        FillPolicy::ZeroFill => {
            if series.metric.is_rate() {
                return Err(VitalsError::InvalidArg(format!(
                    "zero fill is not allowed for rate metric {}",
                    series.metric
                )));
            }
            for p in series.points.iter_mut().filter(|p| p.value.is_absent()) {
                p.value = Measurement::Filled {
                    value: 0.0,
                    fill: FillSource::ZeroFill,
                };
            }
        }
        FillPolicy::CarryForward => {
            let mut last: Option<(f64, NaiveDate)> = None;
            for p in &mut series.points {
                match p.value {
                    Measurement::Measured(v) => last = Some((v, p.date)),
                    Measurement::Absent => {
                        if let Some((value, from)) = last {
                            p.value = Measurement::Filled {
                                value,
                                fill: FillSource::CarryForward { from },
                            };
                        }
                    }
                    Measurement::Filled { .. } => {}
                }
            }
        }
    }
    series.fill = policy;
    Ok(series)
}

/// Trailing mean over the measured values of the last `window` days.
///
/// Filled points do not contribute; a window without any measured value is
/// absent.
///
/// # Errors
/// Returns `InvalidArg` when `window` is zero.
pub fn rolling_mean(series: &TrendSeries, window: usize) -> Result<TrendSeries, VitalsError> {
    if window == 0 {
        return Err(VitalsError::InvalidArg(
            "rolling window must be at least one day".into(),
        ));
    }
    let points = series
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let lo = (i + 1).saturating_sub(window);
            let measured: Vec<f64> = series.points[lo..=i]
                .iter()
                .filter_map(|q| q.value.measured())
                .collect();
            let value = if measured.is_empty() {
                Measurement::Absent
            } else {
                Measurement::Measured(measured.iter().sum::<f64>() / measured.len() as f64)
            };
            TrendPoint { value, ..*p }
        })
        .collect();
    Ok(TrendSeries {
        metric: series.metric,
        range: series.range,
        fill: series.fill,
        points,
    })
}
