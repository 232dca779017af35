use vitals::{DateRange, FillPolicy, Measurement, MetricType, VitalsError};

use crate::helpers::{MockSource, WATCH, day, dt, session, vitals_with};

fn workouts_on_odd_days() -> std::sync::Arc<MockSource> {
    MockSource::builder()
        .returns_ok(
            MetricType::Workout,
            [1, 3, 5]
                .into_iter()
                .map(|d| session("workout", dt(2024, 3, d, 7, 0, 0), dt(2024, 3, d, 7, 45, 0), WATCH))
                .collect(),
        )
        .build()
}

#[tokio::test]
async fn empty_days_are_explicit_gaps() {
    let vitals = vitals_with(workouts_on_odd_days()).build().unwrap();
    let range = DateRange::new(day(2024, 3, 1), day(2024, 3, 5)).unwrap();

    let report = vitals
        .trend(MetricType::Workout, range, FillPolicy::None)
        .await
        .unwrap();
    let series = report.series;
    assert_eq!(series.metric, MetricType::Workout);
    assert_eq!(series.range, range);
    assert_eq!(series.fill, FillPolicy::None);
    assert_eq!(series.points.len(), 5);
    assert_eq!(series.gap_count(), 2);
    let gaps: Vec<_> = series.gaps().map(|p| p.date).collect();
    assert_eq!(gaps, vec![day(2024, 3, 2), day(2024, 3, 4)]);
    assert_eq!(series.points[0].value, Measurement::Measured(2700.0));
    assert_eq!(series.points[4].value, Measurement::Measured(2700.0));
}

#[tokio::test]
async fn failed_metric_yields_all_gap_series_and_diagnostic() {
    let source = MockSource::builder()
        .fails(
            MetricType::Steps,
            VitalsError::unavailable(MetricType::Steps, "throttled"),
        )
        .build();
    let vitals = vitals_with(source).build().unwrap();
    let range = DateRange::new(day(2024, 3, 1), day(2024, 3, 3)).unwrap();

    let report = vitals
        .trend(MetricType::Steps, range, FillPolicy::CarryForward)
        .await
        .unwrap();
    assert_eq!(report.series.points.len(), 3);
    assert_eq!(report.series.gap_count(), 3);
    assert_eq!(report.diagnostics.len(), 1);
}

#[tokio::test]
async fn denied_trend_metric_fails_the_request() {
    let source = MockSource::builder().denies(MetricType::Sleep).build();
    let vitals = vitals_with(source).build().unwrap();

    let err = vitals
        .trend(
            MetricType::Sleep,
            DateRange::single(day(2024, 3, 1)),
            FillPolicy::None,
        )
        .await
        .unwrap_err();
    assert!(
        matches!(err, VitalsError::AllAuthorizationDenied(ref list) if list.len() == 1),
        "got {err:?}"
    );
}
