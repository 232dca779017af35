use vitals::{Measurement, MetricSet, MetricType, VitalsError};

use crate::helpers::{MockSource, PHONE, WATCH, bpm, day, dt, steps, vitals_with};

#[tokio::test]
async fn unavailable_heart_rate_keeps_steps() {
    let d = day(2024, 3, 1);
    let source = MockSource::builder()
        .returns_ok(
            MetricType::Steps,
            vec![
                steps(3000.0, dt(2024, 3, 1, 8, 0, 0), dt(2024, 3, 1, 12, 0, 0), PHONE, 0),
                steps(1200.0, dt(2024, 3, 1, 17, 0, 0), dt(2024, 3, 1, 18, 0, 0), PHONE, 0),
            ],
        )
        .fails(
            MetricType::HeartRate,
            VitalsError::unavailable(MetricType::HeartRate, "sensor offline"),
        )
        .build();
    let vitals = vitals_with(source).build().unwrap();

    let report = vitals.summary(d).await.unwrap();
    assert_eq!(report.summary.date, d);
    assert_eq!(report.summary.total_steps, Measurement::Measured(4200.0));
    assert_eq!(report.summary.average_heart_rate, Measurement::Absent);
    assert_eq!(report.summary.availability, MetricSet::STEPS);
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].metric, MetricType::HeartRate);
    assert!(matches!(
        report.diagnostics[0].error,
        VitalsError::SourceUnavailable { .. }
    ));
}

#[tokio::test]
async fn measured_zero_is_not_absent() {
    let d = day(2024, 3, 1);
    let source = MockSource::builder()
        .returns_ok(
            MetricType::Steps,
            vec![steps(0.0, dt(2024, 3, 1, 9, 0, 0), dt(2024, 3, 1, 10, 0, 0), PHONE, 0)],
        )
        .build();
    let vitals = vitals_with(source).build().unwrap();

    let report = vitals.summary(d).await.unwrap();
    assert_eq!(report.summary.total_steps, Measurement::Measured(0.0));
    assert!(report.summary.total_sleep_seconds.is_absent());
    assert!(report.summary.total_workout_seconds.is_absent());
    assert!(report.diagnostics.is_empty());
}

#[tokio::test]
async fn unrequested_metrics_stay_absent_without_diagnostics() {
    let d = day(2024, 3, 1);
    let source = MockSource::builder()
        .returns_ok(
            MetricType::HeartRate,
            vec![
                bpm(60.0, dt(2024, 3, 1, 10, 0, 0), WATCH),
                bpm(90.0, dt(2024, 3, 1, 10, 5, 0), WATCH),
            ],
        )
        .returns_ok(
            MetricType::Steps,
            vec![steps(500.0, dt(2024, 3, 1, 8, 0, 0), dt(2024, 3, 1, 9, 0, 0), PHONE, 0)],
        )
        .build();
    let vitals = vitals_with(source).build().unwrap();

    let report = vitals
        .summary_for(d, MetricSet::HEART_RATE)
        .await
        .unwrap();
    // 60 bpm held 5 min, 90 bpm held the full 10 min cap.
    assert_eq!(report.summary.average_heart_rate, Measurement::Measured(80.0));
    assert!(report.summary.total_steps.is_absent());
    assert_eq!(report.summary.availability, MetricSet::HEART_RATE);
    assert!(report.diagnostics.is_empty());
}

#[tokio::test]
async fn fixture_source_fills_every_field() {
    let vitals = vitals_with(std::sync::Arc::new(vitals_mock::MockSource::new()))
        .build()
        .unwrap();

    // 2024-03-02 is an even day, so the workout fixture contributes.
    let report = vitals.summary(day(2024, 3, 2)).await.unwrap();
    assert!(report.diagnostics.is_empty());
    assert_eq!(report.summary.availability, MetricSet::all());
    assert_eq!(report.summary.total_workout_seconds.measured(), Some(2700.0));
}
