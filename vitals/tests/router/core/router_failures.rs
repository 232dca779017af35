use vitals::{DateRange, MetricSet, MetricType, VitalsError};

use crate::helpers::{MockSource, PHONE, day, dt, steps, vitals_with};

#[tokio::test]
async fn every_metric_denied_fails_the_request() {
    let source = MockSource::builder()
        .denies(MetricType::Steps)
        .denies(MetricType::HeartRate)
        .denies(MetricType::Sleep)
        .denies(MetricType::Workout)
        .build();
    let vitals = vitals_with(source).build().unwrap();

    let err = vitals.summary(day(2024, 3, 1)).await.unwrap_err();
    match err {
        VitalsError::AllAuthorizationDenied(list) => {
            assert_eq!(list.len(), 4);
            assert!(
                list.iter()
                    .all(|e| matches!(e, VitalsError::AuthorizationDenied { .. }))
            );
        }
        other => panic!("expected AllAuthorizationDenied, got {other:?}"),
    }
}

#[tokio::test]
async fn single_denied_metric_degrades_to_absent() {
    let d = day(2024, 3, 1);
    let source = MockSource::builder()
        .returns_ok(
            MetricType::Steps,
            vec![steps(400.0, dt(2024, 3, 1, 8, 0, 0), dt(2024, 3, 1, 9, 0, 0), PHONE, 1)],
        )
        .denies(MetricType::Sleep)
        .build();
    let vitals = vitals_with(source).build().unwrap();

    let report = vitals
        .summary_for(d, MetricSet::STEPS | MetricSet::SLEEP)
        .await
        .unwrap();
    assert_eq!(report.summary.total_steps.measured(), Some(400.0));
    assert!(report.summary.total_sleep_seconds.is_absent());
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].metric, MetricType::Sleep);
    assert_eq!(
        report.diagnostics[0].error,
        VitalsError::AuthorizationDenied {
            metric: MetricType::Sleep
        }
    );
}

#[tokio::test]
async fn denied_plus_unsupported_is_not_all_denied() {
    let source = MockSource::builder()
        .supports(MetricSet::STEPS | MetricSet::HEART_RATE)
        .denies(MetricType::Steps)
        .denies(MetricType::HeartRate)
        .build();
    let vitals = vitals_with(source).build().unwrap();

    let report = vitals.summary(day(2024, 3, 1)).await.unwrap();
    assert_eq!(report.diagnostics.len(), 4);
    assert!(report.summary.availability.is_empty());
    let metrics: Vec<MetricType> = report.diagnostics.iter().map(|d| d.metric).collect();
    assert_eq!(metrics, MetricType::ALL.to_vec());
    assert!(matches!(
        report.diagnostics[2].error,
        VitalsError::Unsupported {
            metric: MetricType::Sleep
        }
    ));
}

#[tokio::test]
async fn empty_metric_set_is_invalid_arg() {
    let vitals = vitals_with(MockSource::builder().build()).build().unwrap();
    let err = vitals
        .summary_for(day(2024, 3, 1), MetricSet::empty())
        .await
        .unwrap_err();
    assert!(matches!(err, VitalsError::InvalidArg(_)), "got {err:?}");
}

#[tokio::test]
async fn source_invalid_range_fails_the_request() {
    let source = MockSource::builder()
        .fails(
            MetricType::Steps,
            VitalsError::InvalidRange("window too wide".into()),
        )
        .build();
    let vitals = vitals_with(source).build().unwrap();

    let err = vitals
        .summaries(
            DateRange::new(day(2024, 3, 1), day(2024, 3, 3)).unwrap(),
            MetricSet::all(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, VitalsError::InvalidRange(_)), "got {err:?}");
}

#[tokio::test]
async fn rejected_samples_are_reported_without_failing() {
    let d = day(2024, 3, 1);
    let t = dt(2024, 3, 1, 8, 0, 0);
    let source = MockSource::builder()
        .returns_ok(
            MetricType::Steps,
            vec![
                steps(100.0, t, dt(2024, 3, 1, 8, 30, 0), PHONE, 0),
                steps(-5.0, t, dt(2024, 3, 1, 8, 30, 0), PHONE, 0),
                vitals::RawSample::new("steps", 10.0, "furlongs", t, t, PHONE),
            ],
        )
        .build();
    let vitals = vitals_with(source).build().unwrap();

    let report = vitals.summary_for(d, MetricSet::STEPS).await.unwrap();
    assert_eq!(report.summary.total_steps.measured(), Some(100.0));
    assert!(report.diagnostics.is_empty());
    assert_eq!(report.rejections.len(), 2);
    assert!(matches!(
        report.rejections[0].error,
        VitalsError::MalformedSample(_)
    ));
    assert!(matches!(
        report.rejections[1].error,
        VitalsError::UnsupportedUnit { .. }
    ));
}
