use vitals::{DateRange, FillPolicy, FillSource, Measurement, MetricType, VitalsError};
use vitals_mock::DynamicMockSource;

use crate::helpers::{MockSource, PHONE, WATCH, day, dt, session, steps, vitals_with};

#[tokio::test]
async fn carry_forward_tags_the_source_day() {
    let source = MockSource::builder()
        .returns_ok(
            MetricType::Workout,
            vec![
                session("workout", dt(2024, 3, 1, 7, 0, 0), dt(2024, 3, 1, 7, 45, 0), WATCH),
                session("workout", dt(2024, 3, 3, 7, 0, 0), dt(2024, 3, 3, 7, 30, 0), WATCH),
            ],
        )
        .build();
    let vitals = vitals_with(source).build().unwrap();
    let range = DateRange::new(day(2024, 3, 1), day(2024, 3, 4)).unwrap();

    let series = vitals
        .trend(MetricType::Workout, range, FillPolicy::CarryForward)
        .await
        .unwrap()
        .series;
    assert_eq!(series.fill, FillPolicy::CarryForward);
    assert_eq!(series.gap_count(), 0);
    assert_eq!(
        series.points[1].value,
        Measurement::Filled {
            value: 2700.0,
            fill: FillSource::CarryForward {
                from: day(2024, 3, 1)
            },
        }
    );
    assert_eq!(series.points[2].value, Measurement::Measured(1800.0));
    assert_eq!(
        series.points[3].value,
        Measurement::Filled {
            value: 1800.0,
            fill: FillSource::CarryForward {
                from: day(2024, 3, 3)
            },
        }
    );
}

#[tokio::test]
async fn zero_fill_on_heart_rate_is_rejected_before_fetching() {
    let (source, ctrl) = DynamicMockSource::new_with_controller("dyn");
    let vitals = vitals_with(source).build().unwrap();

    let err = vitals
        .trend(
            MetricType::HeartRate,
            DateRange::single(day(2024, 3, 1)),
            FillPolicy::ZeroFill,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, VitalsError::InvalidArg(_)), "got {err:?}");
    assert!(ctrl.fetches().await.is_empty());
}

#[tokio::test]
async fn default_fill_comes_from_config() {
    let source = MockSource::builder()
        .returns_ok(
            MetricType::Steps,
            vec![steps(900.0, dt(2024, 3, 2, 12, 0, 0), dt(2024, 3, 2, 13, 0, 0), PHONE, 0)],
        )
        .build();
    let vitals = vitals_with(source)
        .fill_policy(FillPolicy::ZeroFill)
        .build()
        .unwrap();
    let range = DateRange::new(day(2024, 3, 1), day(2024, 3, 2)).unwrap();

    let series = vitals
        .trend_default(MetricType::Steps, range)
        .await
        .unwrap()
        .series;
    assert_eq!(series.fill, FillPolicy::ZeroFill);
    assert_eq!(
        series.points[0].value,
        Measurement::Filled {
            value: 0.0,
            fill: FillSource::ZeroFill,
        }
    );
    assert_eq!(series.points[1].value, Measurement::Measured(900.0));
}

#[tokio::test]
async fn leading_gap_has_nothing_to_carry() {
    let source = MockSource::builder()
        .returns_ok(
            MetricType::Steps,
            vec![steps(10.0, dt(2024, 3, 3, 12, 0, 0), dt(2024, 3, 3, 12, 5, 0), PHONE, 0)],
        )
        .build();
    let vitals = vitals_with(source).build().unwrap();
    let range = DateRange::new(day(2024, 3, 1), day(2024, 3, 3)).unwrap();

    let series = vitals
        .trend(MetricType::Steps, range, FillPolicy::CarryForward)
        .await
        .unwrap()
        .series;
    assert_eq!(series.gap_count(), 2);
    assert!(series.points[2].value.is_measured());
}
