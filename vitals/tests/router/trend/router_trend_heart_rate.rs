use std::time::Duration;

use vitals::{DateRange, FillPolicy, Measurement, MetricType, rolling_mean};

use crate::helpers::{MockSource, PHONE, WATCH, bpm, day, dt, vitals_with};

#[tokio::test]
async fn duplicate_readings_collapse_to_the_preferred_source() {
    let source = MockSource::builder()
        .returns_ok(
            MetricType::HeartRate,
            vec![
                bpm(60.0, dt(2024, 3, 1, 10, 0, 0), WATCH),
                // Same beat reported by the phone half a second later.
                vitals::RawSample::new(
                    "heart_rate",
                    66.0,
                    "bpm",
                    dt(2024, 3, 1, 10, 0, 0) + chrono::TimeDelta::milliseconds(500),
                    dt(2024, 3, 1, 10, 0, 0) + chrono::TimeDelta::milliseconds(500),
                    PHONE,
                ),
            ],
        )
        .build();
    let vitals = vitals_with(source)
        .prefer_sources(&[WATCH])
        .build()
        .unwrap();

    let series = vitals
        .trend(
            MetricType::HeartRate,
            DateRange::single(day(2024, 3, 1)),
            FillPolicy::None,
        )
        .await
        .unwrap()
        .series;
    assert_eq!(series.points[0].value, Measurement::Measured(60.0));
}

#[tokio::test]
async fn hold_cap_limits_sample_weight() {
    let source = MockSource::builder()
        .returns_ok(
            MetricType::HeartRate,
            vec![
                bpm(60.0, dt(2024, 3, 1, 10, 0, 0), WATCH),
                bpm(120.0, dt(2024, 3, 1, 13, 0, 0), WATCH),
                bpm(90.0, dt(2024, 3, 1, 13, 1, 0), WATCH),
            ],
        )
        .build();
    let vitals = vitals_with(source)
        .max_heart_rate_hold(Duration::from_secs(60))
        .build()
        .unwrap();

    let series = vitals
        .trend(
            MetricType::HeartRate,
            DateRange::single(day(2024, 3, 1)),
            FillPolicy::CarryForward,
        )
        .await
        .unwrap()
        .series;
    // Each reading is held for one minute at most.
    assert_eq!(series.points[0].value, Measurement::Measured(90.0));
}

#[tokio::test]
async fn rolling_mean_smooths_measured_days() {
    let source = MockSource::builder()
        .returns_ok(
            MetricType::HeartRate,
            vec![
                bpm(60.0, dt(2024, 3, 1, 10, 0, 0), WATCH),
                bpm(80.0, dt(2024, 3, 2, 10, 0, 0), WATCH),
                bpm(70.0, dt(2024, 3, 4, 10, 0, 0), WATCH),
            ],
        )
        .build();
    let vitals = vitals_with(source).build().unwrap();
    let range = DateRange::new(day(2024, 3, 1), day(2024, 3, 4)).unwrap();

    let series = vitals
        .trend(MetricType::HeartRate, range, FillPolicy::None)
        .await
        .unwrap()
        .series;
    let smoothed = rolling_mean(&series, 2).unwrap();
    assert_eq!(smoothed.points[0].value, Measurement::Measured(60.0));
    assert_eq!(smoothed.points[1].value, Measurement::Measured(70.0));
    assert_eq!(smoothed.points[2].value, Measurement::Measured(80.0));
    assert_eq!(smoothed.points[3].value, Measurement::Measured(70.0));
}
