use proptest::prelude::*;

use vitals::{MetricSet, MetricType, RawSample, SummaryReport};

use crate::helpers::{MockSource, PHONE, RING, WATCH, bpm, day, dt, session, steps, vitals_with};

fn steps_samples() -> Vec<RawSample> {
    vec![
        steps(1000.0, dt(2024, 3, 1, 8, 0, 0), dt(2024, 3, 1, 10, 0, 0), PHONE, 1),
        steps(600.0, dt(2024, 3, 1, 9, 0, 0), dt(2024, 3, 1, 10, 0, 0), WATCH, 2),
        steps(240.0, dt(2024, 3, 1, 9, 30, 0), dt(2024, 3, 1, 11, 0, 0), PHONE, 1),
        steps(75.0, dt(2024, 3, 1, 23, 30, 0), dt(2024, 3, 2, 0, 30, 0), WATCH, 2),
    ]
}

fn heart_rate_samples() -> Vec<RawSample> {
    vec![
        bpm(58.0, dt(2024, 3, 1, 6, 0, 0), WATCH),
        bpm(61.0, dt(2024, 3, 1, 6, 0, 0), PHONE).with_priority(3),
        bpm(72.0, dt(2024, 3, 1, 6, 4, 0), WATCH),
        bpm(110.0, dt(2024, 3, 1, 7, 0, 0), WATCH),
    ]
}

fn sleep_samples() -> Vec<RawSample> {
    vec![
        session("sleep", dt(2024, 2, 29, 23, 0, 0), dt(2024, 3, 1, 6, 30, 0), RING),
        session("sleep", dt(2024, 2, 29, 22, 45, 0), dt(2024, 3, 1, 6, 15, 0), PHONE),
    ]
}

async fn summarize(
    steps: Vec<RawSample>,
    heart: Vec<RawSample>,
    sleep: Vec<RawSample>,
) -> SummaryReport {
    let source = MockSource::builder()
        .returns_ok(MetricType::Steps, steps)
        .returns_ok(MetricType::HeartRate, heart)
        .returns_ok(MetricType::Sleep, sleep)
        .build();
    let vitals = vitals_with(source).build().unwrap();
    vitals
        .summary_for(
            day(2024, 3, 1),
            MetricSet::STEPS | MetricSet::HEART_RATE | MetricSet::SLEEP,
        )
        .await
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 20, .. ProptestConfig::default() })]
    #[test]
    fn sample_order_does_not_change_the_summary(
        steps in Just(steps_samples()).prop_shuffle(),
        heart in Just(heart_rate_samples()).prop_shuffle(),
        sleep in Just(sleep_samples()).prop_shuffle(),
    ) {
        tokio_test::block_on(async move {
            let baseline = summarize(steps_samples(), heart_rate_samples(), sleep_samples()).await;
            let shuffled = summarize(steps, heart, sleep).await;
            assert_eq!(shuffled.summary, baseline.summary);
            assert_eq!(shuffled.diagnostics, baseline.diagnostics);
        });
    }
}
