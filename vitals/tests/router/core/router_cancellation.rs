use std::time::Duration;

use vitals::{CancellationToken, DateRange, FillPolicy, MetricType, VitalsError};
use vitals_mock::{DynamicMockSource, MockBehavior};

use crate::helpers::{MockSource, day, vitals_with};

#[tokio::test]
async fn pre_cancelled_token_skips_fetching() {
    let (source, ctrl) = DynamicMockSource::new_with_controller("dyn");
    let vitals = vitals_with(source).build().unwrap();

    let token = CancellationToken::new();
    token.cancel();
    let err = vitals
        .summary_with_cancel(day(2024, 3, 1), &token)
        .await
        .unwrap_err();
    assert_eq!(err, VitalsError::Cancelled);
    assert!(ctrl.fetches().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn cancel_mid_flight_yields_only_cancelled() {
    let (source, ctrl) = DynamicMockSource::new_with_controller("dyn");
    ctrl.set_behavior(MetricType::HeartRate, MockBehavior::Hang)
        .await;
    let vitals = vitals_with(source)
        .source_timeout(Duration::from_secs(3600))
        .build()
        .unwrap();

    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let err = vitals
        .summary_with_cancel(day(2024, 3, 1), &token)
        .await
        .unwrap_err();
    assert_eq!(err, VitalsError::Cancelled);
    // Dropped fetches release their in-flight slots.
    assert_eq!(ctrl.in_flight(), 0);
}

#[tokio::test(start_paused = true)]
async fn trend_honors_cancellation() {
    let vitals = vitals_with(
        MockSource::builder()
            .delay(MetricType::Sleep, Duration::from_secs(10))
            .build(),
    )
    .source_timeout(Duration::from_secs(60))
    .build()
    .unwrap();

    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(1)).await;
        trigger.cancel();
    });

    let range = DateRange::new(day(2024, 3, 1), day(2024, 3, 7)).unwrap();
    let err = vitals
        .trend_with_cancel(MetricType::Sleep, range, FillPolicy::None, &token)
        .await
        .unwrap_err();
    assert_eq!(err, VitalsError::Cancelled);
}
