use std::sync::Arc;

use tracing_subscriber::fmt::format::FmtSpan;
use vitals::{MetricType, Vitals};
use vitals_mock::MockSource;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=info,vitals=trace cargo run --example 01_daily_summary --features tracing
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::CLOSE)
        .try_init();

    // 1. A fixture source whose heart-rate sensor is offline.
    let source = MockSource::new().unavailable(MetricType::HeartRate);

    // 2. Build the façade with a local calendar and a preferred wearable.
    let vitals = Vitals::builder()
        .source(Arc::new(source))
        .calendar("Europe/Berlin")
        .prefer_sources(&["mock-watch", "mock-ring"])
        .build()?;

    // 3. Summarize one day. Heart rate degrades to absent with a diagnostic.
    let day = chrono::NaiveDate::from_ymd_opt(2024, 3, 2).ok_or("invalid date")?;
    let report = vitals.summary(day).await?;

    println!("{:#?}", report.summary);
    for diag in &report.diagnostics {
        println!("{}: {}", diag.metric, diag.error);
    }

    Ok(())
}
