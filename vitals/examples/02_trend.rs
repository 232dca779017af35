use std::sync::Arc;

use vitals::{DateRange, FillPolicy, MetricType, Vitals, rolling_mean};
use vitals_mock::MockSource;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let vitals = Vitals::builder()
        .source(Arc::new(MockSource::new()))
        .max_concurrent_fetches(2)
        .build()?;

    let from = chrono::NaiveDate::from_ymd_opt(2024, 3, 1).ok_or("invalid date")?;
    let to = chrono::NaiveDate::from_ymd_opt(2024, 3, 10).ok_or("invalid date")?;
    let range = DateRange::new(from, to)?;

    // Workouts only happen on even days; odd days are explicit gaps.
    let raw = vitals
        .trend(MetricType::Workout, range, FillPolicy::None)
        .await?;
    println!("workout gaps: {}", raw.series.gap_count());

    // Carry the last session forward and mark it as filled.
    let filled = vitals
        .trend(MetricType::Workout, range, FillPolicy::CarryForward)
        .await?;
    for p in &filled.series.points {
        println!("{} {:?}", p.date, p.value);
    }

    let hr = vitals
        .trend(MetricType::HeartRate, range, FillPolicy::None)
        .await?;
    let smoothed = rolling_mean(&hr.series, 3)?;
    for p in &smoothed.points {
        println!("{} avg hr (3d) {:?}", p.date, p.value.measured());
    }

    Ok(())
}
