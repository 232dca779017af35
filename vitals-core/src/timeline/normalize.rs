use vitals_types::{
    MetricType, NormalizedRecord, RawSample, SampleRejection, SourcePriorities, VitalsError,
};

/// Result of normalizing a batch: accepted records plus per-sample rejections.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedBatch {
    /// Records in canonical units, in input order.
    pub records: Vec<NormalizedRecord>,
    /// Samples that could not be normalized.
    pub rejections: Vec<SampleRejection>,
}

const METRIC_IDENTIFIERS: &[(&str, MetricType)] = &[
    ("steps", MetricType::Steps),
    ("step_count", MetricType::Steps),
    ("hkquantitytypeidentifierstepcount", MetricType::Steps),
    ("com.google.step_count.delta", MetricType::Steps),
    ("heart_rate", MetricType::HeartRate),
    ("heartrate", MetricType::HeartRate),
    ("hr", MetricType::HeartRate),
    ("hkquantitytypeidentifierheartrate", MetricType::HeartRate),
    ("com.google.heart_rate.bpm", MetricType::HeartRate),
    ("sleep", MetricType::Sleep),
    ("sleep_analysis", MetricType::Sleep),
    ("sleep_session", MetricType::Sleep),
    ("hkcategorytypeidentifiersleepanalysis", MetricType::Sleep),
    ("com.google.sleep.segment", MetricType::Sleep),
    ("workout", MetricType::Workout),
    ("exercise", MetricType::Workout),
    ("exercise_session", MetricType::Workout),
    ("hkworkouttypeidentifier", MetricType::Workout),
    ("com.google.activity.segment", MetricType::Workout),
];

/// Map a source-specific identifier onto a metric type (case-insensitive).
#[must_use]
pub fn identify_metric(identifier: &str) -> Option<MetricType> {
    let needle = identifier.trim().to_ascii_lowercase();
    METRIC_IDENTIFIERS
        .iter()
        .find(|(id, _)| *id == needle)
        .map(|(_, m)| *m)
}

// Multiplier from `unit` to the metric's canonical unit.
fn unit_factor(metric: MetricType, unit: &str) -> Option<f64> {
    let unit = unit.trim().to_ascii_lowercase();
    match metric {
        MetricType::Steps => match unit.as_str() {
            "count" | "steps" | "step" => Some(1.0),
            _ => None,
        },
        MetricType::HeartRate => match unit.as_str() {
            "bpm" | "count/min" | "beats/min" | "/min" => Some(1.0),
            "hz" | "count/s" | "beats/s" => Some(60.0),
            _ => None,
        },
        MetricType::Sleep | MetricType::Workout => match unit.as_str() {
            "s" | "sec" | "second" | "seconds" => Some(1.0),
            "ms" => Some(0.001),
            "min" | "minute" | "minutes" => Some(60.0),
            "h" | "hr" | "hour" | "hours" => Some(3600.0),
            _ => None,
        },
    }
}

/// Convert one raw sample into a canonical record.
///
/// The record keeps the sample's self-reported priority; caller overrides are
/// applied by [`normalize_batch`].
///
/// # Errors
/// - `UnsupportedMetric` when the identifier is unknown.
/// - `MalformedSample` when `end < start` or the value is negative or not finite.
/// - `UnsupportedUnit` when the unit has no conversion for the metric.
pub fn normalize(sample: &RawSample) -> Result<NormalizedRecord, VitalsError> {
    let metric =
        identify_metric(&sample.metric).ok_or_else(|| VitalsError::UnsupportedMetric {
            identifier: sample.metric.clone(),
        })?;
    if sample.end < sample.start {
        return Err(VitalsError::malformed(format!(
            "end {} is before start {}",
            sample.end, sample.start
        )));
    }
    if !sample.value.is_finite() {
        return Err(VitalsError::malformed(format!(
            "non-finite value {}",
            sample.value
        )));
    }
    if sample.value < 0.0 {
        return Err(VitalsError::malformed(format!(
            "negative value {}",
            sample.value
        )));
    }
    let factor = unit_factor(metric, &sample.unit).ok_or_else(|| VitalsError::UnsupportedUnit {
        metric,
        unit: sample.unit.clone(),
    })?;

    Ok(NormalizedRecord {
        metric,
        // `+ 0.0` folds a negative zero into positive zero.
        value: sample.value * factor + 0.0,
        start: sample.start,
        end: sample.end,
        source_id: sample.source_id.clone(),
        source_priority: sample.source_priority,
        observed_at: sample.observed_at,
    })
}

/// Normalize every sample delivered by a fetch of `fetched`.
///
/// Samples that identify as a different metric than the one fetched are
/// rejected as malformed so they cannot leak into another metric's timeline.
/// Ranked sources in `priorities` override self-reported priorities.
#[must_use]
pub fn normalize_batch(
    fetched: MetricType,
    samples: &[RawSample],
    priorities: &SourcePriorities,
) -> NormalizedBatch {
    let mut batch = NormalizedBatch::default();
    for sample in samples {
        let outcome = normalize(sample).and_then(|rec| {
            if rec.metric == fetched {
                Ok(rec)
            } else {
                Err(VitalsError::malformed(format!(
                    "sample identified as {} in a {fetched} fetch",
                    rec.metric
                )))
            }
        });
        match outcome {
            Ok(mut rec) => {
                rec.source_priority = priorities.resolve(&rec.source_id, rec.source_priority);
                batch.records.push(rec);
            }
            Err(error) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    target: "vitals::normalize",
                    metric = %fetched,
                    source_id = %sample.source_id,
                    error = %error,
                    "sample rejected"
                );
                batch.rejections.push(SampleRejection {
                    metric: fetched,
                    source_id: sample.source_id.clone(),
                    start: sample.start,
                    error,
                });
            }
        }
    }
    batch
}
