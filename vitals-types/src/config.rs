//! Configuration types shared by the pipeline and the orchestrator.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::priority::SourcePriorities;

/// Gap handling for trend series, applied after aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillPolicy {
    /// Keep gaps as explicit absent points.
    #[default]
    None,
    /// Replace a gap with the most recent measured value.
    CarryForward,
    /// Replace a gap with zero. Rejected for rate metrics.
    ZeroFill,
}

/// Tie-break applied when two conflicting records share priority and coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// The record observed most recently wins.
    #[default]
    MostRecentObservation,
    /// The record observed first wins.
    EarliestObservation,
}

/// Global configuration for the `Vitals` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VitalsConfig {
    /// Calendar/timezone identifier used for day bucketing: an IANA name
    /// (`Europe/Berlin`), `UTC`, or a fixed offset (`+05:30`).
    pub calendar: String,
    /// Upper bound on concurrent outbound fetches; extra fetches queue.
    pub max_concurrent_fetches: usize,
    /// Timeout for a single per-metric fetch.
    pub source_timeout: Duration,
    /// Optional deadline for a whole request (fan-out plus join).
    pub request_timeout: Option<Duration>,
    /// Default fill policy for trend requests that do not name one.
    pub fill_policy: FillPolicy,
    /// Tie-break between equally ranked conflicting records.
    pub tie_break: TieBreak,
    /// Heart-rate samples closer than this are treated as duplicates.
    pub point_tolerance: Duration,
    /// Longest span a single heart-rate sample is weighted for.
    pub max_heart_rate_hold: Duration,
    /// Caller-supplied source ranking that overrides self-reported priorities.
    pub source_priorities: SourcePriorities,
}

impl Default for VitalsConfig {
    fn default() -> Self {
        Self {
            calendar: "UTC".to_string(),
            max_concurrent_fetches: 4,
            source_timeout: Duration::from_secs(10),
            request_timeout: None,
            fill_policy: FillPolicy::default(),
            tie_break: TieBreak::default(),
            point_tolerance: Duration::from_secs(1),
            max_heart_rate_hold: Duration::from_secs(10 * 60),
            source_priorities: SourcePriorities::default(),
        }
    }
}
