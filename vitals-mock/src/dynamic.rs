use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use vitals_core::{MetricSet, MetricType, RawSample, SampleSource, VitalsError};

/// Instruction for how a fetch should behave for a given metric.
#[derive(Clone, Debug)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Sleep, then return the provided value.
    Delay(Duration, T),
    /// Fail immediately with the provided error.
    Fail(VitalsError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

/// One recorded call to `fetch_raw_samples`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchLogEntry {
    /// Metric requested.
    pub metric: MetricType,
    /// Window start.
    pub start: DateTime<Utc>,
    /// Window end.
    pub end: DateTime<Utc>,
}

#[derive(Default)]
struct InternalState {
    rules: HashMap<MetricType, MockBehavior<Vec<RawSample>>>,
    fetches: Vec<FetchLogEntry>,
}

struct Shared {
    state: Mutex<InternalState>,
    supported: AtomicU8,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    completed: AtomicUsize,
}

// Decrements the in-flight gauge even when the fetch future is dropped.
struct InFlight<'a>(&'a Shared);

impl<'a> InFlight<'a> {
    fn enter(shared: &'a Shared) -> Self {
        let now = shared.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        shared.max_in_flight.fetch_max(now, Ordering::SeqCst);
        Self(shared)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    shared: Arc<Shared>,
}

impl DynamicMockController {
    /// Set the behavior of fetches for `metric`.
    pub async fn set_behavior(&self, metric: MetricType, behavior: MockBehavior<Vec<RawSample>>) {
        let mut guard = self.shared.state.lock().await;
        guard.rules.insert(metric, behavior);
    }

    /// Restrict the metrics the source claims to support.
    pub fn set_supported(&self, metrics: MetricSet) {
        self.shared.supported.store(metrics.bits(), Ordering::SeqCst);
    }

    /// Return a copy of the fetch log.
    pub async fn fetches(&self) -> Vec<FetchLogEntry> {
        let guard = self.shared.state.lock().await;
        guard.fetches.clone()
    }

    /// Fetches currently running.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.shared.in_flight.load(Ordering::SeqCst)
    }

    /// Highest number of fetches observed running at once.
    #[must_use]
    pub fn max_in_flight(&self) -> usize {
        self.shared.max_in_flight.load(Ordering::SeqCst)
    }

    /// Fetches that ran to completion (returned a value or an error).
    #[must_use]
    pub fn completed(&self) -> usize {
        self.shared.completed.load(Ordering::SeqCst)
    }

    /// Clear all configured behaviors, the fetch log and the counters.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.shared.state.lock().await;
        guard.rules.clear();
        guard.fetches.clear();
        self.shared.max_in_flight.store(0, Ordering::SeqCst);
        self.shared.completed.store(0, Ordering::SeqCst);
        self.set_supported(MetricSet::all());
    }
}

/// A source that defers all behavior to an external controller.
pub struct DynamicMockSource {
    name: &'static str,
    shared: Arc<Shared>,
}

impl DynamicMockSource {
    /// Create a new dynamic mock source and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn SampleSource>, DynamicMockController) {
        let shared = Arc::new(Shared {
            state: Mutex::new(InternalState::default()),
            supported: AtomicU8::new(MetricSet::all().bits()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
        });
        let controller = DynamicMockController {
            shared: Arc::clone(&shared),
        };
        let me = Arc::new(Self { name, shared });
        (me as Arc<dyn SampleSource>, controller)
    }
}

#[async_trait]
impl SampleSource for DynamicMockSource {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    fn supports_metric(&self, metric: MetricType) -> bool {
        MetricSet::from_bits_truncate(self.shared.supported.load(Ordering::SeqCst)).has(metric)
    }

    async fn fetch_raw_samples(
        &self,
        metric: MetricType,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<RawSample>, VitalsError> {
        let _guard = InFlight::enter(&self.shared);
        // Snapshot the behavior without holding the lock across await points
        let behavior = {
            let mut guard = self.shared.state.lock().await;
            guard.fetches.push(FetchLogEntry { metric, start, end });
            guard.rules.get(&metric).cloned()
        };

        let out = match behavior {
            Some(MockBehavior::Return(samples)) => Ok(samples),
            Some(MockBehavior::Delay(wait, samples)) => {
                tokio::time::sleep(wait).await;
                Ok(samples)
            }
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            None => Ok(Vec::new()),
        };
        self.shared.completed.fetch_add(1, Ordering::SeqCst);
        out
    }
}
