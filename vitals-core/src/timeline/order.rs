use std::cmp::Ordering;

use vitals_types::{NormalizedRecord, TieBreak, VitalsConfig};

/// Total order deciding which of two competing records wins.
///
/// Precedence: higher `source_priority`, then larger coverage, then the
/// configured [`TieBreak`], then a fixed tail (`source_id`, `start`, `end`,
/// value, `observed_at`) so that no two distinct records compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConflictOrder {
    tie_break: TieBreak,
}

impl ConflictOrder {
    /// Order using `tie_break` between equally ranked records.
    #[must_use]
    pub const fn new(tie_break: TieBreak) -> Self {
        Self { tie_break }
    }

    /// Order configured from `cfg.tie_break`.
    #[must_use]
    pub const fn from_config(cfg: &VitalsConfig) -> Self {
        Self::new(cfg.tie_break)
    }

    /// The active tie-break policy.
    #[must_use]
    pub const fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Compare two records; `Greater` means `a` wins over `b`.
    #[must_use]
    pub fn compare(&self, a: &NormalizedRecord, b: &NormalizedRecord) -> Ordering {
        a.source_priority
            .cmp(&b.source_priority)
            .then_with(|| a.duration().cmp(&b.duration()))
            .then_with(|| match self.tie_break {
                TieBreak::MostRecentObservation => a.recency().cmp(&b.recency()),
                TieBreak::EarliestObservation => b.recency().cmp(&a.recency()),
            })
            // Lexically smaller source id, earlier start win.
            .then_with(|| b.source_id.cmp(&a.source_id))
            .then_with(|| b.start.cmp(&a.start))
            .then_with(|| a.end.cmp(&b.end))
            .then_with(|| a.value.total_cmp(&b.value))
            .then_with(|| a.observed_at.cmp(&b.observed_at))
    }

    /// The winning record of the pair.
    #[must_use]
    pub fn winner<'a>(
        &self,
        a: &'a NormalizedRecord,
        b: &'a NormalizedRecord,
    ) -> &'a NormalizedRecord {
        if self.compare(a, b) == Ordering::Less {
            b
        } else {
            a
        }
    }
}
