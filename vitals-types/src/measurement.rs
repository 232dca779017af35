//! Tagged aggregated values: measured, absent, or explicitly filled.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Provenance of a gap-filled value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FillSource {
    /// Value copied from the most recent measured day.
    CarryForward {
        /// Date the carried value was measured on.
        from: NaiveDate,
    },
    /// Gap replaced by zero at the caller's request.
    ZeroFill,
}

/// An aggregated value that distinguishes "measured zero" from "no data".
///
/// Every aggregated field in a summary or trend point is a `Measurement`;
/// there is no numeric sentinel for absence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Measurement<T> {
    /// Derived from at least one contributing record.
    Measured(T),
    /// No contributing record existed.
    Absent,
    /// A gap replaced by a fill policy.
    Filled {
        /// Substitute value.
        value: T,
        /// Where the substitute came from.
        fill: FillSource,
    },
}

impl<T> Default for Measurement<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T: Copy> Measurement<T> {
    /// The measured value, ignoring filled substitutes.
    #[must_use]
    pub const fn measured(&self) -> Option<T> {
        match self {
            Self::Measured(v) => Some(*v),
            Self::Absent | Self::Filled { .. } => None,
        }
    }

    /// The value to display: measured or filled, `None` when absent.
    #[must_use]
    pub const fn value(&self) -> Option<T> {
        match self {
            Self::Measured(v) | Self::Filled { value: v, .. } => Some(*v),
            Self::Absent => None,
        }
    }
}

impl<T> Measurement<T> {
    /// True when no data contributed and no fill was applied.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// True when the value was derived from records.
    #[must_use]
    pub const fn is_measured(&self) -> bool {
        matches!(self, Self::Measured(_))
    }

    /// True when the value is a fill substitute.
    #[must_use]
    pub const fn is_filled(&self) -> bool {
        matches!(self, Self::Filled { .. })
    }

    /// Transform the carried value, preserving the tag.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Measurement<U> {
        match self {
            Self::Measured(v) => Measurement::Measured(f(v)),
            Self::Absent => Measurement::Absent,
            Self::Filled { value, fill } => Measurement::Filled {
                value: f(value),
                fill,
            },
        }
    }
}

impl<T> From<Option<T>> for Measurement<T> {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Absent, Self::Measured)
    }
}
