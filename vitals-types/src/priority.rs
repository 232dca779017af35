//! Caller-configured source ranking.
//!
//! Recording sources report their own priority on every sample, but the caller
//! usually knows better (e.g. "trust the watch over the phone"). A
//! [`SourcePriorities`] list ranks source ids; listed sources outrank every
//! self-reported priority, earlier entries outranking later ones. Unlisted
//! sources keep their own priority.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::de::{SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize};

/// Typed key naming a sample source, used in logs and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceKey(pub &'static str);

impl SourceKey {
    /// Construct a key from a static name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Returns the inner static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for SourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Ranked list of recording-source ids with cached positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourcePriorities {
    values: Vec<String>,
    ranks: HashMap<String, usize>,
}

impl SourcePriorities {
    /// Build a ranking from most to least trusted, keeping the first occurrence
    /// of duplicated ids.
    pub fn new<S: AsRef<str>>(list: &[S]) -> Self {
        let mut values: Vec<String> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        for id in list {
            if seen.insert(id.as_ref()) {
                values.push(id.as_ref().to_string());
            }
        }

        let ranks = values
            .iter()
            .cloned()
            .enumerate()
            .map(|(idx, v)| (v, idx))
            .collect();

        Self { values, ranks }
    }

    /// Ranked ids, most trusted first.
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// True when no ranking is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Position of `source_id` in the ranking.
    #[must_use]
    pub fn rank(&self, source_id: &str) -> Option<usize> {
        self.ranks.get(source_id).copied()
    }

    /// Effective priority for a record from `source_id` that reported `own`.
    ///
    /// Ranked sources map to `i32::MAX - rank`.
    #[must_use]
    pub fn resolve(&self, source_id: &str, own: i32) -> i32 {
        self.rank(source_id).map_or(own, |rank| {
            i32::MAX.saturating_sub(i32::try_from(rank).unwrap_or(i32::MAX))
        })
    }
}

impl Serialize for SourcePriorities {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.values.len()))?;
        for v in &self.values {
            seq.serialize_element(v)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for SourcePriorities {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct RankVisitor;

        impl<'de> Visitor<'de> for RankVisitor {
            type Value = SourcePriorities;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a sequence of source ids")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut vals: Vec<String> = Vec::new();
                while let Some(elem) = seq.next_element::<String>()? {
                    vals.push(elem);
                }
                Ok(SourcePriorities::new(&vals))
            }
        }

        deserializer.deserialize_seq(RankVisitor)
    }
}
