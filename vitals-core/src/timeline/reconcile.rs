use std::cmp::Ordering;

use chrono::{DateTime, TimeDelta, Utc};
use vitals_types::{MetricKind, MetricType, NormalizedRecord, VitalsConfig};

use super::order::ConflictOrder;

/// Knobs for [`reconcile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileOptions {
    /// Precedence between conflicting records.
    pub order: ConflictOrder,
    /// Point samples whose anchors lie within this distance are duplicates.
    pub point_tolerance: TimeDelta,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            order: ConflictOrder::default(),
            point_tolerance: TimeDelta::seconds(1),
        }
    }
}

impl ReconcileOptions {
    /// Options derived from the orchestrator configuration.
    #[must_use]
    pub fn from_config(cfg: &VitalsConfig) -> Self {
        Self {
            order: ConflictOrder::from_config(cfg),
            point_tolerance: TimeDelta::from_std(cfg.point_tolerance)
                .unwrap_or_else(|_| TimeDelta::seconds(1)),
        }
    }
}

/// Resolve overlapping and duplicate records of `metric` into an ordered,
/// non-overlapping timeline.
///
/// Records of other metrics are ignored. Interval metrics are swept over
/// elementary segments and each segment is attributed to the best-ranked
/// covering record, proportionally to its duration; overlaps are never
/// summed. Point metrics are clustered by midpoint and the best-ranked record
/// of each cluster survives as an instant.
///
/// The result does not depend on the order of `records`.
#[must_use]
pub fn reconcile(
    metric: MetricType,
    records: Vec<NormalizedRecord>,
    opts: &ReconcileOptions,
) -> Vec<NormalizedRecord> {
    let mut records: Vec<NormalizedRecord> =
        records.into_iter().filter(|r| r.metric == metric).collect();
    // Winner first among equal starts.
    records.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| opts.order.compare(b, a)));

    match metric.kind() {
        MetricKind::Point => reconcile_points(records, &opts.order, opts.point_tolerance),
        MetricKind::Cumulative | MetricKind::Duration => {
            reconcile_intervals(records, &opts.order)
        }
    }
}

fn reconcile_intervals(
    records: Vec<NormalizedRecord>,
    order: &ConflictOrder,
) -> Vec<NormalizedRecord> {
    let (instants, spans): (Vec<_>, Vec<_>) =
        records.into_iter().partition(NormalizedRecord::is_instant);

    let mut bounds: Vec<DateTime<Utc>> = spans.iter().flat_map(|r| [r.start, r.end]).collect();
    bounds.sort_unstable();
    bounds.dedup();

    let mut out: Vec<NormalizedRecord> = Vec::new();
    // (winning span index, piece start, piece end)
    let mut current: Option<(usize, DateTime<Utc>, DateTime<Utc>)> = None;
    let mut active: Vec<usize> = Vec::new();
    let mut next = 0;

    for seg in bounds.windows(2) {
        let (seg_start, seg_end) = (seg[0], seg[1]);
        while next < spans.len() && spans[next].start <= seg_start {
            active.push(next);
            next += 1;
        }
        active.retain(|&i| spans[i].end > seg_start);
        let winner = active
            .iter()
            .copied()
            .max_by(|&a, &b| order.compare(&spans[a], &spans[b]));

        match (current, winner) {
            (Some((idx, from, to)), Some(w)) if idx == w && to == seg_start => {
                current = Some((idx, from, seg_end));
            }
            (prev, win) => {
                if let Some((idx, from, to)) = prev {
                    out.push(piece(&spans[idx], from, to));
                }
                current = win.map(|w| (w, seg_start, seg_end));
            }
        }
    }
    if let Some((idx, from, to)) = current {
        out.push(piece(&spans[idx], from, to));
    }

    // Instants survive only where no interval covers them.
    let mut kept: Vec<NormalizedRecord> = Vec::new();
    for inst in instants {
        if covered(&out, inst.start) {
            continue;
        }
        match kept.last_mut() {
            Some(last) if last.start == inst.start => {
                if order.compare(&inst, last) == Ordering::Greater {
                    *last = inst;
                }
            }
            _ => kept.push(inst),
        }
    }

    out.extend(kept);
    out.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.end.cmp(&b.end)));
    out
}

fn piece(rec: &NormalizedRecord, start: DateTime<Utc>, end: DateTime<Utc>) -> NormalizedRecord {
    if start == rec.start && end == rec.end {
        return rec.clone();
    }
    rec.with_span(start, end, rec.apportion(start, end))
}

// `pieces` is sorted by start and non-overlapping.
fn covered(pieces: &[NormalizedRecord], at: DateTime<Utc>) -> bool {
    let idx = pieces.partition_point(|p| p.start <= at);
    idx > 0 && pieces[idx - 1].end > at
}

fn reconcile_points(
    records: Vec<NormalizedRecord>,
    order: &ConflictOrder,
    tolerance: TimeDelta,
) -> Vec<NormalizedRecord> {
    let mut anchored: Vec<(DateTime<Utc>, NormalizedRecord)> =
        records.into_iter().map(|r| (r.midpoint(), r)).collect();
    anchored.sort_by(|(ta, a), (tb, b)| ta.cmp(tb).then_with(|| order.compare(b, a)));

    let mut out = Vec::new();
    // (cluster's first anchor, best record so far, its anchor)
    let mut cluster: Option<(DateTime<Utc>, NormalizedRecord, DateTime<Utc>)> = None;
    for (anchor, rec) in anchored {
        if let Some((first, best, best_anchor)) = cluster.as_mut()
            && anchor - *first <= tolerance
        {
            if order.compare(&rec, best) == Ordering::Greater {
                *best = rec;
                *best_anchor = anchor;
            }
            continue;
        }
        if let Some((_, best, at)) = cluster.take() {
            out.push(best.with_span(at, at, best.value));
        }
        cluster = Some((anchor, rec, anchor));
    }
    if let Some((_, best, at)) = cluster {
        out.push(best.with_span(at, at, best.value));
    }
    out
}
