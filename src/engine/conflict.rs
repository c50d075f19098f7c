//! Span-overlap conflict resolution.
//!
//! Recognizers run independently, so their candidates may overlap — "next
//! Friday" from the modifier pattern against a bare "Friday", or a full
//! postal address against the street-address prefix inside it. This module
//! turns the combined candidate list into a non-overlapping winner set:
//!
//! 1. Cluster candidates whose spans transitively overlap (two spans overlap
//!    iff `a.start < b.end && b.start < a.end`; if A overlaps B and B
//!    overlaps C, all three share a cluster even when A and C are disjoint).
//! 2. Pick exactly one winner per cluster by, in order:
//!    (a) highest confidence, (b) longest span, (c) earliest start,
//!    (d) first-encountered in recognizer-execution order.
//! 3. Size-1 clusters win trivially and are not recorded as conflicts.
//!
//! The tie-break order is part of the public contract: callers observe it
//! through which tag survives, so it must never be left to iteration-order
//! accidents. Step (d) is why candidates carry their encounter index.

use std::cmp::Ordering;

use crate::api::ConflictGroup;
use crate::tag::{ParsedTag, color_for};
use crate::{Candidate, Span};

/// Output of conflict resolution: winners sorted by `start`, plus one
/// [`ConflictGroup`] per cluster that actually had a fight.
#[derive(Debug, Clone)]
pub(crate) struct Resolution {
    pub winners: Vec<ParsedTag>,
    pub conflicts: Vec<ConflictGroup>,
}

pub(crate) fn resolve(text: &str, candidates: &[Candidate]) -> Resolution {
    // Sort candidate indices by span; ties keep encounter order so the
    // sweep below is deterministic.
    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.sort_by_key(|&i| (candidates[i].span.start, candidates[i].span.end, i));

    // Single left-to-right sweep. Because the indices are sorted by start,
    // a candidate transitively overlaps the current cluster iff it starts
    // before the furthest end seen in that cluster.
    let mut clusters: Vec<Vec<usize>> = Vec::new();
    let mut cluster_end = 0usize;
    for &i in &order {
        let span = candidates[i].span;
        match clusters.last_mut() {
            Some(cluster) if span.start < cluster_end => {
                cluster.push(i);
                cluster_end = cluster_end.max(span.end);
            }
            _ => {
                clusters.push(vec![i]);
                cluster_end = span.end;
            }
        }
    }

    // Winner ids are assigned in span order first; discarded candidates are
    // numbered after every winner so ids stay unique within the result.
    let mut winner_ids: Vec<(usize, u32)> = Vec::new();
    for (k, cluster) in clusters.iter().enumerate() {
        let winner = cluster.iter().copied().reduce(|best, i| if beats(candidates, i, best) { i } else { best });
        winner_ids.push((winner.expect("clusters are non-empty"), (k + 1) as u32));
    }
    let mut next_id = (winner_ids.len() + 1) as u32;

    let mut winners = Vec::with_capacity(clusters.len());
    let mut conflicts = Vec::new();
    for (cluster, &(winner_idx, winner_id)) in clusters.iter().zip(&winner_ids) {
        let winner = materialize(text, &candidates[winner_idx], winner_id);
        if cluster.len() > 1 {
            let discarded: Vec<ParsedTag> = cluster
                .iter()
                .filter(|&&i| i != winner_idx)
                .map(|&i| {
                    let tag = materialize(text, &candidates[i], next_id);
                    next_id += 1;
                    tag
                })
                .collect();
            log::debug!(
                "conflict at {}..{}: kept {} \"{}\" over {} candidate(s)",
                winner.start,
                winner.end,
                winner.tag_type,
                winner.original_text,
                discarded.len()
            );
            conflicts.push(ConflictGroup { winner: winner.clone(), discarded });
        }
        winners.push(winner);
    }

    Resolution { winners, conflicts }
}

/// `true` iff candidate `a` wins over candidate `b` under the documented
/// tie-break order. Indices double as encounter order.
fn beats(candidates: &[Candidate], a: usize, b: usize) -> bool {
    let (ca, cb) = (&candidates[a], &candidates[b]);
    match ca.confidence.total_cmp(&cb.confidence) {
        Ordering::Greater => return true,
        Ordering::Less => return false,
        Ordering::Equal => {}
    }
    match ca.span.len().cmp(&cb.span.len()) {
        Ordering::Greater => return true,
        Ordering::Less => return false,
        Ordering::Equal => {}
    }
    match ca.span.start.cmp(&cb.span.start) {
        Ordering::Less => return true,
        Ordering::Greater => return false,
        Ordering::Equal => {}
    }
    a < b
}

/// Turn a candidate into a caller-facing tag.
pub(crate) fn materialize(text: &str, candidate: &Candidate, id: u32) -> ParsedTag {
    let Span { start, end } = candidate.span;
    ParsedTag {
        id,
        tag_type: candidate.tag_type,
        value: candidate.value.clone(),
        original_text: text[start..end].to_string(),
        display_text: candidate.display.clone(),
        start,
        end,
        confidence: candidate.confidence,
        icon: candidate.tag_type.icon(),
        color: color_for(candidate.tag_type, &candidate.value),
        recognizer: candidate.recognizer,
    }
}
