//! Per-day tile layout: merge identical spans, cluster overlaps, and assign
//! columns.
//!
//! Meetings with the same `(start, end)` become one tile with stacked
//! entries. Tiles whose spans overlap, directly or through a chain, form a
//! cluster and are laid out side by side using first-fit column assignment
//! in `(start, end)` order.

use std::mem;

use indexmap::IndexMap;
use log::trace;

use super::grid::{Entry, Tile};

/// A meeting that survived filtering, projected for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingSlot {
    pub day: u8,
    pub start_minutes: u32,
    pub end_minutes: u32,
    pub entry: Entry,
}

/// A merged tile before column assignment.
#[derive(Debug)]
struct Candidate {
    start: u32,
    end: u32,
    entries: Vec<Entry>,
}

#[derive(Debug)]
struct Cluster {
    members: Vec<usize>,
    max_end: u32,
}

/// Lays out one day's slots as non-overlapping tiles.
///
/// Tiles are returned cluster by cluster, each cluster in `(start, end)`
/// order. An empty input gives an empty list.
pub fn layout_day(slots: impl IntoIterator<Item = MeetingSlot>) -> Vec<Tile> {
    let mut candidates = merge(slots);
    candidates.sort_by_key(|candidate| (candidate.start, candidate.end));

    let clusters = cluster(&candidates);
    let mut tiles = Vec::with_capacity(candidates.len());

    for cluster in &clusters {
        let columns = assign_columns(&cluster.members, &candidates);
        let column_count = columns.iter().map(|&column| column + 1).max().unwrap_or(0);
        debug_assert!(column_count > 0, "a cluster always opens a column");

        trace!(
            members = cluster.members.len(),
            columns = column_count,
            max_end = cluster.max_end;
            "Laid out overlap cluster"
        );

        for (&idx, column) in cluster.members.iter().zip(columns) {
            let candidate = &mut candidates[idx];
            tiles.push(Tile {
                entries: mem::take(&mut candidate.entries),
                start_minutes: candidate.start,
                end_minutes: candidate.end,
                overlap_index: column,
                overlap_count: column_count,
            });
        }
    }

    tiles
}

/// Groups slots by exact span, keeping first-seen order of spans and
/// input order of entries within a span.
fn merge(slots: impl IntoIterator<Item = MeetingSlot>) -> Vec<Candidate> {
    let mut spans: IndexMap<(u32, u32), Vec<Entry>> = IndexMap::new();
    for slot in slots {
        spans
            .entry((slot.start_minutes, slot.end_minutes))
            .or_default()
            .push(slot.entry);
    }

    spans
        .into_iter()
        .map(|((start, end), entries)| Candidate {
            start,
            end,
            entries,
        })
        .collect()
}

/// Sweeps sorted candidates into connected overlap clusters.
///
/// A candidate joins the first cluster still running at its start, which
/// extends that cluster's end; otherwise it opens a new cluster.
fn cluster(candidates: &[Candidate]) -> Vec<Cluster> {
    let mut clusters: Vec<Cluster> = Vec::new();

    for (idx, candidate) in candidates.iter().enumerate() {
        match clusters
            .iter_mut()
            .find(|cluster| cluster.max_end > candidate.start)
        {
            Some(cluster) => {
                cluster.members.push(idx);
                cluster.max_end = cluster.max_end.max(candidate.end);
            }
            None => clusters.push(Cluster {
                members: vec![idx],
                max_end: candidate.end,
            }),
        }
    }

    clusters
}

/// First-fit column assignment; returns one column per member, in order.
fn assign_columns(members: &[usize], candidates: &[Candidate]) -> Vec<usize> {
    let mut free_at: Vec<u32> = Vec::new();

    members
        .iter()
        .map(|&idx| {
            let candidate = &candidates[idx];
            let column = match free_at.iter().position(|&free| free <= candidate.start) {
                Some(column) => column,
                None => {
                    free_at.push(0);
                    free_at.len() - 1
                }
            };
            free_at[column] = candidate.end;
            column
        })
        .collect()
}
