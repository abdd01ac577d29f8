use bitvec::prelude::*;
use std::fmt;
use tracing::trace;

use super::cells::{Cell, CellMap};
use super::grid::HexGrid;

// Density-gated flood fill over the grid adjacency graph:
//
// label = 0
// for each unlabeled cell S in the map
//    push S onto frontier
//    while frontier is not empty
//       pop C
//       if C is labeled: skip
//       if C fails a configured threshold: mark C as NOISE
//       else
//          mark C with label
//          push every occupied neighbor of C
//    if at least one cell got the label: label = label + 1

/// Cluster assignment of a visited cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Cluster(usize),
    Noise,
}

impl Label {
    #[allow(dead_code)] // Part of public API, may be used by external code
    pub fn cluster(&self) -> Option<usize> {
        match self {
            Label::Cluster(c) => Some(*c),
            Label::Noise => None,
        }
    }

    pub fn is_noise(&self) -> bool {
        matches!(self, Label::Noise)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Cluster(c) => write!(f, "{}", c),
            Label::Noise => write!(f, "noise"),
        }
    }
}

/// Density gates a cell must pass to join a cluster
///
/// A gate left as `None` admits every cell. Both gates are inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Thresholds {
    pub min_points: Option<u64>,
    pub min_z_score: Option<f64>,
}

impl Thresholds {
    pub fn admits<C>(&self, cell: &Cell<C>) -> bool {
        if let Some(min_z_score) = self.min_z_score {
            if cell.z_score < min_z_score {
                return false;
            }
        }
        if let Some(min_points) = self.min_points {
            if cell.total < min_points {
                return false;
            }
        }
        true
    }
}

/// Labels every cell of `cells` with a cluster number or as noise
///
/// Cluster numbers are handed out in discovery order starting at 0; a seed
/// that fails the thresholds becomes noise without using up a number.
///
/// # Returns
///
/// The number of clusters found.
pub fn label_cells<G>(grid: &G, cells: &mut CellMap<G::Cell>, thresholds: &Thresholds) -> usize
where
    G: HexGrid,
{
    let mut next_label = 0;
    let mut frontier = Vec::new();
    // A cell is pushed at most once per run, so the frontier stays within
    // the number of occupied cells.
    let mut pushed = bitvec![0; cells.len()];

    for seed in 0..cells.len() {
        if cells[seed].label.is_some() {
            continue;
        }

        frontier.push(seed);
        pushed.set(seed, true);
        let mut members = 0;

        while let Some(slot) = frontier.pop() {
            let cell = &mut cells[slot];
            if cell.label.is_some() {
                continue;
            }

            if !thresholds.admits(cell) {
                cell.label = Some(Label::Noise);
                continue;
            }

            cell.label = Some(Label::Cluster(next_label));
            members += 1;

            let id = cell.id;
            for neighbor in grid.neighbors(id) {
                // unoccupied cells have no slot
                if let Some(n) = cells.slot(&neighbor) {
                    if !pushed[n] {
                        pushed.set(n, true);
                        frontier.push(n);
                    }
                }
            }
        }

        if members > 0 {
            trace!(label = next_label, members, "cluster found");
            next_label += 1;
        }
    }

    next_label
}
