use tracing::debug;

use super::assemble::{Cluster, assemble};
use super::cells::CellMap;
use super::grid::{H3Grid, HexGrid};
use super::labeler::{Thresholds, label_cells};
use super::point::Point;
use super::stats::{CellStats, assign_z_scores};
use crate::error::Result;

/// Everything one clustering run produces
#[derive(Debug, Clone)]
pub struct Clustering<C> {
    /// `None` when there were no points
    pub stats: Option<CellStats>,
    /// Every occupied cell, labeled
    pub cells: CellMap<C>,
    pub clusters: Vec<Cluster<C>>,
}

/// Clusters `points` into regions of dense, adjacent grid cells
///
/// # Arguments
///
/// * `grid` - Grid indexing the points
/// * `points` - Points to cluster
/// * `thresholds` - Density gates a cell must pass to join a cluster
///
/// Any grid failure aborts the run; no partial result is returned.
pub fn cluster_cells<G>(
    grid: &G,
    points: &[Point],
    thresholds: &Thresholds,
) -> Result<Clustering<G::Cell>>
where
    G: HexGrid,
{
    let mut cells = CellMap::aggregate(grid, points)?;
    debug!(
        points = cells.point_count(),
        cells = cells.len(),
        "points aggregated"
    );

    let Some(stats) = assign_z_scores(&mut cells) else {
        return Ok(Clustering {
            stats: None,
            cells,
            clusters: Vec::new(),
        });
    };
    debug!(mean = stats.mean, std_dev = stats.std_dev, "cell statistics");

    let cluster_count = label_cells(grid, &mut cells, thresholds);
    let noise = cells
        .iter()
        .filter(|cell| cell.label.is_some_and(|l| l.is_noise()))
        .count();
    debug!(clusters = cluster_count, noise, "cells labeled");

    let clusters = assemble(grid, &cells, cluster_count)?;

    Ok(Clustering {
        stats: Some(stats),
        cells,
        clusters,
    })
}

/// Clusters `points` and returns only the clusters
#[allow(dead_code)] // Part of public API, may be used by external code
pub fn find_clusters<G>(
    grid: &G,
    points: &[Point],
    thresholds: &Thresholds,
) -> Result<Vec<Cluster<G::Cell>>>
where
    G: HexGrid,
{
    Ok(cluster_cells(grid, points, thresholds)?.clusters)
}

/// Clusters `points` on the H3 grid at `resolution`
#[allow(dead_code)] // Part of public API, may be used by external code
pub fn h3_clusters(
    points: &[Point],
    resolution: u8,
    thresholds: &Thresholds,
) -> Result<Vec<Cluster<h3o::CellIndex>>> {
    find_clusters(&H3Grid::new(resolution)?, points, thresholds)
}
