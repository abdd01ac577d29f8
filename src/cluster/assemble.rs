use geo_types::MultiPolygon;

use super::cells::CellMap;
use super::grid::HexGrid;
use super::labeler::Label;
use crate::error::Result;

/// Cluster represents a connected region of dense cells
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster<C> {
    /// Cluster ID, in discovery order
    pub label: usize,
    /// Sum of points over member cells
    pub total: u64,
    /// Member cells, in cell map order
    pub cells: Vec<C>,
    /// Outer boundary of the member cells
    pub geometry: MultiPolygon<f64>,
}

/// Rolls labeled cells up into clusters
///
/// `cluster_count` is the number of labels handed out by the labeler.
/// Noise cells are left out; clusters come back ordered by label.
pub fn assemble<G>(
    grid: &G,
    cells: &CellMap<G::Cell>,
    cluster_count: usize,
) -> Result<Vec<Cluster<G::Cell>>>
where
    G: HexGrid,
{
    let mut groups: Vec<(u64, Vec<G::Cell>)> = vec![(0, Vec::new()); cluster_count];

    for cell in cells.iter() {
        let Some(Label::Cluster(label)) = cell.label else {
            continue;
        };
        let (total, members) = &mut groups[label];
        *total += cell.total;
        members.push(cell.id);
    }

    groups
        .into_iter()
        .enumerate()
        .filter(|(_, (_, members))| !members.is_empty())
        .map(|(label, (total, members))| {
            let geometry = grid.cells_to_polygon(&members)?;
            Ok(Cluster {
                label,
                total,
                cells: members,
                geometry,
            })
        })
        .collect()
}
