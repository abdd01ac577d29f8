//! Hexagonal grid the engine indexes points with.

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

use geo_types::{Coord, LineString, MultiPolygon, Polygon};
use h3o::{CellIndex, LatLng, Resolution};
use snafu::ResultExt;

use super::point::Point;
use crate::error::{DissolveSnafu, InvalidCoordinateSnafu, InvalidResolutionSnafu, Result};

/// The three grid capabilities the clustering engine relies on.
///
/// `neighbors` must be symmetric: if `a` is in `neighbors(b)` then `b` is in
/// `neighbors(a)`.
pub trait HexGrid {
    /// Opaque cell identifier
    type Cell: Copy + Eq + Hash + fmt::Debug + fmt::Display;

    /// Returns the cell containing `point`
    fn cell_at(&self, point: &Point) -> Result<Self::Cell>;

    /// Returns the 1-ring of `cell`, without `cell` itself
    fn neighbors(&self, cell: Self::Cell) -> Vec<Self::Cell>;

    /// Merges `cells` into the outer boundary of their union, in degrees
    fn cells_to_polygon(&self, cells: &[Self::Cell]) -> Result<MultiPolygon<f64>>;
}

/// H3 grid at a fixed resolution
#[derive(Debug, Clone, Copy)]
pub struct H3Grid {
    resolution: Resolution,
}

impl H3Grid {
    /// Creates a grid for H3 `resolution` (0 is the coarsest, 15 the finest)
    pub fn new(resolution: u8) -> Result<Self> {
        let resolution =
            Resolution::try_from(resolution).context(InvalidResolutionSnafu { resolution })?;
        Ok(H3Grid { resolution })
    }

    #[allow(dead_code)] // Part of public API, may be used by external code
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }
}

impl HexGrid for H3Grid {
    type Cell = CellIndex;

    fn cell_at(&self, point: &Point) -> Result<CellIndex> {
        let ll = LatLng::new(point.lat(), point.lng()).context(InvalidCoordinateSnafu {
            lng: point.lng(),
            lat: point.lat(),
        })?;
        Ok(ll.to_cell(self.resolution))
    }

    fn neighbors(&self, cell: CellIndex) -> Vec<CellIndex> {
        cell.grid_disk_safe(1).filter(|&c| c != cell).collect()
    }

    fn cells_to_polygon(&self, cells: &[CellIndex]) -> Result<MultiPolygon<f64>> {
        let dissolved = h3o::geom::dissolve(cells.iter().copied())
            .context(DissolveSnafu { cells: cells.len() })?;
        Ok(canonical(dissolved))
    }
}

/// Puts a dissolved shape into one fixed form
///
/// Dissolving the same cells twice can start rings at different vertices and
/// list polygons in a different order. Every ring is rotated to start at its
/// smallest `(x, y)` vertex and rings are sorted by that vertex.
pub(crate) fn canonical(shape: MultiPolygon<f64>) -> MultiPolygon<f64> {
    let mut polygons: Vec<Polygon<f64>> = shape
        .into_iter()
        .map(|polygon| {
            let (exterior, interiors) = polygon.into_inner();
            let mut interiors: Vec<LineString<f64>> =
                interiors.into_iter().map(canonical_ring).collect();
            interiors.sort_by(|a, b| cmp_first(&a.0, &b.0));
            Polygon::new(canonical_ring(exterior), interiors)
        })
        .collect();
    polygons.sort_by(|a, b| cmp_first(&a.exterior().0, &b.exterior().0));
    MultiPolygon::new(polygons)
}

fn canonical_ring(ring: LineString<f64>) -> LineString<f64> {
    let mut coords = ring.0;
    if coords.len() > 1 && coords.first() == coords.last() {
        coords.pop();
    }
    let start = coords
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| cmp_coord(a, b))
        .map_or(0, |(i, _)| i);
    coords.rotate_left(start);

    let mut ring = LineString::new(coords);
    ring.close();
    ring
}

fn cmp_coord(a: &Coord<f64>, b: &Coord<f64>) -> Ordering {
    a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y))
}

fn cmp_first(a: &[Coord<f64>], b: &[Coord<f64>]) -> Ordering {
    match (a.first(), b.first()) {
        (Some(a), Some(b)) => cmp_coord(a, b),
        _ => a.len().cmp(&b.len()),
    }
}
