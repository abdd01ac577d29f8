//! One-dimensional grid for tests: cell `n` covers longitudes `[n, n + 1)`
//! and its neighbors are `n - 1` and `n + 1`.

use geo_types::{MultiPolygon, Rect, coord};

use super::grid::HexGrid;
use super::point::Point;
use crate::error::Result;

#[derive(Debug, Clone, Copy, Default)]
pub struct LineGrid;

impl LineGrid {
    /// Points at the middle of `cell`, `count` times
    pub fn points_in(cell: i64, count: usize) -> Vec<Point> {
        vec![Point::new(cell as f64 + 0.5, 0.5); count]
    }
}

impl HexGrid for LineGrid {
    type Cell = i64;

    fn cell_at(&self, point: &Point) -> Result<i64> {
        Ok(point.lng().floor() as i64)
    }

    fn neighbors(&self, cell: i64) -> Vec<i64> {
        vec![cell - 1, cell + 1]
    }

    fn cells_to_polygon(&self, cells: &[i64]) -> Result<MultiPolygon<f64>> {
        Ok(cells
            .iter()
            .map(|&c| {
                Rect::new(coord! { x: c as f64, y: 0.0 }, coord! { x: c as f64 + 1.0, y: 1.0 })
                    .to_polygon()
            })
            .collect())
    }
}
