use std::collections::HashMap;
use std::ops::{Index, IndexMut};

use super::grid::HexGrid;
use super::labeler::Label;
use super::point::Point;
use crate::error::Result;

/// An occupied grid cell
#[derive(Debug, Clone, PartialEq)]
pub struct Cell<C> {
    /// Grid cell identifier
    pub id: C,
    /// Number of input points inside the cell, always >= 1
    pub total: u64,
    /// `(total - mean) / std_dev` over all occupied cells, 0 until computed
    pub z_score: f64,
    /// Set exactly once by the labeler
    pub label: Option<Label>,
}

/// Occupied cells of one clustering run, kept in first-occurrence order
///
/// Cells are addressed by slot (their position in that order) and can be
/// looked up by id.
#[derive(Debug, Clone)]
pub struct CellMap<C> {
    cells: Vec<Cell<C>>,
    slots: HashMap<C, usize>,
    points: u64,
}

impl<C> CellMap<C>
where
    C: Copy + Eq + std::hash::Hash,
{
    pub fn new() -> Self {
        CellMap {
            cells: Vec::new(),
            slots: HashMap::new(),
            points: 0,
        }
    }

    /// Bins `points` into the cells of `grid` and counts them
    ///
    /// Fails on the first point the grid cannot index.
    pub fn aggregate<G>(grid: &G, points: &[Point]) -> Result<Self>
    where
        G: HexGrid<Cell = C>,
    {
        let mut map = CellMap::new();
        for point in points {
            map.add(grid.cell_at(point)?);
        }
        Ok(map)
    }

    /// Counts one point in `id`, creating the cell on first occurrence
    pub fn add(&mut self, id: C) {
        let slot = match self.slots.get(&id) {
            Some(&slot) => slot,
            None => {
                self.cells.push(Cell {
                    id,
                    total: 0,
                    z_score: 0.0,
                    label: None,
                });
                self.slots.insert(id, self.cells.len() - 1);
                self.cells.len() - 1
            }
        };
        self.cells[slot].total += 1;
        self.points += 1;
    }

    /// Number of occupied cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of points aggregated so far
    pub fn point_count(&self) -> u64 {
        self.points
    }

    /// Slot of cell `id`, or `None` if no point landed in it
    pub fn slot(&self, id: &C) -> Option<usize> {
        self.slots.get(id).copied()
    }

    #[allow(dead_code)] // Part of public API, may be used by external code
    pub fn get(&self, id: &C) -> Option<&Cell<C>> {
        self.slot(id).map(|slot| &self.cells[slot])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cell<C>> {
        self.cells.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Cell<C>> {
        self.cells.iter_mut()
    }
}

impl<C> Default for CellMap<C>
where
    C: Copy + Eq + std::hash::Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Index<usize> for CellMap<C> {
    type Output = Cell<C>;

    fn index(&self, slot: usize) -> &Cell<C> {
        &self.cells[slot]
    }
}

impl<C> IndexMut<usize> for CellMap<C> {
    fn index_mut(&mut self, slot: usize) -> &mut Cell<C> {
        &mut self.cells[slot]
    }
}
