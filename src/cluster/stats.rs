use super::cells::CellMap;

/// Population mean and standard deviation of per-cell point counts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellStats {
    pub mean: f64,
    pub std_dev: f64,
}

impl CellStats {
    /// Computes statistics over all occupied cells
    ///
    /// Returns `None` for an empty map, where the mean is undefined.
    pub fn compute<C>(cells: &CellMap<C>) -> Option<CellStats>
    where
        C: Copy + Eq + std::hash::Hash,
    {
        if cells.is_empty() {
            return None;
        }

        let n = cells.len() as f64;
        let mean = cells.point_count() as f64 / n;
        let variance = cells
            .iter()
            .map(|cell| {
                let d = cell.total as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / n;

        Some(CellStats {
            mean,
            std_dev: variance.sqrt(),
        })
    }

    /// Z-score of a cell holding `total` points
    ///
    /// When every cell holds the same count the deviation is zero and all
    /// cells are exactly average, so the z-score is 0.
    pub fn z_score(&self, total: u64) -> f64 {
        if self.std_dev > 0.0 {
            (total as f64 - self.mean) / self.std_dev
        } else {
            0.0
        }
    }
}

/// Computes statistics and stores every cell's z-score in place
pub fn assign_z_scores<C>(cells: &mut CellMap<C>) -> Option<CellStats>
where
    C: Copy + Eq + std::hash::Hash,
{
    let stats = CellStats::compute(cells)?;
    for cell in cells.iter_mut() {
        cell.z_score = stats.z_score(cell.total);
    }
    Some(stats)
}
