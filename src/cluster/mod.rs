//! Package cluster groups (lng, lat) points into regions of dense H3 cells
pub mod assemble;
pub mod cells;
pub mod grid;
pub mod hexscan;
pub mod labeler;
pub mod point;
pub mod stats;

#[cfg(test)]
pub(crate) mod line_grid;

#[cfg(test)]
mod grid_test;

pub use assemble::Cluster;
pub use cells::CellMap;
pub use grid::H3Grid;
pub use hexscan::cluster_cells;
pub use labeler::Thresholds;
pub use point::{Point, PointList};
// Public API exports - allow unused imports as these are part of the public API
#[allow(unused_imports)]
pub use assemble::assemble;
#[allow(unused_imports)]
pub use cells::Cell;
#[allow(unused_imports)]
pub use grid::HexGrid;
#[allow(unused_imports)]
pub use hexscan::{Clustering, find_clusters, h3_clusters};
#[allow(unused_imports)]
pub use labeler::{Label, label_cells};
#[allow(unused_imports)]
pub use stats::{CellStats, assign_z_scores};
