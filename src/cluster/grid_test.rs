#[cfg(test)]
mod tests {
    use geo_types::{MultiPolygon, Polygon, polygon};
    use h3o::{CellIndex, LatLng};

    use crate::cluster::grid::canonical;
    use crate::cluster::{H3Grid, HexGrid, Point};
    use crate::error::Error;

    #[test]
    fn test_invalid_resolution() {
        assert!(H3Grid::new(15).is_ok());
        let err = H3Grid::new(16).unwrap_err();
        assert!(matches!(err, Error::InvalidResolution { resolution: 16, .. }));
    }

    #[test]
    fn test_cell_at_matches_h3() {
        let grid = H3Grid::new(7).unwrap();
        let point = Point::new(30.244759, 59.955982);
        let expected = LatLng::new(59.955982, 30.244759)
            .unwrap()
            .to_cell(grid.resolution());

        assert_eq!(grid.cell_at(&point).unwrap(), expected);
        assert_eq!(grid.cell_at(&point).unwrap(), grid.cell_at(&point).unwrap());
    }

    #[test]
    fn test_neighbors_are_symmetric_ring() {
        let grid = H3Grid::new(8).unwrap();
        let cell = grid.cell_at(&Point::new(-74.0060, 40.7128)).unwrap();
        let ring = grid.neighbors(cell);

        assert_eq!(ring.len(), 6);
        assert!(!ring.contains(&cell));
        for neighbor in ring {
            assert!(grid.neighbors(neighbor).contains(&cell));
        }
    }

    #[test]
    fn test_pentagon_has_five_neighbors() {
        let grid = H3Grid::new(0).unwrap();
        let pentagon = CellIndex::base_cells()
            .find(|c| c.is_pentagon())
            .unwrap();

        assert_eq!(grid.neighbors(pentagon).len(), 5);
    }

    #[test]
    fn test_cells_to_polygon() {
        let grid = H3Grid::new(8).unwrap();
        let cell = grid.cell_at(&Point::new(-74.0060, 40.7128)).unwrap();
        let neighbor = grid.neighbors(cell)[0];
        let far = grid.cell_at(&Point::new(2.3522, 48.8566)).unwrap();

        let single = grid.cells_to_polygon(&[cell]).unwrap();
        assert_eq!(single.0.len(), 1);
        assert!(single.0[0].interiors().is_empty());

        let merged = grid.cells_to_polygon(&[cell, neighbor]).unwrap();
        assert_eq!(merged.0.len(), 1);

        let apart = grid.cells_to_polygon(&[cell, far]).unwrap();
        assert_eq!(apart.0.len(), 2);
    }

    #[test]
    fn test_polygon_is_in_degrees() {
        let grid = H3Grid::new(9).unwrap();
        let cell = grid.cell_at(&Point::new(-74.0060, 40.7128)).unwrap();
        let polygon = grid.cells_to_polygon(&[cell]).unwrap();

        for c in polygon.0[0].exterior().coords() {
            assert!((c.x - -74.0060).abs() < 0.01);
            assert!((c.y - 40.7128).abs() < 0.01);
        }
    }

    #[test]
    fn test_cells_to_polygon_is_stable() {
        let grid = H3Grid::new(9).unwrap();
        let cell = grid.cell_at(&Point::new(-73.9560, 40.7500)).unwrap();
        let far = grid.cell_at(&Point::new(-73.9000, 40.8000)).unwrap();
        let mut cells = grid.neighbors(cell);
        cells.push(cell);
        cells.push(far);

        let first = grid.cells_to_polygon(&cells).unwrap();
        for _ in 0..20 {
            assert_eq!(grid.cells_to_polygon(&cells).unwrap(), first);
            assert_eq!(
                grid.cells_to_polygon(&[cell]).unwrap(),
                grid.cells_to_polygon(&[cell]).unwrap()
            );
        }

        assert_eq!(first.0.len(), 2);
        for polygon in &first.0 {
            let ring = &polygon.exterior().0;
            assert_eq!(ring.first(), ring.last());
            let start = ring[0];
            assert!(ring.iter().all(|c| (c.x, c.y) >= (start.x, start.y)));
        }
        let starts: Vec<_> = first.0.iter().map(|p| p.exterior().0[0].x).collect();
        assert!(starts[0] <= starts[1]);
    }

    #[test]
    fn test_canonical_ignores_ring_start_and_polygon_order() {
        let square: Polygon<f64> = polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 0.0, y: 1.0),
        ];
        let rotated: Polygon<f64> = polygon![
            (x: 1.0, y: 1.0),
            (x: 0.0, y: 1.0),
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
        ];
        let other: Polygon<f64> = polygon![
            (x: 6.0, y: 5.0),
            (x: 6.0, y: 6.0),
            (x: 5.0, y: 6.0),
            (x: 5.0, y: 5.0),
        ];

        let a = canonical(MultiPolygon::new(vec![square.clone(), other.clone()]));
        let b = canonical(MultiPolygon::new(vec![other, rotated]));

        assert_eq!(a, b);
        assert_eq!(a.0[0], square);
        assert_eq!(a.0[1].exterior().0[0].x, 5.0);
        assert_eq!(a.0[1].exterior().0[0].y, 5.0);
        assert_eq!(a.0[1].exterior().0.len(), 5);
    }
}
