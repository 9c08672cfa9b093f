use crate::grid::GridPos;

use ilattice3::{Extent, Point};

/// Maps a grid position to the world. The grid's row axis runs against world Z: row 0 sits at
/// `anchor.z` and each following row is one cell further south.
pub fn grid_to_world(anchor: &Point, pos: GridPos) -> Point {
    let offset: Point = [pos.x, 0, -pos.y].into();

    *anchor + offset
}

/// The flat world rectangle a layout is stamped into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementRegion {
    extent: Extent,
}

impl PlacementRegion {
    pub fn from_min_and_size(min_x: i32, min_z: i32, width: usize, height: usize) -> Self {
        PlacementRegion {
            extent: Extent::from_min_and_local_supremum(
                [min_x, 0, min_z].into(),
                [width as i32, 1, height as i32].into(),
            ),
        }
    }

    /// A `width × height` rectangle around `center`. Even sizes put the extra cell on the
    /// negative side.
    pub fn centered_on(center: &Point, width: usize, height: usize) -> Self {
        Self::from_min_and_size(
            center.x - (width / 2) as i32,
            center.z - (height / 2) as i32,
            width,
            height,
        )
    }

    pub fn width(&self) -> usize {
        self.extent.get_local_supremum().x as usize
    }

    pub fn height(&self) -> usize {
        self.extent.get_local_supremum().z as usize
    }

    pub fn min_x(&self) -> i32 {
        self.extent.get_minimum().x
    }

    pub fn min_z(&self) -> i32 {
        self.extent.get_minimum().z
    }

    pub fn max_x(&self) -> i32 {
        self.min_x() + self.width() as i32 - 1
    }

    pub fn max_z(&self) -> i32 {
        self.min_z() + self.height() as i32 - 1
    }

    /// North-west corner; grid position `(0, 0)` lands here.
    pub fn anchor(&self) -> Point {
        [self.min_x(), 0, self.max_z()].into()
    }

    pub fn to_world(&self, pos: GridPos) -> Point {
        grid_to_world(&self.anchor(), pos)
    }

    pub fn contains(&self, p: &Point) -> bool {
        self.extent.contains_world(p)
    }

    /// Perimeter cells, north row first, each listed once.
    pub fn edge_cells(&self) -> Vec<Point> {
        let mut cells = Vec::new();
        for z in (self.min_z()..=self.max_z()).rev() {
            for x in self.min_x()..=self.max_x() {
                let on_edge = x == self.min_x()
                    || x == self.max_x()
                    || z == self.min_z()
                    || z == self.max_z();
                if on_edge {
                    cells.push([x, 0, z].into());
                }
            }
        }

        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_to_world_inverts_rows() {
        let origin: Point = [10, 0, 20].into();

        assert_eq!(
            grid_to_world(&origin, GridPos::new(2, 3)),
            Point::from([12, 0, 17])
        );
    }

    #[test]
    fn test_centered_on() {
        let region = PlacementRegion::centered_on(&[50, 0, 50].into(), 3, 5);

        assert_eq!((region.min_x(), region.max_x()), (49, 51));
        assert_eq!((region.min_z(), region.max_z()), (48, 52));
        assert_eq!(region.anchor(), Point::from([49, 0, 52]));
        assert_eq!(region.to_world(GridPos::new(2, 4)), Point::from([51, 0, 48]));
        assert!(region.contains(&[51, 0, 48].into()));
        assert!(!region.contains(&[52, 0, 48].into()));
    }

    #[test]
    fn test_centered_on_even_size_leans_negative() {
        let region = PlacementRegion::centered_on(&[0, 0, 0].into(), 4, 2);

        assert_eq!((region.min_x(), region.max_x()), (-2, 1));
        assert_eq!((region.min_z(), region.max_z()), (-1, 0));
        assert_eq!(region.anchor(), Point::from([-2, 0, 0]));
    }

    #[test]
    fn test_edge_cells() {
        let region = PlacementRegion::from_min_and_size(0, 0, 3, 3);
        let edges = region.edge_cells();

        assert_eq!(edges.len(), 8);
        assert!(!edges.contains(&[1, 0, 1].into()));
        assert_eq!(edges[0], Point::from([0, 0, 2]));

        let strip = PlacementRegion::from_min_and_size(0, 0, 4, 1);
        assert_eq!(strip.edge_cells().len(), 4);
    }
}
