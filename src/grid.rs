use crate::error::{LayoutError, Result};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic classification of one layout cell.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum CellType {
    None,
    Room,
    Door,
    Road,
    MainRoad,
}

impl CellType {
    /// Open ground or road; the cells a door can exit onto and a road can be carved through.
    pub fn is_none_or_road(self) -> bool {
        matches!(self, CellType::None | CellType::Road | CellType::MainRoad)
    }

    pub fn is_road(self) -> bool {
        matches!(self, CellType::Road | CellType::MainRoad)
    }

    fn glyph(self) -> char {
        match self {
            CellType::None => '.',
            CellType::Room => '#',
            CellType::Door => 'D',
            CellType::Road => '+',
            CellType::MainRoad => '=',
        }
    }
}

/// `x` is the column, `y` is the row. Row 0 is the northern edge of the layout.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        GridPos { x, y }
    }

    /// West, east, north, south.
    pub fn neighbors(self) -> [GridPos; 4] {
        [
            GridPos::new(self.x - 1, self.y),
            GridPos::new(self.x + 1, self.y),
            GridPos::new(self.x, self.y - 1),
            GridPos::new(self.x, self.y + 1),
        ]
    }

    pub fn manhattan(self, other: GridPos) -> u32 {
        ((self.x - other.x).abs() + (self.y - other.y).abs()) as u32
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Cell {
    pub pos: GridPos,
    pub cell_type: CellType,
}

/// A rectangular array of typed cells, stored row-major.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<CellType>,
}

impl Grid {
    pub fn filled(width: usize, height: usize, cell_type: CellType) -> Self {
        Grid {
            width,
            height,
            cells: vec![cell_type; width * height],
        }
    }

    /// Rows must all have the same length as the first one.
    pub fn from_rows(rows: Vec<Vec<CellType>>) -> Result<Self> {
        let width = match rows.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => return Err(LayoutError::EmptyLayout),
        };
        let height = rows.len();

        let mut cells = Vec::with_capacity(width * height);
        for (row, types) in rows.into_iter().enumerate() {
            if types.len() != width {
                return Err(LayoutError::MalformedLayout {
                    row,
                    expected: width,
                    found: types.len(),
                });
            }
            cells.extend(types);
        }

        Ok(Grid {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn contains(&self, p: GridPos) -> bool {
        self.in_bounds(p.x, p.y)
    }

    /// True iff `p` lies on the outermost ring of the grid.
    pub fn on_edge(&self, p: GridPos) -> bool {
        self.contains(p) && p.neighbors().iter().any(|n| !self.contains(*n))
    }

    fn index(&self, p: GridPos) -> Option<usize> {
        if self.contains(p) {
            Some(p.y as usize * self.width + p.x as usize)
        } else {
            None
        }
    }

    pub fn get(&self, p: GridPos) -> Option<CellType> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Panics if `(x, y)` is out of bounds.
    pub fn cell(&self, x: i32, y: i32) -> CellType {
        self.get(GridPos::new(x, y)).unwrap_or_else(|| {
            panic!(
                "cell ({}, {}) outside {}x{} grid",
                x, y, self.width, self.height
            )
        })
    }

    /// Returns false and leaves the grid untouched if `p` is out of bounds.
    pub fn set(&mut self, p: GridPos, cell_type: CellType) -> bool {
        if let Some(i) = self.index(p) {
            self.cells[i] = cell_type;
            true
        } else {
            false
        }
    }

    /// All cells, row by row from the north edge.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let width = self.width;
        self.cells.iter().enumerate().map(move |(i, t)| Cell {
            pos: GridPos::new((i % width) as i32, (i / width) as i32),
            cell_type: *t,
        })
    }

    pub fn positions_of(&self, cell_type: CellType) -> Vec<GridPos> {
        self.cells()
            .filter(|c| c.cell_type == cell_type)
            .map(|c| c.pos)
            .collect()
    }

    pub fn doors(&self) -> Vec<GridPos> {
        self.positions_of(CellType::Door)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width.max(1)) {
            let line: String = row.iter().map(|t| t.glyph()).collect();
            writeln!(f, "{}", line)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_bounds_edges() {
        let grid = Grid::filled(4, 3, CellType::None);
        let (w, h) = (4, 3);

        for x in [-1, 0, w - 1, w].iter() {
            for y in [-1, 0, h - 1, h].iter() {
                let expected = *x >= 0 && *x < w && *y >= 0 && *y < h;
                assert_eq!(grid.in_bounds(*x, *y), expected, "({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_from_rows_rejects_ragged_rows() {
        let rows = vec![
            vec![CellType::Room, CellType::Room],
            vec![CellType::Room],
        ];

        assert_eq!(
            Grid::from_rows(rows),
            Err(LayoutError::MalformedLayout {
                row: 1,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_cells_are_row_major() {
        let grid = Grid::from_rows(vec![
            vec![CellType::Room, CellType::Door],
            vec![CellType::None, CellType::Road],
        ])
        .unwrap();

        assert_eq!(grid.cell(1, 0), CellType::Door);
        assert_eq!(grid.cell(0, 1), CellType::None);
        assert_eq!(grid.doors(), vec![GridPos::new(1, 0)]);
        assert_eq!(grid.to_string(), "#D\n.+\n");
    }

    #[test]
    fn test_on_edge() {
        let grid = Grid::filled(3, 3, CellType::None);

        assert!(grid.on_edge(GridPos::new(0, 1)));
        assert!(grid.on_edge(GridPos::new(2, 2)));
        assert!(!grid.on_edge(GridPos::new(1, 1)));
        assert!(!grid.on_edge(GridPos::new(3, 1)));
    }
}
