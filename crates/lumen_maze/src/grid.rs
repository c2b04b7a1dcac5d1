//! Wall/floor grid storage

use crate::error::MazeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// State of a single maze cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Solid, blocks movement
    Wall,
    /// Walkable
    Floor,
}

impl Cell {
    /// Check if this cell is a wall
    pub fn is_wall(&self) -> bool {
        matches!(self, Self::Wall)
    }

    /// Check if this cell is walkable
    pub fn is_floor(&self) -> bool {
        matches!(self, Self::Floor)
    }
}

/// A coordinate in grid space (`x` = column, `y` = row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    pub x: usize,
    pub y: usize,
}

impl GridPos {
    /// Create a new grid position
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// 2D maze grid backed by a flat row-major Vec
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridData")]
pub struct Grid {
    cells: Vec<Cell>,
    width: usize,
    height: usize,
}

/// Unchecked serialized form of a [`Grid`]
#[derive(Deserialize)]
struct GridData {
    cells: Vec<Cell>,
    width: usize,
    height: usize,
}

impl TryFrom<GridData> for Grid {
    type Error = MazeError;

    fn try_from(data: GridData) -> Result<Self, Self::Error> {
        let mismatch = MazeError::CellCountMismatch {
            width: data.width,
            height: data.height,
            expected: data.width.saturating_mul(data.height),
            actual: data.cells.len(),
        };
        match data.width.checked_mul(data.height) {
            Some(expected) if expected == data.cells.len() => Ok(Self {
                cells: data.cells,
                width: data.width,
                height: data.height,
            }),
            _ => Err(mismatch),
        }
    }
}

impl Grid {
    /// Create a grid with every cell set to `fill`
    ///
    /// # Panics
    ///
    /// Panics if `width * height` overflows. [`MazeConfig::validate`] caps
    /// generated grids well below that.
    ///
    /// [`MazeConfig::validate`]: crate::MazeConfig::validate
    pub fn filled(width: usize, height: usize, fill: Cell) -> Self {
        Self {
            cells: vec![fill; width * height],
            width,
            height,
        }
    }

    /// Create a grid with a wall perimeter and a floor interior
    pub fn walled(width: usize, height: usize) -> Self {
        let mut grid = Self::filled(width, height, Cell::Floor);
        for y in 0..height {
            for x in 0..width {
                if grid.is_perimeter(GridPos::new(x, y)) {
                    grid.set(GridPos::new(x, y), Cell::Wall);
                }
            }
        }
        grid
    }

    /// Build a grid from ASCII rows: `#` is a wall, anything else is floor.
    ///
    /// Returns `None` when the rows differ in length.
    pub fn from_ascii(rows: &[&str]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.chars().count());
        let mut cells = Vec::with_capacity(width.checked_mul(height)?);
        for row in rows {
            if row.chars().count() != width {
                return None;
            }
            cells.extend(
                row.chars()
                    .map(|c| if c == '#' { Cell::Wall } else { Cell::Floor }),
            );
        }
        Some(Self {
            cells,
            width,
            height,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, pos: GridPos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Check if a position lies on the outer ring
    pub fn is_perimeter(&self, pos: GridPos) -> bool {
        pos.x == 0 || pos.y == 0 || pos.x + 1 == self.width || pos.y + 1 == self.height
    }

    /// Check if a position is inside the grid and off the outer ring
    pub fn is_interior(&self, pos: GridPos) -> bool {
        self.in_bounds(pos) && !self.is_perimeter(pos)
    }

    fn index(&self, pos: GridPos) -> Option<usize> {
        self.in_bounds(pos).then(|| pos.y * self.width + pos.x)
    }

    /// Get a cell, `None` when out of bounds
    pub fn get(&self, pos: GridPos) -> Option<Cell> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Set a cell; out-of-bounds writes are ignored
    pub fn set(&mut self, pos: GridPos, cell: Cell) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = cell;
        }
    }

    /// Check if a position holds a floor cell
    pub fn is_floor(&self, pos: GridPos) -> bool {
        self.get(pos).is_some_and(|c| c.is_floor())
    }

    /// Check if a position holds a wall cell (out of bounds counts as wall)
    pub fn is_wall(&self, pos: GridPos) -> bool {
        self.get(pos).map_or(true, |c| c.is_wall())
    }

    /// Interior positions in row-major order
    pub fn interior(&self) -> impl Iterator<Item = GridPos> + '_ {
        let (w, h) = (self.width, self.height);
        (1..h.saturating_sub(1))
            .flat_map(move |y| (1..w.saturating_sub(1)).map(move |x| GridPos::new(x, y)))
    }

    /// All positions with their cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (GridPos, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &c)| (GridPos::new(i % self.width, i / self.width), c))
    }

    /// The four orthogonal neighbours, ignoring ones outside the grid
    pub fn orthogonal_neighbors(&self, pos: GridPos) -> impl Iterator<Item = GridPos> + '_ {
        let candidates = [
            pos.y.checked_sub(1).map(|y| GridPos::new(pos.x, y)),
            Some(GridPos::new(pos.x, pos.y + 1)),
            pos.x.checked_sub(1).map(|x| GridPos::new(x, pos.y)),
            Some(GridPos::new(pos.x + 1, pos.y)),
        ];
        candidates
            .into_iter()
            .flatten()
            .filter(move |p| self.in_bounds(*p))
    }

    /// Check if every orthogonal neighbour of `pos` is a wall
    pub fn is_surrounded_by_walls(&self, pos: GridPos) -> bool {
        self.orthogonal_neighbors(pos).all(|n| self.is_wall(n))
    }

    /// Count cells of the given kind
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width.max(1)) {
            for cell in row {
                f.write_str(if cell.is_wall() { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
