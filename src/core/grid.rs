//! Grid module - bounds-checked 2D cell storage
//!
//! Row-major flat storage shared by the grid-based variants (Tetris board,
//! maze walls, Pac-Man corridors). Coordinates are (x, y) with x left to
//! right and y top to bottom; out-of-bounds reads return `None` and
//! out-of-bounds writes are ignored.

/// A fixed-size 2D grid of copyable cell values.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    width: u8,
    height: u8,
    cells: Vec<T>,
}

impl<T: Copy> Grid<T> {
    /// Create a grid filled with `fill`.
    pub fn new(width: u8, height: u8, fill: T) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width as usize * height as usize],
        }
    }

    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= self.width as i8 || y < 0 || y >= self.height as i8 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn in_bounds(&self, x: i8, y: i8) -> bool {
        self.index(x, y).is_some()
    }

    /// Cell at (x, y), or `None` when out of bounds.
    pub fn get(&self, x: i8, y: i8) -> Option<T> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Write a cell. Returns false when out of bounds.
    pub fn set(&mut self, x: i8, y: i8, value: T) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = value;
                true
            }
            None => false,
        }
    }

    /// Overwrite every cell.
    pub fn fill(&mut self, value: T) {
        self.cells.fill(value);
    }

    /// Row slice for y; panics only on an out-of-range test index.
    pub fn row(&self, y: usize) -> &[T] {
        let start = y * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Copy out as nested rows (for snapshots).
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        (0..self.height as usize).map(|y| self.row(y).to_vec()).collect()
    }

    /// Iterate over all cells with coordinates.
    pub fn iter_cells(&self) -> impl Iterator<Item = (i8, i8, T)> + '_ {
        let width = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &v)| ((i % width) as i8, (i / width) as i8, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_filled() {
        let grid = Grid::new(4, 3, 0u8);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        for (_, _, v) in grid.iter_cells() {
            assert_eq!(v, 0);
        }
    }

    #[test]
    fn test_get_set_and_bounds() {
        let mut grid = Grid::new(10, 20, false);
        assert!(grid.set(5, 10, true));
        assert_eq!(grid.get(5, 10), Some(true));
        assert_eq!(grid.get(-1, 0), None);
        assert_eq!(grid.get(10, 0), None);
        assert_eq!(grid.get(0, 20), None);
        assert!(!grid.set(-1, 0, true));
        assert!(!grid.set(0, 20, true));
    }

    #[test]
    fn test_to_rows_round_trip() {
        let mut grid = Grid::new(3, 2, 0u8);
        grid.set(2, 1, 9);
        let rows = grid.to_rows();
        assert_eq!(rows, vec![vec![0, 0, 0], vec![0, 0, 9]]);
    }

    #[test]
    fn test_iter_cells_coordinates() {
        let mut grid = Grid::new(2, 2, 0u8);
        grid.set(1, 1, 7);
        let found: Vec<_> = grid.iter_cells().filter(|&(_, _, v)| v == 7).collect();
        assert_eq!(found, vec![(1, 1, 7)]);
    }
}
