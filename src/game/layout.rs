use thiserror::Error;

/// Geometry faults detected when the layout is built
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("grid side length must be at least 1")]
    ZeroSide,
    #[error("{count} squares cannot form a square grid with {side} squares per line")]
    NotSquare { count: usize, side: usize },
}

/// Maps flat board positions onto the rows, columns and diagonals of a
/// square grid. Position `i` sits in row `i / side`, column `i % side`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    side: usize,
}

impl BoardLayout {
    pub fn new(side: usize) -> Result<Self, LayoutError> {
        if side == 0 {
            return Err(LayoutError::ZeroSide);
        }
        Ok(Self { side })
    }

    /// Build a layout for `count` squares, checking that they form a full grid
    pub fn with_count(count: usize, side: usize) -> Result<Self, LayoutError> {
        let layout = Self::new(side)?;
        if side.checked_mul(side) != Some(count) {
            return Err(LayoutError::NotSquare { count, side });
        }
        Ok(layout)
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn square_count(&self) -> usize {
        self.side * self.side
    }

    pub fn row_indices(&self, row: usize) -> impl Iterator<Item = usize> {
        let start = row * self.side;
        start..start + self.side
    }

    pub fn column_indices(&self, column: usize) -> impl Iterator<Item = usize> {
        let side = self.side;
        (0..side).map(move |row| row * side + column)
    }

    /// Diagonal 0 runs top-left to bottom-right, diagonal 1 top-right to
    /// bottom-left.
    pub fn diagonal_indices(&self, diagonal: usize) -> impl Iterator<Item = usize> {
        let side = self.side;
        (0..side).map(move |i| {
            let column = if diagonal == 0 { i } else { side - 1 - i };
            i * side + column
        })
    }
}
