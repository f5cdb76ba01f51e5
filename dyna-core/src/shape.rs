//! Shape of a grid.
use crate::{error::DynaError, Coord, State, STATE_STRIDE};
use serde::{Deserialize, Serialize};

/// Dimensions of a grid.
///
/// Besides bounds checks, the shape maps every state of the grid to a dense
/// index in `0..n_states()`, so that per-state tables can be plain vectors
/// with one entry for every cell. Indices run column by column.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct GridShape {
    /// The number of rows.
    pub rows: usize,

    /// The number of columns.
    pub cols: usize,
}

impl GridShape {
    /// Constructs a shape.
    ///
    /// Fails if the grid is empty or has more than [`STATE_STRIDE`] rows.
    pub fn new(rows: usize, cols: usize) -> Result<Self, DynaError> {
        if rows == 0 || cols == 0 {
            return Err(DynaError::InvalidMap(format!(
                "empty grid of {} rows and {} columns",
                rows, cols
            )));
        }
        if rows > STATE_STRIDE {
            return Err(DynaError::InvalidMap(format!(
                "{} rows cannot be encoded, at most {} are supported",
                rows, STATE_STRIDE
            )));
        }
        Ok(Self { rows, cols })
    }

    /// The number of cells.
    pub fn n_states(&self) -> usize {
        self.rows * self.cols
    }

    /// Returns `true` if `coord` lies on the grid.
    pub fn contains(&self, coord: Coord) -> bool {
        coord.col < self.cols && coord.row < self.rows
    }

    /// Dense index of `state`.
    ///
    /// # Panics
    ///
    /// Panics if the state is not on the grid.
    pub fn index(&self, state: State) -> usize {
        let coord = state.coord();
        assert!(
            self.contains(coord),
            "State {} {} is outside of the {}x{} grid",
            state,
            coord,
            self.rows,
            self.cols
        );
        coord.col * self.rows + coord.row
    }

    /// Inverse of [`GridShape::index`].
    pub fn state(&self, ix: usize) -> State {
        Coord::new(ix / self.rows, ix % self.rows).state()
    }

    /// All states of the grid, ordered by dense index.
    pub fn states(&self) -> impl Iterator<Item = State> + '_ {
        (0..self.n_states()).map(move |ix| self.state(ix))
    }

    /// Position of `state` in a row-major `rows x cols` layout.
    pub fn raster_index(&self, state: State) -> usize {
        let coord = state.coord();
        coord.row * self.cols + coord.col
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dense_index_bijection() {
        let shape = GridShape::new(8, 12).unwrap();
        let mut seen = vec![false; shape.n_states()];
        for state in shape.states() {
            let ix = shape.index(state);
            assert!(!seen[ix]);
            seen[ix] = true;
            assert_eq!(shape.state(ix), state);
        }
        assert!(seen.iter().all(|&s| s));
        assert_eq!(shape.raster_index(State(16)), 6 * 12 + 1);
    }

    #[test]
    fn test_rejects_unencodable_grids() {
        assert!(GridShape::new(11, 4).is_err());
        assert!(GridShape::new(0, 4).is_err());
        assert!(GridShape::new(10, 4).is_ok());
    }

    #[test]
    #[should_panic]
    fn test_index_outside_grid_panics() {
        let shape = GridShape::new(8, 12).unwrap();
        shape.index(State(128));
    }
}
