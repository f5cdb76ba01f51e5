//! States, coordinates and actions.
use crate::error::DynaError;
use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt};

/// Multiplier of the column in the integer encoding of a coordinate.
///
/// The encoding `col * STATE_STRIDE + row` is a bijection only for grids
/// with at most `STATE_STRIDE` rows.
pub const STATE_STRIDE: usize = 10;

/// A cell of the grid, `(col, row)` with the origin at the top left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub struct Coord {
    /// Column, growing to the right.
    pub col: usize,

    /// Row, growing downwards.
    pub row: usize,
}

impl Coord {
    /// Constructs a coordinate.
    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    /// Encodes the coordinate as a state.
    pub fn state(self) -> State {
        State(self.col * STATE_STRIDE + self.row)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Integer encoding of a [`Coord`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub struct State(pub usize);

impl State {
    /// Decodes the state into a coordinate.
    pub fn coord(self) -> Coord {
        Coord::new(self.0 / STATE_STRIDE, self.0 % STATE_STRIDE)
    }
}

impl From<Coord> for State {
    fn from(coord: Coord) -> Self {
        coord.state()
    }
}

impl From<State> for Coord {
    fn from(state: State) -> Self {
        state.coord()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Movement on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub enum Action {
    /// Row - 1.
    Up,

    /// Column + 1.
    Right,

    /// Row + 1.
    Down,

    /// Column - 1.
    Left,
}

impl Action {
    /// The number of actions.
    pub const N: usize = 4;

    /// All actions, ordered by index.
    pub const ALL: [Action; Action::N] = [Action::Up, Action::Right, Action::Down, Action::Left];

    /// Returns the index of the action in `0..4`.
    pub fn index(self) -> usize {
        match self {
            Action::Up => 0,
            Action::Right => 1,
            Action::Down => 2,
            Action::Left => 3,
        }
    }

    /// Returns the action with the given index.
    ///
    /// # Panics
    ///
    /// Panics if `ix` is not in `0..4`. Use [`Action::try_from`] for indices
    /// coming from outside the crate.
    pub fn from_index(ix: usize) -> Self {
        match Self::try_from(ix) {
            Ok(action) => action,
            Err(e) => panic!("{}", e),
        }
    }

    /// Applies the offset of the action to `coord`.
    ///
    /// Returns `None` if the result would have a negative component.
    /// Upper bounds are left to the environment.
    pub fn apply(self, coord: Coord) -> Option<Coord> {
        let Coord { col, row } = coord;
        match self {
            Action::Up => row.checked_sub(1).map(|row| Coord::new(col, row)),
            Action::Right => Some(Coord::new(col + 1, row)),
            Action::Down => Some(Coord::new(col, row + 1)),
            Action::Left => col.checked_sub(1).map(|col| Coord::new(col, row)),
        }
    }
}

impl TryFrom<usize> for Action {
    type Error = DynaError;

    fn try_from(ix: usize) -> Result<Self, Self::Error> {
        match ix {
            0 => Ok(Action::Up),
            1 => Ok(Action::Right),
            2 => Ok(Action::Down),
            3 => Ok(Action::Left),
            _ => Err(DynaError::InvalidAction(ix)),
        }
    }
}

impl From<Action> for usize {
    fn from(action: Action) -> Self {
        action.index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_coord_identity() {
        for col in 0..12 {
            for row in 0..STATE_STRIDE {
                let coord = Coord::new(col, row);
                assert_eq!(coord.state().0, col * 10 + row);
                assert_eq!(coord.state().coord(), coord);
            }
        }
        assert_eq!(State(107).coord(), Coord::new(10, 7));
        assert_eq!(State::from(Coord::new(1, 6)), State(16));
    }

    #[test]
    fn test_action_index() {
        for (ix, action) in Action::ALL.iter().enumerate() {
            assert_eq!(action.index(), ix);
            assert_eq!(Action::from_index(ix), *action);
        }
        assert_eq!(Action::try_from(4), Err(DynaError::InvalidAction(4)));
    }

    #[test]
    #[should_panic(expected = "Invalid action: 7")]
    fn test_invalid_action_index_panics() {
        Action::from_index(7);
    }

    #[test]
    fn test_apply() {
        let c = Coord::new(0, 0);
        assert_eq!(Action::Up.apply(c), None);
        assert_eq!(Action::Left.apply(c), None);
        assert_eq!(Action::Right.apply(c), Some(Coord::new(1, 0)));
        assert_eq!(Action::Down.apply(c), Some(Coord::new(0, 1)));
    }
}
