//! Gridworld environment.
use crate::GridConfig;
use anyhow::Result;
use dyna_core::{Action, Coord, Env, GridShape};
use log::{info, trace};
use serde::{Deserialize, Serialize};

/// Role of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum Cell {
    /// Nothing happens here.
    Free,

    /// Cannot be entered.
    Wall,

    /// Ends the episode without reward.
    Trap,

    /// Teleports the agent.
    Portal,

    /// Behaves as [`Cell::Free`] until the late portal is activated.
    LatePortal,

    /// Ends the episode with reward.
    Goal,
}

/// A deterministic gridworld with portals.
///
/// Cells are stored row-major. The environment has no notion of the agent's
/// position; it only resolves moves and answers queries about cells.
#[derive(Clone, Debug)]
pub struct Gridworld {
    shape: GridShape,
    cells: Vec<Cell>,
    start: Coord,
    teleport_target: Coord,
    late_portal: Option<Coord>,
    late_portal_active: bool,
}

impl Gridworld {
    fn offset(&self, coord: Coord) -> usize {
        coord.row * self.shape.cols + coord.col
    }

    /// Role of the cell at `coord`.
    ///
    /// # Panics
    ///
    /// Panics if `coord` is not on the grid.
    pub fn cell(&self, coord: Coord) -> Cell {
        assert!(
            self.shape.contains(coord),
            "{} is outside of the {}x{} grid",
            coord,
            self.shape.rows,
            self.shape.cols
        );
        self.cells[self.offset(coord)]
    }

    /// Returns `true` once the late portal has been opened.
    pub fn is_late_portal_active(&self) -> bool {
        self.late_portal_active
    }

    /// The cell every portal leads to.
    pub fn teleport_target(&self) -> Coord {
        self.teleport_target
    }
}

impl Env for Gridworld {
    type Config = GridConfig;

    fn build(config: &Self::Config) -> Result<Self> {
        let shape = config.validate()?;
        let mut cells = vec![Cell::Free; shape.n_states()];
        let mut set = |coord: &Coord, cell: Cell| cells[coord.row * shape.cols + coord.col] = cell;

        config.walls.iter().for_each(|c| set(c, Cell::Wall));
        config.traps.iter().for_each(|c| set(c, Cell::Trap));
        config.portals.iter().for_each(|c| set(c, Cell::Portal));
        config.late_portal.iter().for_each(|c| set(c, Cell::LatePortal));
        set(&config.goal, Cell::Goal);

        info!(
            "Build gridworld of {}x{} cells, start at {}",
            shape.rows, shape.cols, config.start
        );

        Ok(Self {
            shape,
            cells,
            start: config.start,
            teleport_target: config.teleport_target,
            late_portal: config.late_portal,
            late_portal_active: false,
        })
    }

    fn shape(&self) -> GridShape {
        self.shape
    }

    fn start(&self) -> Coord {
        self.start
    }

    fn reward(&self, coord: Coord) -> f32 {
        match self.cell(coord) {
            Cell::Goal => 1.0,
            _ => 0.0,
        }
    }

    fn resolve_move(&self, coord: Coord, action: Action) -> Coord {
        let dest = match action.apply(coord) {
            Some(dest) if self.shape.contains(dest) => dest,
            _ => {
                trace!("{:?} from {} leaves the grid", action, coord);
                return coord;
            }
        };

        match self.cell(dest) {
            Cell::Wall => coord,
            Cell::Portal => self.teleport_target,
            _ => dest,
        }
    }

    fn is_terminal(&self, coord: Coord) -> bool {
        matches!(self.cell(coord), Cell::Trap | Cell::Goal)
    }

    fn activate_late_portal(&mut self) {
        if self.late_portal_active {
            return;
        }
        if let Some(coord) = self.late_portal {
            let ix = self.offset(coord);
            self.cells[ix] = Cell::Portal;
            self.late_portal_active = true;
            info!("Late portal at {} is active", coord);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_of_default_map() {
        let env = Gridworld::build(&GridConfig::default()).unwrap();
        assert_eq!(env.cell(Coord::new(1, 6)), Cell::Free);
        assert_eq!(env.cell(Coord::new(3, 6)), Cell::Wall);
        assert_eq!(env.cell(Coord::new(10, 3)), Cell::Trap);
        assert_eq!(env.cell(Coord::new(11, 0)), Cell::Portal);
        assert_eq!(env.cell(Coord::new(2, 1)), Cell::LatePortal);
        assert_eq!(env.cell(Coord::new(9, 2)), Cell::Goal);
    }

    #[test]
    fn test_build_rejects_invalid_map() {
        let config = GridConfig::default().teleport_target(Coord::new(3, 5));
        assert!(Gridworld::build(&config).is_err());
    }
}
