//! Configuration of [`Gridworld`](crate::Gridworld).
use anyhow::Result;
use dyna_core::{error::DynaError, Coord, GridShape};
use log::info;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Map of a gridworld.
///
/// Coordinates are `(col, row)`, the origin is the top left cell.
/// The default is an 8x12 map with a wall between the start and the goal,
/// a band of traps around the goal and two portals in the lower right and
/// upper right corners. The late portal opens a shortcut next to the start.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct GridConfig {
    /// The number of rows.
    pub rows: usize,

    /// The number of columns.
    pub cols: usize,

    /// Where every episode starts.
    pub start: Coord,

    /// Cells that cannot be entered.
    pub walls: Vec<Coord>,

    /// Terminal cells without reward.
    pub traps: Vec<Coord>,

    /// Cells that teleport the agent to `teleport_target`.
    pub portals: Vec<Coord>,

    /// Free cell that turns into a portal on request.
    pub late_portal: Option<Coord>,

    /// Destination of every portal.
    pub teleport_target: Coord,

    /// The rewarding terminal cell.
    pub goal: Coord,
}

fn cols_of_row(row: usize, cols: std::ops::Range<usize>) -> impl Iterator<Item = Coord> {
    cols.map(move |col| Coord::new(col, row))
}

fn rows_of_col(col: usize, rows: std::ops::Range<usize>) -> impl Iterator<Item = Coord> {
    rows.map(move |row| Coord::new(col, row))
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 8,
            cols: 12,
            start: Coord::new(1, 6),
            walls: cols_of_row(3, 0..3).chain(rows_of_col(3, 5..8)).collect(),
            traps: rows_of_col(8, 0..3).chain(cols_of_row(3, 8..12)).collect(),
            portals: vec![Coord::new(10, 6), Coord::new(11, 0)],
            late_portal: Some(Coord::new(2, 1)),
            teleport_target: Coord::new(11, 0),
            goal: Coord::new(9, 2),
        }
    }
}

impl GridConfig {
    /// Sets the size of the grid.
    pub fn shape(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    /// Sets the start cell.
    pub fn start(mut self, v: Coord) -> Self {
        self.start = v;
        self
    }

    /// Sets the walls.
    pub fn walls(mut self, v: Vec<Coord>) -> Self {
        self.walls = v;
        self
    }

    /// Sets the traps.
    pub fn traps(mut self, v: Vec<Coord>) -> Self {
        self.traps = v;
        self
    }

    /// Sets the portals.
    pub fn portals(mut self, v: Vec<Coord>) -> Self {
        self.portals = v;
        self
    }

    /// Sets the late portal.
    pub fn late_portal(mut self, v: Option<Coord>) -> Self {
        self.late_portal = v;
        self
    }

    /// Sets the destination of the portals.
    pub fn teleport_target(mut self, v: Coord) -> Self {
        self.teleport_target = v;
        self
    }

    /// Sets the goal.
    pub fn goal(mut self, v: Coord) -> Self {
        self.goal = v;
        self
    }

    /// Checks that the map is consistent.
    ///
    /// Every cell must lie on the grid and carry at most one role. The start
    /// and the teleport target must not be walls.
    pub fn validate(&self) -> Result<GridShape, DynaError> {
        let shape = GridShape::new(self.rows, self.cols)?;

        let mut roles = HashMap::new();
        let cells = self
            .walls
            .iter()
            .map(|c| (*c, "wall"))
            .chain(self.traps.iter().map(|c| (*c, "trap")))
            .chain(self.portals.iter().map(|c| (*c, "portal")))
            .chain(self.late_portal.iter().map(|c| (*c, "late portal")))
            .chain(std::iter::once((self.goal, "goal")));

        for (coord, role) in cells {
            if !shape.contains(coord) {
                return Err(DynaError::InvalidMap(format!(
                    "{} {} is outside of the {}x{} grid",
                    role, coord, self.rows, self.cols
                )));
            }
            if let Some(other) = roles.insert(coord, role) {
                return Err(DynaError::InvalidMap(format!(
                    "{} is both {} and {}",
                    coord, other, role
                )));
            }
        }

        for (coord, role) in [
            (self.start, "start"),
            (self.teleport_target, "teleport target"),
        ]
        .iter()
        {
            if !shape.contains(*coord) {
                return Err(DynaError::InvalidMap(format!(
                    "{} {} is outside of the {}x{} grid",
                    role, coord, self.rows, self.cols
                )));
            }
            if roles.get(coord) == Some(&"wall") {
                return Err(DynaError::InvalidMap(format!("{} {} is a wall", role, coord)));
            }
        }

        Ok(shape)
    }

    /// Constructs [`GridConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path_ = path.as_ref().to_owned();
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        info!("Load config of gridworld from {}", path_.display());
        Ok(b)
    }

    /// Saves [`GridConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path_ = path.as_ref().to_owned();
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        info!("Save config of gridworld into {}", path_.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_default_map() {
        let config = GridConfig::default();
        assert_eq!(config.walls.len(), 6);
        assert_eq!(config.traps.len(), 7);
        assert!(config.walls.contains(&Coord::new(2, 3)));
        assert!(config.walls.contains(&Coord::new(3, 7)));
        assert!(config.traps.contains(&Coord::new(8, 2)));
        assert!(config.traps.contains(&Coord::new(11, 3)));
        assert_eq!(config.validate(), GridShape::new(8, 12));
    }

    #[test]
    fn test_validate_rejects_overlaps() {
        let config = GridConfig::default().goal(Coord::new(8, 0));
        assert!(matches!(config.validate(), Err(DynaError::InvalidMap(_))));

        let config = GridConfig::default().start(Coord::new(0, 3));
        assert!(matches!(config.validate(), Err(DynaError::InvalidMap(_))));
    }

    #[test]
    fn test_validate_rejects_cells_off_grid() {
        let config = GridConfig::default().portals(vec![Coord::new(12, 0)]);
        assert!(matches!(config.validate(), Err(DynaError::InvalidMap(_))));

        let config = GridConfig::default().shape(11, 12);
        assert!(matches!(config.validate(), Err(DynaError::InvalidMap(_))));
    }

    #[test]
    fn test_serde_grid_config() -> Result<()> {
        let config = GridConfig::default().late_portal(None);

        let dir = TempDir::new("grid_config")?;
        let path = dir.path().join("grid_config.yaml");

        config.save(&path)?;
        let config_ = GridConfig::load(&path)?;
        assert_eq!(config, config_);

        Ok(())
    }
}
