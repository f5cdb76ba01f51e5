//! Per-state tables.
use dyna_core::{Action, GridShape, State};

/// One action value per state-action pair of a grid, zero initialised.
///
/// Rows are stored by the dense index of [`GridShape`], so every state of
/// the grid has an entry from the start.
#[derive(Clone, Debug, PartialEq)]
pub struct StateActionTable {
    shape: GridShape,
    values: Vec<[f32; Action::N]>,
}

impl StateActionTable {
    /// Constructs a table of zeros.
    pub fn new(shape: GridShape) -> Self {
        Self {
            shape,
            values: vec![[0.0; Action::N]; shape.n_states()],
        }
    }

    /// Shape of the grid the table covers.
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Values of all actions in `state`, ordered by action index.
    pub fn row(&self, state: State) -> &[f32; Action::N] {
        &self.values[self.shape.index(state)]
    }

    /// Value of `action` in `state`.
    pub fn get(&self, state: State, action: Action) -> f32 {
        self.row(state)[action.index()]
    }

    #[cfg(test)]
    pub(crate) fn set(&mut self, state: State, action: Action, value: f32) {
        let ix = self.shape.index(state);
        self.values[ix][action.index()] = value;
    }

    /// Maximal value over the actions in `state`.
    pub fn max(&self, state: State) -> f32 {
        self.row(state)
            .iter()
            .copied()
            .fold(f32::NEG_INFINITY, f32::max)
    }

    /// Moves the value of `(state, action)` towards `target`.
    ///
    /// `v += step_size * (target - v)`
    pub fn update(&mut self, state: State, action: Action, target: f32, step_size: f32) {
        let ix = self.shape.index(state);
        let v = &mut self.values[ix][action.index()];
        *v += step_size * (target - *v);
    }

    /// Maximal action value of every cell, row-major.
    pub fn max_grid(&self) -> Vec<f32> {
        let mut grid = vec![0.0; self.shape.n_states()];
        for state in self.shape.states() {
            grid[self.shape.raster_index(state)] = self.max(state);
        }
        grid
    }
}

/// Real steps since each state-action pair was last taken.
///
/// Counts are exact integers. Ageing every pair only advances a clock;
/// a pair stores the clock value at which it was last taken.
#[derive(Clone, Debug, PartialEq)]
pub struct StalenessTable {
    shape: GridShape,
    now: u64,
    taken_at: Vec<[u64; Action::N]>,
}

impl StalenessTable {
    /// Constructs a table with every pair fresh.
    pub fn new(shape: GridShape) -> Self {
        Self {
            shape,
            now: 0,
            taken_at: vec![[0; Action::N]; shape.n_states()],
        }
    }

    /// Steps since `(state, action)` was last taken.
    pub fn get(&self, state: State, action: Action) -> u64 {
        self.now - self.taken_at[self.shape.index(state)][action.index()]
    }

    /// Ages every pair by one step.
    pub fn increment_all(&mut self) {
        self.now += 1;
    }

    /// Marks `(state, action)` as just taken.
    pub fn reset(&mut self, state: State, action: Action) {
        let ix = self.shape.index(state);
        self.taken_at[ix][action.index()] = self.now;
    }
}

/// The number of times each state was entered.
#[derive(Clone, Debug, PartialEq)]
pub struct VisitCounter {
    shape: GridShape,
    counts: Vec<u32>,
}

impl VisitCounter {
    /// Constructs a counter with all counts zero.
    pub fn new(shape: GridShape) -> Self {
        Self {
            shape,
            counts: vec![0; shape.n_states()],
        }
    }

    /// Increments the count of `state`.
    pub fn increment(&mut self, state: State) {
        self.counts[self.shape.index(state)] += 1;
    }

    /// Count of `state`.
    pub fn get(&self, state: State) -> u32 {
        self.counts[self.shape.index(state)]
    }

    /// Sum over all states.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    /// Counts of every cell, row-major.
    pub fn grid(&self) -> Vec<f32> {
        let mut grid = vec![0.0; self.shape.n_states()];
        for state in self.shape.states() {
            grid[self.shape.raster_index(state)] = self.get(state) as f32;
        }
        grid
    }
}
