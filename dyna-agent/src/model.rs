//! Learned transition model.
use crate::{RandomSource, StateActionTable};
use dyna_core::{Action, GridShape, State};

/// Outcome of taking an action in a state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Transition {
    /// The episode ended.
    Terminal {
        /// Reward of the terminal cell.
        reward: f32,
    },

    /// The agent moved on to `next`.
    Continues {
        /// State reached.
        next: State,

        /// Reward collected on arrival.
        reward: f32,
    },
}

impl Transition {
    /// TD target of the transition.
    ///
    /// Terminal transitions do not bootstrap, so `gamma` only matters for
    /// [`Transition::Continues`].
    pub fn target(&self, q: &StateActionTable, gamma: f32, bonus: f32) -> f32 {
        match self {
            Transition::Terminal { reward } => reward + bonus,
            Transition::Continues { next, reward } => reward + bonus + gamma * q.max(*next),
        }
    }
}

/// State to action to transition, filled from real experience.
///
/// States are remembered in the order they were first observed and the
/// actions of a state in the order they were first recorded. Overwriting
/// an action keeps its position. Sampling depends on both orders.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionModel {
    shape: GridShape,
    entries: Vec<Vec<(Action, Transition)>>,
    observed: Vec<State>,
}

impl TransitionModel {
    /// Constructs an empty model.
    pub fn new(shape: GridShape) -> Self {
        Self {
            shape,
            entries: vec![vec![]; shape.n_states()],
            observed: vec![],
        }
    }

    /// Records `transition` for `(state, action)`, overwriting any previous one.
    pub fn insert(&mut self, state: State, action: Action, transition: Transition) {
        if !self.contains(state) {
            self.observed.push(state);
        }
        let ix = self.shape.index(state);
        let row = &mut self.entries[ix];
        match row.iter_mut().find(|(a, _)| *a == action) {
            Some(entry) => entry.1 = transition,
            None => row.push((action, transition)),
        }
    }

    /// Returns `true` if any action of `state` has been recorded.
    pub fn contains(&self, state: State) -> bool {
        !self.entries[self.shape.index(state)].is_empty()
    }

    /// Transition recorded for `(state, action)`.
    pub fn get(&self, state: State, action: Action) -> Option<Transition> {
        self.entries[self.shape.index(state)]
            .iter()
            .find(|(a, _)| *a == action)
            .map(|(_, t)| *t)
    }

    /// Recorded actions of `state` with their transitions, in the order of
    /// their first record.
    pub fn actions(&self, state: State) -> &[(Action, Transition)] {
        &self.entries[self.shape.index(state)]
    }

    /// States in the order of their first observation.
    pub fn states(&self) -> &[State] {
        &self.observed
    }

    /// The number of states in the model.
    pub fn len(&self) -> usize {
        self.observed.len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }

    /// Draws a state, then one of its recorded actions, both uniformly.
    ///
    /// # Panics
    ///
    /// Panics if the model is empty.
    pub fn sample<R: RandomSource>(&self, rng: &mut R) -> (State, Action, Transition) {
        assert!(!self.is_empty(), "planning on an empty model");
        let state = self.observed[rng.index(self.observed.len())];
        let actions = self.actions(state);
        let (action, transition) = actions[rng.index(actions.len())];
        (state, action, transition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape() -> GridShape {
        GridShape::new(8, 12).unwrap()
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut model = TransitionModel::new(shape());
        let t = Transition::Continues {
            next: State(15),
            reward: 0.0,
        };
        model.insert(State(16), Action::Up, t);
        let once = model.clone();
        model.insert(State(16), Action::Up, t);
        assert_eq!(model, once);
        assert_eq!(model.states(), &[State(16)]);
        assert_eq!(model.get(State(16), Action::Up), Some(t));
        assert_eq!(model.get(State(16), Action::Down), None);

        let t2 = Transition::Terminal { reward: 1.0 };
        model.insert(State(16), Action::Left, t2);
        model.insert(State(16), Action::Up, t2);
        assert_eq!(
            model.actions(State(16)),
            &[(Action::Up, t2), (Action::Left, t2)]
        );
    }

    #[test]
    fn test_first_observation_order() {
        let mut model = TransitionModel::new(shape());
        let t = Transition::Terminal { reward: 1.0 };
        model.insert(State(91), Action::Down, t);
        model.insert(State(16), Action::Left, t);
        model.insert(State(91), Action::Up, t);
        assert_eq!(model.states(), &[State(91), State(16)]);
        let actions = model
            .actions(State(91))
            .iter()
            .map(|(a, _)| *a)
            .collect::<Vec<_>>();
        assert_eq!(actions, vec![Action::Down, Action::Up]);
    }

    #[test]
    fn test_terminal_target_ignores_gamma() {
        let mut q = StateActionTable::new(shape());
        q.set(State(15), Action::Up, 10.0);
        let t = Transition::Terminal { reward: 1.0 };
        assert_eq!(t.target(&q, 0.0, 0.0), t.target(&q, 1.0, 0.0));
        let c = Transition::Continues {
            next: State(15),
            reward: 1.0,
        };
        assert_eq!(c.target(&q, 0.5, 0.0), 6.0);
    }
}
