//! Planning strategies.
use crate::{
    Algorithm, LearnerConfig, RandomSource, StalenessTable, StateActionTable, Transition,
    TransitionModel,
};
use dyna_core::{Action, GridShape, State};

/// What a learner does besides direct updates.
#[derive(Clone, Debug)]
pub enum Planner {
    /// No model, no planning.
    None,

    /// Replays transitions of a learned model.
    DynaQ {
        /// Transitions observed so far.
        model: TransitionModel,

        /// The number of planning updates per real step.
        planning_steps: usize,
    },

    /// Replays transitions with an exploration bonus.
    DynaQPlus {
        /// Observed transitions, with untried actions of a visited state
        /// assumed to stay in place.
        model: TransitionModel,

        /// Real steps since each pair was last taken.
        tau: StalenessTable,

        /// The number of planning updates per real step.
        planning_steps: usize,

        /// Weight of the exploration bonus.
        kappa: f32,
    },
}

impl Planner {
    /// Constructs the planner of `config.algorithm`.
    pub fn build(config: &LearnerConfig, shape: GridShape) -> Self {
        match config.algorithm {
            Algorithm::QLearning => Planner::None,
            Algorithm::DynaQ => Planner::DynaQ {
                model: TransitionModel::new(shape),
                planning_steps: config.planning_steps,
            },
            Algorithm::DynaQPlus => Planner::DynaQPlus {
                model: TransitionModel::new(shape),
                tau: StalenessTable::new(shape),
                planning_steps: config.planning_steps,
                kappa: config.kappa,
            },
        }
    }

    /// The transition model, if any.
    pub fn model(&self) -> Option<&TransitionModel> {
        match self {
            Planner::None => None,
            Planner::DynaQ { model, .. } | Planner::DynaQPlus { model, .. } => Some(model),
        }
    }

    /// The staleness table of Dyna-Q+.
    pub fn tau(&self) -> Option<&StalenessTable> {
        match self {
            Planner::DynaQPlus { tau, .. } => Some(tau),
            _ => None,
        }
    }

    /// Records the outcome of taking `action` in `state`.
    ///
    /// Dyna-Q+ also fills the other actions of a state seen for the first
    /// time with a zero-reward transition back to the same state. The taken
    /// action is recorded first, the filled ones follow in index order.
    pub fn update_model(&mut self, state: State, action: Action, transition: Transition) {
        match self {
            Planner::None => {}
            Planner::DynaQ { model, .. } => model.insert(state, action, transition),
            Planner::DynaQPlus { model, .. } => {
                let first_visit = !model.contains(state);
                model.insert(state, action, transition);
                if first_visit {
                    let stay = Transition::Continues {
                        next: state,
                        reward: 0.0,
                    };
                    for a in Action::ALL.iter().filter(|a| **a != action) {
                        model.insert(state, *a, stay);
                    }
                }
            }
        }
    }

    /// Ages every pair by one real step and resets `(state, action)`.
    pub fn update_tau(&mut self, state: State, action: Action) {
        if let Planner::DynaQPlus { tau, .. } = self {
            tau.increment_all();
            tau.reset(state, action);
        }
    }

    /// Applies the planning updates to `q`.
    ///
    /// Draws a state then an action for every update. The model and the
    /// staleness counters are left untouched.
    pub fn plan<R: RandomSource>(
        &self,
        q: &mut StateActionTable,
        gamma: f32,
        step_size: f32,
        rng: &mut R,
    ) {
        match self {
            Planner::None => {}
            Planner::DynaQ {
                model,
                planning_steps,
            } => {
                for _ in 0..*planning_steps {
                    let (s, a, t) = model.sample(rng);
                    let target = t.target(q, gamma, 0.0);
                    q.update(s, a, target, step_size);
                }
            }
            Planner::DynaQPlus {
                model,
                tau,
                planning_steps,
                kappa,
            } => {
                for _ in 0..*planning_steps {
                    let (s, a, t) = model.sample(rng);
                    let bonus = kappa * (tau.get(s, a) as f64).sqrt() as f32;
                    let target = t.target(q, gamma, bonus);
                    q.update(s, a, target, step_size);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planner(algorithm: Algorithm) -> Planner {
        let config = LearnerConfig::default().algorithm(algorithm);
        Planner::build(&config, GridShape::new(8, 12).unwrap())
    }

    #[test]
    fn test_optimistic_fill() {
        let mut planner = planner(Algorithm::DynaQPlus);
        let t = Transition::Continues {
            next: State(15),
            reward: 0.0,
        };
        planner.update_model(State(16), Action::Up, t);

        let model = planner.model().unwrap();
        let actions = model
            .actions(State(16))
            .iter()
            .map(|(a, _)| *a)
            .collect::<Vec<_>>();
        assert_eq!(
            actions,
            vec![Action::Up, Action::Right, Action::Down, Action::Left]
        );
        assert_eq!(model.get(State(16), Action::Up), Some(t));
        for a in [Action::Right, Action::Down, Action::Left].iter() {
            assert_eq!(
                model.get(State(16), *a),
                Some(Transition::Continues {
                    next: State(16),
                    reward: 0.0
                })
            );
        }

        let t2 = Transition::Continues {
            next: State(6),
            reward: 0.0,
        };
        planner.update_model(State(16), Action::Left, t2);
        let model = planner.model().unwrap();
        assert_eq!(model.get(State(16), Action::Left), Some(t2));
        assert_eq!(model.get(State(16), Action::Up), Some(t));
    }

    #[test]
    fn test_dyna_q_has_no_fill() {
        let mut planner = planner(Algorithm::DynaQ);
        let t = Transition::Terminal { reward: 1.0 };
        planner.update_model(State(91), Action::Down, t);
        planner.update_model(State(91), Action::Down, t);
        let model = planner.model().unwrap();
        assert_eq!(model.actions(State(91)), &[(Action::Down, t)]);
        assert_eq!(model.len(), 1);
        assert!(planner.tau().is_none());
    }

    #[test]
    fn test_update_tau() {
        let mut planner = planner(Algorithm::DynaQPlus);
        planner.update_tau(State(16), Action::Left);
        planner.update_tau(State(6), Action::Right);
        let tau = planner.tau().unwrap();
        assert_eq!(tau.get(State(6), Action::Right), 0);
        assert_eq!(tau.get(State(16), Action::Left), 1);
        assert_eq!(tau.get(State(16), Action::Up), 2);
        assert_eq!(tau.get(State(110), Action::Down), 2);

        planner.update_tau(State(16), Action::Left);
        let tau = planner.tau().unwrap();
        assert_eq!(tau.get(State(16), Action::Left), 0);
        assert_eq!(tau.get(State(6), Action::Right), 1);
        assert_eq!(tau.get(State(110), Action::Down), 3);
    }

    #[test]
    fn test_q_learning_is_inert() {
        let mut planner = planner(Algorithm::QLearning);
        planner.update_model(State(16), Action::Up, Transition::Terminal { reward: 1.0 });
        planner.update_tau(State(16), Action::Up);
        assert!(planner.model().is_none());
        assert!(planner.tau().is_none());
    }
}
