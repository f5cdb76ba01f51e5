//! Tabular learner.
use crate::{
    policy::epsilon_greedy, LearnerConfig, Planner, RandomSource, StateActionTable, Transition,
    VisitCounter,
};
use anyhow::Result;
use dyna_core::{Action, Agent, Env, EpisodeRecord, Policy, State};
use log::{debug, info, trace, warn};
use rand::{rngs::SmallRng, SeedableRng};

/// Q-learning, Dyna-Q or Dyna-Q+ on a gridworld.
///
/// The algorithm is fixed at construction by [`LearnerConfig::algorithm`]
/// and only changes what [`Planner`] does; the direct update, action
/// selection and episode bookkeeping are shared.
///
/// Per episode the learner goes through `start`, `step` until the terminal
/// flag is raised, `end` and `reset`. Value tables, the model and the
/// episode records live as long as the learner.
pub struct Learner<E: Env, R: RandomSource = SmallRng> {
    config: LearnerConfig,
    env: E,
    q: StateActionTable,
    visits: VisitCounter,
    planner: Planner,
    rng: R,
    position: State,
    last: Option<(State, Action)>,
    done: bool,
    episodes: Vec<EpisodeRecord>,
}

impl<E: Env> Learner<E, SmallRng> {
    /// Constructs a learner drawing from a generator seeded with
    /// [`LearnerConfig::seed`].
    pub fn build(config: LearnerConfig, env: E) -> Result<Self> {
        let rng = SmallRng::seed_from_u64(config.seed);
        Self::with_source(config, env, rng)
    }
}

impl<E: Env, R: RandomSource> Learner<E, R> {
    /// Constructs a learner drawing from `rng`.
    pub fn with_source(config: LearnerConfig, env: E, rng: R) -> Result<Self> {
        config.validate()?;
        let shape = env.shape();
        let position = env.start().state();
        info!(
            "Build {} learner on a {}x{} grid, seed = {}",
            config.algorithm.name(),
            shape.rows,
            shape.cols,
            config.seed
        );

        Ok(Self {
            planner: Planner::build(&config, shape),
            q: StateActionTable::new(shape),
            visits: VisitCounter::new(shape),
            config,
            env,
            rng,
            position,
            last: None,
            done: false,
            episodes: vec![],
        })
    }

    /// Configuration of the learner.
    pub fn config(&self) -> &LearnerConfig {
        &self.config
    }

    /// Action values.
    pub fn q(&self) -> &StateActionTable {
        &self.q
    }

    /// Visit counts.
    pub fn visits(&self) -> &VisitCounter {
        &self.visits
    }

    /// The planner of the algorithm.
    pub fn planner(&self) -> &Planner {
        &self.planner
    }

    /// Current position of the agent.
    pub fn position(&self) -> State {
        self.position
    }

    /// Returns `true` once a terminal cell has been entered in this episode.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Moves the agent from `state` with `action`.
    ///
    /// Counts the visit of the cell reached and raises the terminal flag on
    /// traps and the goal.
    pub fn transition(&mut self, state: State, action: Action) -> State {
        let next = self.env.resolve_move(state.coord(), action).state();
        self.visits.increment(next);
        if self.env.is_terminal(next.coord()) {
            self.done = true;
        }
        self.position = next;
        trace!("{} --{:?}--> {}", state, action, next);
        next
    }

    /// Records the outcome of taking `action` in `state` in the model.
    pub fn update_model(&mut self, state: State, action: Action, transition: Transition) {
        self.planner.update_model(state, action, transition);
    }

    /// Runs the planning updates of the algorithm.
    pub fn planning_step(&mut self) {
        self.planner.plan(
            &mut self.q,
            self.config.gamma,
            self.config.step_size,
            &mut self.rng,
        );
    }

    /// Marks `(state, action)` as just taken in the staleness table.
    pub fn update_tau(&mut self, state: State, action: Action) {
        self.planner.update_tau(state, action);
    }

    fn direct_update(&mut self, state: State, action: Action, transition: Transition) {
        let target = transition.target(&self.q, self.config.gamma, 0.0);
        self.q.update(state, action, target, self.config.step_size);
    }

    fn last_pair(&self) -> (State, Action) {
        match self.last {
            Some(pair) => pair,
            None => panic!("{}: no action taken in this episode", self.config.algorithm.name()),
        }
    }

    fn take(&mut self, state: State, action: Action) -> Action {
        self.transition(state, action);
        self.last = Some((state, action));
        action
    }
}

impl<E: Env, R: RandomSource> Policy for Learner<E, R> {
    fn sample(&mut self, state: State) -> Action {
        epsilon_greedy(self.q.row(state), self.config.epsilon, &mut self.rng)
    }
}

impl<E: Env, R: RandomSource> Agent<E> for Learner<E, R> {
    fn name(&self) -> &str {
        self.config.algorithm.name()
    }

    /// Takes the first action of an episode. The staleness table is not aged.
    fn start(&mut self, state: State) -> Action {
        let action = self.sample(state);
        self.take(state, action)
    }

    fn step(&mut self, state: State, reward: f32) -> Action {
        let (s, a) = self.last_pair();
        let transition = Transition::Continues {
            next: state,
            reward,
        };
        self.direct_update(s, a, transition);
        self.update_model(s, a, transition);
        self.planning_step();
        let action = self.sample(state);
        self.update_tau(state, action);
        self.take(state, action)
    }

    fn end(&mut self) {
        let (s, a) = self.last_pair();
        let transition = Transition::Terminal {
            reward: self.env.reward(self.position.coord()),
        };
        self.direct_update(s, a, transition);
        self.update_model(s, a, transition);
        self.planning_step();
        self.visits.increment(s);
    }

    fn reset(&mut self) {
        self.position = self.env.start().state();
        self.last = None;
        self.done = false;
    }

    fn run_episode_with_budget(&mut self, max_steps: Option<usize>) -> EpisodeRecord {
        let start = self.env.start().state();
        self.start(start);
        let mut steps = 1;
        let mut truncated = false;

        while !self.done {
            if max_steps.map_or(false, |max_steps| steps >= max_steps) {
                warn!(
                    "{}: episode {} truncated after {} steps",
                    self.name(),
                    self.episodes.len(),
                    steps
                );
                truncated = true;
                break;
            }
            let state = self.position;
            let reward = self.env.reward(state.coord());
            self.step(state, reward);
            steps += 1;
        }

        let reward = if truncated {
            0.0
        } else {
            let reward = self.env.reward(self.position.coord());
            self.end();
            reward
        };

        let record = EpisodeRecord::new(steps, reward, truncated, &self.config.band);
        debug!(
            "{}: episode {} ended in {} after {} steps, {:?}",
            self.name(),
            self.episodes.len(),
            self.position,
            steps,
            record.quality
        );
        self.episodes.push(record);
        self.reset();
        record
    }

    fn env(&self) -> &E {
        &self.env
    }

    fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }

    fn episodes(&self) -> &[EpisodeRecord] {
        &self.episodes
    }

    fn value_grid(&self) -> (Vec<f32>, [usize; 2]) {
        let shape = self.q.shape();
        (self.q.max_grid(), [shape.rows, shape.cols])
    }

    fn visit_grid(&self) -> (Vec<f32>, [usize; 2]) {
        let shape = self.q.shape();
        (self.visits.grid(), [shape.rows, shape.cols])
    }
}
