//! Action selection.
use dyna_core::Action;
use rand::{
    rngs::{SmallRng, StdRng},
    Rng,
};

/// Source of the random draws of an agent.
///
/// Agents own exactly one source and pass it to every call that draws, so
/// the sequence of draws is fully determined by the seed and the sequence
/// of calls.
pub trait RandomSource {
    /// Uniform sample in `[0, 1)`.
    fn uniform(&mut self) -> f64;

    /// Uniform sample in `0..n`.
    fn index(&mut self, n: usize) -> usize;
}

impl RandomSource for SmallRng {
    fn uniform(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn index(&mut self, n: usize) -> usize {
        self.gen_range(0..n)
    }
}

impl RandomSource for StdRng {
    fn uniform(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn index(&mut self, n: usize) -> usize {
        self.gen_range(0..n)
    }
}

/// Index of the maximal value, ties broken uniformly at random.
///
/// A draw is consumed even if the maximum is unique.
///
/// # Panics
///
/// Panics if `values` is empty.
pub fn argmax<R: RandomSource>(values: &[f32], rng: &mut R) -> usize {
    assert!(!values.is_empty(), "argmax of an empty slice");
    let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let ties = values
        .iter()
        .enumerate()
        .filter(|&(_, &v)| v == max)
        .map(|(i, _)| i)
        .collect::<Vec<_>>();
    ties[rng.index(ties.len())]
}

/// Epsilon-greedy action selection.
///
/// Draws `u` uniformly; a random action is taken if `u < epsilon`,
/// otherwise the greedy action with random tie-breaking.
pub fn epsilon_greedy<R: RandomSource>(
    values: &[f32; Action::N],
    epsilon: f64,
    rng: &mut R,
) -> Action {
    if rng.uniform() < epsilon {
        Action::from_index(rng.index(Action::N))
    } else {
        Action::from_index(argmax(values, rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_argmax_returns_maximal_index() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..100 {
            assert_eq!(argmax(&[0.0, 0.3, -1.0, 0.1], &mut rng), 1);
            let ix = argmax(&[0.5, 0.0, 0.5, 0.5], &mut rng);
            assert!(ix == 0 || ix == 2 || ix == 3);
        }
    }

    #[test]
    fn test_argmax_ties_are_uniform() {
        let mut rng = SmallRng::seed_from_u64(17);
        let n = 40_000;
        let mut counts = [0usize; 4];
        for _ in 0..n {
            counts[argmax(&[0.0; 4], &mut rng)] += 1;
        }
        for c in counts.iter() {
            let freq = *c as f64 / n as f64;
            assert!((freq - 0.25).abs() < 0.02, "{:?}", counts);
        }
    }

    #[test]
    fn test_argmax_fixed_sequence() {
        let values = [0.0, 2.0, 3.0, 4.0, 1.0, 2.0, 4.0, 4.0, 3.0, 4.0];
        let mut rng = SmallRng::seed_from_u64(17);
        let picks = (0..10)
            .map(|_| argmax(&values, &mut rng))
            .collect::<Vec<_>>();
        assert_eq!(picks, vec![9, 7, 7, 9, 3, 7, 3, 6, 9, 6]);
    }

    #[test]
    fn test_seed_reproduces_draws() {
        let values = [0.0, 1.0, 1.0, 0.0];
        let mut rng1 = SmallRng::seed_from_u64(3);
        let mut rng2 = SmallRng::seed_from_u64(3);
        let a1 = (0..50)
            .map(|_| epsilon_greedy(&values, 0.3, &mut rng1))
            .collect::<Vec<_>>();
        let a2 = (0..50)
            .map(|_| epsilon_greedy(&values, 0.3, &mut rng2))
            .collect::<Vec<_>>();
        assert_eq!(a1, a2);
    }

    #[test]
    fn test_greedy_without_exploration() {
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..100 {
            let a = epsilon_greedy(&[0.0, 0.0, 0.2, 0.0], 0.0, &mut rng);
            assert_eq!(a, Action::Down);
        }
    }
}
