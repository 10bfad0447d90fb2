use rand::Rng;

use crate::{
    decay::{self, Decay},
    ensure_interval,
    error::Result,
};

use super::Choice;

/// Epsilon greedy exploration policy with a time-decaying epsilon threshold
///
/// Randomness is drawn from the caller's generator so a seeded run is reproducible.
#[derive(Debug, Clone)]
pub struct EpsilonGreedy<D: Decay> {
    epsilon: D,
}

impl<D: Decay> EpsilonGreedy<D> {
    /// Initialize epsilon greedy policy with a decay strategy
    pub fn new(decay: D) -> Self {
        Self { epsilon: decay }
    }

    /// Epsilon in effect for `episode`
    pub fn epsilon(&self, episode: u32) -> f64 {
        self.epsilon.evaluate(episode as f64)
    }

    /// Invoke epsilon greedy policy for the current episode
    ///
    /// Draws `u` from `[0,1)` and explores when `u < epsilon`.
    pub fn choose<R: Rng + ?Sized>(&self, episode: u32, rng: &mut R) -> Choice {
        if rng.gen::<f64>() < self.epsilon(episode) {
            Choice::Explore
        } else {
            Choice::Exploit
        }
    }
}

impl EpsilonGreedy<decay::Constant> {
    /// Fixed exploration probability for the whole run
    ///
    /// Fails if `epsilon` is not in `[0,1]`.
    pub fn constant(epsilon: f64) -> Result<Self> {
        ensure_interval!(epsilon, 0.0, 1.0);
        Ok(Self::new(decay::Constant::new(epsilon)))
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::error::Error;

    #[test]
    fn extreme_epsilons() {
        let mut rng = StdRng::seed_from_u64(7);
        let always = EpsilonGreedy::constant(1.0).unwrap();
        let never = EpsilonGreedy::constant(0.0).unwrap();
        for episode in 0..100 {
            assert_eq!(always.choose(episode, &mut rng), Choice::Explore);
            assert_eq!(never.choose(episode, &mut rng), Choice::Exploit);
        }
    }

    #[test]
    fn rejects_out_of_range_epsilon() {
        assert!(matches!(
            EpsilonGreedy::constant(1.2),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn decaying_epsilon() {
        let policy = EpsilonGreedy::new(decay::Linear::new(0.1, 1.0, 0.2).unwrap());
        assert_eq!(policy.epsilon(0), 1.0);
        assert_eq!(policy.epsilon(100), 0.2);
    }
}
