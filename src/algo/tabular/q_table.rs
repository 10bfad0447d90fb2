use log::{debug, info, warn};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{
    decay::{self, Decay},
    ensure_interval,
    env::{ActionSpace, Feedback, RewardSource},
    error::{Error, RewardError, Result},
    exploration::{Choice, EpsilonGreedy},
    present::Presenter,
    report::Report,
    trace::{Trace, Transition},
};

use super::{extract::extract, value_table::ValueTable};

/// Configuration for the [`QTableTrainer`]
///
/// Fixed for the lifetime of a training run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// The learning rate, in `(0,1]`
    ///
    /// **Default**: `0.1`
    pub alpha: f64,
    /// The discount factor, in `[0,1)`
    ///
    /// **Default**: `0.85`
    pub gamma: f64,
    /// Probability of exploring, in `[0,1]`
    ///
    /// **Default**: `0.1`
    pub epsilon: f64,
    /// Number of episodes run by [`QTableTrainer::train`], at least `1`
    ///
    /// **Default**: `1000`
    pub episodes: u32,
    /// Seed for every random draw of the run, or `None` to seed from the OS
    ///
    /// **Default**: `None`
    pub seed: Option<u64>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            gamma: 0.85,
            epsilon: 0.1,
            episodes: 1000,
            seed: None,
        }
    }
}

impl TrainerConfig {
    /// Parameters tuned for choosing among routes directly
    pub fn route_selection() -> Self {
        Self {
            alpha: 0.15,
            gamma: 0.8,
            epsilon: 0.2,
            episodes: 800,
            seed: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let &Self {
            alpha,
            gamma,
            epsilon,
            episodes,
            ..
        } = self;
        ensure_interval!(alpha, 0.0, 1.0);
        ensure_interval!(gamma, 0.0, 1.0);
        ensure_interval!(epsilon, 0.0, 1.0);
        if alpha == 0.0 {
            return Err(Error::InvalidConfiguration(String::from(
                "`alpha` must be greater than 0",
            )));
        }
        if gamma == 1.0 {
            return Err(Error::InvalidConfiguration(String::from(
                "`gamma` must be less than 1",
            )));
        }
        if episodes == 0 {
            return Err(Error::InvalidConfiguration(String::from(
                "`episodes` must be at least 1",
            )));
        }
        Ok(())
    }
}

/// One-step bootstrapped temporal-difference update
///
/// Q(s,a) ← (1 - α) Q(s,a) + α (r + γ max<sub>a'</sub> Q(s',a'))
pub fn q_update(old: f64, reward: f64, next_max: f64, alpha: f64, gamma: f64) -> f64 {
    (1.0 - alpha) * old + alpha * (reward + gamma * next_max)
}

/// Result of a full training run
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// Route extracted from the final table
    pub best_route: usize,
    /// Routes explored over the run, in order
    pub visited: Vec<usize>,
    /// Routes dropped from the candidate pool after their reward could not be computed
    pub excluded: Vec<usize>,
}

/// A Q-learning trainer that learns a value for every (route, action) pair in a dense table
///
/// ### Generics
/// - `S` - The [`RewardSource`] defining routes, actions and rewards
/// - `D` - The [`Decay`] strategy of the exploration probability, constant by default
///
/// Episodes start on a uniformly drawn candidate route and run for at most
/// [`RewardSource::step_limit`] transitions. Every transition applies [`q_update`] exactly
/// once, bootstrapping from the next state's row as it was before the write.
pub struct QTableTrainer<S, D = decay::Constant>
where
    S: RewardSource,
    D: Decay,
{
    source: S,
    table: ValueTable,
    exploration: EpsilonGreedy<D>,
    alpha: f64,
    gamma: f64,
    episodes: u32,
    rng: StdRng,
    candidates: Vec<bool>,
    visited: Vec<usize>,
    episode: u32,
    /// Reward and step totals since the last [`Report::take`]
    pub report: Report,
}

impl<S: RewardSource> QTableTrainer<S> {
    /// Initialize a new trainer with a constant exploration probability of `config.epsilon`
    ///
    /// Fails with [`Error::InvalidConfiguration`] if the source has no routes or any
    /// parameter is out of range.
    pub fn new(config: TrainerConfig, source: S) -> Result<Self> {
        let exploration = EpsilonGreedy::constant(config.epsilon)?;
        Self::with_exploration(config, source, exploration)
    }
}

impl<S, D> QTableTrainer<S, D>
where
    S: RewardSource,
    D: Decay,
{
    /// Initialize a new trainer with a custom exploration schedule
    ///
    /// `config.epsilon` is still validated but the schedule decides exploration.
    pub fn with_exploration(
        config: TrainerConfig,
        source: S,
        exploration: EpsilonGreedy<D>,
    ) -> Result<Self> {
        config.validate()?;
        let routes = source.num_states();
        if routes == 0 {
            return Err(Error::InvalidConfiguration(String::from(
                "no candidate routes to train on",
            )));
        }
        source.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            table: ValueTable::new(routes, source.num_actions()),
            source,
            exploration,
            alpha: config.alpha,
            gamma: config.gamma,
            episodes: config.episodes,
            rng,
            candidates: vec![true; routes],
            visited: Vec::new(),
            episode: 0,
            report: Report::new(vec!["reward", "steps"]),
        })
    }

    pub fn table(&self) -> &ValueTable {
        &self.table
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Number of episodes run so far
    pub fn episode(&self) -> u32 {
        self.episode
    }

    /// Routes explored so far, in order
    ///
    /// One entry per episode when stepping along routes, one per transition when choosing
    /// among routes.
    pub fn visited(&self) -> &[usize] {
        &self.visited
    }

    pub fn is_candidate(&self, route: usize) -> bool {
        self.candidates.get(route).copied().unwrap_or(false)
    }

    /// Routes still in the candidate pool, in index order
    pub fn candidates(&self) -> impl Iterator<Item = usize> + '_ {
        self.candidates
            .iter()
            .enumerate()
            .filter_map(|(i, &keep)| keep.then_some(i))
    }

    pub fn excluded(&self) -> Vec<usize> {
        self.candidates
            .iter()
            .enumerate()
            .filter_map(|(i, &keep)| (!keep).then_some(i))
            .collect()
    }

    fn exhausted() -> Error {
        Error::InvalidConfiguration(String::from(
            "every candidate route has been excluded",
        ))
    }

    fn available_actions(&self) -> Vec<usize> {
        match self.source.action_space() {
            ActionSpace::Binary => (0..self.table.actions()).collect(),
            ActionSpace::RouteSelection => self.candidates().collect(),
        }
    }

    /// Choose an action based on the current state and exploration policy
    fn act(&mut self, state: usize) -> Result<usize> {
        let actions = self.available_actions();
        let action = match self.exploration.choose(self.episode, &mut self.rng) {
            Choice::Explore => actions.choose(&mut self.rng).copied(),
            Choice::Exploit => self
                .table
                .best_action_among(state, actions.iter().copied())?,
        };
        action.ok_or_else(Self::exhausted)
    }

    /// Learn from a given transition and update the table
    ///
    /// The bootstrap only reads the actions still available, so an excluded route's
    /// column never props up the estimate.
    fn learn(&mut self, transition: &Transition) -> Result<()> {
        let &Transition {
            state,
            action,
            reward,
            next_state,
        } = transition;

        let old = self.table.get(state, action)?;
        let next_max = self
            .table
            .row_max_among(next_state, self.available_actions())?
            .ok_or_else(Self::exhausted)?;
        let new = q_update(old, reward, next_max, self.alpha, self.gamma);
        self.table.set(state, action, new)
    }

    /// Drop the route named by `error` from the candidate pool
    fn exclude(&mut self, error: RewardError) -> Result<()> {
        match self.candidates.get_mut(error.route) {
            Some(keep) if *keep => {
                *keep = false;
                warn!(
                    "Excluding route {} from the candidate pool: {}",
                    error.route, error.reason
                );
            }
            Some(_) => {}
            None => warn!(
                "Reward source failed for unknown route {}: {}",
                error.route, error.reason
            ),
        }

        if self.candidates.iter().any(|&keep| keep) {
            Ok(())
        } else {
            Err(Self::exhausted())
        }
    }

    /// Run a single episode and return its transitions
    pub fn go(&mut self) -> Result<Trace> {
        let pool = self.candidates().collect::<Vec<_>>();
        let start = *pool.choose(&mut self.rng).ok_or_else(Self::exhausted)?;
        let space = self.source.action_space();
        let limit = self.source.step_limit(start);

        debug!("Episode {}: exploring route {}", self.episode + 1, start);
        if space == ActionSpace::Binary {
            self.visited.push(start);
        }

        let mut trace = Trace::new(start, limit);
        let mut state = start;
        for _ in 0..limit {
            let action = self.act(state)?;
            let Feedback { reward, next_state } = match self.source.reward(state, action) {
                Ok(feedback) => feedback,
                Err(e) => {
                    self.exclude(e)?;
                    if self.is_candidate(state) {
                        continue;
                    }
                    break;
                }
            };

            let transition = Transition {
                state,
                action,
                reward,
                next_state,
            };
            self.learn(&transition)?;
            log::trace!("{transition:?}");

            if space == ActionSpace::RouteSelection {
                self.visited.push(action);
            }
            trace.push(transition);
            state = next_state;

            if self.source.terminal_state() == Some(state) {
                break;
            }
        }

        let total = trace.total_reward();
        self.report.entry("reward").and_modify(|x| *x += total);
        self.report
            .entry("steps")
            .and_modify(|x| *x += trace.len() as f64);
        debug!("Total reward for episode {}: {}", self.episode + 1, total);

        self.episode += 1;
        Ok(trace)
    }

    /// Run every configured episode, then extract the best route
    pub fn train(&mut self) -> Result<Outcome> {
        for _ in 0..self.episodes {
            self.go()?;
        }

        info!("Training completed after {} episodes", self.episode);
        for state in 0..self.table.states() {
            debug!("Q[{}] = {:?}", state, self.table.row(state)?);
        }

        let best_route = self.best_route()?;
        info!("Best route identified: route {}", best_route);

        Ok(Outcome {
            best_route,
            visited: self.visited.clone(),
            excluded: self.excluded(),
        })
    }

    /// Candidate route whose row scores highest under the source's [`Extraction`](super::extract::Extraction)
    pub fn best_route(&self) -> Result<usize> {
        extract(&self.table, self.source.extraction(), self.candidates())?
            .ok_or_else(Self::exhausted)
    }

    /// Notify `presenter` of the best route and the visited sequence
    pub fn present<P: Presenter + ?Sized>(&self, presenter: &mut P) -> Result<()> {
        presenter.on_best_route(self.best_route()?, Some(self.visited.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        decay::Exponential,
        env::{
            tests::{straight_routes, Failing},
            CostDriven, CostDrivenConfig, FixedTopology, FixedTopologyConfig, Move,
        },
        gym::canvas_paths,
    };
    use strum::VariantArray;

    fn seeded(episodes: u32, seed: u64) -> TrainerConfig {
        TrainerConfig {
            episodes,
            seed: Some(seed),
            ..Default::default()
        }
    }

    fn canvas() -> FixedTopology {
        FixedTopology::new(canvas_paths(), FixedTopologyConfig::default())
    }

    #[test]
    fn update_recurrence() {
        let first = q_update(0.0, 15.0, 0.0, 0.1, 0.85);
        assert!((first - 1.5).abs() < 1e-12);

        let second = q_update(first, -2.0, first, 0.1, 0.85);
        assert!((second - 1.2775).abs() < 1e-12);
    }

    #[test]
    fn rejects_bad_parameters() {
        let bad = [
            TrainerConfig {
                alpha: 0.0,
                ..Default::default()
            },
            TrainerConfig {
                alpha: 1.5,
                ..Default::default()
            },
            TrainerConfig {
                gamma: 1.0,
                ..Default::default()
            },
            TrainerConfig {
                epsilon: -0.1,
                ..Default::default()
            },
            TrainerConfig {
                episodes: 0,
                ..Default::default()
            },
        ];
        for config in bad {
            assert!(
                matches!(
                    QTableTrainer::new(config, canvas()),
                    Err(Error::InvalidConfiguration(_))
                ),
                "{config:?} accepted"
            );
        }
        assert!(TrainerConfig::route_selection().validate().is_ok());
    }

    #[test]
    fn zero_routes_fail_fast() {
        let empty = FixedTopology::new(vec![], FixedTopologyConfig::default());
        assert!(matches!(
            QTableTrainer::new(TrainerConfig::default(), empty),
            Err(Error::InvalidConfiguration(_))
        ));

        let empty = CostDriven::new(vec![], CostDrivenConfig::default());
        assert!(matches!(
            QTableTrainer::new(TrainerConfig::route_selection(), empty),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn table_shape_follows_action_space() {
        let trainer = QTableTrainer::new(seeded(1, 0), canvas()).unwrap();
        assert_eq!((trainer.table().states(), trainer.table().actions()), (7, 2));

        let source = CostDriven::new(straight_routes(5), CostDrivenConfig::default());
        let trainer = QTableTrainer::new(seeded(1, 0), source).unwrap();
        assert_eq!((trainer.table().states(), trainer.table().actions()), (5, 5));
    }

    #[test]
    fn deterministic_under_seed() {
        let mut a = QTableTrainer::new(seeded(300, 42), canvas()).unwrap();
        let mut b = QTableTrainer::new(seeded(300, 42), canvas()).unwrap();

        let outcome_a = a.train().unwrap();
        let outcome_b = b.train().unwrap();

        assert_eq!(a.table(), b.table());
        assert_eq!(outcome_a, outcome_b);

        let source = || CostDriven::new(straight_routes(6), CostDrivenConfig::default());
        let config = TrainerConfig {
            seed: Some(9),
            ..TrainerConfig::route_selection()
        };
        let mut a = QTableTrainer::new(config, source()).unwrap();
        let mut b = QTableTrainer::new(config, source()).unwrap();
        assert_eq!(a.train().unwrap(), b.train().unwrap());
        assert_eq!(a.table(), b.table());
    }

    #[test]
    fn fixed_topology_episode_length() {
        let mut trainer = QTableTrainer::new(seeded(50, 3), canvas()).unwrap();
        for _ in 0..50 {
            let trace = trainer.go().unwrap();
            assert_eq!(trace.len(), canvas_paths()[trace.start].len());
            assert!(trace.into_iter().all(|t| t.state == trace.start
                && t.next_state == trace.start
                && t.action < Move::VARIANTS.len()));
        }
        assert_eq!(trainer.episode(), 50);
        assert_eq!(trainer.visited().len(), 50);

        let steps: usize = trainer
            .visited()
            .iter()
            .map(|&r| canvas_paths()[r].len())
            .sum();
        assert_eq!(trainer.report["steps"], steps as f64);
    }

    #[test]
    fn designated_route_wins() {
        let mut trainer = QTableTrainer::new(seeded(1000, 7), canvas()).unwrap();
        let outcome = trainer.train().unwrap();
        assert_eq!(outcome.best_route, 4);
        assert!(outcome.excluded.is_empty());
        assert!(trainer.table().get(4, Move::Advance as usize).unwrap() > 0.0);

        let source = FixedTopology::new(
            canvas_paths(),
            FixedTopologyConfig {
                optimal: 1,
                ..Default::default()
            },
        );
        let mut trainer = QTableTrainer::new(seeded(500, 11), source).unwrap();
        assert_eq!(trainer.train().unwrap().best_route, 1);
    }

    #[test]
    fn goal_ends_episode() {
        let source = CostDriven::new(
            straight_routes(6),
            CostDrivenConfig {
                goal: Some(2),
                ..Default::default()
            },
        );
        let config = TrainerConfig {
            seed: Some(5),
            ..TrainerConfig::route_selection()
        };
        let mut trainer = QTableTrainer::new(config, source).unwrap();

        for _ in 0..100 {
            let trace = trainer.go().unwrap();
            assert!(trace.len() <= 5);
            let goal_hits = trace.into_iter().filter(|t| t.next_state == 2).count();
            assert!(goal_hits <= 1);
            if goal_hits == 1 {
                assert_eq!(trace.last_state(), 2);
            }
            assert!(trace
                .transitions()
                .windows(2)
                .all(|w| w[0].next_state == w[1].state));
        }
    }

    #[test]
    fn failing_route_is_excluded() {
        let source = Failing {
            inner: FixedTopology::new(
                straight_routes(5),
                FixedTopologyConfig {
                    optimal: 2,
                    ..Default::default()
                },
            ),
            route: 2,
        };
        let mut trainer = QTableTrainer::new(seeded(500, 21), source).unwrap();
        let outcome = trainer.train().unwrap();

        assert_ne!(outcome.best_route, 2);
        assert_eq!(outcome.excluded, [2]);
        assert!(!trainer.is_candidate(2));
        assert_eq!(trainer.candidates().collect::<Vec<_>>(), [0, 1, 3, 4]);
        assert_eq!(trainer.table().row(2).unwrap(), [0.0, 0.0]);
    }

    #[test]
    fn unusable_cost_is_excluded() {
        let mut routes = straight_routes(5);
        routes[1].cost = f64::INFINITY;
        let source = CostDriven::new(routes, CostDrivenConfig::default());
        let config = TrainerConfig {
            seed: Some(13),
            ..TrainerConfig::route_selection()
        };
        let mut trainer = QTableTrainer::new(config, source).unwrap();
        let outcome = trainer.train().unwrap();

        assert_ne!(outcome.best_route, 1);
        assert_eq!(outcome.excluded, [1]);
        assert!(!outcome.visited.contains(&1));
        for state in 0..5 {
            assert_eq!(trainer.table().get(state, 1).unwrap(), 0.0);
        }
    }

    #[test]
    fn excluded_route_leaves_bootstrap() {
        let mut routes = straight_routes(4);
        routes[1].cost = f64::INFINITY;
        routes[2].cost = 500.0;
        let source = CostDriven::new(
            routes,
            CostDrivenConfig {
                goal: Some(2),
                ..Default::default()
            },
        );
        let config = TrainerConfig {
            episodes: 500,
            seed: Some(3),
            ..TrainerConfig::route_selection()
        };
        let mut trainer = QTableTrainer::new(config, source).unwrap();
        let outcome = trainer.train().unwrap();
        assert_eq!(outcome.excluded, [1]);

        // every reward is negative, so values built only from the remaining routes sink
        // below a single step's penalty
        for state in [0, 3] {
            let candidate_max = trainer
                .table()
                .row_max_among(state, trainer.candidates())
                .unwrap()
                .unwrap();
            assert!(
                candidate_max < -2.0,
                "state {state}: {:?}",
                trainer.table().row(state).unwrap()
            );
            assert_eq!(trainer.table().get(state, 1).unwrap(), 0.0);
        }
    }

    #[test]
    fn exhausted_pool_is_fatal() {
        let source = Failing {
            inner: FixedTopology::new(
                straight_routes(1),
                FixedTopologyConfig {
                    optimal: 0,
                    ..Default::default()
                },
            ),
            route: 0,
        };
        let mut trainer = QTableTrainer::new(seeded(10, 1), source).unwrap();
        assert!(matches!(trainer.train(), Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn decaying_exploration() {
        let exploration = EpsilonGreedy::new(Exponential::new(0.01, 1.0, 0.05).unwrap());
        let mut trainer =
            QTableTrainer::with_exploration(seeded(1000, 17), canvas(), exploration).unwrap();
        assert_eq!(trainer.train().unwrap().best_route, 4);
    }

    #[test]
    fn presenter_receives_result() {
        struct Recorder(Option<(usize, Vec<usize>)>);

        impl Presenter for Recorder {
            fn on_best_route(&mut self, route: usize, visited: Option<&[usize]>) -> Result<()> {
                self.0 = Some((route, visited.unwrap_or_default().to_vec()));
                Ok(())
            }
        }

        let mut trainer = QTableTrainer::new(seeded(200, 2), canvas()).unwrap();
        let outcome = trainer.train().unwrap();

        let mut recorder = Recorder(None);
        trainer.present(&mut recorder).unwrap();
        assert_eq!(recorder.0, Some((outcome.best_route, outcome.visited)));
    }
}
