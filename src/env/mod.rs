use serde::{Deserialize, Serialize};
use strum::{Display, FromRepr, VariantArray};

use crate::{
    algo::Extraction,
    error::{RewardError, Result},
    route::Route,
};

mod cost_driven;
mod fixed_topology;

pub use cost_driven::{CostDriven, CostDrivenConfig};
pub use fixed_topology::{FixedTopology, FixedTopologyConfig};

/// Moves available while stepping along a single route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, FromRepr, VariantArray)]
#[repr(usize)]
pub enum Move {
    Stay = 0,
    Advance = 1,
}

/// Shape of the action set, shared by every state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionSpace {
    /// `{Stay, Advance}`, see [`Move`]
    Binary,
    /// One action per candidate route: action `i` chooses route `i`
    RouteSelection,
}

impl ActionSpace {
    /// Number of actions per state given `routes` candidates
    pub fn len(&self, routes: usize) -> usize {
        match self {
            ActionSpace::Binary => Move::VARIANTS.len(),
            ActionSpace::RouteSelection => routes,
        }
    }
}

/// Outcome of a single transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Feedback {
    pub reward: f64,
    pub next_state: usize,
}

/// Defines how the trainer is rewarded for an action taken while considering a route
///
/// Implementations must be pure in `(state, action)`: any route data they consult is
/// owned by the source and never mutated during training.
pub trait RewardSource {
    /// The candidate routes; state `i` means "considering route `i`"
    fn routes(&self) -> &[Route];

    fn action_space(&self) -> ActionSpace;

    /// Maximum number of transitions in an episode starting from `state`
    fn step_limit(&self, state: usize) -> usize;

    /// Reward and resulting state for taking `action` in `state`
    ///
    /// An error names the route that could not be evaluated; the trainer drops it from the
    /// candidate pool instead of aborting.
    fn reward(&self, state: usize, action: usize) -> Result<Feedback, RewardError>;

    /// Reaching this state ends the episode early
    fn terminal_state(&self) -> Option<usize> {
        None
    }

    /// How the final table is reduced to a single route
    fn extraction(&self) -> Extraction;

    /// Checked once at trainer construction, after the route list is known to be non-empty
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn num_states(&self) -> usize {
        self.routes().len()
    }

    fn num_actions(&self) -> usize {
        self.action_space().len(self.num_states())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Wraps a source and refuses to evaluate any transition that touches `route`
    pub(crate) struct Failing<S> {
        pub inner: S,
        pub route: usize,
    }

    impl<S: RewardSource> RewardSource for Failing<S> {
        fn routes(&self) -> &[Route] {
            self.inner.routes()
        }

        fn action_space(&self) -> ActionSpace {
            self.inner.action_space()
        }

        fn step_limit(&self, state: usize) -> usize {
            self.inner.step_limit(state)
        }

        fn reward(&self, state: usize, action: usize) -> Result<Feedback, RewardError> {
            let touches = state == self.route
                || (self.action_space() == ActionSpace::RouteSelection && action == self.route);
            if touches {
                return Err(RewardError::new(self.route, "upstream routing error"));
            }
            self.inner.reward(state, action)
        }

        fn terminal_state(&self) -> Option<usize> {
            self.inner.terminal_state()
        }

        fn extraction(&self) -> Extraction {
            self.inner.extraction()
        }

        fn validate(&self) -> Result<()> {
            self.inner.validate()
        }
    }

    /// `n` straight routes of four waypoints with costs `100, 200, ...`
    pub(crate) fn straight_routes(n: usize) -> Vec<Route> {
        (0..n)
            .map(|i| {
                let y = i as f64;
                Route::new(
                    i,
                    vec![(0.0, y), (1.0, y), (2.0, y), (3.0, y)],
                    100.0 * (i + 1) as f64,
                )
            })
            .collect()
    }

    #[test]
    fn action_space_sizes() {
        assert_eq!(ActionSpace::Binary.len(7), 2);
        assert_eq!(ActionSpace::RouteSelection.len(7), 7);
        assert_eq!(Move::from_repr(1), Some(Move::Advance));
        assert_eq!(Move::from_repr(2), None);
    }
}
