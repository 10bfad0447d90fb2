use serde::{Deserialize, Serialize};

use crate::{
    algo::Extraction,
    ensure_finite,
    error::{Error, RewardError, Result},
    route::Route,
};

use super::{ActionSpace, Feedback, Move, RewardSource};

/// Reward shaping for [`FixedTopology`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedTopologyConfig {
    /// Index of the route that pays [`advance_bonus`](Self::advance_bonus)
    ///
    /// **Default**: `4`
    pub optimal: usize,
    /// **Default**: `15.0`
    pub advance_bonus: f64,
    /// Reward for advancing along any other route
    ///
    /// **Default**: `-2.0`
    pub advance_penalty: f64,
    /// **Default**: `-5.0`
    pub stay_penalty: f64,
}

impl Default for FixedTopologyConfig {
    fn default() -> Self {
        Self {
            optimal: 4,
            advance_bonus: 15.0,
            advance_penalty: -2.0,
            stay_penalty: -5.0,
        }
    }
}

/// Stay/advance rewards on a known set of paths, one of which is designated optimal
///
/// The state tracks which path is being considered, not the waypoint reached, so every
/// transition stays on the same path. An episode lasts as many steps as the path has
/// waypoints.
#[derive(Debug, Clone)]
pub struct FixedTopology {
    routes: Vec<Route>,
    config: FixedTopologyConfig,
}

impl FixedTopology {
    pub fn new(routes: Vec<Route>, config: FixedTopologyConfig) -> Self {
        Self { routes, config }
    }

    pub fn config(&self) -> &FixedTopologyConfig {
        &self.config
    }
}

impl RewardSource for FixedTopology {
    fn routes(&self) -> &[Route] {
        &self.routes
    }

    fn action_space(&self) -> ActionSpace {
        ActionSpace::Binary
    }

    fn step_limit(&self, state: usize) -> usize {
        self.routes.get(state).map_or(0, Route::len)
    }

    fn reward(&self, state: usize, action: usize) -> Result<Feedback, RewardError> {
        if state >= self.routes.len() {
            return Err(RewardError::new(state, "no such route"));
        }
        let reward = match Move::from_repr(action) {
            Some(Move::Advance) if state == self.config.optimal => self.config.advance_bonus,
            Some(Move::Advance) => self.config.advance_penalty,
            Some(Move::Stay) => self.config.stay_penalty,
            None => return Err(RewardError::new(state, format!("unknown move {action}"))),
        };

        Ok(Feedback {
            reward,
            next_state: state,
        })
    }

    fn extraction(&self) -> Extraction {
        Extraction::RowMax
    }

    fn validate(&self) -> Result<()> {
        let FixedTopologyConfig {
            advance_bonus,
            advance_penalty,
            stay_penalty,
            ..
        } = self.config;
        ensure_finite!(advance_bonus);
        ensure_finite!(advance_penalty);
        ensure_finite!(stay_penalty);

        if self.config.optimal >= self.routes.len() {
            return Err(Error::InvalidConfiguration(format!(
                "optimal route {} is not one of the {} candidates",
                self.config.optimal,
                self.routes.len()
            )));
        }
        Ok(())
    }
}
