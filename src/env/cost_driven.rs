use serde::{Deserialize, Serialize};

use crate::{
    algo::Extraction,
    ensure_finite,
    error::{Error, RewardError, Result},
    route::Route,
};

use super::{ActionSpace, Feedback, RewardSource};

/// Reward shaping for [`CostDriven`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostDrivenConfig {
    /// Route whose selection ends the episode and pays `goal_bonus - cost`
    ///
    /// **Default**: `None`, meaning the last route
    pub goal: Option<usize>,
    /// **Default**: `120.0`
    pub goal_bonus: f64,
    /// Reward for selecting any route other than the goal
    ///
    /// **Default**: `-2.0`
    pub penalty: f64,
}

impl Default for CostDrivenConfig {
    fn default() -> Self {
        Self {
            goal: None,
            goal_bonus: 120.0,
            penalty: -2.0,
        }
    }
}

/// Route selection rewarded by route cost
///
/// Every action chooses a route outright and the chosen route becomes the next state.
/// A route whose cost is not a finite, non-negative number cannot be evaluated and is
/// reported as a [`RewardError`].
#[derive(Debug, Clone)]
pub struct CostDriven {
    routes: Vec<Route>,
    config: CostDrivenConfig,
}

impl CostDriven {
    pub fn new(routes: Vec<Route>, config: CostDrivenConfig) -> Self {
        Self { routes, config }
    }

    pub fn config(&self) -> &CostDrivenConfig {
        &self.config
    }

    pub fn goal(&self) -> usize {
        self.config
            .goal
            .unwrap_or_else(|| self.routes.len().saturating_sub(1))
    }
}

impl RewardSource for CostDriven {
    fn routes(&self) -> &[Route] {
        &self.routes
    }

    fn action_space(&self) -> ActionSpace {
        ActionSpace::RouteSelection
    }

    fn step_limit(&self, _state: usize) -> usize {
        self.routes.len().saturating_sub(1)
    }

    fn reward(&self, _state: usize, action: usize) -> Result<Feedback, RewardError> {
        let route = self
            .routes
            .get(action)
            .ok_or_else(|| RewardError::new(action, "no such route"))?;
        if !(route.cost.is_finite() && route.cost >= 0.0) {
            return Err(RewardError::new(
                action,
                format!("unusable route cost {}", route.cost),
            ));
        }

        let reward = if action == self.goal() {
            self.config.goal_bonus - route.cost
        } else {
            self.config.penalty
        };

        Ok(Feedback {
            reward,
            next_state: action,
        })
    }

    fn terminal_state(&self) -> Option<usize> {
        Some(self.goal())
    }

    fn extraction(&self) -> Extraction {
        Extraction::RowSum
    }

    fn validate(&self) -> Result<()> {
        let CostDrivenConfig {
            goal_bonus,
            penalty,
            ..
        } = self.config;
        ensure_finite!(goal_bonus);
        ensure_finite!(penalty);

        let goal = self.goal();
        if goal >= self.routes.len() {
            return Err(Error::InvalidConfiguration(format!(
                "goal route {goal} is not one of the {} candidates",
                self.routes.len()
            )));
        }
        Ok(())
    }
}
