use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Distribution, Uniform};

use crate::{
    error::ProviderError,
    provider::RouteProvider,
    route::{Route, Waypoint},
};

/// Synthetic alternatives between two points
///
/// Each route runs origin → jittered origin → jittered destination → destination, with
/// both jitters drawn uniformly from `[-jitter, jitter]` on each axis. Costs are polyline
/// lengths scaled by `cost_scale`.
#[derive(Debug, Clone)]
pub struct Jittered {
    pub origin: Waypoint,
    pub destination: Waypoint,
    /// **Default**: `8`
    pub count: usize,
    /// **Default**: `0.008`
    pub jitter: f64,
    /// **Default**: `1.0`
    pub cost_scale: f64,
    rng: StdRng,
}

impl Jittered {
    pub fn new(origin: Waypoint, destination: Waypoint, seed: u64) -> Self {
        Self {
            origin,
            destination,
            count: 8,
            jitter: 0.008,
            cost_scale: 1.0,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RouteProvider for Jittered {
    fn list_routes(&mut self) -> Result<Vec<Route>, ProviderError> {
        if !(self.jitter.is_finite() && self.jitter >= 0.0) {
            return Err(ProviderError::Malformed(format!(
                "jitter must be a non-negative number, got {}",
                self.jitter
            )));
        }
        let offset = Uniform::new_inclusive(-self.jitter, self.jitter);
        let mut shift = |(x, y): Waypoint| {
            (
                x + offset.sample(&mut self.rng),
                y + offset.sample(&mut self.rng),
            )
        };

        let routes = (0..self.count)
            .map(|i| {
                let waypoints = vec![
                    self.origin,
                    shift(self.origin),
                    shift(self.destination),
                    self.destination,
                ];
                let mut route = Route::from_waypoints(i, waypoints);
                route.cost *= self.cost_scale;
                route
            })
            .collect();
        Ok(routes)
    }
}
