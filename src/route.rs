use serde::{Deserialize, Serialize};

/// A 2-D point along a route, `(x, y)` on a canvas or `(lon, lat)` on a map
pub type Waypoint = (f64, f64);

/// A candidate route
///
/// Routes are identified by their position in the candidate list, so `index`
/// always equals that position once a [`RouteProvider`](crate::provider::RouteProvider)
/// hands them out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub index: usize,
    pub waypoints: Vec<Waypoint>,
    /// Distance or an equivalent scalar cost
    pub cost: f64,
}

impl Route {
    pub fn new(index: usize, waypoints: Vec<Waypoint>, cost: f64) -> Self {
        Self {
            index,
            waypoints,
            cost,
        }
    }

    /// Build a route whose cost is its euclidean polyline length
    pub fn from_waypoints(index: usize, waypoints: Vec<Waypoint>) -> Self {
        let cost = polyline_length(&waypoints);
        Self::new(index, waypoints, cost)
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }
}

/// Sum of the euclidean segment lengths
pub fn polyline_length(waypoints: &[Waypoint]) -> f64 {
    waypoints
        .windows(2)
        .map(|w| {
            let (dx, dy) = (w[1].0 - w[0].0, w[1].1 - w[0].1);
            dx.hypot(dy)
        })
        .sum()
}

/// Re-number routes so `index` matches list position
pub fn reindex(routes: Vec<Route>) -> Vec<Route> {
    routes
        .into_iter()
        .enumerate()
        .map(|(i, route)| Route { index: i, ..route })
        .collect()
}
