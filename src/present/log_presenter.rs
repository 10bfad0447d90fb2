use log::{debug, info, warn};

use crate::{error::Result, route::Route};

use super::{visit_counts, Presenter};

/// Reports the result through the `log` facade
pub struct LogPresenter {
    routes: Vec<Route>,
}

impl LogPresenter {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }
}

impl Presenter for LogPresenter {
    fn on_best_route(&mut self, route: usize, visited: Option<&[usize]>) -> Result<()> {
        match self.routes.get(route) {
            Some(best) => info!(
                "Optimal route found: route {} ({} waypoints, cost {:.2})",
                route,
                best.len(),
                best.cost
            ),
            None => warn!("Best route {route} is not among the {} routes", self.routes.len()),
        }

        if let Some(visited) = visited {
            let counts = visit_counts(self.routes.len(), visited);
            let explored = counts.iter().filter(|&&c| c > 0).count();
            info!(
                "{} visits across {explored} of {} routes",
                visited.len(),
                self.routes.len()
            );
        }

        debug!("Details of all routes:");
        for r in &self.routes {
            debug!("Route {} (cost {:.2}): {:?}", r.index, r.cost, r.waypoints);
        }
        Ok(())
    }
}
