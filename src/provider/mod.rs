use log::{error, info};

use crate::{error::ProviderError, route::Route};

mod geojson;

pub use geojson::GeoJsonRoutes;

/// Supplies the ordered list of candidate routes
///
/// Any network access, retries or timeouts live behind this boundary.
pub trait RouteProvider {
    fn list_routes(&mut self) -> Result<Vec<Route>, ProviderError>;
}

/// A fixed, pre-built set of routes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticRoutes {
    routes: Vec<Route>,
}

impl StaticRoutes {
    pub fn new(routes: Vec<Route>) -> Self {
        Self {
            routes: crate::route::reindex(routes),
        }
    }
}

impl RouteProvider for StaticRoutes {
    fn list_routes(&mut self) -> Result<Vec<Route>, ProviderError> {
        Ok(self.routes.clone())
    }
}

/// Fetch routes, treating a provider failure as "no routes available"
///
/// The error is logged; an empty list is then rejected by the trainer.
pub fn collect_routes<P: RouteProvider + ?Sized>(provider: &mut P) -> Vec<Route> {
    match provider.list_routes() {
        Ok(routes) => {
            info!("Route provider supplied {} candidate routes", routes.len());
            routes
        }
        Err(e) => {
            error!("Route provider failed: {e}");
            Vec::new()
        }
    }
}
