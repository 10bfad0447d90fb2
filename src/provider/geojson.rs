use std::{fs, path::PathBuf};

use log::warn;
use serde::Deserialize;

use crate::{error::ProviderError, route::Route};

use super::RouteProvider;

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Geometry,
    #[serde(default)]
    properties: Properties,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    coordinates: Vec<Vec<f64>>,
}

#[derive(Debug, Default, Deserialize)]
struct Properties {
    #[serde(default)]
    segments: Vec<Segment>,
}

#[derive(Debug, Deserialize)]
struct Segment {
    distance: f64,
}

/// Parse one directions response in GeoJSON into a route
///
/// The first feature's line string becomes the waypoints and the distance of its first
/// segment becomes the cost.
pub fn parse_route(index: usize, document: &str) -> Result<Route, ProviderError> {
    let collection: FeatureCollection = serde_json::from_str(document)?;
    let feature = collection
        .features
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::Malformed(String::from("no features")))?;

    let waypoints = feature
        .geometry
        .coordinates
        .into_iter()
        .map(|c| match c[..] {
            [x, y, ..] => Ok((x, y)),
            _ => Err(ProviderError::Malformed(String::from(
                "coordinate with fewer than two components",
            ))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let cost = feature
        .properties
        .segments
        .first()
        .map(|s| s.distance)
        .ok_or_else(|| ProviderError::Malformed(String::from("no route segments")))?;

    Ok(Route::new(index, waypoints, cost))
}

/// Routes read from saved directions responses, one GeoJSON document per route
///
/// A document that cannot be read or parsed drops only that route.
#[derive(Debug, Clone, Default)]
pub struct GeoJsonRoutes {
    documents: Vec<Document>,
}

#[derive(Debug, Clone)]
enum Document {
    File(PathBuf),
    Inline(String),
}

impl GeoJsonRoutes {
    pub fn from_files(paths: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            documents: paths
                .into_iter()
                .map(|p| Document::File(p.into()))
                .collect(),
        }
    }

    pub fn from_documents(documents: impl IntoIterator<Item = String>) -> Self {
        Self {
            documents: documents.into_iter().map(Document::Inline).collect(),
        }
    }

    fn load(document: &Document, index: usize) -> Result<Route, ProviderError> {
        match document {
            Document::File(path) => parse_route(index, &fs::read_to_string(path)?),
            Document::Inline(text) => parse_route(index, text),
        }
    }
}

impl RouteProvider for GeoJsonRoutes {
    fn list_routes(&mut self) -> Result<Vec<Route>, ProviderError> {
        let mut routes = Vec::with_capacity(self.documents.len());
        for (i, document) in self.documents.iter().enumerate() {
            match Self::load(document, routes.len()) {
                Ok(route) => routes.push(route),
                Err(e) => warn!("Skipping route document {}: {e}", i + 1),
            }
        }
        Ok(routes)
    }
}
