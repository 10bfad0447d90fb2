use std::{fs::File, io::Write, path::Path};

use serde::Serialize;

use crate::{
    error::{Error, Result},
    route::Route,
};

use super::{visit_counts, Presenter};

#[derive(Debug, Serialize)]
struct Row {
    route: usize,
    role: &'static str,
    visits: usize,
    cost: f64,
    seq: usize,
    x: f64,
    y: f64,
}

/// Writes every waypoint of every route as CSV, labelled `best`, `visited` or `candidate`
///
/// Enough to redraw the candidate routes, the explored ones and the winner on a map.
pub struct CsvPresenter<W: Write> {
    routes: Vec<Route>,
    writer: csv::Writer<W>,
}

impl CsvPresenter<File> {
    pub fn from_path(routes: Vec<Route>, path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            routes,
            writer: csv::Writer::from_path(path)?,
        })
    }
}

impl<W: Write> CsvPresenter<W> {
    pub fn from_writer(routes: Vec<Route>, writer: W) -> Self {
        Self {
            routes,
            writer: csv::Writer::from_writer(writer),
        }
    }

    /// Flush and hand back the underlying writer
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))
    }
}

impl<W: Write> Presenter for CsvPresenter<W> {
    fn on_best_route(&mut self, route: usize, visited: Option<&[usize]>) -> Result<()> {
        let counts = visit_counts(self.routes.len(), visited.unwrap_or_default());

        for (r, &visits) in self.routes.iter().zip(&counts) {
            let role = match (r.index == route, visits > 0) {
                (true, _) => "best",
                (false, true) => "visited",
                (false, false) => "candidate",
            };
            for (seq, &(x, y)) in r.waypoints.iter().enumerate() {
                self.writer.serialize(Row {
                    route: r.index,
                    role,
                    visits,
                    cost: r.cost,
                    seq,
                    x,
                    y,
                })?;
            }
        }

        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_every_waypoint() {
        let routes = vec![
            Route::new(0, vec![(0.0, 0.0), (1.0, 1.0)], 10.0),
            Route::new(1, vec![(0.0, 0.0), (2.0, 0.5)], 20.0),
            Route::new(2, vec![(5.0, 5.0)], 30.0),
        ];
        let mut presenter = CsvPresenter::from_writer(routes, Vec::new());
        presenter.on_best_route(1, Some(&[0, 1, 1])).unwrap();

        let out = String::from_utf8(presenter.into_inner().unwrap()).unwrap();
        let lines = out.lines().collect::<Vec<_>>();
        assert_eq!(
            lines,
            [
                "route,role,visits,cost,seq,x,y",
                "0,visited,1,10.0,0,0.0,0.0",
                "0,visited,1,10.0,1,1.0,1.0",
                "1,best,2,20.0,0,0.0,0.0",
                "1,best,2,20.0,1,2.0,0.5",
                "2,candidate,0,30.0,0,5.0,5.0",
            ]
        );
    }
}
