use crate::error::Result;

mod csv_export;
mod log_presenter;

pub use csv_export::CsvPresenter;
pub use log_presenter::LogPresenter;

/// Receives the result of a training run
///
/// Called once, after the last episode, so drawing, animation or file export never
/// interleaves with training.
pub trait Presenter {
    /// `visited` lists the routes explored during training, in order, when known
    fn on_best_route(&mut self, route: usize, visited: Option<&[usize]>) -> Result<()>;
}

/// Visit count per route index
pub(crate) fn visit_counts(routes: usize, visited: &[usize]) -> Vec<usize> {
    let mut counts = vec![0; routes];
    for &r in visited {
        if let Some(c) = counts.get_mut(r) {
            *c += 1;
        }
    }
    counts
}
