use std::{
    io,
    sync::mpsc::{self, Sender},
    thread::{self, JoinHandle},
};

use crate::{
    error::{Error, Result},
    present::Presenter,
    route::Route,
};

pub use app::App;

mod app;
mod components;
mod tui;

/// Format for updating plot data
pub struct Update {
    pub episode: u32,
    /// One value per plot, in the order the plots were named
    pub data: Vec<f64>,
}

pub enum Message {
    Episode(Update),
    /// Training finished; highlight `route` and animate along it
    Best {
        route: usize,
        visited: Option<Vec<usize>>,
    },
}

/// Start the terminal dashboard on its own thread
///
/// Installs [`tui_logger`] as the `log` backend so records show up in the logs tab.
/// Set `flip_y` when waypoints are screen coordinates.
///
/// **Returns** the render thread handle and the sender feeding it
pub fn init(
    routes: Vec<Route>,
    flip_y: bool,
    plots: &[&'static str],
    episodes: u32,
) -> (JoinHandle<io::Result<()>>, Sender<Message>) {
    // a host application may already own the logger
    if tui_logger::init_logger(log::LevelFilter::Trace).is_ok() {
        tui_logger::set_default_level(log::LevelFilter::Debug);
    }

    let (tx, rx) = mpsc::channel();
    let mut app = App::new(routes, flip_y, plots, episodes);
    let handle = thread::spawn(move || app.run(rx));
    (handle, tx)
}

/// Hands the training result to the dashboard started by [`init`]
pub struct CanvasPresenter {
    tx: Sender<Message>,
}

impl CanvasPresenter {
    pub fn new(tx: Sender<Message>) -> Self {
        Self { tx }
    }
}

impl Presenter for CanvasPresenter {
    fn on_best_route(&mut self, route: usize, visited: Option<&[usize]>) -> Result<()> {
        self.tx
            .send(Message::Best {
                route,
                visited: visited.map(<[usize]>::to_vec),
            })
            .map_err(|_| {
                Error::Io(io::Error::new(
                    io::ErrorKind::BrokenPipe,
                    "dashboard is no longer running",
                ))
            })
    }
}
