pub mod log;
pub mod plot;
pub mod routes;

use crossterm::event::KeyCode;
pub use log::Logs;
pub use plot::Plots;
use ratatui::widgets::WidgetRef;
pub use routes::RouteMap;

pub trait Component: WidgetRef {
    /// **Returns** whether the key was consumed
    fn handle_key(&mut self, key: KeyCode) -> bool;
}
