use std::{
    io,
    sync::mpsc::{Receiver, TryRecvError},
    time::Duration,
};

use crossterm::event::{self, KeyCode};
use ratatui::{prelude::*, widgets::*};

use crate::route::Route;

use super::{
    components::{Component, Logs, Plots, RouteMap},
    tui, Message,
};

const TABS: [&str; 3] = ["Routes", "Plots", "Logs"];

#[derive(Default, PartialEq)]
enum State {
    #[default]
    Train,
    /// The training side hung up; keep showing the result until the user quits
    Done,
    Quit,
}

/// The root TUI component which holds the main app state and runs the render loop
pub struct App {
    state: State,
    episode: u32,
    total_episodes: u32,
    selected_tab: usize,
    routes: RouteMap,
    plots: Plots,
    logs: Logs,
}

impl App {
    pub fn new(routes: Vec<Route>, flip_y: bool, plots: &[&'static str], episodes: u32) -> Self {
        Self {
            state: State::default(),
            episode: 0,
            total_episodes: episodes,
            selected_tab: 0,
            routes: RouteMap::new(routes, flip_y),
            plots: Plots::new(plots, episodes),
            logs: Logs::new(),
        }
    }

    fn receive(&mut self, rx: &Receiver<Message>) {
        loop {
            match rx.try_recv() {
                Ok(Message::Episode(update)) => {
                    self.episode = update.episode + 1;
                    self.plots.update(update);
                }
                Ok(Message::Best { route, visited }) => {
                    self.routes.set_best(route, visited);
                    self.selected_tab = 0;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.state = State::Done;
                    break;
                }
            }
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') => self.state = State::Quit,
            KeyCode::Tab => self.selected_tab = (self.selected_tab + 1) % TABS.len(),
            _ => {
                let component: &mut dyn Component = match self.selected_tab {
                    0 => &mut self.routes,
                    1 => &mut self.plots,
                    _ => &mut self.logs,
                };
                component.handle_key(key);
            }
        }
    }

    /// Initialize the terminal and run the main loop
    ///
    /// Restores the terminal on exit
    pub fn run(&mut self, rx: Receiver<Message>) -> io::Result<()> {
        let mut terminal = tui::init()?;

        while self.state != State::Quit {
            if self.state == State::Train {
                self.receive(&rx);
            }
            self.routes.tick();

            terminal.draw(|frame| frame.render_widget(&*self, frame.size()))?;

            if event::poll(Duration::from_millis(16))? {
                if let Some(key) = tui::pressed(&event::read()?) {
                    self.handle_key(key);
                }
            }
        }

        tui::restore()
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [menu_area, main_area, progress_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .areas(area);

        Tabs::new(TABS)
            .block(Block::default().padding(Padding::uniform(1)))
            .white()
            .bold()
            .highlight_style(Style::default().light_green())
            .select(self.selected_tab)
            .render(menu_area, buf);

        match self.selected_tab {
            0 => self.routes.render_ref(main_area, buf),
            1 => self.plots.render_ref(main_area, buf),
            _ => self.logs.render_ref(main_area, buf),
        }

        let ratio = if self.total_episodes == 0 {
            0.0
        } else {
            (self.episode as f64 / self.total_episodes as f64).min(1.0)
        };
        Gauge::default()
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .title(format!("Episode {}/{}", self.episode, self.total_episodes)),
            )
            .gauge_style(Style::default().fg(Color::Cyan))
            .ratio(ratio)
            .render(progress_area, buf);
    }
}
