use crossterm::event::KeyCode;
use ratatui::{prelude::*, widgets::*};

use crate::viz::Update;

use super::Component;

/// Scatter plot of one per-episode metric
pub struct Plot {
    title: String,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    data: Vec<(f64, f64)>,
}

impl Plot {
    pub fn new(title: &str, episodes: u32) -> Self {
        Self {
            title: String::from(title),
            x_bounds: [0.0, episodes.into()],
            y_bounds: [f64::MAX, f64::MIN],
            data: Vec::new(),
        }
    }

    pub fn push(&mut self, point: (f64, f64)) {
        let (x, y) = point;
        self.x_bounds = [self.x_bounds[0].min(x), self.x_bounds[1].max(x)];
        self.y_bounds = [self.y_bounds[0].min(y), self.y_bounds[1].max(y)];
        self.data.push(point);
    }

    fn labels(bounds: [f64; 2]) -> Vec<Span<'static>> {
        bounds.iter().map(|v| format!("{v:.1}").bold()).collect()
    }
}

impl Widget for &Plot {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dataset = Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Scatter)
            .cyan()
            .data(&self.data);

        // nothing to scale against until the first point arrives
        let y_bounds = if self.data.is_empty() {
            [0.0, 1.0]
        } else {
            self.y_bounds
        };

        let chart = Chart::new(vec![dataset])
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .title(self.title.as_str())
                    .padding(Padding::uniform(1)),
            )
            .x_axis(
                Axis::default()
                    .title("Episode")
                    .dark_gray()
                    .labels(Plot::labels(self.x_bounds))
                    .bounds(self.x_bounds),
            )
            .y_axis(
                Axis::default()
                    .title(self.title.as_str())
                    .dark_gray()
                    .labels(Plot::labels(y_bounds))
                    .bounds(y_bounds),
            );

        chart.render(area, buf);
    }
}

/// One [`Plot`] per metric, one shown at a time
pub struct Plots {
    plots: Vec<Plot>,
    selected: usize,
}

impl Plots {
    pub fn new(names: &[&'static str], episodes: u32) -> Self {
        Self {
            plots: names.iter().map(|n| Plot::new(n, episodes)).collect(),
            selected: 0,
        }
    }

    pub fn update(&mut self, update: Update) {
        let Update { episode, data } = update;
        for (plot, metric) in self.plots.iter_mut().zip(data) {
            plot.push((episode.into(), metric));
        }
    }
}

impl WidgetRef for Plots {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        if let Some(plot) = self.plots.get(self.selected) {
            plot.render(area, buf);
        }
    }
}

impl Component for Plots {
    fn handle_key(&mut self, key: KeyCode) -> bool {
        let len = self.plots.len();
        if len == 0 {
            return false;
        }
        match key {
            KeyCode::Right => self.selected = (self.selected + 1) % len,
            KeyCode::Left => self.selected = (self.selected + len - 1) % len,
            _ => return false,
        }
        true
    }
}
