use std::time::{Duration, Instant};

use crossterm::event::KeyCode;
use ratatui::{
    prelude::*,
    widgets::{
        canvas::{self, Canvas},
        Block, BorderType, WidgetRef,
    },
};

use crate::route::{Route, Waypoint};

use super::Component;

/// Time the marker spends on each waypoint
const STEP: Duration = Duration::from_millis(100);

const PALETTE: [Color; 7] = [
    Color::Blue,
    Color::Magenta,
    Color::Red,
    Color::Green,
    Color::LightRed,
    Color::LightMagenta,
    Color::Cyan,
];

struct Cursor {
    waypoint: usize,
    moved_at: Instant,
}

/// Every candidate route drawn on a canvas, with a marker driven along the best one
pub struct RouteMap {
    routes: Vec<Route>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    flip_y: bool,
    best: Option<usize>,
    visited: Vec<bool>,
    marker: Option<Cursor>,
}

impl RouteMap {
    /// `flip_y` for screen coordinates, where y grows downwards
    pub fn new(routes: Vec<Route>, flip_y: bool) -> Self {
        let (x_bounds, y_bounds) = bounds(&routes);
        Self {
            visited: vec![false; routes.len()],
            routes,
            x_bounds,
            y_bounds,
            flip_y,
            best: None,
            marker: None,
        }
    }

    /// Highlight `route` and start the marker at its first waypoint
    pub fn set_best(&mut self, route: usize, visited: Option<Vec<usize>>) {
        for r in visited.into_iter().flatten() {
            if let Some(v) = self.visited.get_mut(r) {
                *v = true;
            }
        }
        self.best = Some(route);
        self.marker = Some(Cursor {
            waypoint: 0,
            moved_at: Instant::now(),
        });
    }

    /// Advance the marker once [`STEP`] has elapsed; it rests on the final waypoint
    pub fn tick(&mut self) {
        let len = self
            .best
            .and_then(|b| self.routes.get(b))
            .map_or(0, Route::len);
        if let Some(marker) = &mut self.marker {
            if marker.waypoint + 1 < len && marker.moved_at.elapsed() >= STEP {
                marker.waypoint += 1;
                marker.moved_at = Instant::now();
            }
        }
    }

    fn project(&self, (x, y): Waypoint) -> Waypoint {
        if self.flip_y {
            (x, self.y_bounds[0] + self.y_bounds[1] - y)
        } else {
            (x, y)
        }
    }

    fn color(&self, route: usize) -> Color {
        match self.best {
            None => PALETTE[route % PALETTE.len()],
            Some(b) if b == route => Color::Yellow,
            Some(_) if self.visited[route] => Color::LightRed,
            Some(_) => Color::DarkGray,
        }
    }

    fn marker_position(&self) -> Option<Waypoint> {
        let marker = self.marker.as_ref()?;
        let route = self.routes.get(self.best?)?;
        route.waypoints.get(marker.waypoint).map(|&w| self.project(w))
    }

    fn draw_route(&self, ctx: &mut canvas::Context, route: &Route) {
        let color = self.color(route.index);
        for segment in route.waypoints.windows(2) {
            let ((x1, y1), (x2, y2)) = (self.project(segment[0]), self.project(segment[1]));
            ctx.draw(&canvas::Line {
                x1,
                y1,
                x2,
                y2,
                color,
            });
        }
    }
}

/// Bounding box of every waypoint, padded by 5% on each side
fn bounds(routes: &[Route]) -> ([f64; 2], [f64; 2]) {
    let mut x = [f64::MAX, f64::MIN];
    let mut y = [f64::MAX, f64::MIN];
    for &(px, py) in routes.iter().flat_map(|r| &r.waypoints) {
        x = [x[0].min(px), x[1].max(px)];
        y = [y[0].min(py), y[1].max(py)];
    }
    if x[0] > x[1] {
        return ([0.0, 1.0], [0.0, 1.0]);
    }

    let pad = |[lo, hi]: [f64; 2]| {
        let margin = ((hi - lo) * 0.05).max(f64::EPSILON);
        [lo - margin, hi + margin]
    };
    (pad(x), pad(y))
}

impl WidgetRef for RouteMap {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let title = match self.best {
            Some(b) => format!("Routes (best: route {b})"),
            None => String::from("Routes (training)"),
        };
        let marker_size = [
            (self.x_bounds[1] - self.x_bounds[0]) * 0.02,
            (self.y_bounds[1] - self.y_bounds[0]) * 0.04,
        ];

        Canvas::default()
            .block(Block::bordered().border_type(BorderType::Rounded).title(title))
            .marker(symbols::Marker::Braille)
            .x_bounds(self.x_bounds)
            .y_bounds(self.y_bounds)
            .paint(|ctx| {
                for route in &self.routes {
                    if Some(route.index) != self.best {
                        self.draw_route(ctx, route);
                    }
                }
                for route in &self.routes {
                    if let Some(&start) = route.waypoints.first() {
                        let (x, y) = self.project(start);
                        let label = format!("{}", route.index);
                        let offset = marker_size[0] * (1.0 + route.index as f64);
                        let style = Style::default().fg(self.color(route.index));
                        ctx.print(x + offset, y, Span::styled(label, style));
                    }
                }

                ctx.layer();
                if let Some(best) = self.best.and_then(|b| self.routes.get(b)) {
                    self.draw_route(ctx, best);
                    if let Some(&end) = best.waypoints.last() {
                        let (x, y) = self.project(end);
                        ctx.print(x, y, "Target".yellow());
                    }
                }
                if let Some((x, y)) = self.marker_position() {
                    ctx.draw(&canvas::Rectangle {
                        x: x - marker_size[0] / 2.0,
                        y: y - marker_size[1] / 2.0,
                        width: marker_size[0],
                        height: marker_size[1],
                        color: Color::LightGreen,
                    });
                }
            })
            .render(area, buf);
    }
}

impl Component for RouteMap {
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            // replay the animation
            KeyCode::Char('r') if self.best.is_some() => {
                self.marker = Some(Cursor {
                    waypoint: 0,
                    moved_at: Instant::now(),
                });
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gym::canvas_paths;

    #[test]
    fn bounds_cover_waypoints() {
        let (x, y) = bounds(&canvas_paths());
        assert!(x[0] < 60.0 && x[1] > 830.0);
        assert!(y[0] < 75.0 && y[1] > 330.0);
        assert_eq!(bounds(&[]), ([0.0, 1.0], [0.0, 1.0]));
    }

    #[test]
    fn marker_walks_best_route() {
        let mut map = RouteMap::new(canvas_paths(), true);
        map.tick();
        assert_eq!(map.marker_position(), None);

        map.set_best(6, Some(vec![0, 6]));
        assert_eq!(map.color(6), Color::Yellow);
        assert_eq!(map.color(0), Color::LightRed);
        assert_eq!(map.color(3), Color::DarkGray);

        for _ in 0..10 {
            if let Some(marker) = &mut map.marker {
                marker.moved_at -= STEP;
            }
            map.tick();
        }
        let last = *canvas_paths()[6].waypoints.last().unwrap();
        assert_eq!(map.marker_position(), Some(map.project(last)));
    }
}
