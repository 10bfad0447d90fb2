use crate::route::{Route, Waypoint};

/// Canvas size the paths are laid out on, `(width, height)`
pub const CANVAS: (f64, f64) = (900.0, 400.0);

/// Where every path starts and where the target sits
pub const START: Waypoint = (60.0, 300.0);
pub const TARGET: Waypoint = (855.0, 75.0);

/// Index of the path designated optimal in [`canvas_paths`]
pub const OPTIMAL: usize = 4;

/// Seven hand-drawn paths across a 900x400 canvas, y growing downwards
///
/// Intended for use with [`FixedTopology`](crate::env::FixedTopology); path 4 is the
/// designated optimal one. Costs are polyline lengths.
pub fn canvas_paths() -> Vec<Route> {
    #[rustfmt::skip]
    let paths: [&[Waypoint]; 7] = [
        &[(60.0, 300.0), (150.0, 300.0), (250.0, 220.0), (400.0, 220.0), (600.0, 180.0), (830.0, 75.0)],
        &[(60.0, 300.0), (170.0, 270.0), (270.0, 250.0), (450.0, 200.0), (700.0, 140.0), (830.0, 75.0)],
        &[(60.0, 300.0), (190.0, 290.0), (310.0, 230.0), (500.0, 210.0), (750.0, 160.0), (830.0, 75.0)],
        &[(60.0, 300.0), (210.0, 310.0), (370.0, 260.0), (550.0, 200.0), (800.0, 130.0), (830.0, 75.0)],
        &[(60.0, 300.0), (230.0, 320.0), (450.0, 270.0), (700.0, 210.0), (830.0, 75.0)],
        &[(60.0, 300.0), (250.0, 330.0), (500.0, 300.0), (750.0, 220.0), (830.0, 75.0)],
        &[(60.0, 300.0), (270.0, 310.0), (550.0, 250.0), (830.0, 100.0)],
    ];

    paths
        .iter()
        .enumerate()
        .map(|(i, p)| Route::from_waypoints(i, p.to_vec()))
        .collect()
}
