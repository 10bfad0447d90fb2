pub mod canvas;
pub mod jittered;

pub use canvas::canvas_paths;
pub use jittered::Jittered;
