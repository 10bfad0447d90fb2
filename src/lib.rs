/// Q-learning trainer and its value table
pub mod algo;

/// Implementations of strategies for time-decaying hyperparameters
pub mod decay;

/// Reward sources the trainer learns from
pub mod env;

/// Error types
pub mod error;

/// Exploration policies
pub mod exploration;

/// Built-in route sets for experiments and demos
pub mod gym;

/// Presentation of training results
pub mod present;

/// Route supply
pub mod provider;

/// Per-episode metrics
pub mod report;

/// Candidate routes
pub mod route;

/// Episode transitions
pub mod trace;

/// Terminal dashboard
#[cfg(feature = "viz")]
pub mod viz;

mod util;

pub use error::{Error, Result};
