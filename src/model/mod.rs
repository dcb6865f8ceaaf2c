pub mod board;
pub mod config;
pub mod idea;
pub mod stats;

pub use board::*;
pub use config::*;
pub use idea::*;
pub use stats::*;
