use std::path::PathBuf;

use super::config::BoardConfig;

/// A discovered storyboard directory and its parsed config
#[derive(Debug, Clone)]
pub struct Board {
    /// Root directory of the board (parent of `storyboard/`)
    pub root: PathBuf,
    /// Path to the `storyboard/` directory
    pub board_dir: PathBuf,
    /// Parsed board.toml
    pub config: BoardConfig,
}

impl Board {
    /// Directory holding one JSON file per storage key
    pub fn store_dir(&self) -> PathBuf {
        self.board_dir.join("store")
    }
}
