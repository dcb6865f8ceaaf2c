use std::fs;
use std::path::{Path, PathBuf};

use crate::io::repository::KvRepository;
use crate::io::store::FileStore;
use crate::model::board::Board;
use crate::model::config::BoardConfig;

/// Name of the board directory inside a project root
pub const BOARD_DIR: &str = "storyboard";

/// Error type for board I/O operations
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("not a storyboard: no storyboard/board.toml found (run `sb init`)")]
    NotABoard,
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse board.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Walk up from `start` looking for `storyboard/board.toml`
pub fn discover_board(start: &Path) -> Result<PathBuf, BoardError> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(BOARD_DIR).join("board.toml").is_file() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(BoardError::NotABoard);
        }
    }
}

/// Load the board config rooted at `root`
pub fn load_board(root: &Path) -> Result<Board, BoardError> {
    let board_dir = root.join(BOARD_DIR);
    if !board_dir.is_dir() {
        return Err(BoardError::NotABoard);
    }

    let config_path = board_dir.join("board.toml");
    let config_text = fs::read_to_string(&config_path).map_err(|e| BoardError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;
    let config: BoardConfig = toml::from_str(&config_text)?;

    Ok(Board {
        root: root.to_path_buf(),
        board_dir,
        config,
    })
}

/// Discover and load in one step
pub fn find_board(start: &Path) -> Result<Board, BoardError> {
    let root = discover_board(start)?;
    load_board(&root)
}

/// The file-backed repository for a board, logging to its recovery log
pub fn open_repository(board: &Board) -> KvRepository<FileStore> {
    KvRepository::new(FileStore::new(board.store_dir())).with_recovery_log(&board.board_dir)
}
