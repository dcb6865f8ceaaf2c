pub mod board_io;
pub mod lock;
pub mod recovery;
pub mod repository;
pub mod state;
pub mod store;
pub mod watcher;
