use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Persisted TUI state (written to .state.json)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiState {
    /// Status selector (`all` or a status literal)
    #[serde(default)]
    pub status_filter: String,
    /// Category selector (`all` or a category literal)
    #[serde(default)]
    pub category_filter: String,
    /// Id of the idea under the cursor
    #[serde(default)]
    pub selected: Option<String>,
}

/// Read .state.json from the board directory
pub fn read_ui_state(board_dir: &Path) -> Option<UiState> {
    let content = fs::read_to_string(board_dir.join(".state.json")).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write .state.json to the board directory
pub fn write_ui_state(board_dir: &Path, state: &UiState) -> Result<(), std::io::Error> {
    let content = serde_json::to_string_pretty(state)?;
    fs::write(board_dir.join(".state.json"), content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_and_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let state = UiState {
            status_filter: "filming".into(),
            category_filter: "race".into(),
            selected: Some("1715688000000".into()),
        };
        write_ui_state(dir.path(), &state).unwrap();
        let loaded = read_ui_state(dir.path()).unwrap();
        assert_eq!(loaded.status_filter, "filming");
        assert_eq!(loaded.category_filter, "race");
        assert_eq!(loaded.selected.as_deref(), Some("1715688000000"));
    }

    #[test]
    fn read_missing_file_returns_none() {
        let dir = TempDir::new().unwrap();
        assert!(read_ui_state(dir.path()).is_none());
    }

    #[test]
    fn read_malformed_json_returns_none() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".state.json"), "not json {{{").unwrap();
        assert!(read_ui_state(dir.path()).is_none());
    }

    #[test]
    fn serde_defaults_on_empty_object() {
        let state: UiState = serde_json::from_str("{}").unwrap();
        assert_eq!(state.status_filter, "");
        assert!(state.selected.is_none());
    }
}
