use std::fs;
use std::path::Path;

use crate::cli::commands::InitArgs;
use crate::io::board_io::{self, BOARD_DIR};

const BOARD_TOML_TEMPLATE: &str = r##"[board]
name = "{name}"

# --- New idea form ---
# Defaults for a fresh draft, and whether Esc throws the draft away.

[form]
reset_on_cancel = false
default_category = "training"   # training, race, gear, tips, vlog, other
default_priority = "medium"     # high, medium, low

# --- UI Customization ---
# Uncomment and edit to override defaults.
#
# [ui.colors]
# background = "#0C001B"
# text = "#A09BFE"
# text_bright = "#FFFFFF"
# highlight = "#FB4196"
# dim = "#5A5580"
# red = "#FF4444"
# yellow = "#FFD700"
# green = "#44FF88"
# cyan = "#44DDFF"
"##;

/// Infer a board name from a directory name: replace hyphens with spaces, title-case.
fn infer_name(dir_name: &str) -> String {
    dir_name
        .split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => {
                    let upper: String = c.to_uppercase().collect();
                    upper + chars.as_str()
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_board_toml(name: &str) -> String {
    let escaped = name.replace('\\', "\\\\").replace('"', "\\\"");
    BOARD_TOML_TEMPLATE.replace("{name}", &escaped)
}

pub fn cmd_init(args: InitArgs, dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let board_dir = dir.join(BOARD_DIR);
    let config_path = board_dir.join("board.toml");

    if config_path.is_file() && !args.force {
        return Err(format!(
            "storyboard already exists in {}/ (use --force to rewrite board.toml)",
            board_dir.display()
        )
        .into());
    }

    if let Some(parent) = dir.parent()
        && let Ok(parent_root) = board_io::discover_board(parent)
    {
        eprintln!(
            "note: parent board found at {}/",
            parent_root.join(BOARD_DIR).display()
        );
    }

    let name = args.name.unwrap_or_else(|| {
        dir.file_name()
            .and_then(|n| n.to_str())
            .map(infer_name)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "Untitled".to_string())
    });

    fs::create_dir_all(board_dir.join("store"))?;
    fs::write(&config_path, render_board_toml(&name))?;

    println!("Initialized storyboard: {}", name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::BoardConfig;
    use tempfile::TempDir;

    fn init_args(name: Option<&str>, force: bool) -> InitArgs {
        InitArgs {
            name: name.map(String::from),
            force,
        }
    }

    #[test]
    fn test_infer_name() {
        assert_eq!(infer_name("marathon-channel"), "Marathon Channel");
        assert_eq!(infer_name("runs"), "Runs");
        assert_eq!(infer_name("trail_vlog"), "Trail Vlog");
    }

    #[test]
    fn template_parses_as_config() {
        let config: BoardConfig = toml::from_str(&render_board_toml("Say \"hi\"")).unwrap();
        assert_eq!(config.board.name, "Say \"hi\"");
        assert!(!config.form.reset_on_cancel);
    }

    #[test]
    fn init_creates_board_and_store() {
        let tmp = TempDir::new().unwrap();
        cmd_init(init_args(Some("Runs"), false), tmp.path()).unwrap();
        assert!(tmp.path().join("storyboard/board.toml").is_file());
        assert!(tmp.path().join("storyboard/store").is_dir());

        let board = board_io::load_board(tmp.path()).unwrap();
        assert_eq!(board.config.board.name, "Runs");
    }

    #[test]
    fn init_twice_needs_force() {
        let tmp = TempDir::new().unwrap();
        cmd_init(init_args(Some("Runs"), false), tmp.path()).unwrap();
        fs::write(tmp.path().join("storyboard/store/videoIdeas.json"), "[]").unwrap();

        assert!(cmd_init(init_args(Some("Again"), false), tmp.path()).is_err());
        cmd_init(init_args(Some("Again"), true), tmp.path()).unwrap();

        let board = board_io::load_board(tmp.path()).unwrap();
        assert_eq!(board.config.board.name, "Again");
        assert!(tmp.path().join("storyboard/store/videoIdeas.json").exists());
    }
}
