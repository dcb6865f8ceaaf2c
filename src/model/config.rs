use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::idea::{Category, Draft, Priority};

/// Configuration from board.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    pub board: BoardInfo,
    #[serde(default)]
    pub form: FormConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardInfo {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    /// Clear the draft when the form is cancelled (default keeps it for resuming)
    #[serde(default)]
    pub reset_on_cancel: bool,
    #[serde(default = "default_category")]
    pub default_category: Category,
    #[serde(default = "default_priority")]
    pub default_priority: Priority,
}

impl Default for FormConfig {
    fn default() -> Self {
        FormConfig {
            reset_on_cancel: false,
            default_category: default_category(),
            default_priority: default_priority(),
        }
    }
}

impl FormConfig {
    /// A fresh draft with this config's defaults
    pub fn empty_draft(&self) -> Draft {
        Draft::new(self.default_category, self.default_priority)
    }
}

fn default_category() -> Category {
    Category::Training
}

fn default_priority() -> Priority {
    Priority::Medium
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// Hex color overrides keyed by theme slot (e.g. `highlight = "#FB4196"`)
    #[serde(default)]
    pub colors: HashMap<String, String>,
}
