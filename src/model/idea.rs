use serde::{Deserialize, Serialize};

use crate::util::cycle;

/// What kind of video an idea is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Training,
    Race,
    Gear,
    Tips,
    Vlog,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Training,
        Category::Race,
        Category::Gear,
        Category::Tips,
        Category::Vlog,
        Category::Other,
    ];

    /// The literal stored in the idea list and accepted on the command line
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Training => "training",
            Category::Race => "race",
            Category::Gear => "gear",
            Category::Tips => "tips",
            Category::Vlog => "vlog",
            Category::Other => "other",
        }
    }

    /// Human label used by the TUI selectors
    pub fn label(self) -> &'static str {
        match self {
            Category::Training => "Training",
            Category::Race => "Race",
            Category::Gear => "Gear Review",
            Category::Tips => "Tips & Advice",
            Category::Vlog => "Vlog",
            Category::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How soon an idea should be made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == s)
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Production status of an idea.
///
/// Transitions are unrestricted: any status can be set from any other, and
/// `Published` is not terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Idea,
    Scripting,
    Filming,
    Editing,
    Scheduled,
    Published,
}

impl Status {
    pub const ALL: [Status; 6] = [
        Status::Idea,
        Status::Scripting,
        Status::Filming,
        Status::Editing,
        Status::Scheduled,
        Status::Published,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Idea => "idea",
            Status::Scripting => "scripting",
            Status::Filming => "filming",
            Status::Editing => "editing",
            Status::Scheduled => "scheduled",
            Status::Published => "published",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::Idea => "Idea",
            Status::Scripting => "Scripting",
            Status::Filming => "Filming",
            Status::Editing => "Editing",
            Status::Scheduled => "Scheduled",
            Status::Published => "Published",
        }
    }

    /// The status after this one in production order, wrapping to `Idea`
    pub fn next(self) -> Status {
        cycle::step(&Self::ALL, self, true)
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|st| st.as_str() == s)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single video idea as it is stored in the idea list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    /// Opaque unique identifier, assigned at creation
    pub id: String,
    pub title: String,
    /// Free text, empty when not given
    #[serde(default)]
    pub description: String,
    pub category: Category,
    pub priority: Priority,
    pub status: Status,
    /// ISO-8601 creation time; never rewritten after creation
    pub created_at: String,
}

/// Uncommitted fields of the "new idea" form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub priority: Priority,
    pub status: Status,
}

impl Draft {
    /// An empty draft with the given default category and priority
    pub fn new(category: Category, priority: Priority) -> Self {
        Draft {
            title: String::new(),
            description: String::new(),
            category,
            priority,
            status: Status::Idea,
        }
    }
}

impl Default for Draft {
    fn default() -> Self {
        Draft::new(Category::Training, Priority::Medium)
    }
}
