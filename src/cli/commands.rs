use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sb", about = concat!("storyboard v", env!("CARGO_PKG_VERSION"), " - video ideas, one screen"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different board directory
    #[arg(short = 'C', long = "board-dir", global = true)]
    pub board_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a storyboard/ directory here
    Init(InitArgs),
    /// List ideas, newest first
    List(ListArgs),
    /// Show one idea in full
    Show(ShowArgs),
    /// Add a new idea to the top of the list
    Add(AddArgs),
    /// Change an idea's status
    Status(StatusArgs),
    /// Permanently delete an idea
    Delete(DeleteArgs),
    /// Show or edit channel stats
    Stats(StatsCmd),
    /// View or manage the recovery log
    Recovery(RecoveryCmd),
}

#[derive(Args)]
pub struct InitArgs {
    /// Board name (default: inferred from directory name)
    #[arg(long)]
    pub name: Option<String>,
    /// Overwrite an existing board.toml (stored ideas are kept)
    #[arg(long)]
    pub force: bool,
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// Status filter: all, idea, scripting, filming, editing, scheduled, published
    #[arg(long, default_value = "all")]
    pub status: String,
    /// Category filter: all, training, race, gear, tips, vlog, other
    #[arg(long, default_value = "all")]
    pub category: String,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Idea ID
    pub id: String,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Idea title
    pub title: String,
    /// Details, script notes, etc.
    #[arg(long, short)]
    pub description: Option<String>,
    /// training, race, gear, tips, vlog, other (default from board.toml)
    #[arg(long, short)]
    pub category: Option<String>,
    /// high, medium, low (default from board.toml)
    #[arg(long, short)]
    pub priority: Option<String>,
    /// Initial status (default: idea)
    #[arg(long, short)]
    pub status: Option<String>,
}

#[derive(Args)]
pub struct StatusArgs {
    /// Idea ID
    pub id: String,
    /// New status: idea, scripting, filming, editing, scheduled, published
    pub status: String,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Idea ID
    pub id: String,
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct StatsCmd {
    #[command(subcommand)]
    pub action: Option<StatsAction>,
}

#[derive(Subcommand)]
pub enum StatsAction {
    /// Set one stats field
    Set(StatsSetArgs),
}

#[derive(Args)]
pub struct StatsSetArgs {
    /// weekly-miles, total-videos, subscribers, avg-views
    pub field: String,
    /// New value (numeric fields treat garbage as 0)
    pub value: String,
}

// ---------------------------------------------------------------------------
// Recovery log
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct RecoveryCmd {
    #[command(subcommand)]
    pub action: Option<RecoveryAction>,
    /// Maximum number of entries to show
    #[arg(long, default_value = "10")]
    pub limit: usize,
}

#[derive(Subcommand)]
pub enum RecoveryAction {
    /// Remove old entries
    Prune(RecoveryPruneArgs),
    /// Print the absolute path to the recovery log
    Path,
}

#[derive(Args)]
pub struct RecoveryPruneArgs {
    /// Remove entries older than this timestamp (default: 30 days ago)
    #[arg(long)]
    pub before: Option<String>,
    /// Remove all entries
    #[arg(long)]
    pub all: bool,
}
