use clap::Parser;
use storyboard::cli::commands::Cli;
use storyboard::cli::handlers;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        // No subcommand → launch TUI
        None => storyboard::tui::run(cli.board_dir.as_deref()),
        Some(_) => handlers::dispatch(cli),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
