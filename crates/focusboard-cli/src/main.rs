use clap::{Parser, Subcommand};

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "focusboard", version, about = "Focusboard CLI")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Habit tracking
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Quick capture notes
    Note {
        #[command(subcommand)]
        action: commands::note::NoteAction,
    },
    /// Pomodoro timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Dashboard summary
    Stats,
    /// Light/dark theme preference
    Theme {
        #[command(subcommand)]
        action: commands::theme::ThemeAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Task { action } => commands::task::run(action),
        Commands::Habit { action } => commands::habit::run(action),
        Commands::Note { action } => commands::note::run(action),
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Stats => commands::stats::run(),
        Commands::Theme { action } => commands::theme::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
