use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "minddoer", version, about = "MindDoer daily planner")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan the day from command-line flags
    Plan(commands::plan::PlanArgs),
    /// Plan the day interactively, then manage the task list
    Session,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Goal memory management
    Goals {
        #[command(subcommand)]
        action: commands::goals::GoalsAction,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Plan(args) => commands::plan::run(args),
        Commands::Session => commands::session::run(),
        Commands::Config { action } => commands::config::run(action),
        Commands::Goals { action } => commands::goals::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };

    let filter = tracing_subscriber::EnvFilter::try_from_env("MINDDOER_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
