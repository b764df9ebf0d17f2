mod commands;
mod logging;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "flowsim",
    version,
    about = "Simulated ELT pipeline runner with live progress broadcast"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulated pipeline against a catalog dataset
    Run {
        /// Dataset id (see `flowsim datasets`)
        dataset: String,
        /// Nominal duration of each step, in milliseconds
        #[arg(long)]
        step_millis: Option<u64>,
        /// Free-form execution config as a JSON object
        #[arg(long)]
        config: Option<String>,
    },
    /// List the built-in dataset catalog
    Datasets,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init(&cli.log_level);

    match cli.command {
        Commands::Run {
            dataset,
            step_millis,
            config,
        } => commands::run::execute(&dataset, step_millis, config.as_deref()).await,
        Commands::Datasets => commands::datasets::execute(),
    }
}
