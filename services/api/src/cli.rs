use crate::commands::{run_radar, run_score, run_stats, RadarArgs, ScoreArgs, StatsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use fitness_ladder::config::AppConfig;
use fitness_ladder::error::AppError;
use fitness_ladder::telemetry::{self, LogSink};

#[derive(Parser, Debug)]
#[command(
    name = "Fitness Ladder",
    about = "Score fitness assessments and serve the ladder scoring API",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Compute a ladder score from category scores
    Score(ScoreArgs),
    /// Project category scores onto the radar chart
    Radar(RadarArgs),
    /// Summarize an exported assessment history
    Stats(StatsArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => {
            init_cli_telemetry()?;
            run_score(args)
        }
        Command::Radar(args) => {
            init_cli_telemetry()?;
            run_radar(args)
        }
        Command::Stats(args) => {
            init_cli_telemetry()?;
            run_stats(args)
        }
    }
}

fn init_cli_telemetry() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init_with(&config.telemetry, LogSink::Stderr)?;
    Ok(())
}
