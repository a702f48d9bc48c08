use crate::demo::{run_demo, run_evaluate, DemoArgs, EvaluateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use revela::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Revela",
    about = "Run the Revela athlete progress service or score profiles from the command line",
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
    /// Score athlete profiles against the trust pyramid
    Progress {
        #[command(subcommand)]
        command: ProgressCommand,
    },
    /// Walk a demo athlete through profile setup, tests, and check-ins
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ProgressCommand {
    /// Evaluate a profile JSON file and print the pyramid breakdown
    Evaluate(EvaluateArgs),
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
        Command::Progress {
            command: ProgressCommand::Evaluate(args),
        } => run_evaluate(args),
        Command::Demo(args) => run_demo(args),
    }
}
