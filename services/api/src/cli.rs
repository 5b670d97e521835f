use crate::demo::{run_demo, run_quote, DemoArgs, QuoteArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use origination_ai::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Agentic Lending Orchestrator",
    about = "Demonstrate and run the Agentic Lending Orchestrator from the command line",
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
    /// Price a loan request without starting the full wizard
    Quote(QuoteArgs),
    /// Run an end-to-end CLI demo of the origination wizard
    Demo(DemoArgs),
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
        Command::Quote(args) => run_quote(args),
        Command::Demo(args) => run_demo(args),
    }
}
