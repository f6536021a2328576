use crate::commands::{
    run_deadlines, run_diagnose, run_risk, run_states_list, run_states_show, DeadlineArgs,
    DiagnoseArgs, OutputArgs, RiskArgs, ShowStateArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use deposit_ready::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "deposit-ready",
    about = "Security deposit deadlines, dispute diagnosis, and landlord risk",
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
    /// Browse the per-state deposit rules
    States {
        #[command(subcommand)]
        command: StatesCommand,
    },
    /// Compute return and itemization deadlines for a move-out
    Deadlines(DeadlineArgs),
    /// Diagnose a tenant's deposit dispute
    Diagnose(DiagnoseArgs),
    /// Assess a landlord's exposure after a demand letter
    Risk(RiskArgs),
}

#[derive(Subcommand, Debug)]
enum StatesCommand {
    /// List every supported jurisdiction
    List(OutputArgs),
    /// Show the full rules for one jurisdiction
    Show(ShowStateArgs),
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
        Command::States {
            command: StatesCommand::List(args),
        } => run_states_list(args),
        Command::States {
            command: StatesCommand::Show(args),
        } => run_states_show(args),
        Command::Deadlines(args) => run_deadlines(args),
        Command::Diagnose(args) => run_diagnose(args),
        Command::Risk(args) => run_risk(args),
    }
}
