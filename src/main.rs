use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use fxconv::core::config::ListMode;
use fxconv::core::log::init_logging;
use fxconv::{AppCommand, ListOutput};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
#[group(multiple = false)]
struct ListArgs {
    /// One currency code per line
    #[arg(long)]
    flat: bool,

    /// Currencies grouped by region, then the full list
    #[arg(long)]
    grouped: bool,

    /// Region groups as a table
    #[arg(long)]
    table: bool,
}

impl From<ListArgs> for ListOutput {
    fn from(args: ListArgs) -> ListOutput {
        if args.table {
            ListOutput::Table
        } else if args.flat {
            ListOutput::Mode(ListMode::Flat)
        } else if args.grouped {
            ListOutput::Mode(ListMode::Grouped)
        } else {
            ListOutput::Configured
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount: <amount> <from> <to>
    Convert {
        #[arg(num_args = 0.., allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// List supported currencies
    List(ListArgs),
    /// Read bot commands from stdin until `quit` or EOF
    Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let command = match cli.command {
        Some(Commands::Setup) => {
            let result = fxconv::cli::setup::setup();
            if let Err(e) = &result {
                tracing::error!(error = %e, "Setup failed");
            }
            return result;
        }
        Some(Commands::Convert { args }) => AppCommand::Convert(args.join(" ")),
        Some(Commands::List(args)) => AppCommand::List(args.into()),
        Some(Commands::Shell) => AppCommand::Shell,
        None => {
            Cli::command().print_help()?;
            return Ok(());
        }
    };

    let result = fxconv::run_command(command, cli.config_path.as_deref()).await;
    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
