use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use commands::{config, daemon, lists, sync};
use ondeck_config::PathManager;
use ondeck_models::ProviderMode;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "ondeck")]
#[command(about = "OnDeck - Keep your TMDB On Deck and genre lists pointed at what to watch next")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    /// Free, ad-supported or allow-listed subscription only
    Free,
    /// Also accept rentals
    Rent,
    /// Ignore watch providers and the excluded list
    All,
}

impl From<ModeArg> for ProviderMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Free => ProviderMode::Free,
            ModeArg::Rent => ProviderMode::Rent,
            ModeArg::All => ProviderMode::All,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild the On Deck and genre lists once
    #[command(long_about = "Read the number-one hits and watched lists, work out which movies are next in line and watchable, then rewrite the On Deck list and one list per genre. Flags override the [eligibility] section of the config file.")]
    Sync {
        /// Which watch-provider offers count as watchable
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,

        /// Drop animation without drama and horror without action, adventure, comedy or romance
        #[arg(long, action = ArgAction::SetTrue)]
        genre_filter: bool,

        /// Resolve and print the target lists without writing anything
        #[arg(long, action = ArgAction::SetTrue)]
        dry_run: bool,
    },
    /// Show the lists on the TMDB account
    Lists,
    /// Run as daemon with internal scheduler
    #[command(long_about = "Run OnDeck in the foreground and sync on a cron schedule. The daemon performs an initial sync on startup unless --no-startup-sync is given. Stop it with Ctrl-C or SIGINT.")]
    Daemon {
        /// Six-field cron expression, seconds first (e.g., '0 0 */6 * * *' for every 6 hours)
        #[arg(long, value_name = "SCHEDULE")]
        schedule: Option<String>,

        /// Skip initial sync on startup
        #[arg(long, action = ArgAction::SetTrue)]
        no_startup_sync: bool,
    },
    /// View or create the configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (masks credentials)
    Show {
        /// Show credentials unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Interactive setup of credentials and settings
    Init,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let log_file = match cli.command {
        Commands::Daemon { .. } => Some(PathManager::default().daemon_log_file()),
        _ => None,
    };
    logging::init_logging(cli.verbose, cli.quiet, log_file.as_deref())
        .map_err(|e| color_eyre::eyre::eyre!("Failed to initialise logging: {}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Sync {
            mode,
            genre_filter,
            dry_run,
        } => sync::run_sync(mode.map(ProviderMode::from), genre_filter, dry_run, &output).await,
        Commands::Lists => lists::run_lists(&output).await,
        Commands::Daemon {
            schedule,
            no_startup_sync,
        } => daemon::run_daemon(schedule, no_startup_sync, &output).await,
        Commands::Config { cmd } => config::run_config(cmd, &output).await,
    }
}
