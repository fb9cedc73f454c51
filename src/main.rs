#![forbid(unsafe_code)]
//! FG Gate Command Line Interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

use fggate::commands::{
    execute_collection, execute_init, execute_sanitize, execute_session, execute_validate,
    execute_visit, CollectionOp, CollectionOptions, InitOptions, SanitizeOptions,
    SessionSubcommand, ValidateOptions, VisitOptions,
};
use fggate::config::{Config, ACCESS_CODES_ENV, CONFIG_FILE};
use fggate::CollectionKind;

#[derive(Parser)]
#[command(name = "fggate")]
#[command(about = "Invitation-link session gate and wishlist/cart store")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Comma-separated access codes (overrides the config file)
    #[arg(long, global = true, env = ACCESS_CODES_ENV, hide_env_values = true)]
    access_codes: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,

        /// Access codes to put in the file (can specify multiple)
        #[arg(long = "code")]
        codes: Vec<String>,

        /// Directory for the session and local storage files
        #[arg(long)]
        storage_dir: Option<PathBuf>,
    },

    /// Load a page through the access gate
    Visit {
        /// Address to visit, including any fg_code parameter
        url: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check an access code against the allow-list
    Validate {
        code: String,
    },

    /// Print an address with gate parameters removed
    Sanitize {
        url: String,

        /// Parameter to remove (defaults to fg_code, fg_sig, fg_ts)
        #[arg(short, long = "param")]
        params: Vec<String>,
    },

    /// Inspect or end the browsing session
    Session {
        #[command(subcommand)]
        cmd: SessionCommands,
    },

    /// Manage a persisted collection (wishlist, cart)
    Collection {
        /// Collection name
        kind: CollectionKind,

        #[command(subcommand)]
        op: CollectionCommands,

        /// Output as JSON
        #[arg(long, global = true)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum SessionCommands {
    /// Show the remembered access code
    Show,
    /// Forget the access code, ending the session
    Clear,
}

#[derive(Subcommand)]
enum CollectionCommands {
    /// List identifiers in insertion order
    List,
    /// Add an identifier
    Add { id: String },
    /// Remove an identifier
    Remove { id: String },
    /// Add if absent, remove if present
    Toggle { id: String },
    /// Print whether an identifier is present
    Contains { id: String },
    /// Print the number of identifiers
    Count,
    /// Remove every identifier
    Clear,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("fggate=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Load config
    let config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        Config::default()
    };

    // Read once; frozen for the rest of the process
    let allow_list = config.allow_list(cli.access_codes.as_deref());

    let result = match cli.command {
        Commands::Init {
            force,
            codes,
            storage_dir,
        } => execute_init(InitOptions {
            path: cli.config.clone(),
            force,
            access_codes: codes,
            storage_dir,
        }),

        Commands::Visit { url, json } => {
            execute_visit(VisitOptions { url, json }, &config, allow_list)
        }

        Commands::Validate { code } => execute_validate(ValidateOptions { code }, allow_list),

        Commands::Sanitize { url, params } => execute_sanitize(SanitizeOptions { url, params }),

        Commands::Session { cmd } => {
            let cmd = match cmd {
                SessionCommands::Show => SessionSubcommand::Show,
                SessionCommands::Clear => SessionSubcommand::Clear,
            };
            execute_session(cmd, &config, allow_list)
        }

        Commands::Collection { kind, op, json } => {
            let op = match op {
                CollectionCommands::List => CollectionOp::List,
                CollectionCommands::Add { id } => CollectionOp::Add { id },
                CollectionCommands::Remove { id } => CollectionOp::Remove { id },
                CollectionCommands::Toggle { id } => CollectionOp::Toggle { id },
                CollectionCommands::Contains { id } => CollectionOp::Contains { id },
                CollectionCommands::Count => CollectionOp::Count,
                CollectionCommands::Clear => CollectionOp::Clear,
            };
            execute_collection(CollectionOptions { kind, op, json }, &config)
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("✗").red(), e);
        std::process::exit(1);
    }

    Ok(())
}
