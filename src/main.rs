use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use dotenv::dotenv;
use std::path::Path;
use tidemark::commands::{self, MigrateOptions, StatusFormat};
use tidemark::config::{self, Config, ConfigInput, DatabaseArgs, MigrationsArgs};
use tidemark::constants::CONFIG_FILENAME;
use tidemark::migration::Direction;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(long, default_value = CONFIG_FILENAME, global = true)]
    config_file: String,

    /// Enable verbose output (info level)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Suppress all non-essential output (error level only)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Enable debug output (debug level)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct UpArgs {
    /// Apply at most N pending migrations (0 = all). Skipped earlier migrations always run.
    #[arg(long, default_value_t = 0)]
    max: usize,

    /// Show what would run without changing anything
    #[arg(long)]
    dry_run: bool,

    #[command(flatten)]
    database_args: DatabaseArgs,

    #[command(flatten)]
    migrations_args: MigrationsArgs,
}

#[derive(Args)]
struct DownArgs {
    /// Revert at most N migrations
    #[arg(long, default_value_t = 1, conflicts_with = "all")]
    max: usize,

    /// Revert every applied migration
    #[arg(long)]
    all: bool,

    /// Show what would run without changing anything
    #[arg(long)]
    dry_run: bool,

    /// Revert without asking for confirmation
    #[arg(long, short = 'y')]
    yes: bool,

    #[command(flatten)]
    database_args: DatabaseArgs,

    #[command(flatten)]
    migrations_args: MigrationsArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending migrations
    Up(UpArgs),

    /// Revert applied migrations, newest first
    Down(DownArgs),

    /// Show which migrations are applied
    Status {
        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: StatusFormat,

        #[command(flatten)]
        database_args: DatabaseArgs,

        #[command(flatten)]
        migrations_args: MigrationsArgs,
    },

    /// Create empty up/down migration files
    New {
        /// Description for the migration
        description: Option<String>,

        #[command(flatten)]
        migrations_args: MigrationsArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    initialize_logging(&cli);

    tokio::select! {
        result = run_main(cli) => result,
        _ = wait_for_shutdown_signal() => {
            info!("Received shutdown signal, stopping");
            std::process::exit(130);
        }
    }
}

async fn wait_for_shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

fn initialize_logging(cli: &Cli) {
    let level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else if cli.quiet {
        "error"
    } else {
        "warn" // default level
    };

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(level)
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_config(
    file_config: ConfigInput,
    database_args: Option<&DatabaseArgs>,
    migrations_args: &MigrationsArgs,
) -> Result<Config> {
    let cli_config = ConfigInput {
        database: database_args.map(|args| args.clone().into()),
        migrations: Some(migrations_args.clone().into()),
    };

    config::ConfigBuilder::new()
        .with_file(file_config)
        .with_cli_args(cli_config)
        .resolve()
}

async fn run_main(cli: Cli) -> Result<()> {
    let (file_config, root_dir) = config::load_config(&cli.config_file)?;
    let root_dir: &Path = &root_dir;

    match cli.command {
        Commands::Up(args) => {
            let config = resolve_config(
                file_config,
                Some(&args.database_args),
                &args.migrations_args,
            )?;

            info!("Applying migrations");
            let options = MigrateOptions {
                direction: Direction::Up,
                max: args.max,
                dry_run: args.dry_run,
                assume_yes: true,
                verbose: cli.verbose || cli.debug,
            };
            commands::cmd_migrate(&config, root_dir, &options).await
        }
        Commands::Down(args) => {
            let config = resolve_config(
                file_config,
                Some(&args.database_args),
                &args.migrations_args,
            )?;

            info!("Reverting migrations");
            let options = MigrateOptions {
                direction: Direction::Down,
                max: if args.all { 0 } else { args.max },
                dry_run: args.dry_run,
                assume_yes: args.yes,
                verbose: cli.verbose || cli.debug,
            };
            commands::cmd_migrate(&config, root_dir, &options).await
        }
        Commands::Status {
            format,
            database_args,
            migrations_args,
        } => {
            let config = resolve_config(file_config, Some(&database_args), &migrations_args)?;

            info!("Checking migration status");
            commands::cmd_migrate_status(&config, root_dir, format).await
        }
        Commands::New {
            description,
            migrations_args,
        } => {
            let config = resolve_config(file_config, None, &migrations_args)?;

            commands::cmd_migrate_new(&config, root_dir, description.as_deref())
        }
    }
}
