//! Running the CLI

// Allow exits because in this file we ideally handle all errors with known exit codes
#![allow(clippy::exit)]

use crate::db::models::user::{self, ADMIN_ROLE};
use crate::db::{self, init};
use crate::server::app::serve;
use crate::utils::config::{Config, LoggingConfig, DEFAULT_CONFIG_PATH};
use crate::utils::password::hash_password;
use clap::Parser;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

/// Admin backend for the Senior By Design website.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML config file.
    #[arg(short, long, default_value_t = String::from(DEFAULT_CONFIG_PATH))]
    config: String,
    /// Subcommands
    #[command(subcommand)]
    subcommands: Subcommands,
}

///
#[derive(Clone, clap::Subcommand)]
enum Subcommands {
    /// Serve the admin and public API
    Serve {
        /// Port to listen on. Overrides `server.port` from the config file.
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Apply pending database migrations and exit
    Migrate,
    /// Create a user unless one with the same email exists
    SeedUser {
        /// Login email
        #[arg(short, long)]
        email: String,
        /// Initial password
        #[arg(short, long)]
        password: String,
        /// Role, `admin` or `user`
        #[arg(short, long, default_value_t = String::from(ADMIN_ROLE))]
        role: String,
    },
}

/// Set up stdout logging, plus a daily rolling file when `log_dir` is configured.
/// The returned guard flushes the file writer when dropped.
fn init_tracing(logging: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer());
    if let Some(log_dir) = logging.log_dir.as_ref() {
        let file_appender = tracing_appender::rolling::daily(log_dir, "sbd.log");
        let (writer, guard) = tracing_appender::non_blocking(file_appender);
        registry
            .with(fmt::layer().with_ansi(false).with_writer(writer))
            .init();
        Some(guard)
    } else {
        registry.init();
        None
    }
}

/// Main entrypoint to application
///
/// # Errors
/// Returns an error if the server cannot bind to its address.
pub fn run() -> std::io::Result<()> {
    let cli = Cli::parse();
    let config_path = PathBuf::from(&cli.config);
    let mut config = Config::load(&config_path).unwrap_or_else(|err| {
        eprintln!("error: {err:?}");
        std::process::exit(1);
    });
    let _guard = init_tracing(&config.logging);
    tracing::debug!("Starting application");

    match cli.subcommands {
        Subcommands::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config)
        }
        Subcommands::Migrate => {
            exit_on_error(migrate(&config), "Unable to apply migrations");
            Ok(())
        }
        Subcommands::SeedUser {
            email,
            password,
            role,
        } => {
            exit_on_error(
                seed_user(&config, &email, &password, &role),
                "Unable to seed user",
            );
            Ok(())
        }
    }
}

/// Log `result`'s error and exit with code 1.
fn exit_on_error(result: anyhow::Result<()>, message: &str) {
    if let Err(err) = result {
        tracing::error!("{message}");
        tracing::error!("Error: {:?}", err);
        std::process::exit(1);
    }
}

/// Connect and run migrations.
#[actix_web::main]
async fn migrate(config: &Config) -> anyhow::Result<()> {
    init::connect(&config.database).await?;
    tracing::info!("Database is up to date");
    Ok(())
}

/// Create a user, mirroring the seed script used to bootstrap admin accounts.
#[actix_web::main]
async fn seed_user(config: &Config, email: &str, password: &str, role: &str) -> anyhow::Result<()> {
    if role != ADMIN_ROLE && role != "user" {
        anyhow::bail!("Unknown role '{role}', expected 'admin' or 'user'");
    }
    let password_hash = hash_password(password)?;
    let conn: db::DatabaseConnection = init::connect(&config.database).await?;
    let created = user::Manager::create_if_missing(&conn, email, &password_hash, role).await?;
    if created {
        tracing::info!("Created {role} user: {email}");
    } else {
        tracing::info!("User already exists: {email}");
    }
    Ok(())
}
