//! Registration Service - command-line front end.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use common::AppError;
use domain::{User, UserId};
use registration_service_lib::config::RegistrationConfig;
use registration_service_lib::{MigrateAction, RegistrationService};

#[derive(Parser)]
#[command(name = "registration-service")]
#[command(about = "User registration and account lifecycle")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Database URL (overrides REGISTRATION_DATABASE_URL / DATABASE_URL)
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    User(UserCommands),
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    /// Register a new user
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
    },
    /// Show a user
    Get {
        #[arg(allow_negative_numbers = true)]
        id: UserId,
    },
    /// Mark a user active
    Activate {
        #[arg(allow_negative_numbers = true)]
        id: UserId,
    },
    /// Mark a user inactive
    Deactivate {
        #[arg(allow_negative_numbers = true)]
        id: UserId,
    },
    /// Change a user's email address
    UpdateEmail {
        #[arg(allow_negative_numbers = true)]
        id: UserId,
        #[arg(long)]
        email: String,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    fn code(&self) -> &'static str {
        match self {
            CliError::App(err) => err.code(),
            CliError::Database(_) => "DATABASE_ERROR",
            CliError::Output(_) => "OUTPUT_ERROR",
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = RegistrationConfig::from_env();
    if let Some(url) = cli.database_url {
        config = config.with_database_url(url);
    }
    tracing::debug!("Configuration loaded");

    match execute(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(code = e.code(), "Command failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn execute(command: Commands, config: &RegistrationConfig) -> Result<(), CliError> {
    match command {
        Commands::Migrate { action } => {
            let action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };
            registration_service_lib::run_migrations(config, action).await?;
        }
        Commands::User(command) => {
            let service = registration_service_lib::connect_registrar(config).await?;
            execute_user(&service, command).await?;
        }
    }

    Ok(())
}

/// String arguments are trimmed here; the service takes input as given.
async fn execute_user(
    service: &dyn RegistrationService,
    command: UserCommands,
) -> Result<(), CliError> {
    match command {
        UserCommands::Register { username, email } => {
            let user = service.register(username.trim(), email.trim()).await?;
            print_user(&user)?;
        }
        UserCommands::Get { id } => {
            let user = service.get_user(id).await?;
            print_user(&user)?;
        }
        UserCommands::Activate { id } => {
            service.activate(id).await?;
            println!("User {} activated", id);
        }
        UserCommands::Deactivate { id } => {
            service.deactivate(id).await?;
            println!("User {} deactivated", id);
        }
        UserCommands::UpdateEmail { id, email } => {
            service.update_email(id, email.trim()).await?;
            println!("User {} email updated", id);
        }
    }

    Ok(())
}

fn print_user(user: &User) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(user)?);
    Ok(())
}

/// Initialize tracing subscriber
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
