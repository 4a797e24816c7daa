mod config;
mod employees;
mod error;
mod http;

use std::sync::Arc;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use entity::employees::ActiveModel as EmployeeActive;
use migration::{Migrator, MigratorTrait};
use platform_db::{DatabaseSettings, DbEmployeeStore, DbPool, EmployeeStore, connect};
use platform_obs::{ObsConfig, init_tracing};
use sea_orm::{ActiveValue::NotSet, Set};
use tracing::info;

use crate::{
    config::AppConfig,
    http::{AppState, ServeConfig},
};

#[derive(Parser, Debug)]
#[command(name = "ems-server", version, about = "Employee management service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server.
    Serve(ServeCommand),
    /// Run database migrations.
    #[command(subcommand)]
    Migrate(MigrateCommand),
    /// Insert demo employees for local development.
    Seed,
}

#[derive(Subcommand, Debug)]
enum MigrateCommand {
    /// Apply pending migrations.
    Up,
    /// Rollback the most recent migration.
    Down,
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, default_value = "0.0.0.0")]
    host: std::net::IpAddr,
    #[arg(long, default_value_t = 8080)]
    port: u16,
    #[arg(long, help = "Allow starting even when migrations are pending")]
    allow_dirty: bool,
}

impl From<ServeCommand> for ServeConfig {
    fn from(value: ServeCommand) -> Self {
        ServeConfig::new(value.host, value.port)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing(ObsConfig::default())?;
    let cli = Cli::parse();
    let app_config = Arc::new(AppConfig::load());
    match cli.command {
        Command::Serve(cmd) => run_server(cmd, app_config).await,
        Command::Migrate(action) => match action {
            MigrateCommand::Up => migrate_up().await,
            MigrateCommand::Down => migrate_down().await,
        },
        Command::Seed => run_seed().await,
    }
}

async fn setup_pool() -> Result<DbPool> {
    let settings = DatabaseSettings::from_env()?;
    connect(&settings).await.map_err(Into::into)
}

async fn run_server(cmd: ServeCommand, config: Arc<AppConfig>) -> Result<()> {
    let pool = setup_pool().await?;
    ensure_migrations(&pool, cmd.allow_dirty).await?;
    let store = Arc::new(DbEmployeeStore::new(pool.clone()));
    let state = AppState {
        pool,
        store,
        config,
    };
    http::serve(cmd.into(), state).await
}

async fn ensure_migrations(pool: &DbPool, allow_dirty: bool) -> Result<()> {
    let pending = Migrator::get_pending_migrations(pool).await?;
    if !pending.is_empty() && !allow_dirty {
        anyhow::bail!(
            "pending migrations detected; run `cargo run -p server -- migrate up` or pass --allow-dirty"
        );
    }
    Ok(())
}

async fn migrate_up() -> Result<()> {
    let pool = setup_pool().await?;
    Migrator::up(&pool, None).await?;
    info!("database migrations applied");
    Ok(())
}

async fn migrate_down() -> Result<()> {
    let pool = setup_pool().await?;
    Migrator::down(&pool, Some(1)).await?;
    info!("most recent migration rolled back");
    Ok(())
}

const DEMO_EMPLOYEES: &[(&str, &str, &str)] = &[
    ("Ada", "Lovelace", "ada.lovelace@example.com"),
    ("Grace", "Hopper", "grace.hopper@example.com"),
    ("Alan", "Turing", "alan.turing@example.com"),
];

async fn run_seed() -> Result<()> {
    let pool = setup_pool().await?;
    ensure_migrations(&pool, false).await?;
    let store = DbEmployeeStore::new(pool);
    for &(first_name, last_name, email) in DEMO_EMPLOYEES {
        if store.find_by_email(email).await?.is_some() {
            continue;
        }
        store
            .save(EmployeeActive {
                id: NotSet,
                first_name: Set(first_name.to_string()),
                last_name: Set(last_name.to_string()),
                email_id: Set(email.to_string()),
            })
            .await?;
        info!(email, "seeded employee");
    }
    Ok(())
}
