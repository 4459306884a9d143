use anyhow::Result;
use clap::{Parser, Subcommand};
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::SqlitePoolOptions;

/// mealsub-admin - meal subscription administration
#[derive(Parser)]
#[command(name = "mealsub-admin")]
#[command(about = "Administrative console core for the meal-subscription business", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run draft-storage migrations
    Migrate,
    /// Drop the draft database if it exists and recreate it with migrations
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = mealsub_admin::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    mealsub_admin::observability::init_observability(
        "mealsub-admin",
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Migrate => migrate_command(config).await,
        Commands::Reset => reset_command(config).await,
    }
}

#[tracing::instrument(skip(config))]
async fn migrate_command(config: mealsub_admin::config::Config) -> Result<()> {
    tracing::info!("Running draft-storage migrations...");

    if !sqlx::Sqlite::database_exists(&config.storage.url).await? {
        tracing::info!("Database does not exist, creating: {}", config.storage.url);
        sqlx::Sqlite::create_database(&config.storage.url).await?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&config.storage.url)
        .await?;

    mealsub_db::migrate(&pool).await?;

    tracing::info!("Migrations completed successfully");

    Ok(())
}

#[tracing::instrument(skip(config))]
async fn reset_command(config: mealsub_admin::config::Config) -> Result<()> {
    tracing::info!("Resetting draft database...");

    if sqlx::Sqlite::database_exists(&config.storage.url).await? {
        tracing::warn!("Dropping existing database: {}", config.storage.url);
        sqlx::Sqlite::drop_database(&config.storage.url).await?;
    } else {
        tracing::info!("Database does not exist, nothing to drop");
    }

    migrate_command(config).await?;

    tracing::info!("Database reset completed successfully");

    Ok(())
}
