use clap::{Parser, ValueEnum};
use migration::MigrationCommand;
use url_shortener::config::AppConfig;
use url_shortener::connect_db;

#[derive(Clone, Copy, ValueEnum)]
enum Command {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

impl From<Command> for MigrationCommand {
    fn from(command: Command) -> Self {
        match command {
            Command::Up => MigrationCommand::Up,
            Command::Down => MigrationCommand::Down,
            Command::Fresh => MigrationCommand::Fresh,
            Command::Reset => MigrationCommand::Reset,
            Command::Refresh => MigrationCommand::Refresh,
            Command::Status => MigrationCommand::Status,
        }
    }
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "url-shortener database migration tool")]
#[command(
    long_about = "Runs schema migrations against the database configured the same way as the service: \
                  CONFIG_PATH (optional YAML) plus POSTGRES_* environment variables."
)]
struct Args {
    /// Migration command to run
    #[arg(value_enum)]
    command: Command,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,sqlx=warn")
        .init();

    let args = Args::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let db = match connect_db(&config.db).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let result = migration::migrate(&db, args.command.into()).await;
    if let Err(e) = db.close().await {
        eprintln!("failed to close database: {e}");
    }

    if let Err(e) = result {
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }
}
