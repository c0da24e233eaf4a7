use tracing::{error, info};

use wld::{BoardPermRepository, BoardRepository, Config, Database, UserRepository};

#[tokio::main]
async fn main() {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    // Load configuration
    let config = match Config::load_with_env(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {config_path}: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {e}");
        std::process::exit(1);
    }

    // Initialize logging
    if let Err(e) = wld::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        wld::logging::init_console_only(&config.logging.level);
    }

    info!("WLD - forum data model");

    let db = match Database::connect(&config.database).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to open database: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = log_summary(&db).await {
        error!("Failed to read database summary: {e}");
        std::process::exit(1);
    }
}

async fn log_summary(db: &Database) -> wld::Result<()> {
    info!("Schema version {}", db.schema_version().await?);

    let boards = BoardRepository::new(db.pool()).list_all().await?;
    let users = UserRepository::new(db.pool()).count().await?;
    let perms = BoardPermRepository::new(db.pool()).list_all().await?;
    info!(
        "{} boards, {} users, {} permission tags",
        boards.len(),
        users,
        perms.len()
    );

    for board in &boards {
        let required = BoardRepository::new(db.pool()).list_perms(board.id).await?;
        if required.is_empty() {
            info!("  {} (public)", board.name);
        } else {
            info!("  {} requires {:?}", board.name, required);
        }
    }

    Ok(())
}
