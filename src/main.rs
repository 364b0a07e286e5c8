use std::process::ExitCode;

use tracing::{error, info};

use agora::{ensure_initial_admin, Config, Database, WebServer};

#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration
    let config = match Config::load_with_env("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    // Initialize logging
    if let Err(e) = agora::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        agora::logging::init_console_only(&config.logging.level);
    }

    info!("Agora - Community Bulletin Board Backend");

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {e}");
        return ExitCode::FAILURE;
    }

    let db = match Database::open(&config.database.path).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to open database at {}: {e}", config.database.path);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = ensure_initial_admin(db.pool(), &config.bootstrap).await {
        error!("Bootstrap failed: {e}");
        return ExitCode::FAILURE;
    }

    let server = match WebServer::new(&config, db) {
        Ok(server) => server,
        Err(e) => {
            error!("Failed to configure web server: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!(
        "Server configured on {}:{}",
        config.server.host, config.server.port
    );

    if let Err(e) = server.run().await {
        error!("Web server error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
