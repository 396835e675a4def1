use std::path::PathBuf;

use clap::Parser;
use user_service::prelude::*;

/// Layered CRUD service for users
#[derive(Debug, Parser)]
#[command(name = "user-service", version, about)]
struct Args {
    /// Configuration file; replaces the default search path
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Set the log level to debug
    #[arg(long)]
    debug: bool,

    /// HTTP port, overriding the configuration
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // A missing .env file is normal outside development
    let dotenv = dotenvy::dotenv();

    let mut config = Config::load(args.config.as_deref())?;
    if args.debug {
        config.service.debug = true;
    }
    if let Some(port) = args.port {
        config.service.port = port;
    }
    config.validate()?;

    init_tracing(&config)?;
    match dotenv {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(e) => tracing::debug!("No .env file loaded: {}", e),
    }

    let pool = create_pool(&config.database).await?;
    let users = UserService::new(PgUserRepository::new(pool));
    let app = build_router(AppState::new(users, config.service.name.clone()));

    Server::new(config.service).serve(app).await
}
