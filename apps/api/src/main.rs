use std::net::SocketAddr;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tunehub_api::{
    build_router, config::Config, db, repositories::SessionRepository,
    repositories::UserRepository, services::AuthService,
};
use tunehub_deezer_client::DeezerClient;

#[derive(Debug, Parser)]
#[command(name = "tunehub-api", version, about = "TuneHub music streaming server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Create the `admin` user if it does not exist yet
    CreateAdmin {
        #[arg(long, default_value = "admin123")]
        password: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tunehub_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    tracing::info!(environment = %config.environment(), "Connecting to database...");
    let pool = db::create_pool(config.database()).await?;
    db::health_check(&pool).await?;
    tracing::info!("Database ready, migrations applied");

    let auth = AuthService::new(
        UserRepository::new(pool.clone()),
        SessionRepository::new(pool.clone()),
        config.settings.session_ttl_secs,
    );

    match cli.command.unwrap_or(Command::Serve) {
        Command::CreateAdmin { password } => {
            if auth.ensure_user("admin", "admin@example.com", &password).await? {
                tracing::info!("Admin user created");
            } else {
                tracing::info!("Admin user already exists");
            }
            Ok(())
        }
        Command::Serve => {
            auth.purge_expired_sessions().await?;
            serve(config, pool).await
        }
    }
}

async fn serve(config: Config, pool: sqlx::SqlitePool) -> anyhow::Result<()> {
    let settings = config.settings.clone();
    tokio::fs::create_dir_all(settings.audio_dir()).await?;
    tokio::fs::create_dir_all(settings.covers_dir()).await?;
    tracing::info!(upload_dir = %settings.upload_dir.display(), "Upload directories ready");

    let deezer = DeezerClient::new(
        config.deezer().api_url.clone(),
        Duration::from_secs(config.deezer().timeout_secs),
    )?;

    let app = build_router(pool, deezer, settings);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("TuneHub listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
