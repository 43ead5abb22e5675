/// Watchbox Server - shared synchronized playback queue service
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use watchbox_core::types::User;
use watchbox_server::{
    api,
    config::ServerConfig,
    jobs::{CommandProcessor, CommandQueue},
    services::{LogNotifier, PlaylistService, YoutubeCatalog},
    state::AppState,
};
use watchbox_storage::users;

#[derive(Parser)]
#[command(name = "watchbox-server")]
#[command(about = "Shared synchronized video playback queues", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create a new user
    AddUser {
        /// Display name
        #[arg(short, long)]
        name: String,
        /// Contact address
        #[arg(short, long)]
        mail: Option<String>,
    },
    /// List all users
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "watchbox_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => {
            serve().await?;
        }
        Commands::AddUser { name, mail } => {
            add_user(&name, mail).await?;
        }
        Commands::ListUsers => {
            list_users().await?;
        }
    }

    Ok(())
}

async fn serve() -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    config.validate()?;

    tracing::info!("Starting Watchbox Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let pool = watchbox_storage::create_pool(&config.storage.url).await?;
    watchbox_storage::run_migrations(&pool).await?;
    tracing::info!("Database connected");

    let resolver = Arc::new(YoutubeCatalog::new(&config.catalog));
    let playlist = Arc::new(PlaylistService::new(pool.clone(), resolver));

    let processor = CommandProcessor::new(playlist.clone(), Arc::new(LogNotifier));
    let commands = CommandQueue::start(processor);
    tracing::info!("Command queue started");

    let state = AppState::new(pool, playlist, commands);
    let app = api::create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn add_user(name: &str, mail: Option<String>) -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    let pool = watchbox_storage::create_pool(&config.storage.url).await?;
    watchbox_storage::run_migrations(&pool).await?;

    let mut user = User::new(name);
    user.mail = mail;
    users::create(&pool, &user).await?;

    println!("Created user '{}' ({})", user.name, user.id);
    Ok(())
}

async fn list_users() -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    let pool = watchbox_storage::create_pool(&config.storage.url).await?;
    watchbox_storage::run_migrations(&pool).await?;

    let all = users::get_all(&pool).await?;
    if all.is_empty() {
        println!("No users");
        return Ok(());
    }

    for user in all {
        match &user.mail {
            Some(mail) => println!("{}  {} <{}>", user.id, user.name, mail),
            None => println!("{}  {}", user.id, user.name),
        }
    }

    Ok(())
}
