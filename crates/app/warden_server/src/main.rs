//! Warden API server binary.
//!
//! Configuration comes from the environment (see `ApiConfig::from_env`);
//! command-line flags override it. Without a database URL the server runs on
//! the in-memory account store.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tracing::{error, info};
use warden_api::AppState;
use warden_api::config::ApiConfig;
use warden_api::validation::{validate_email, validate_password};
use warden_core::accounts::memory::MemoryAccountStore;
use warden_core::accounts::queries::PgAccountStore;
use warden_core::accounts::service::ensure_admin;
use warden_core::accounts::store::AccountStore;
use warden_core::auth::revocation::MemoryRevocationStore;

const DEFAULT_LOG_FILTER: &str = "info,warden_api=debug,warden_core=debug";

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "warden_server", about = "Warden account and authentication API")]
struct Args {
    /// Address to listen on. Overrides `BIND_ADDR`.
    #[arg(long)]
    bind_addr: Option<String>,

    /// PostgreSQL connection URL. Overrides `DATABASE_URL`.
    #[arg(long)]
    database_url: Option<String>,

    /// Maximum number of database connections in the pool.
    /// Overrides `DB_MAX_CONNECTIONS`.
    #[arg(long)]
    max_connections: Option<u32>,

    /// Email of the bootstrap `ADMIN` account, created or promoted at startup.
    #[arg(long, env = "ADMIN_EMAIL", requires = "admin_password")]
    admin_email: Option<String>,

    /// Password for a newly created bootstrap `ADMIN` account.
    #[arg(long, env = "ADMIN_PASSWORD", requires = "admin_email", hide_env_values = true)]
    admin_password: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let args = Args::parse();

    let mut config =
        ApiConfig::from_env().inspect_err(|e| error!(error = %e, "invalid configuration"))?;
    if let Some(bind_addr) = args.bind_addr {
        config.bind_addr = bind_addr;
    }
    if let Some(database_url) = args.database_url {
        config.database_url = Some(database_url);
    }
    if let Some(max_connections) = args.max_connections {
        config.max_connections = max_connections;
    }

    info!(bind_addr = %config.bind_addr, "starting warden_server");

    let accounts: Arc<dyn AccountStore> = match &config.database_url {
        Some(url) => {
            info!(max_connections = config.max_connections, "configuring connection pool");
            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .acquire_timeout(Duration::from_secs(30))
                .connect(url)
                .await?;

            info!("running database migrations");
            warden_api::migrate(&pool).await?;
            Arc::new(PgAccountStore::new(pool))
        }
        None => {
            info!("DATABASE_URL not set, using in-memory account store");
            Arc::new(MemoryAccountStore::new())
        }
    };

    if let (Some(email), Some(password)) = (&args.admin_email, &args.admin_password) {
        validate_email(email)?;
        validate_password(password)?;
        let admin = ensure_admin(accounts.as_ref(), email, password).await?;
        info!(user_id = %admin.user_id, "bootstrap admin ready");
    }

    let revocations = Arc::new(MemoryRevocationStore::new());
    let cleanup = revocations.spawn_cleanup_task();

    let state = AppState {
        accounts,
        revocations,
        config: config.clone(),
    };

    let app = warden_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    cleanup.abort();
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
