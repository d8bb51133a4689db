// src/main.rs
use std::sync::Arc;
use subscription_backend::api::{build_router, AppState};
use subscription_backend::config::AppConfig;
use subscription_backend::db::{create_db_pool, run_migrations};
use subscription_backend::logging::init_tracing;
use subscription_backend::repository::SeaOrmSubscriptionRepository;
use subscription_backend::service::subscription_service::SubscriptionService;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env ファイルを読み込む (存在しなくてもエラーにしない)
    dotenvy::dotenv().ok();

    let app_config = AppConfig::from_env()?;
    init_tracing(&app_config.log)?;

    info!(
        environment = %app_config.environment,
        "Starting Subscription Backend server..."
    );

    let db_pool = create_db_pool(&app_config.database).await?;
    info!("Database pool created successfully.");

    // テーブルが既に存在する場合もあるので失敗しても起動を続ける
    if let Err(e) = run_migrations(&db_pool).await {
        warn!(error = %e, "Failed to run migrations, continuing startup");
    } else {
        info!("Migrations applied.");
    }

    let repository = Arc::new(SeaOrmSubscriptionRepository::new(db_pool));
    let subscription_service = Arc::new(SubscriptionService::new(repository));
    let server_addr = app_config.server_addr();
    let app_state = AppState::new(subscription_service, Arc::new(app_config));

    let app_router = build_router(app_state);

    let listener = TcpListener::bind(&server_addr).await?;
    info!("Router configured. Server listening on {}", server_addr);

    axum::serve(listener, app_router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install CTRL+C signal handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received ctrl+C signal"),
        _ = terminate => info!("Received terminate signal"),
    }
}
