use tokio::fs;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};
use wellness_tracker::{AppState, Config, load_data, router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    fs::create_dir_all(&config.data_dir).await?;

    let data = load_data(&config.data_dir).await;
    info!(
        data_dir = %config.data_dir.display(),
        moods = data.moods.len(),
        habits = data.habits.habits.len(),
        journal = data.journal.len(),
        "state loaded"
    );

    let app = router(AppState::new(config.data_dir.clone(), data));

    let addr = config.listen_addr();
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("ctrl-c received, shutting down"),
        Err(err) => {
            error!("failed to listen for ctrl-c: {err}");
            std::future::pending::<()>().await;
        }
    }
}
