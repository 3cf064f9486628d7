use std::sync::Arc;

use agenda_core::{InMemoryRecordStore, PriorityPolicy, ReadinessFlag};
use agenda_server::oauth::GithubOAuth;
use agenda_server::probe::spawn_readiness_probe;
use agenda_server::{AppState, Args, Settings, logging, router};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(&args.log_level)?;
    let settings = Settings::from_args(args)?;

    // (A) record store, pre-seeded with the demo agenda
    let store = Arc::new(InMemoryRecordStore::seeded(PriorityPolicy::standard())?);

    // (B) readiness: probe the backing store, or report ready right away
    let readiness = Arc::new(ReadinessFlag::new(false));
    match &settings.backing_store_addr {
        Some(addr) => {
            spawn_readiness_probe(addr.clone(), readiness.clone(), settings.probe_interval);
        }
        None => {
            warn!("no backing store configured, records are kept in memory only");
            readiness.mark_ready();
        }
    }

    // (C) OAuth adapter
    let auth = Arc::new(GithubOAuth::new(
        settings.github.client_id.clone(),
        settings.github.client_secret.clone(),
        settings.callback_url(),
    )?);

    let state = AppState::new(store, readiness, auth, &settings.agenda_path);
    let app = router(state, &settings.static_dir);

    let listener = TcpListener::bind(settings.listen).await?;
    info!(
        "Your app is listening on: {}:{}",
        settings.static_url,
        listener.local_addr()?.port()
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(%err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
