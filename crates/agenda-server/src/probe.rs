//! Backing-store readiness probe.
//!
//! Periodically opens a TCP connection to the configured backing store and
//! mirrors the result into a [`ReadinessFlag`], which the availability gate
//! reads on every request.

use std::sync::Arc;
use std::time::Duration;

use agenda_core::ReadinessFlag;
use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tracing::{info, warn};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// One reachability check.
pub async fn probe_once(addr: &str, timeout: Duration) -> bool {
    matches!(
        tokio::time::timeout(timeout, TcpStream::connect(addr)).await,
        Ok(Ok(_))
    )
}

/// Spawn the probe loop. The first probe runs immediately.
pub fn spawn_readiness_probe(
    addr: String,
    flag: Arc<ReadinessFlag>,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            let ready = probe_once(&addr, CONNECT_TIMEOUT).await;
            let was_ready = flag.set(ready);
            match (was_ready, ready) {
                (false, true) => info!(%addr, "backing store ready"),
                (true, false) => warn!(%addr, "backing store unreachable, serving 503"),
                _ => {}
            }
        }
    })
}
