// Server loop module
// Accepts connections until shutdown, then waits for in-flight ones

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

/// Upper bound on how long shutdown waits for open connections
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);
const DRAIN_POLL: Duration = Duration::from_millis(50);

/// Accept connections on `listener` until `shutdown` resolves.
///
/// The listener is dropped as soon as shutdown starts, so no new connection is
/// accepted; connections already being served get up to [`SHUTDOWN_GRACE`] to
/// finish.
#[allow(clippy::ignored_unit_patterns)]
pub async fn start_server_loop<S>(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: S,
) -> std::io::Result<()>
where
    S: Future<Output = ()>,
{
    let active_connections = Arc::new(AtomicUsize::new(0));
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        // Transient (e.g. EMFILE); keep serving
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            _ = &mut shutdown => {
                break;
            }
        }
    }

    let addr = listener.local_addr()?;
    drop(listener);
    logger::log_info(&format!("Listener on {addr} closed"));

    drain_connections(&active_connections, SHUTDOWN_GRACE).await;
    Ok(())
}

/// Wait until every connection task has finished or `grace` elapses.
async fn drain_connections(active: &AtomicUsize, grace: Duration) {
    let deadline = tokio::time::Instant::now() + grace;

    loop {
        let remaining = active.load(Ordering::SeqCst);
        if remaining == 0 {
            logger::log_info("All connections closed");
            return;
        }
        if tokio::time::Instant::now() >= deadline {
            logger::log_warning(&format!(
                "Shutdown grace period elapsed with {remaining} connection(s) still open"
            ));
            return;
        }
        tokio::time::sleep(DRAIN_POLL).await;
    }
}
