//! Ctrl+C handling.
//!
//! The first SIGINT / SIGTERM cancels the returned token; the crawl notices it
//! after the post it is working on. A second signal force-exits.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

/// Exit status used when the user forces termination.
const FORCE_EXIT_CODE: i32 = 130;

/// Install signal handlers and return a token cancelled on the first signal.
pub fn install_signal_handler() -> CancellationToken {
    let token = CancellationToken::new();
    let count = Arc::new(AtomicU32::new(0));

    let handler_token = token.clone();
    tokio::spawn(async move {
        #[cfg(unix)]
        let mut sigterm = {
            use tokio::signal::unix::{signal, SignalKind};
            match signal(SignalKind::terminate()) {
                Ok(s) => Some(s),
                Err(e) => {
                    tracing::warn!("Could not register SIGTERM handler: {}", e);
                    None
                }
            }
        };

        loop {
            #[cfg(unix)]
            {
                match sigterm.as_mut() {
                    Some(term) => {
                        tokio::select! {
                            r = tokio::signal::ctrl_c() => {
                                if r.is_err() {
                                    return;
                                }
                            }
                            _ = term.recv() => {}
                        }
                    }
                    None => {
                        if tokio::signal::ctrl_c().await.is_err() {
                            return;
                        }
                    }
                }
            }

            #[cfg(not(unix))]
            {
                if tokio::signal::ctrl_c().await.is_err() {
                    tracing::warn!("Could not listen for Ctrl+C");
                    return;
                }
            }

            if count.fetch_add(1, Ordering::SeqCst) == 0 {
                tracing::info!("Stopping after the current post, press Ctrl+C again to force exit");
                handler_token.cancel();
            } else {
                tracing::warn!("Force exit requested");
                std::process::exit(FORCE_EXIT_CODE);
            }
        }
    });

    token
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn install_returns_live_token() {
        let token = install_signal_handler();
        assert!(!token.is_cancelled());
    }
}
