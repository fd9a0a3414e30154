//! Start-once handle to a background UI host.
//!
//! The host itself (an HTTP form, a tunnel, ...) is opaque: anything that
//! can start serving and report its URL implements [`UiHost`]. The handle
//! guarantees the host is launched at most once per process and exposes the
//! discovered URL through a write-once slot.
//!
//! Readiness is best effort. [`UiServer::start`] waits at most the settle
//! delay; a host that is slower than that is still running, but the caller
//! gets the fallback URL until the slot is filled.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, OnceLock};
use std::thread;
use std::time::Duration;

use tracing::{error, info};

use crate::error::UiError;

/// Default time to wait for a freshly launched host to report its URL.
pub const DEFAULT_SETTLE: Duration = Duration::from_secs(3);

/// URL reported when the host has not (yet) produced one.
pub const DEFAULT_FALLBACK_URL: &str = "http://localhost:7860";

/// A UI host that can be started in the background.
pub trait UiHost: Send + Sync + 'static {
    /// Starts serving and returns the URL the UI is reachable at.
    ///
    /// Runs on a dedicated thread and may block until the host is ready.
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot start.
    fn launch(&self, share: bool) -> Result<String, UiError>;
}

/// Process-lifetime handle to a lazily started UI host.
pub struct UiServer {
    host: Arc<dyn UiHost>,
    started: AtomicBool,
    url: Arc<OnceLock<String>>,
    fallback_url: String,
    settle: Duration,
}

impl UiServer {
    /// Creates a handle; nothing is launched until [`start`](Self::start).
    pub fn new(host: impl UiHost, fallback_url: impl Into<String>, settle: Duration) -> Self {
        Self {
            host: Arc::new(host),
            started: AtomicBool::new(false),
            url: Arc::new(OnceLock::new()),
            fallback_url: fallback_url.into(),
            settle,
        }
    }

    /// Launches the host on first call and returns the best known URL.
    ///
    /// Later calls do not relaunch; they return [`url`](Self::url) at once.
    pub fn start(&self, share: bool) -> String {
        if self.started.swap(true, Ordering::SeqCst) {
            return self.url();
        }

        let (ready_tx, ready_rx) = mpsc::channel();
        let host = Arc::clone(&self.host);
        let slot = Arc::clone(&self.url);

        let spawned = thread::Builder::new()
            .name("ui-host".to_string())
            .spawn(move || {
                match host.launch(share) {
                    Ok(url) => {
                        info!(url = %url, "UI host ready");
                        let _ = slot.set(url);
                    }
                    Err(e) => error!(error = %e, "UI host failed"),
                }
                let _ = ready_tx.send(());
            });

        match spawned {
            Ok(_) => {
                // Blocks the calling thread, and with it the stdio loop and its
                // signal handling, for up to `settle`. A timeout leaves the
                // host running; the slot fills later.
                let _ = ready_rx.recv_timeout(self.settle);
            }
            Err(e) => error!(error = %UiError::ThreadSpawn(e), "UI host not started"),
        }

        self.url()
    }

    /// Whether the host has reported its URL.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.url.get().is_some()
    }

    /// The discovered URL, or the fallback while none is known.
    #[must_use]
    pub fn url(&self) -> String {
        self.url
            .get()
            .cloned()
            .unwrap_or_else(|| self.fallback_url.clone())
    }
}

impl std::fmt::Debug for UiServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiServer")
            .field("started", &self.started.load(Ordering::SeqCst))
            .field("url", &self.url.get())
            .field("fallback_url", &self.fallback_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    struct CountingHost {
        launches: Arc<AtomicUsize>,
        delay: Duration,
    }

    impl UiHost for CountingHost {
        fn launch(&self, share: bool) -> Result<String, UiError> {
            self.launches.fetch_add(1, Ordering::SeqCst);
            thread::sleep(self.delay);
            Ok(if share {
                "https://example.invalid/share".to_string()
            } else {
                "http://127.0.0.1:7860".to_string()
            })
        }
    }

    struct FailingHost;

    impl UiHost for FailingHost {
        fn launch(&self, _share: bool) -> Result<String, UiError> {
            Err(UiError::Launch {
                message: "address in use".to_string(),
            })
        }
    }

    fn counting(delay: Duration) -> (UiServer, Arc<AtomicUsize>) {
        let launches = Arc::new(AtomicUsize::new(0));
        let host = CountingHost {
            launches: Arc::clone(&launches),
            delay,
        };
        (
            UiServer::new(host, DEFAULT_FALLBACK_URL, DEFAULT_SETTLE),
            launches,
        )
    }

    #[test]
    fn not_ready_before_start() {
        let (server, launches) = counting(Duration::ZERO);
        assert!(!server.is_ready());
        assert_eq!(server.url(), DEFAULT_FALLBACK_URL);
        assert_eq!(launches.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn start_reports_host_url() {
        let (server, _) = counting(Duration::ZERO);
        assert_eq!(server.start(false), "http://127.0.0.1:7860");
        assert!(server.is_ready());
    }

    #[test]
    fn start_launches_once() {
        let (server, launches) = counting(Duration::ZERO);
        let first = server.start(true);
        let second = server.start(false);

        assert_eq!(first, "https://example.invalid/share");
        assert_eq!(second, first);
        assert_eq!(launches.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn slow_host_yields_fallback() {
        let launches = Arc::new(AtomicUsize::new(0));
        let host = CountingHost {
            launches,
            delay: Duration::from_millis(500),
        };
        let server = UiServer::new(host, "http://placeholder", Duration::from_millis(10));

        assert_eq!(server.start(false), "http://placeholder");
        assert!(!server.is_ready());
    }

    #[test]
    fn failed_host_yields_fallback() {
        let server = UiServer::new(FailingHost, DEFAULT_FALLBACK_URL, DEFAULT_SETTLE);
        assert_eq!(server.start(true), DEFAULT_FALLBACK_URL);
        assert!(!server.is_ready());
    }
}
