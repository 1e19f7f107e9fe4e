//! Operation counters and structured logging setup.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Counts genome operations performed by a process.
pub struct Metrics {
    created: AtomicU64,
    mutated: AtomicU64,
    bred: AtomicU64,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            created: AtomicU64::new(0),
            mutated: AtomicU64::new(0),
            bred: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record_created(&self) {
        self.created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_mutated(&self) {
        self.mutated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_bred(&self) {
        self.bred.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn created(&self) -> u64 {
        self.created.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn mutated(&self) -> u64 {
        self.mutated.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn bred(&self) -> u64 {
        self.bred.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Emits the counters as one structured event.
    pub fn log_summary(&self) {
        tracing::info!(
            created = self.created(),
            mutated = self.mutated(),
            bred = self.bred(),
            elapsed_ms = self.elapsed().as_millis() as u64,
            "Genome operations"
        );
    }
}

/// Initialize tracing subscriber for logging.
///
/// `RUST_LOG` overrides the default `info` level.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish(),
    )
    .ok();
}
