//! Run metrics and structured logging.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Progress counters for one run.
pub struct Metrics {
    step_count: AtomicU64,
    total_exited: AtomicU64,
    total_respawned: AtomicU64,
    log_interval: u64,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new(10_000)
    }
}

impl Metrics {
    /// Creates a collector that logs every `log_interval` steps.
    #[must_use]
    pub fn new(log_interval: u64) -> Self {
        Self {
            step_count: AtomicU64::new(0),
            total_exited: AtomicU64::new(0),
            total_respawned: AtomicU64::new(0),
            log_interval: log_interval.max(1),
            start_time: Instant::now(),
        }
    }

    /// Records a completed step.
    pub fn record_step(
        &self,
        time: f64,
        kinetic_energy: f64,
        total_exited: u64,
        total_respawned: u64,
    ) {
        let step = self.step_count.fetch_add(1, Ordering::Relaxed) + 1;
        self.total_exited.store(total_exited, Ordering::Relaxed);
        self.total_respawned.store(total_respawned, Ordering::Relaxed);

        if step % self.log_interval == 0 {
            tracing::info!(
                step,
                time,
                kinetic_energy,
                exited = total_exited,
                respawned = total_respawned,
                elapsed_ms = self.elapsed().as_millis() as u64,
                "Simulation step"
            );
        }
    }

    #[must_use]
    pub fn step_count(&self) -> u64 {
        self.step_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn total_exited(&self) -> u64 {
        self.total_exited.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn total_respawned(&self) -> u64 {
        self.total_respawned.load(Ordering::Relaxed)
    }

    /// Wall-clock time since the collector was created.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Steps per wall-clock second so far.
    #[must_use]
    pub fn steps_per_second(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            self.step_count() as f64 / secs
        } else {
            0.0
        }
    }
}

/// Initialize tracing subscriber for logging.
///
/// Honours `RUST_LOG`; defaults to `info`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .finish(),
    )
    .ok();
}
