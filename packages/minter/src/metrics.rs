//! Prometheus metrics (lock-free atomics).

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

pub static METRICS: Metrics = Metrics::new();

pub struct Metrics {
    // --- Traffic ---
    pub mint_total: AtomicU64,
    pub mint_success: AtomicU64,
    pub mint_error: AtomicU64,
    pub generate_retries: AtomicU64,

    // --- Latency (μs) ---
    pub generate_duration_us_sum: AtomicU64,
    pub upload_duration_us_sum: AtomicU64,
    pub mint_duration_us_max: AtomicU64,
}

impl Metrics {
    const fn new() -> Self {
        Self {
            mint_total: AtomicU64::new(0),
            mint_success: AtomicU64::new(0),
            mint_error: AtomicU64::new(0),
            generate_retries: AtomicU64::new(0),
            generate_duration_us_sum: AtomicU64::new(0),
            upload_duration_us_sum: AtomicU64::new(0),
            mint_duration_us_max: AtomicU64::new(0),
        }
    }

    pub fn record_generate_duration(&self, start: Instant) {
        let us = start.elapsed().as_micros() as u64;
        self.generate_duration_us_sum.fetch_add(us, Ordering::Relaxed);
    }

    pub fn record_upload_duration(&self, start: Instant) {
        let us = start.elapsed().as_micros() as u64;
        self.upload_duration_us_sum.fetch_add(us, Ordering::Relaxed);
    }

    pub fn record_mint_duration(&self, start: Instant) {
        let us = start.elapsed().as_micros() as u64;
        // CAS loop for max tracking
        let mut cur = self.mint_duration_us_max.load(Ordering::Relaxed);
        while us > cur {
            match self.mint_duration_us_max.compare_exchange_weak(
                cur,
                us,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(actual) => cur = actual,
            }
        }
    }

    /// Render in Prometheus text exposition format.
    pub fn render(&self, minting: bool) -> String {
        let mint_total = self.mint_total.load(Ordering::Relaxed);
        let mint_success = self.mint_success.load(Ordering::Relaxed);
        let mint_error = self.mint_error.load(Ordering::Relaxed);
        let generate_retries = self.generate_retries.load(Ordering::Relaxed);
        let generate_dur_sum = self.generate_duration_us_sum.load(Ordering::Relaxed);
        let upload_dur_sum = self.upload_duration_us_sum.load(Ordering::Relaxed);
        let mint_dur_max = self.mint_duration_us_max.swap(0, Ordering::Relaxed);

        // Convert μs to seconds for Prometheus conventions
        let generate_dur_sum_s = generate_dur_sum as f64 / 1_000_000.0;
        let upload_dur_sum_s = upload_dur_sum as f64 / 1_000_000.0;
        let mint_dur_max_s = mint_dur_max as f64 / 1_000_000.0;

        format!(
            "\
# HELP minter_mint_total Total mint requests received.\n\
# TYPE minter_mint_total counter\n\
minter_mint_total {mint_total}\n\
# HELP minter_mint_success_total Successful mints.\n\
# TYPE minter_mint_success_total counter\n\
minter_mint_success_total {mint_success}\n\
# HELP minter_mint_error_total Failed mints.\n\
# TYPE minter_mint_error_total counter\n\
minter_mint_error_total {mint_error}\n\
# HELP minter_generate_retries_total Warm-up (503) responses from the model backend.\n\
# TYPE minter_generate_retries_total counter\n\
minter_generate_retries_total {generate_retries}\n\
# HELP minter_generate_duration_seconds_sum Total image generation time (seconds).\n\
# TYPE minter_generate_duration_seconds_sum counter\n\
minter_generate_duration_seconds_sum {generate_dur_sum_s:.6}\n\
# HELP minter_upload_duration_seconds_sum Total storage upload time (seconds).\n\
# TYPE minter_upload_duration_seconds_sum counter\n\
minter_upload_duration_seconds_sum {upload_dur_sum_s:.6}\n\
# HELP minter_mint_duration_seconds_max Max mint time since last scrape (seconds).\n\
# TYPE minter_mint_duration_seconds_max gauge\n\
minter_mint_duration_seconds_max {mint_dur_max_s:.6}\n\
# HELP minter_in_flight Whether a mint workflow is currently running.\n\
# TYPE minter_in_flight gauge\n\
minter_in_flight {}\n",
            u8::from(minting)
        )
    }
}
