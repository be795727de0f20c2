#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared CLI utilities for the infrastructure toolchain.
//!
//! [`IndicatifProgress`] renders dataset generation as one bar across all
//! entities and prints a line as each entity phase (road assets, work
//! orders, crews, ...) completes. [`init_logger`] routes `log` output
//! through `indicatif-log-bridge` so log lines do not tear through a bar
//! mid-redraw.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use cmc_infra_generate::progress::ProgressCallback;
use indicatif::{ProgressBar, ProgressStyle};

pub use indicatif::MultiProgress;

/// The generation phase currently running.
struct Phase {
    label: String,
    start_pos: u64,
    started: Instant,
}

/// Line printed above the bar when a phase completes, e.g.
/// `"  Generated 60 road assets (60 entities in 12ms)"`.
fn phase_summary(label: &str, entities: u64, elapsed: Duration) -> String {
    let label = label
        .strip_prefix("Generating ")
        .map_or_else(|| label.to_string(), |rest| format!("Generated {rest}"));
    format!("  {label} ({entities} entities in {elapsed:.0?})")
}

/// An `indicatif` [`ProgressBar`] that implements [`ProgressCallback`] for
/// dataset generation.
pub struct IndicatifProgress {
    bar: ProgressBar,
    /// Style to switch to once `set_total()` provides the entity count.
    bar_style: ProgressStyle,
    phase: Mutex<Option<Phase>>,
}

impl IndicatifProgress {
    fn new(bar: ProgressBar) -> Self {
        let bar_style = ProgressStyle::with_template(
            "  {msg:<32} {wide_bar:.cyan/dim} {pos}/{len} entities [{elapsed_precise}]",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");

        Self {
            bar,
            bar_style,
            phase: Mutex::new(None),
        }
    }

    /// Creates a bar for dataset generation. It spins until
    /// [`ProgressCallback::set_total()`] reports how many entities to expect.
    #[must_use]
    pub fn entities_bar(multi: &MultiProgress, message: &str) -> Arc<dyn ProgressCallback> {
        let bar = multi.add(ProgressBar::new_spinner());
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());

        Arc::new(Self::new(bar))
    }

    /// Prints the summary of the running phase, if any, and starts `next`.
    fn close_phase(&self, next: Option<String>) {
        let Ok(mut phase) = self.phase.lock() else {
            return;
        };
        let pos = self.bar.position();
        if let Some(done) = phase.take() {
            self.bar.println(phase_summary(
                &done.label,
                pos.saturating_sub(done.start_pos),
                done.started.elapsed(),
            ));
        }
        *phase = next.map(|label| Phase {
            label,
            start_pos: pos,
            started: Instant::now(),
        });
    }
}

impl ProgressCallback for IndicatifProgress {
    fn set_total(&self, total: u64) {
        self.bar.set_length(total);
        self.bar.set_position(0);
        self.bar.set_style(self.bar_style.clone());
    }

    fn inc(&self, delta: u64) {
        self.bar.inc(delta);
    }

    fn set_message(&self, msg: String) {
        self.close_phase(Some(msg.clone()));
        self.bar.set_message(msg);
    }

    fn finish(&self, msg: String) {
        self.close_phase(None);
        self.bar.finish_with_message(msg);
    }
}

/// Initializes the global logger wrapped in `indicatif-log-bridge`.
///
/// Returns the [`MultiProgress`] that all progress bars must be added to.
#[must_use]
pub fn init_logger() -> MultiProgress {
    let multi = MultiProgress::new();

    let logger = pretty_env_logger::formatted_builder()
        .parse_env("RUST_LOG")
        .build();
    let level = logger.filter();

    // Already set when called twice in one process.
    indicatif_log_bridge::LogWrapper::new(multi.clone(), logger)
        .try_init()
        .ok();

    log::set_max_level(level);

    multi
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_summary_reports_completed_entities() {
        assert_eq!(
            phase_summary("Generating 60 road assets", 60, Duration::from_millis(12)),
            "  Generated 60 road assets (60 entities in 12ms)"
        );
        assert_eq!(
            phase_summary("Loading snapshot", 0, Duration::ZERO),
            "  Loading snapshot (0 entities in 0ns)"
        );
    }

    #[test]
    fn phases_advance_with_messages() {
        let progress = IndicatifProgress::new(ProgressBar::hidden());
        progress.set_total(30);

        progress.set_message("Generating 10 road assets".to_string());
        progress.inc(10);
        progress.set_message("Generating 20 work orders".to_string());
        {
            let phase = progress.phase.lock().unwrap();
            let phase = phase.as_ref().unwrap();
            assert_eq!(phase.label, "Generating 20 work orders");
            assert_eq!(phase.start_pos, 10);
        }

        progress.inc(20);
        progress.finish("Generated 30 entities".to_string());
        assert!(progress.phase.lock().unwrap().is_none());
        assert!(progress.bar.is_finished());
        assert_eq!(progress.bar.position(), 30);
    }
}
