use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use pdb2png::engine::progress::{Progress, ProgressCallback, RenderPhase};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

/// Shows the render phases as a single spinner line on stderr.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
    completed: Arc<Mutex<Vec<RenderPhase>>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    /// A handler that draws nothing; used when logging is silenced.
    pub fn hidden() -> Self {
        Self::with_target(ProgressDrawTarget::hidden())
    }

    fn with_target(target: ProgressDrawTarget) -> Self {
        let pb = ProgressBar::new_spinner()
            .with_style(Self::spinner_style())
            .with_message("Starting...");
        pb.set_draw_target(target);

        Self {
            pb: Arc::new(Mutex::new(pb)),
            completed: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb_clone = self.pb.clone();
        let completed = self.completed.clone();

        Box::new(move |progress: Progress| {
            let Ok(pb_guard) = pb_clone.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::PhaseStart(phase) => {
                    pb_guard.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                    pb_guard.set_message(format!("{}...", phase.label()));
                }
                Progress::PhaseFinish(phase) => {
                    if let Ok(mut done) = completed.lock() {
                        done.push(phase);
                    }
                    pb_guard.set_message(format!("✓ {}", phase.label()));
                    if phase == RenderPhase::Saving {
                        pb_guard.disable_steady_tick();
                        pb_guard.finish_and_clear();
                    }
                }
                Progress::Message(msg) => {
                    pb_guard.println(format!("  {}", msg));
                }
            }
        })
    }

    /// Stops the spinner, e.g. after a failed render.
    pub fn abandon(&self) {
        if let Ok(pb) = self.pb.lock() {
            pb.disable_steady_tick();
            pb.finish_and_clear();
        }
    }

    pub fn completed_phases(&self) -> Vec<RenderPhase> {
        self.completed
            .lock()
            .map(|done| done.clone())
            .unwrap_or_default()
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}
