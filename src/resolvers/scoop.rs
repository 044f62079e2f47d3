//! Hold-to-fill resolver for scoop-style steps.
//!
//! The fill level rises while every required key is concurrently held and
//! decays at a slower rate otherwise. Crossing a stage threshold pays a
//! one-time bonus; the last stage completes the step.

use crate::catalog::ScoopSpec;
use crate::scoring::award_step_points;
use crate::session::{Session, COLOR_GOOD, COLOR_WARN};

pub const STAGE_THRESHOLDS: [f64; 2] = [0.5, 1.0];
const STAGE_MULT: f64 = 0.7;
const FILL_MAX: f64 = 1.15;

#[derive(Clone, Debug, Default)]
pub struct ScoopRun {
    pub fill: f64,
    pub stage: usize,
}

impl ScoopRun {
    pub fn fraction(&self) -> f64 {
        self.fill.min(1.0)
    }
}

/// Integrate fill/decay for one frame. Returns true when the final stage is
/// reached.
pub fn tick(s: &mut Session, spec: &ScoopSpec, run: &mut ScoopRun, dt: f64) -> bool {
    let held = spec.holds.iter().all(|k| s.held.contains(k));
    if held {
        run.fill = (run.fill + spec.fill_rate * dt).min(FILL_MAX);
    } else {
        run.fill = (run.fill - spec.decay_rate * dt).max(0.0);
    }

    while run.stage < STAGE_THRESHOLDS.len() && run.fill >= STAGE_THRESHOLDS[run.stage] {
        run.stage += 1;
        award_step_points(s, STAGE_MULT);
        if run.stage == STAGE_THRESHOLDS.len() {
            s.set_alert("SCOOP COMPLETE!", COLOR_GOOD, 0.8);
            return true;
        }
        s.set_alert("HALFWAY THERE, KEEP HOLDING!", COLOR_WARN, 0.8);
    }
    false
}
