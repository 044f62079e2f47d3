//! Sweet-spot timing bar resolver.
//!
//! A pointer bounces across [0,1] as a triangle wave, integrated with
//! delta-time so the motion is frame-rate independent. The flashed target
//! key must be pressed while the pointer sits inside the per-round sweet
//! zone.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::catalog::StirSpec;
use crate::keys::SYM_COUNT;
use crate::scoring::{apply_penalty, award_step_points, PenaltyKind};
use crate::session::{Session, COLOR_GOOD};

const HIT_MULT: f64 = 0.9;
/// Finish animation delay before the step advances.
const FINISH_ANIM_SECS: f64 = 0.8;

#[derive(Clone, Debug)]
pub struct StirRun {
    pub pointer: f64,
    dir: f64,
    pub zone: (f64, f64),
    pub target: u8,
    pub hits: u32,
    /// Remaining finish-animation time once all hits landed.
    finishing: Option<f64>,
}

impl StirRun {
    pub fn new(spec: &StirSpec, rng: &mut ChaCha8Rng) -> Self {
        let center = rng.random_range(0.30..0.70);
        let half = spec.zone_width / 2.0;
        Self {
            pointer: 0.0,
            dir: 1.0,
            zone: ((center - half).max(0.05), (center + half).min(0.95)),
            target: rng.random_range(0..SYM_COUNT),
            hits: 0,
            finishing: None,
        }
    }

    pub fn in_zone(&self) -> bool {
        self.pointer >= self.zone.0 && self.pointer <= self.zone.1
    }

    pub fn fraction(&self, spec: &StirSpec) -> f64 {
        if self.finishing.is_some() {
            return 1.0;
        }
        f64::from(self.hits) / f64::from(spec.hits_need.max(1))
    }
}

/// Integrate the pointer; returns true once the finish animation elapses.
pub fn tick(spec: &StirSpec, run: &mut StirRun, dt: f64) -> bool {
    if let Some(left) = &mut run.finishing {
        *left -= dt;
        return *left <= 0.0;
    }

    run.pointer += run.dir * spec.pointer_speed * dt;
    // Reflect at the bounds, preserving overshoot.
    while run.pointer > 1.0 || run.pointer < 0.0 {
        if run.pointer > 1.0 {
            run.pointer = 2.0 - run.pointer;
            run.dir = -1.0;
        } else {
            run.pointer = -run.pointer;
            run.dir = 1.0;
        }
    }
    false
}

/// Resolve one symbol press against the target key and sweet zone.
pub fn handle(s: &mut Session, spec: &StirSpec, run: &mut StirRun, sym: u8) {
    if run.finishing.is_some() {
        return;
    }
    if sym != run.target {
        apply_penalty(s, PenaltyKind::WrongInput);
        return;
    }
    if !run.in_zone() {
        apply_penalty(s, PenaltyKind::WrongStir);
        return;
    }

    run.hits += 1;
    award_step_points(s, HIT_MULT);
    s.push_beep(660.0, 0.08);
    if run.hits >= spec.hits_need {
        run.finishing = Some(FINISH_ANIM_SECS);
        s.set_alert("PERFECT SWIRL!", COLOR_GOOD, 0.8);
    } else {
        run.target = s.rng.random_range(0..SYM_COUNT);
    }
}
