//! Cook-step resolvers: the legacy timed cook with an optional perfect-stir
//! window, and the sequence-matching variant that replaced it.

use rand_chacha::ChaCha8Rng;

use crate::catalog::{CookSeqSpec, CookSpec};
use crate::keys::Key;
use crate::scoring::{apply_penalty, award_step_points, PenaltyKind};
use crate::session::{Session, COLOR_BAD, COLOR_GOOD, COLOR_WARN};

const PERFECT_STIR_MULT: f64 = 1.2;
const SEQ_HIT_MULT: f64 = 0.7;
const SEQ_PASS_MULT: f64 = 1.1;

/// Legacy timed cook. Progress itself accumulates on the session.
#[derive(Clone, Debug, Default)]
pub struct CookRun {
    stirred: bool,
    missed_stir: bool,
}

/// Advance the cook timer by `dt`. Returns true when the step finishes.
pub fn tick(s: &mut Session, spec: &CookSpec, run: &mut CookRun, dt: f64) -> bool {
    s.step_progress += dt / spec.time.max(0.2);
    let p = s.step_progress;

    match spec.stir_window {
        Some((lo, hi)) => {
            if !run.stirred && s.held.contains(&Key::Space) && p >= lo && p <= hi {
                run.stirred = true;
                award_step_points(s, PERFECT_STIR_MULT);
                s.push_beep(660.0, 0.08);
                s.set_alert("PERFECT STIR!", COLOR_GOOD, 0.5);
            }
            if !run.stirred && !run.missed_stir && p > hi {
                run.missed_stir = true;
                apply_penalty(s, PenaltyKind::WrongStir);
                s.set_alert("MISSED STIR!", COLOR_BAD, 0.7);
            }
        }
        None => {
            if s.held.contains(&Key::Space) && p < 1.0 {
                apply_penalty(s, PenaltyKind::WrongStir);
                s.set_alert("NO STIR NEEDED", COLOR_BAD, 0.55);
                // Drop the held state so one press costs one penalty.
                s.held.remove(&Key::Space);
            }
        }
    }

    if p >= 1.0 {
        s.set_alert("COOKED! SERVE NEXT", COLOR_WARN, 0.8);
        return true;
    }
    false
}

/// Sequence-matching cook: `sequences_need` full passes of a generated key
/// run, regenerated each pass.
#[derive(Clone, Debug)]
pub struct CookSeqRun {
    pub seq: Vec<u8>,
    pub idx: usize,
    pub seqs_done: u32,
}

impl CookSeqRun {
    pub fn new(spec: &CookSeqSpec, rng: &mut ChaCha8Rng) -> Self {
        Self {
            seq: super::rhythm::gen_sequence(spec.seq_len, None, rng),
            idx: 0,
            seqs_done: 0,
        }
    }

    pub fn fraction(&self, spec: &CookSeqSpec) -> f64 {
        let total = (spec.seq_len as u32 * spec.sequences_need).max(1);
        let done = self.seqs_done * spec.seq_len as u32 + self.idx as u32;
        f64::from(done) / f64::from(total)
    }
}

/// Resolve one symbol press against the expected sequence head.
pub fn handle_seq(s: &mut Session, spec: &CookSeqSpec, run: &mut CookSeqRun, sym: u8) -> bool {
    if run.seq.get(run.idx) == Some(&sym) {
        run.idx += 1;
        award_step_points(s, SEQ_HIT_MULT);
        if run.idx >= run.seq.len() {
            run.seqs_done += 1;
            if run.seqs_done >= spec.sequences_need {
                s.set_alert("SEQUENCE COMPLETE!", COLOR_GOOD, 0.7);
                award_step_points(s, SEQ_PASS_MULT);
                return true;
            }
            run.idx = 0;
            run.seq = super::rhythm::gen_sequence(spec.seq_len, None, &mut s.rng);
            s.set_alert("AGAIN! NEW SEQUENCE", COLOR_WARN, 0.8);
        }
    } else {
        apply_penalty(s, PenaltyKind::WrongInput);
        if spec.reset_on_miss {
            run.idx = 0;
        }
    }
    false
}
