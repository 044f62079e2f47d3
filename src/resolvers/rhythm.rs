//! Rhythm-combo resolver for combo steps (smash / sizzle / stir / plate).
//!
//! A generated key sequence must be matched beat-by-beat. Rhythm is judged
//! from the gap between successive hit timestamps, injected by the caller so
//! the logic is deterministic under test. A late hit still advances the
//! sequence; it just pays less and does not extend the streak.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::catalog::{ComboMode, ComboSpec};
use crate::keys::{KEY_LABELS, SYM_COUNT};
use crate::scoring::{apply_penalty, award_step_points, PenaltyKind};
use crate::session::{Session, COLOR_BAD, COLOR_GOOD, COLOR_WARN};

const IN_RHYTHM_MULT: f64 = 0.9;
const LATE_MULT: f64 = 0.6;
const CUE_BONUS_MULT: f64 = 0.8;
const PASS_BONUS_MULT: f64 = 1.1;

const IN_RHYTHM_FLAVOR: f64 = 0.5;
const LATE_FLAVOR: f64 = 0.2;

const SMOOTH_MIN: f64 = -4.0;
const SMOOTH_MAX: f64 = 10.0;

const HAZARD_MISS: f64 = 1.0;
const HAZARD_CUE: f64 = 1.5;

/// Hidden key sequence worth a one-time bonus (R R Q W).
pub const SECRET_COMBO: [u8; 4] = [3, 3, 0, 1];
const SECRET_BONUS: u32 = 400;

const POWERUP_STREAK: u32 = 6;
const POWERUP_SMOOTH: f64 = 6.0;
const POWERUP_BONUS: u32 = 600;

const FLAIR_FACTOR: f64 = 0.6;
const FLAIR_BONUS: u32 = 250;

/// Generate a round's key sequence: the base pattern cycled to length, or
/// uniform random symbols.
pub fn gen_sequence(len: usize, base: Option<&[u8]>, rng: &mut ChaCha8Rng) -> Vec<u8> {
    match base {
        Some(pat) if !pat.is_empty() => (0..len).map(|i| pat[i % pat.len()] % SYM_COUNT).collect(),
        _ => (0..len).map(|_| rng.random_range(0..SYM_COUNT)).collect(),
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Cue {
    pub sym: u8,
    pub deadline: f64,
}

#[derive(Clone, Debug)]
pub struct ComboRun {
    pub seq: Vec<u8>,
    pub idx: usize,
    pub seqs_done: u32,
    pub beats_done: u32,
    pub streak: u32,
    pub smoothness: f64,
    pub last_hit_at: Option<f64>,
    /// Mode-flavored trouble meter (smoke / spill / burn), render feedback.
    pub hazard: f64,
    pub cue: Option<Cue>,
    pub secret_idx: usize,
    pub secret_used: bool,
}

impl ComboRun {
    pub fn new(len: usize, base: Option<&'static [u8]>, rng: &mut ChaCha8Rng) -> Self {
        Self {
            seq: gen_sequence(len, base, rng),
            idx: 0,
            seqs_done: 0,
            beats_done: 0,
            streak: 0,
            smoothness: 0.0,
            last_hit_at: None,
            hazard: 0.0,
            cue: None,
            secret_idx: 0,
            secret_used: false,
        }
    }

    pub fn fraction(&self, sequences_need: u32) -> f64 {
        let len = self.seq.len().max(1) as u32;
        let total = len * sequences_need.max(1);
        f64::from(self.seqs_done * len + self.idx as u32) / f64::from(total)
    }
}

fn miss_text(mode: ComboMode) -> &'static str {
    match mode {
        ComboMode::Smash => "LUMPY PASTE!",
        ComboMode::Sizzle => "SMOKE IN THE PAN!",
        ComboMode::Stir => "THE PAN BURNS!",
        ComboMode::Plate => "SPILLED THE GARNISH!",
    }
}

fn track_secret(s: &mut Session, run: &mut ComboRun, sym: u8) {
    if run.secret_used {
        return;
    }
    if SECRET_COMBO[run.secret_idx] == sym {
        run.secret_idx += 1;
        if run.secret_idx == SECRET_COMBO.len() {
            run.secret_used = true;
            run.secret_idx = 0;
            s.score += SECRET_BONUS;
            s.set_alert("SECRET COMBO!", COLOR_GOOD, 0.8);
            s.push_beep(880.0, 0.1);
        }
    } else {
        run.secret_idx = usize::from(SECRET_COMBO[0] == sym);
    }
}

fn maybe_cue(s: &mut Session, spec: &ComboSpec, run: &mut ComboRun, now: f64) {
    let Some(every) = spec.cue_every else { return };
    let total = spec.target_beats * spec.sequences_need.max(1);
    if run.cue.is_none()
        && run.beats_done > 0
        && run.beats_done < total
        && run.beats_done % every == 0
    {
        let sym = s.rng.random_range(0..SYM_COUNT);
        run.cue = Some(Cue {
            sym,
            deadline: now + spec.cue_window,
        });
        s.set_alert(
            &format!("CUE! HIT {} NOW", KEY_LABELS[sym as usize]),
            COLOR_WARN,
            spec.cue_window,
        );
        s.push_beep(600.0, 0.07);
    }
}

fn perfect_ready(spec: &ComboSpec, run: &ComboRun) -> bool {
    let total = spec.target_beats * spec.sequences_need.max(1);
    run.beats_done * 2 >= total && run.streak >= POWERUP_STREAK && run.smoothness >= POWERUP_SMOOTH
}

fn finish(s: &mut Session, spec: &ComboSpec) -> bool {
    if spec.allow_master_chef {
        s.master_chef_armed = true;
    }
    award_step_points(s, PASS_BONUS_MULT);
    s.set_alert("COMBO COMPLETE!", COLOR_GOOD, 0.8);
    true
}

/// Resolve one symbol press. Returns true when the round completes.
pub fn handle(s: &mut Session, spec: &ComboSpec, run: &mut ComboRun, sym: u8, now: f64) -> bool {
    // An active reactive cue consumes its key before the main sequence.
    if let Some(cue) = run.cue {
        if cue.sym == sym && now <= cue.deadline {
            run.cue = None;
            award_step_points(s, CUE_BONUS_MULT);
            s.push_beep(880.0, 0.08);
            s.set_alert("CUE HIT!", COLOR_GOOD, 0.5);
            return false;
        }
    }

    track_secret(s, run, sym);

    if run.seq.get(run.idx) == Some(&sym) {
        let gap = run.last_hit_at.map(|t| now - t);
        let in_rhythm = gap.is_none_or(|g| g <= spec.beat_window);
        run.last_hit_at = Some(now);
        run.idx += 1;
        run.beats_done += 1;

        if in_rhythm {
            run.streak += 1;
            s.best_streak = s.best_streak.max(run.streak);
            run.smoothness = (run.smoothness + 1.0).min(SMOOTH_MAX);
            s.flavor += IN_RHYTHM_FLAVOR;
        } else {
            run.smoothness = (run.smoothness - 0.5).max(SMOOTH_MIN);
            s.flavor += LATE_FLAVOR;
        }
        award_step_points(s, if in_rhythm { IN_RHYTHM_MULT } else { LATE_MULT });

        // Plate flair: landing the final beat inside the tight window.
        if spec.mode == ComboMode::Plate
            && run.idx >= run.seq.len()
            && run.seqs_done + 1 >= spec.sequences_need.max(1)
            && gap.is_some_and(|g| g <= spec.beat_window * FLAIR_FACTOR)
        {
            s.score += FLAIR_BONUS;
            s.set_alert("FLAIR BONUS!", COLOR_GOOD, 0.7);
            s.push_beep(980.0, 0.1);
        }

        maybe_cue(s, spec, run, now);

        if spec.perfect_power_up && perfect_ready(spec, run) {
            // Remaining beats auto-complete.
            run.beats_done = spec.target_beats * spec.sequences_need.max(1);
            run.idx = run.seq.len();
            run.seqs_done = spec.sequences_need.max(1);
            s.score += POWERUP_BONUS;
            s.set_alert("PERFECT POWER-UP!", COLOR_GOOD, 0.9);
            s.push_beep(1040.0, 0.12);
            return finish(s, spec);
        }

        if run.idx >= run.seq.len() {
            run.seqs_done += 1;
            if run.seqs_done >= spec.sequences_need.max(1) {
                return finish(s, spec);
            }
            run.idx = 0;
            run.seq = gen_sequence(run.seq.len(), spec.base_pattern, &mut s.rng);
        }
    } else {
        run.streak = 0;
        run.hazard += HAZARD_MISS;
        apply_penalty(s, PenaltyKind::WrongInput);
        s.set_alert(miss_text(spec.mode), COLOR_BAD, 0.7);
        if spec.reset_on_miss {
            run.idx = 0;
        }
    }
    false
}

/// Per-frame check: an expired cue is an automatic miss, the one failure
/// triggered by inaction rather than input.
pub fn tick(s: &mut Session, run: &mut ComboRun, now: f64) {
    if let Some(cue) = run.cue {
        if now > cue.deadline {
            run.cue = None;
            run.streak = 0;
            run.hazard += HAZARD_CUE;
            apply_penalty(s, PenaltyKind::WrongStir);
            s.set_alert("MISSED THE CUE!", COLOR_BAD, 0.7);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Config;

    fn session() -> Session {
        let mut s = Session::new(Config::default(), 31);
        s.start();
        s.load_dish(0);
        s.dish_countdown = 0;
        s
    }

    fn spec() -> ComboSpec {
        ComboSpec {
            process: "P",
            label: "L",
            mode: ComboMode::Smash,
            target_beats: 6,
            time: 8.0,
            beat_window: 0.4,
            base_pattern: None,
            cue_every: None,
            cue_window: 0.0,
            perfect_power_up: false,
            allow_master_chef: false,
            reset_on_miss: false,
            sequences_need: 1,
        }
    }

    /// Play every expected key with the given gap; returns press count.
    fn play_through(s: &mut Session, spec: &ComboSpec, run: &mut ComboRun, gap: f64) -> u32 {
        let mut now = 10.0;
        let mut presses = 0;
        loop {
            let sym = run.seq[run.idx];
            presses += 1;
            let done = handle(s, spec, run, sym, now);
            now += gap;
            if done {
                return presses;
            }
            assert!(presses < 100);
        }
    }

    #[test]
    fn n_correct_keys_complete_exactly_once() {
        let mut s = session();
        let spec = spec();
        let mut run = ComboRun::new(spec.target_beats as usize, None, &mut s.rng.clone());
        let presses = play_through(&mut s, &spec, &mut run, 0.2);
        assert_eq!(presses, 6);
        assert_eq!(run.seqs_done, 1);
    }

    #[test]
    fn late_hits_advance_but_do_not_extend_streak() {
        let mut s = session();
        let spec = spec();
        let mut run = ComboRun::new(spec.target_beats as usize, None, &mut s.rng.clone());
        let first = run.seq[0];
        handle(&mut s, &spec, &mut run, first, 10.0);
        assert_eq!(run.streak, 1);
        let second = run.seq[1];
        // 2.0 s gap is far outside the 0.4 s beat window.
        handle(&mut s, &spec, &mut run, second, 12.0);
        assert_eq!(run.idx, 2, "late hit still advances");
        assert_eq!(run.streak, 1, "late hit does not extend the streak");
    }

    #[test]
    fn wrong_key_keeps_or_rewinds_by_flag() {
        let mut s = session();
        let keep = spec();
        let mut run = ComboRun::new(keep.target_beats as usize, None, &mut s.rng.clone());
        let first = run.seq[0];
        handle(&mut s, &keep, &mut run, first, 10.0);
        let wrong = (run.seq[1] + 1) % 4;
        handle(&mut s, &keep, &mut run, wrong, 10.2);
        assert_eq!(run.idx, 1, "sequence progress kept intact on wrong input");
        assert_eq!(run.streak, 0);

        let reset = ComboSpec {
            reset_on_miss: true,
            ..spec()
        };
        let mut run = ComboRun::new(reset.target_beats as usize, None, &mut s.rng.clone());
        let first = run.seq[0];
        handle(&mut s, &reset, &mut run, first, 10.0);
        let wrong = (run.seq[1] + 1) % 4;
        handle(&mut s, &reset, &mut run, wrong, 10.2);
        assert_eq!(run.idx, 0);
    }

    #[test]
    fn expired_cue_is_an_automatic_miss() {
        let mut s = session();
        let cued = ComboSpec {
            cue_every: Some(2),
            cue_window: 1.0,
            ..spec()
        };
        let mut run = ComboRun::new(cued.target_beats as usize, None, &mut s.rng.clone());
        let mut now = 10.0;
        for _ in 0..2 {
            let sym = run.seq[run.idx];
            handle(&mut s, &cued, &mut run, sym, now);
            now += 0.2;
        }
        assert!(run.cue.is_some(), "cue scheduled after two beats");
        s.score = 500;
        run.streak = 2;
        tick(&mut s, &mut run, now + 2.0);
        assert!(run.cue.is_none());
        assert_eq!(s.score, 500 - 160, "cue expiry costs a wrong-stir penalty");
        assert_eq!(run.streak, 0);
    }

    #[test]
    fn cue_hit_consumes_cue_without_advancing_sequence() {
        let mut s = session();
        let cued = ComboSpec {
            cue_every: Some(2),
            cue_window: 1.0,
            ..spec()
        };
        let mut run = ComboRun::new(cued.target_beats as usize, None, &mut s.rng.clone());
        let mut now = 10.0;
        for _ in 0..2 {
            let sym = run.seq[run.idx];
            handle(&mut s, &cued, &mut run, sym, now);
            now += 0.2;
        }
        let cue = run.cue.expect("cue scheduled");
        let idx_before = run.idx;
        handle(&mut s, &cued, &mut run, cue.sym, now);
        assert!(run.cue.is_none());
        assert_eq!(run.idx, idx_before);
    }

    #[test]
    fn perfect_power_up_auto_completes() {
        let mut s = session();
        let power = ComboSpec {
            target_beats: 14,
            perfect_power_up: true,
            ..spec()
        };
        let mut run = ComboRun::new(power.target_beats as usize, None, &mut s.rng.clone());
        let presses = play_through(&mut s, &power, &mut run, 0.2);
        assert!(
            presses < 14,
            "power-up should fire before the natural end, got {presses}"
        );
        assert_eq!(run.beats_done, 14, "remaining beats auto-completed");
    }

    #[test]
    fn base_pattern_cycles_to_length() {
        let mut s = session();
        let seq = gen_sequence(6, Some(&[1, 2, 3, 0]), &mut s.rng);
        assert_eq!(seq, vec![1, 2, 3, 0, 1, 2]);
    }

    #[test]
    fn secret_combo_pays_once() {
        let mut s = session();
        let sneaky = ComboSpec {
            base_pattern: Some(&SECRET_COMBO),
            target_beats: 8,
            ..spec()
        };
        let mut run = ComboRun::new(8, Some(&SECRET_COMBO), &mut s.rng.clone());
        let mut now = 10.0;
        for _ in 0..4 {
            let sym = run.seq[run.idx];
            handle(&mut s, &sneaky, &mut run, sym, now);
            now += 0.2;
        }
        assert!(run.secret_used, "secret combo detected");
        let score_after = s.score;
        for _ in 0..4 {
            let sym = run.seq[run.idx];
            handle(&mut s, &sneaky, &mut run, sym, now);
            now += 0.2;
        }
        // Only regular per-beat awards after the secret has fired.
        assert!(s.score > score_after);
        assert!(run.secret_used);
    }

    #[test]
    fn plate_flair_bonus_on_tight_final_beat() {
        let spec_base = ComboSpec {
            mode: ComboMode::Plate,
            target_beats: 2,
            beat_window: 0.3,
            ..spec()
        };
        let score_with_gap = |gap: f64| {
            let mut s = session();
            let mut run = ComboRun::new(2, None, &mut s.rng.clone());
            let mut now = 10.0;
            let sym = run.seq[0];
            handle(&mut s, &spec_base, &mut run, sym, now);
            now += gap;
            let sym = run.seq[1];
            handle(&mut s, &spec_base, &mut run, sym, now);
            s.score
        };
        // 0.1 s is inside the 0.18 s flair window, 0.25 s is merely in rhythm.
        let tight = score_with_gap(0.1);
        let loose = score_with_gap(0.25);
        assert_eq!(tight - loose, FLAIR_BONUS);
    }
}
