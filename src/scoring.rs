//! Penalty and reward policy.
//!
//! Invalid input is a normal outcome of play, never an error: every violation
//! maps to a fixed (score loss, time loss) pair, an unconditional combo reset,
//! and a bump of the screen-shake feedback value. Rewards ride an escalating
//! combo curve so an unbroken streak is worth strictly more each time.

use crate::session::{Session, COLOR_BAD};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PenaltyKind {
    WrongInput,
    WrongEnter,
    WrongStir,
}

pub const WRONG_INPUT_SCORE: u32 = 120;
pub const WRONG_ENTER_SCORE: u32 = 160;
pub const WRONG_STIR_SCORE: u32 = 160;

pub const WRONG_INPUT_TIME: i32 = 0;
pub const WRONG_ENTER_TIME: i32 = 1;
pub const WRONG_STIR_TIME: i32 = 0;

pub const PENALTY_SHAKE: f64 = 6.0;
/// Any penalty collapses the combo multiplier back to base.
pub const COMBO_RESET: bool = true;

pub fn penalty_cost(kind: PenaltyKind) -> (u32, i32) {
    match kind {
        PenaltyKind::WrongInput => (WRONG_INPUT_SCORE, WRONG_INPUT_TIME),
        PenaltyKind::WrongEnter => (WRONG_ENTER_SCORE, WRONG_ENTER_TIME),
        PenaltyKind::WrongStir => (WRONG_STIR_SCORE, WRONG_STIR_TIME),
    }
}

/// Deterministic state transition; always succeeds. Score and time clamp at
/// zero, shake only ever rises (it decays in the frame tick).
pub fn apply_penalty(s: &mut Session, kind: PenaltyKind) {
    let (score_loss, time_loss) = penalty_cost(kind);
    s.score = s.score.saturating_sub(score_loss);
    s.time = (s.time - time_loss).max(0);
    if COMBO_RESET {
        s.combo = 0;
    }
    s.shake = s.shake.max(PENALTY_SHAKE);
    s.push_beep(170.0, 0.08);
    s.set_alert("WRONG!", COLOR_BAD, 0.55);
}

/// `combo += 1; score += floor((120 + combo*25) * mult)`.
pub fn award_step_points(s: &mut Session, mult: f64) {
    s.combo += 1;
    s.score += ((120 + s.combo * 25) as f64 * mult).floor() as u32;
    s.push_beep(720.0, 0.08);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Config, Session};

    fn session() -> Session {
        Session::new(Config::default(), 7)
    }

    #[test]
    fn wrong_enter_scenario() {
        let mut s = session();
        s.score = 500;
        s.time = 20;
        s.combo = 4;
        apply_penalty(&mut s, PenaltyKind::WrongEnter);
        assert_eq!(s.score, 340);
        assert_eq!(s.time, 19);
        assert_eq!(s.combo, 0);
    }

    #[test]
    fn penalties_clamp_at_zero() {
        let mut s = session();
        s.score = 50;
        s.time = 0;
        apply_penalty(&mut s, PenaltyKind::WrongEnter);
        assert_eq!(s.score, 0);
        assert_eq!(s.time, 0);
    }

    #[test]
    fn penalty_raises_shake_monotonically() {
        let mut s = session();
        s.shake = 9.0;
        apply_penalty(&mut s, PenaltyKind::WrongInput);
        assert_eq!(s.shake, 9.0);
        s.shake = 1.0;
        apply_penalty(&mut s, PenaltyKind::WrongStir);
        assert_eq!(s.shake, PENALTY_SHAKE);
    }

    #[test]
    fn award_is_monotonic_in_combo() {
        let mut s = session();
        award_step_points(&mut s, 1.0);
        let first = s.score;
        award_step_points(&mut s, 1.0);
        let second = s.score - first;
        assert!(second > first, "streaked award must grow: {first} vs {second}");
    }

    #[test]
    fn award_applies_multiplier_floor() {
        let mut s = session();
        award_step_points(&mut s, 0.4);
        // combo becomes 1: floor((120 + 25) * 0.4) = 58
        assert_eq!(s.score, 58);
    }
}
