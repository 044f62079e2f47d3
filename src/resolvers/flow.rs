//! Multi-phase flow resolver: intro -> rhythm combo -> transition ->
//! heat-hold -> final confirm.
//!
//! Each phase is an explicit state; ticks return stay-or-advance and
//! transitions happen only on elapsed time or explicit input, never through
//! callback chaining. The combo phase embeds the rhythm resolver.

use crate::catalog::{ComboMode, ComboSpec, FlowSpec};
use crate::keys::Key;
use crate::scoring::{apply_penalty, award_step_points, PenaltyKind};
use crate::session::{Session, COLOR_BAD, COLOR_GOOD, COLOR_WARN};

use super::rhythm::{self, ComboRun};

const FINAL_MULT: f64 = 1.0;
/// Where a timed-out final confirm drops the heat back to.
const REHEAT_FILL: f64 = 0.5;

#[derive(Clone, Debug)]
pub enum FlowPhase {
    Intro { left: f64 },
    Combo { run: ComboRun },
    Transition { left: f64 },
    HeatHold { fill: f64 },
    Final { left: f64 },
}

#[derive(Clone, Debug)]
pub struct FlowRun {
    pub phase: FlowPhase,
}

impl FlowRun {
    pub fn new(spec: &FlowSpec) -> Self {
        Self {
            phase: FlowPhase::Intro {
                left: spec.intro_time,
            },
        }
    }

    pub fn fraction(&self) -> f64 {
        match &self.phase {
            FlowPhase::Intro { .. } => 0.05,
            FlowPhase::Combo { run } => 0.1 + 0.4 * run.fraction(1),
            FlowPhase::Transition { .. } => 0.55,
            FlowPhase::HeatHold { fill } => 0.6 + 0.35 * fill.min(1.0),
            FlowPhase::Final { .. } => 0.97,
        }
    }
}

/// The embedded rhythm round borrows plain combo semantics.
fn combo_spec(spec: &FlowSpec) -> ComboSpec {
    ComboSpec {
        process: "Flow: rhythm phase",
        label: "Match the rhythm",
        mode: ComboMode::Sizzle,
        target_beats: spec.combo_beats,
        time: spec.combo_beats as f64 * spec.beat_window,
        beat_window: spec.beat_window,
        base_pattern: None,
        cue_every: None,
        cue_window: 0.0,
        perfect_power_up: false,
        allow_master_chef: false,
        reset_on_miss: false,
        sequences_need: 1,
    }
}

/// Advance timers and the heat level. Flow steps never complete from a tick;
/// the final confirm is explicit input.
pub fn tick(s: &mut Session, spec: &FlowSpec, run: &mut FlowRun, dt: f64) {
    match &mut run.phase {
        FlowPhase::Intro { left } => {
            *left -= dt;
            if *left <= 0.0 {
                let combo = ComboRun::new(spec.combo_beats as usize, None, &mut s.rng);
                run.phase = FlowPhase::Combo { run: combo };
                s.set_alert("FOLLOW THE RHYTHM!", COLOR_WARN, 0.9);
            }
        }
        FlowPhase::Combo { .. } => {}
        FlowPhase::Transition { left } => {
            *left -= dt;
            if *left <= 0.0 {
                run.phase = FlowPhase::HeatHold { fill: 0.0 };
                s.set_alert("HOLD SPACE TO BUILD HEAT!", COLOR_WARN, 1.0);
            }
        }
        FlowPhase::HeatHold { fill } => {
            if s.held.contains(&Key::Space) {
                *fill += spec.heat_rate * dt;
            } else {
                *fill = (*fill - spec.heat_decay * dt).max(0.0);
            }
            if *fill >= 1.0 {
                run.phase = FlowPhase::Final {
                    left: spec.final_window,
                };
                s.set_alert("NOW! PRESS ENTER!", COLOR_GOOD, spec.final_window);
                s.push_beep(840.0, 0.08);
            }
        }
        FlowPhase::Final { left } => {
            *left -= dt;
            if *left <= 0.0 {
                apply_penalty(s, PenaltyKind::WrongEnter);
                s.set_alert("TOO SLOW - REHEAT!", COLOR_BAD, 0.8);
                run.phase = FlowPhase::HeatHold { fill: REHEAT_FILL };
            }
        }
    }
}

/// Resolve input for the current phase. Returns true when the flow finishes.
pub fn handle(s: &mut Session, spec: &FlowSpec, run: &mut FlowRun, key: Key, now: f64) -> bool {
    match &mut run.phase {
        FlowPhase::Combo { run: combo } => {
            match key {
                Key::Sym(sym) => {
                    let cspec = combo_spec(spec);
                    if rhythm::handle(s, &cspec, combo, sym, now) {
                        run.phase = FlowPhase::Transition {
                            left: spec.transition_time,
                        };
                        s.set_alert("GREAT! LET IT REST...", COLOR_GOOD, 0.9);
                    }
                }
                Key::Enter => apply_penalty(s, PenaltyKind::WrongEnter),
                _ => {}
            }
            false
        }
        FlowPhase::Final { .. } => match key {
            Key::Enter => {
                award_step_points(s, FINAL_MULT);
                s.set_alert("FLOW COMPLETE!", COLOR_GOOD, 0.8);
                true
            }
            Key::Sym(_) => {
                apply_penalty(s, PenaltyKind::WrongEnter);
                false
            }
            _ => false,
        },
        // Waiting phases ignore symbols; Enter is still a wrong confirm.
        _ => {
            if key == Key::Enter {
                apply_penalty(s, PenaltyKind::WrongEnter);
            }
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Config;

    const SPEC: FlowSpec = FlowSpec {
        label: "Build the gravy",
        intro_time: 1.0,
        combo_beats: 4,
        beat_window: 0.4,
        transition_time: 1.0,
        heat_rate: 1.0,
        heat_decay: 0.5,
        final_window: 1.0,
    };

    fn session() -> Session {
        let mut s = Session::new(Config::default(), 61);
        s.start();
        s.load_dish(4);
        s.dish_countdown = 0;
        s
    }

    fn drive_to_combo(s: &mut Session, run: &mut FlowRun) {
        tick(s, &SPEC, run, 1.1);
        assert!(matches!(run.phase, FlowPhase::Combo { .. }));
    }

    #[test]
    fn phases_advance_in_order() {
        let mut s = session();
        let mut run = FlowRun::new(&SPEC);
        assert!(matches!(run.phase, FlowPhase::Intro { .. }));
        drive_to_combo(&mut s, &mut run);

        // Play the embedded combo to completion.
        let mut now = 10.0;
        loop {
            let sym = match &run.phase {
                FlowPhase::Combo { run: c } => c.seq[c.idx],
                _ => break,
            };
            handle(&mut s, &SPEC, &mut run, Key::Sym(sym), now);
            now += 0.2;
        }
        assert!(matches!(run.phase, FlowPhase::Transition { .. }));

        tick(&mut s, &SPEC, &mut run, 1.1);
        assert!(matches!(run.phase, FlowPhase::HeatHold { .. }));

        s.held.insert(Key::Space);
        tick(&mut s, &SPEC, &mut run, 1.1);
        assert!(matches!(run.phase, FlowPhase::Final { .. }));

        assert!(handle(&mut s, &SPEC, &mut run, Key::Enter, now));
    }

    #[test]
    fn final_window_expiry_reverts_to_heat_hold() {
        let mut s = session();
        s.score = 500;
        let mut run = FlowRun {
            phase: FlowPhase::Final { left: 0.3 },
        };
        tick(&mut s, &SPEC, &mut run, 0.5);
        assert!(matches!(run.phase, FlowPhase::HeatHold { .. }));
        assert_eq!(s.score, 500 - 160, "timeout costs a wrong-enter penalty");
    }

    #[test]
    fn heat_decays_without_the_hold() {
        let mut s = session();
        let mut run = FlowRun {
            phase: FlowPhase::HeatHold { fill: 0.8 },
        };
        tick(&mut s, &SPEC, &mut run, 0.4);
        match run.phase {
            FlowPhase::HeatHold { fill } => assert!((fill - 0.6).abs() < 1e-9),
            _ => panic!("still holding heat"),
        }
    }

    #[test]
    fn enter_during_waiting_phase_is_penalized() {
        let mut s = session();
        s.score = 500;
        let mut run = FlowRun::new(&SPEC);
        assert!(!handle(&mut s, &SPEC, &mut run, Key::Enter, 10.0));
        assert_eq!(s.score, 500 - 160);
    }
}
