//! Input routing and the per-frame step-resolution loop.
//!
//! The engine owns no state. It takes the session, decides which resolver a
//! key press or frame tick belongs to, and advances the step index when a
//! resolver reports completion. The `StepRun` slot is swapped out for the
//! duration of a dispatch so resolvers can borrow the session mutably.

use std::mem;

use rand::Rng;

use crate::catalog::{Step, DISHES};
use crate::keys::Key;
use crate::resolvers::{self, cook, flow, rhythm, scoop, stirbar, tally, StepRun};
use crate::scoring::{apply_penalty, award_step_points, PenaltyKind};
use crate::session::{Phase, Session, WinCondition, COLOR_BAD, COLOR_GOOD, COLOR_WARN};
use crate::session::DISH_COUNTDOWN_SECS;

const SERVE_MULT: f64 = 1.0;
const DISH_BONUS: u32 = 1000;
const DISH_COMBO_BONUS: u32 = 2;

/// Master-chef jackpot, armed by a flawless plating combo and paid on serve
/// when the dish-wide flavor and streak meters are high enough.
const MASTER_CHEF_FLAVOR: f64 = 16.0;
const MASTER_CHEF_STREAK: u32 = 10;
const MASTER_CHEF_BONUS: u32 = 1500;

/// Route one key-down event. `now` is a monotonic timestamp in seconds.
pub fn handle_key(s: &mut Session, key: Key, now: f64) {
    match s.phase {
        Phase::Menu => {
            if key == Key::Enter {
                s.start();
            }
        }
        Phase::DishSelect => match key {
            Key::Digit(d) if (1..=DISHES.len() as u8).contains(&d) => {
                s.load_dish(usize::from(d) - 1);
                if s.config.scan_enabled {
                    s.phase = Phase::Scan;
                    s.set_alert("SCAN YOUR INGREDIENTS", COLOR_WARN, 1.0);
                } else {
                    s.begin_play();
                }
            }
            Key::Enter => {
                let index = s.random_dish_index();
                s.load_dish(index);
                if s.config.scan_enabled {
                    s.phase = Phase::Scan;
                    s.set_alert("SCAN YOUR INGREDIENTS", COLOR_WARN, 1.0);
                } else {
                    s.begin_play();
                }
            }
            _ => {}
        },
        Phase::Scan => handle_scan_key(s, key),
        Phase::GameOver | Phase::Win => {
            if key == Key::Enter {
                s.phase = Phase::Menu;
            }
        }
        Phase::Playing => handle_play_key(s, key, now),
    }
}

/// Key-up only clears the held set; resolvers sample it on their next tick.
pub fn handle_key_up(s: &mut Session, key: Key) {
    s.held.remove(&key);
}

fn handle_scan_key(s: &mut Session, key: Key) {
    match key {
        Key::Digit(d) => {
            if s.scan.buffer.len() < 4 {
                s.scan.buffer.push((b'0' + d) as char);
            }
        }
        Key::Backspace => {
            s.scan.buffer.pop();
        }
        Key::Enter => {
            let entered: u16 = s.scan.buffer.parse().unwrap_or(0);
            s.scan.buffer.clear();
            let hit = s
                .dish()
                .ingredients
                .iter()
                .position(|ing| ing.id() == entered)
                .filter(|&pos| !s.scan.scanned[pos]);
            match hit {
                Some(pos) => {
                    s.scan.scanned[pos] = true;
                    s.push_beep(720.0, 0.07);
                    if s.scan.all_scanned() {
                        s.start_dish_countdown(DISH_COUNTDOWN_SECS);
                        s.begin_play();
                    }
                }
                None => {
                    s.set_alert("UNKNOWN INGREDIENT ID", COLOR_BAD, 0.8);
                    s.push_beep(170.0, 0.12);
                }
            }
        }
        _ => {}
    }
}

fn handle_play_key(s: &mut Session, key: Key, now: f64) {
    // Held keys feed the stir window, scoop fill, and heat hold.
    if matches!(key, Key::Space | Key::Sym(_)) {
        s.held.insert(key);
    }

    // The pre-round countdown blocks gameplay input entirely.
    if s.dish_countdown > 0 {
        return;
    }

    let Some(step) = s.current_step().cloned() else {
        return;
    };
    let mut run = mem::replace(&mut s.run, StepRun::Idle);

    let done = match (&step, &mut run, key) {
        (Step::Serve, _, Key::Enter) => {
            award_step_points(s, SERVE_MULT);
            s.set_alert("SERVED!", COLOR_GOOD, 0.8);
            s.push_beep(880.0, 0.1);
            true
        }
        (Step::Serve, _, _) => {
            apply_penalty(s, PenaltyKind::WrongEnter);
            s.set_alert("PRESS ENTER TO SERVE", COLOR_BAD, 0.8);
            false
        }
        (Step::Flow(spec), StepRun::Flow(r), key) => flow::handle(s, spec, r, key, now),
        (_, _, Key::Enter) => {
            apply_penalty(s, PenaltyKind::WrongEnter);
            s.set_alert("NOT READY TO SERVE!", COLOR_BAD, 0.8);
            false
        }
        (Step::Cook(_), _, Key::Sym(_)) => {
            apply_penalty(s, PenaltyKind::WrongInput);
            s.set_alert("COOKING... NO INGREDIENTS", COLOR_BAD, 0.7);
            false
        }
        (Step::Prep(spec), StepRun::Tally(r), Key::Sym(sym)) => match s.ingredient_for_sym(sym) {
            Some(ing) => tally::handle(s, spec, r, ing, true),
            None => false,
        },
        (Step::Action(spec), StepRun::Tally(r), Key::Sym(sym)) => match s.ingredient_for_sym(sym) {
            Some(ing) => tally::handle(s, spec, r, ing, false),
            None => false,
        },
        (Step::CookSeq(spec), StepRun::CookSeq(r), Key::Sym(sym)) => {
            cook::handle_seq(s, spec, r, sym)
        }
        (Step::Combo(spec), StepRun::Combo(r), Key::Sym(sym)) => rhythm::handle(s, spec, r, sym, now),
        (Step::Stir(spec), StepRun::Stir(r), Key::Sym(sym)) => {
            stirbar::handle(s, spec, r, sym);
            false
        }
        _ => false,
    };

    s.run = run;
    if done {
        advance_step(s);
    }
}

/// One animation frame. `dt` is already clamped by the caller.
pub fn tick(s: &mut Session, dt: f64, now: f64) {
    s.tick_ambient(dt);
    if s.phase != Phase::Playing || s.dish_countdown > 0 {
        return;
    }

    let Some(step) = s.current_step().cloned() else {
        return;
    };
    let mut run = mem::replace(&mut s.run, StepRun::Idle);

    let done = match (&step, &mut run) {
        (Step::Cook(spec), StepRun::Cook(r)) => cook::tick(s, spec, r, dt),
        (Step::Combo(_), StepRun::Combo(r)) => {
            rhythm::tick(s, r, now);
            false
        }
        (Step::Stir(spec), StepRun::Stir(r)) => stirbar::tick(spec, r, dt),
        (Step::Scoop(spec), StepRun::Scoop(r)) => scoop::tick(s, spec, r, dt),
        (Step::Flow(spec), StepRun::Flow(r)) => {
            flow::tick(s, spec, r, dt);
            false
        }
        _ => false,
    };

    s.run = run;
    if done {
        advance_step(s);
    }
}

/// Progress fraction of the current step, for the on-screen bar.
pub fn step_fraction(s: &Session) -> f64 {
    match s.current_step() {
        Some(step) => resolvers::progress(step, &s.run, s.step_progress),
        None => 0.0,
    }
}

fn advance_step(s: &mut Session) {
    s.step_index += 1;
    s.step_progress = 0.0;
    s.held.clear();

    let Some(step) = s.current_step() else {
        finish_dish(s);
        return;
    };
    log::debug!("step {} up: {}", s.step_index, step.noun());
    match step {
        Step::Serve => s.set_alert("SERVE NOW: PRESS ENTER", COLOR_WARN, 1.0),
        Step::Cook(_) => s.set_alert("COOKING...", COLOR_WARN, 0.8),
        step => {
            let text = format!("NEXT: {}", step.label());
            s.set_alert(&text, COLOR_WARN, 0.9);
        }
    }
    s.run = StepRun::for_step(&s.steps[s.step_index], &mut s.rng);
}

fn finish_dish(s: &mut Session) {
    s.score += DISH_BONUS;
    s.combo += DISH_COMBO_BONUS;
    s.set_alert("DISH COMPLETE! +1000", COLOR_GOOD, 1.1);
    s.push_beep(990.0, 0.12);

    if s.master_chef_armed && s.flavor >= MASTER_CHEF_FLAVOR && s.best_streak >= MASTER_CHEF_STREAK
    {
        s.score += MASTER_CHEF_BONUS;
        s.set_alert("MASTER CHEF! +1500", COLOR_GOOD, 1.4);
        s.push_beep(1180.0, 0.16);
        log::info!("master chef bonus paid");
    }

    s.completed.insert(s.dish().name);
    s.run = StepRun::Idle;

    match s.config.win {
        WinCondition::SingleDish => s.win(),
        WinCondition::AllUniqueDishes => {
            let remaining: Vec<usize> = DISHES
                .iter()
                .enumerate()
                .filter(|(_, d)| !s.completed.contains(d.name))
                .map(|(i, _)| i)
                .collect();
            if remaining.is_empty() {
                s.win();
            } else {
                let pick = remaining[s.rng.random_range(0..remaining.len())];
                s.load_dish(pick);
            }
        }
    }
}
