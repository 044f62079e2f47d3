//! Session state: one explicitly constructed record owning everything a
//! running game needs. Created once, reset on restart, never shared across
//! concurrent sessions (single-player, single-threaded).
//!
//! Rendering and audio read from this state but never mutate it; collaborator
//! notifications (beeps, session end, clock start) leave through the effect
//! queue so game logic stays free of browser calls.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::catalog::{Dish, Ingredient, Step, DISHES};
use crate::keys::Key;
use crate::resolvers::StepRun;

pub const COLOR_GOOD: &str = "rgba(128, 255, 114, 0.92)";
pub const COLOR_BAD: &str = "rgba(255, 89, 94, 0.92)";
pub const COLOR_WARN: &str = "rgba(255, 224, 102, 0.92)";

pub const START_TIME: i32 = 180;
pub const DISH_COUNTDOWN_SECS: u32 = 3;
/// Shake units shed per second (visual feedback only, never scored).
const SHAKE_DECAY: f64 = 48.0;
const SHAKE_HZ: f64 = 18.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Menu,
    DishSelect,
    Scan,
    Playing,
    GameOver,
    Win,
}

/// Dish progression policy. The catalog historically shipped both designs;
/// this is an explicit configuration choice, not a guess.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WinCondition {
    /// Win once every unique dish in the catalog has been completed.
    AllUniqueDishes,
    /// Completing the current dish ends the session in a win immediately.
    SingleDish,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub win: WinCondition,
    pub scan_enabled: bool,
    pub start_time: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            win: WinCondition::AllUniqueDishes,
            scan_enabled: true,
            start_time: START_TIME,
        }
    }
}

/// Hero alert: short text banner with a decaying time-to-live.
#[derive(Clone, Debug)]
pub struct Alert {
    pub text: String,
    pub color: &'static str,
    pub ttl: f64,
}

impl Alert {
    fn empty() -> Self {
        Self {
            text: String::new(),
            color: COLOR_WARN,
            ttl: 0.0,
        }
    }
}

/// Ledger row for one ingredient across the whole dish.
#[derive(Clone, Copy, Debug, Default)]
pub struct Tally {
    pub done: u32,
    pub need: u32,
}

/// Ingredient-ID entry sub-screen state.
#[derive(Clone, Debug, Default)]
pub struct ScanState {
    pub buffer: String,
    pub scanned: [bool; 4],
}

impl ScanState {
    pub fn all_scanned(&self) -> bool {
        self.scanned.iter().all(|b| *b)
    }
}

/// Fire-and-forget notifications for the browser glue. Failures on the
/// receiving side must never affect game logic.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    Beep { freq: f32, dur: f64 },
    ClockStart,
    SessionOver { score: u32, win: bool },
}

pub struct Session {
    pub config: Config,
    pub phase: Phase,
    pub score: u32,
    pub combo: u32,
    /// Countdown seconds; decremented only by the 1 s wall-clock tick.
    pub time: i32,

    pub dish_index: usize,
    /// Session-local step copies so per-step counters never touch the catalog.
    pub steps: Vec<Step>,
    pub step_index: usize,
    /// Fractional position within the current timed step (0..~1.15).
    pub step_progress: f64,
    pub run: StepRun,
    /// Per-dish random permutation: symbol index -> ingredient.
    pub key_map: Vec<Ingredient>,
    pub ing_counts: Vec<(Ingredient, Tally)>,

    pub held: HashSet<Key>,
    pub alert: Alert,

    pub shake: f64,
    pub shake_offset: (f64, f64),
    shake_sample_t: f64,

    /// Blocking pre-round countdown; gameplay input is ignored while > 0.
    pub dish_countdown: u32,
    countdown_accum: f64,

    pub completed: HashSet<&'static str>,
    /// Accumulated flavor meter across the current dish (master-chef fuel).
    pub flavor: f64,
    pub best_streak: u32,
    pub master_chef_armed: bool,

    pub scan: ScanState,
    pub effects: Vec<Effect>,
    pub rng: ChaCha8Rng,
}

impl Session {
    pub fn new(config: Config, seed: u64) -> Self {
        Self {
            phase: Phase::Menu,
            score: 0,
            combo: 0,
            time: config.start_time,
            dish_index: 0,
            steps: Vec::new(),
            step_index: 0,
            step_progress: 0.0,
            run: StepRun::Idle,
            key_map: Vec::new(),
            ing_counts: Vec::new(),
            held: HashSet::new(),
            alert: Alert::empty(),
            shake: 0.0,
            shake_offset: (0.0, 0.0),
            shake_sample_t: 0.0,
            dish_countdown: 0,
            countdown_accum: 0.0,
            completed: HashSet::new(),
            flavor: 0.0,
            best_streak: 0,
            master_chef_armed: false,
            scan: ScanState::default(),
            effects: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            config,
        }
    }

    pub fn dish(&self) -> &'static Dish {
        &DISHES[self.dish_index]
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.steps.get(self.step_index)
    }

    /// Begin a fresh run: scores zeroed, clock reloaded, dish selection open.
    pub fn start(&mut self) {
        self.score = 0;
        self.combo = 0;
        self.time = self.config.start_time;
        self.completed.clear();
        self.shake = 0.0;
        self.alert = Alert::empty();
        self.effects.clear();
        self.phase = Phase::DishSelect;
        log::info!("session started");
    }

    pub fn random_dish_index(&mut self) -> usize {
        self.rng.random_range(0..DISHES.len())
    }

    /// Clone the dish template into session-local state and arm the blocking
    /// dish countdown. Also (re)shuffles the per-dish key map.
    pub fn load_dish(&mut self, index: usize) {
        self.dish_index = index;
        let dish = self.dish();
        self.steps = dish.steps.to_vec();
        self.key_map = dish.ingredients.to_vec();
        self.key_map.shuffle(&mut self.rng);

        self.step_index = 0;
        self.step_progress = 0.0;
        self.held.clear();
        self.flavor = 0.0;
        self.best_streak = 0;
        self.master_chef_armed = false;
        self.scan = ScanState::default();

        self.init_ing_counts();
        self.run = StepRun::for_step(&self.steps[0], &mut self.rng);
        self.start_dish_countdown(DISH_COUNTDOWN_SECS);
        log::info!("dish loaded: {}", dish.name);
    }

    fn init_ing_counts(&mut self) {
        let mut counts: Vec<(Ingredient, Tally)> = Vec::new();
        for step in &self.steps {
            if let Step::Prep(spec) | Step::Action(spec) = step {
                for &(ing, need) in spec.counts {
                    match counts.iter_mut().find(|(i, _)| *i == ing) {
                        Some((_, t)) => t.need += need,
                        None => counts.push((ing, Tally { done: 0, need })),
                    }
                }
            }
        }
        self.ing_counts = counts;
    }

    /// Bump the global ledger for one added ingredient, clamped to its need.
    pub fn ledger_inc(&mut self, ing: Ingredient) {
        if let Some((_, t)) = self.ing_counts.iter_mut().find(|(i, _)| *i == ing) {
            t.done = (t.done + 1).min(t.need);
        }
    }

    pub fn ingredient_for_sym(&self, sym: u8) -> Option<Ingredient> {
        self.key_map.get(sym as usize).copied()
    }

    /// Physical key label currently mapped to an ingredient, for render.
    pub fn key_label_for(&self, ing: Ingredient) -> &'static str {
        self.key_map
            .iter()
            .position(|&i| i == ing)
            .map(|idx| crate::keys::KEY_LABELS[idx])
            .unwrap_or("?")
    }

    pub fn begin_play(&mut self) {
        self.phase = Phase::Playing;
        self.effects.push(Effect::ClockStart);
        log::info!("playing: {}", self.dish().name);
    }

    pub fn start_dish_countdown(&mut self, seconds: u32) {
        self.dish_countdown = seconds;
        self.countdown_accum = 0.0;
        self.set_alert(&format!("NEXT DISH IN {seconds}"), COLOR_WARN, 0.95);
        self.push_beep(520.0, 0.06);
    }

    /// One wall-clock second. Runs from an interval timer independent of the
    /// animation loop; it only touches the shared `time` field and the phase.
    pub fn clock_tick(&mut self) {
        if self.phase != Phase::Playing {
            return;
        }
        self.time = (self.time - 1).max(0);
        if self.time == 0 {
            self.game_over();
        }
    }

    pub fn game_over(&mut self) {
        if matches!(self.phase, Phase::GameOver | Phase::Win) {
            return;
        }
        self.phase = Phase::GameOver;
        self.effects.push(Effect::SessionOver {
            score: self.score,
            win: false,
        });
        log::info!("game over at score {}", self.score);
    }

    pub fn win(&mut self) {
        if matches!(self.phase, Phase::GameOver | Phase::Win) {
            return;
        }
        self.phase = Phase::Win;
        let text = match self.config.win {
            WinCondition::AllUniqueDishes => "ALL UNIQUE DISHES COMPLETE!",
            WinCondition::SingleDish => "DISH SERVED! YOU WIN!",
        };
        self.set_alert(text, COLOR_GOOD, 1.2);
        self.effects.push(Effect::SessionOver {
            score: self.score,
            win: true,
        });
        log::info!("win at score {}", self.score);
    }

    pub fn set_alert(&mut self, text: &str, color: &'static str, ttl: f64) {
        self.alert.text = text.to_owned();
        self.alert.color = color;
        self.alert.ttl = ttl;
    }

    pub fn push_beep(&mut self, freq: f32, dur: f64) {
        self.effects.push(Effect::Beep { freq, dur });
    }

    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Ambient per-frame integration: dish countdown, alert decay, shake.
    /// Step-specific time integration lives in the engine tick.
    pub fn tick_ambient(&mut self, dt: f64) {
        if self.alert.ttl > 0.0 {
            self.alert.ttl = (self.alert.ttl - dt).max(0.0);
        }

        // The countdown only runs in play; a dish armed behind the scan
        // screen must not tick down before the player gets through it.
        if self.phase == Phase::Playing && self.dish_countdown > 0 {
            self.countdown_accum += dt;
            if self.countdown_accum >= 1.0 {
                self.countdown_accum = 0.0;
                self.dish_countdown -= 1;
                if self.dish_countdown > 0 {
                    self.set_alert(
                        &format!("NEXT DISH IN {}", self.dish_countdown),
                        COLOR_WARN,
                        0.95,
                    );
                    self.push_beep(520.0, 0.06);
                } else {
                    self.set_alert("GO!", COLOR_GOOD, 0.7);
                    self.push_beep(820.0, 0.08);
                }
            }
        }

        if self.shake > 0.0 {
            self.shake = (self.shake - SHAKE_DECAY * dt).max(0.0);
        }
        self.shake_sample_t += dt;
        if self.shake_sample_t >= 1.0 / SHAKE_HZ {
            self.shake_sample_t = 0.0;
            let sx: f64 = self.rng.random::<f64>() - 0.5;
            let sy: f64 = self.rng.random::<f64>() - 0.5;
            self.shake_offset = (sx * self.shake, sy * self.shake);
        }
    }
}
