// Native integration tests: full game sessions driven through the engine
// without any wasm/browser APIs.

use wok_hero::catalog::Ingredient;
use wok_hero::engine;
use wok_hero::keys::Key;
use wok_hero::leaderboard::{self, Entry};
use wok_hero::resolvers::{FlowPhase, StepRun};
use wok_hero::session::{Config, Effect, Phase, Session};

fn no_scan() -> Config {
    Config {
        scan_enabled: false,
        ..Config::default()
    }
}

fn sym_for(s: &Session, ing: Ingredient) -> u8 {
    s.key_map.iter().position(|&i| i == ing).unwrap() as u8
}

/// Press the key the active combo expects: an armed cue first, otherwise the
/// next symbol in the sequence.
fn combo_press(s: &mut Session, now: f64) {
    let sym = match &s.run {
        StepRun::Combo(r) => r.cue.map(|c| c.sym).unwrap_or_else(|| r.seq[r.idx]),
        other => panic!("expected a combo run, got {other:?}"),
    };
    engine::handle_key(s, Key::Sym(sym), now);
    engine::handle_key_up(s, Key::Sym(sym));
}

#[test]
fn curry_feng_full_session_via_the_scan_screen() {
    let mut s = Session::new(Config::default(), 1234);
    engine::handle_key(&mut s, Key::Enter, 0.0);
    assert_eq!(s.phase, Phase::DishSelect);

    engine::handle_key(&mut s, Key::Digit(2), 0.0);
    assert_eq!(s.phase, Phase::Scan);

    for ing in s.dish().ingredients {
        for b in ing.id().to_string().bytes() {
            engine::handle_key(&mut s, Key::Digit(b - b'0'), 0.0);
        }
        engine::handle_key(&mut s, Key::Enter, 0.0);
    }
    assert_eq!(s.phase, Phase::Playing);
    assert!(
        s.drain_effects().contains(&Effect::ClockStart),
        "entering play starts the wall clock"
    );

    // Countdown runs on frame time.
    assert!(s.dish_countdown > 0);
    for _ in 0..8 {
        engine::tick(&mut s, 0.5, 0.0);
    }
    assert_eq!(s.dish_countdown, 0);

    let garlic = sym_for(&s, Ingredient::Garlic);
    let ginger = sym_for(&s, Ingredient::Ginger);
    for _ in 0..4 {
        engine::handle_key(&mut s, Key::Sym(garlic), 0.0);
        engine::handle_key_up(&mut s, Key::Sym(garlic));
    }
    for _ in 0..4 {
        engine::handle_key(&mut s, Key::Sym(ginger), 0.0);
        engine::handle_key_up(&mut s, Key::Sym(ginger));
    }
    assert_eq!(s.step_index, 1, "prep finished");
    assert!(s.score > 0);
    assert_eq!(s.combo, 9, "eight adds plus the step bonus");
}

#[test]
fn chendol_scoop_stir_and_topping_play_through() {
    let mut s = Session::new(no_scan(), 555);
    s.start();
    engine::handle_key(&mut s, Key::Digit(6), 0.0);
    assert_eq!(s.dish().name, "CHENDOL");
    s.dish_countdown = 0;

    // Scoop: hold Q + SPACE until the meter tops out.
    engine::handle_key(&mut s, Key::Sym(0), 0.0);
    engine::handle_key(&mut s, Key::Space, 0.0);
    for _ in 0..100 {
        engine::tick(&mut s, 0.05, 0.0);
        if s.step_index == 1 {
            break;
        }
    }
    assert_eq!(s.step_index, 1, "scoop completed");
    assert!(s.held.is_empty(), "held keys cleared on step change");

    // Stir: force the pointer into the zone for each hit.
    for _ in 0..3 {
        let target = match &mut s.run {
            StepRun::Stir(r) => {
                r.pointer = (r.zone.0 + r.zone.1) / 2.0;
                r.target
            }
            other => panic!("expected a stir run, got {other:?}"),
        };
        engine::handle_key(&mut s, Key::Sym(target), 0.0);
        engine::handle_key_up(&mut s, Key::Sym(target));
    }
    // Finish animation delays the advance.
    assert_eq!(s.step_index, 1);
    for _ in 0..30 {
        engine::tick(&mut s, 0.05, 0.0);
        if s.step_index == 2 {
            break;
        }
    }
    assert_eq!(s.step_index, 2, "stir completed after the finish animation");

    let red_bean = sym_for(&s, Ingredient::RedBean);
    engine::handle_key(&mut s, Key::Sym(red_bean), 0.0);
    engine::handle_key_up(&mut s, Key::Sym(red_bean));
    engine::handle_key(&mut s, Key::Sym(red_bean), 0.0);
    assert_eq!(s.step_index, 3);

    let before = s.score;
    engine::handle_key(&mut s, Key::Enter, 0.0);
    assert!(s.score > before + 1000, "serve pay plus the dish bonus");
    assert!(s.completed.contains("CHENDOL"));
}

#[test]
fn ayam_buah_keluak_all_four_combo_processes() {
    let mut s = Session::new(no_scan(), 321);
    s.start();
    engine::handle_key(&mut s, Key::Digit(1), 0.0);
    assert_eq!(s.dish().name, "AYAM BUAH KELUAK");
    s.dish_countdown = 0;

    let mut now = 10.0;
    for step in 0..4 {
        let mut guard = 0;
        while s.step_index == step {
            combo_press(&mut s, now);
            now += 0.2;
            guard += 1;
            assert!(guard < 200, "combo step {step} never completed");
        }
    }
    assert_eq!(s.step_index, 4, "all combos done, serve is up");
    assert!(s.best_streak > 0);
    assert!(s.flavor > 0.0);
    assert!(s.master_chef_armed, "a flawless plating chain arms the bonus");

    engine::handle_key(&mut s, Key::Enter, now);
    assert!(s.completed.contains("AYAM BUAH KELUAK"));
    assert_eq!(s.phase, Phase::Playing, "next dish loads right away");
}

#[test]
fn chilli_crab_sequence_and_flow_play_through() {
    let mut s = Session::new(no_scan(), 808);
    s.start();
    engine::handle_key(&mut s, Key::Digit(5), 0.0);
    assert_eq!(s.dish().name, "CHILLI CRAB");
    s.dish_countdown = 0;

    let chili = sym_for(&s, Ingredient::Chili);
    let garlic = sym_for(&s, Ingredient::Garlic);
    for _ in 0..3 {
        engine::handle_key(&mut s, Key::Sym(chili), 0.0);
        engine::handle_key_up(&mut s, Key::Sym(chili));
    }
    for _ in 0..3 {
        engine::handle_key(&mut s, Key::Sym(garlic), 0.0);
        engine::handle_key_up(&mut s, Key::Sym(garlic));
    }
    assert_eq!(s.step_index, 1, "pounding done");

    // Wok-toss: two full passes of the generated sequence.
    let mut guard = 0;
    while s.step_index == 1 {
        let sym = match &s.run {
            StepRun::CookSeq(r) => r.seq[r.idx],
            other => panic!("expected a sequence run, got {other:?}"),
        };
        engine::handle_key(&mut s, Key::Sym(sym), 0.0);
        engine::handle_key_up(&mut s, Key::Sym(sym));
        guard += 1;
        assert!(guard < 20);
    }
    assert_eq!(s.step_index, 2, "gravy flow is up");

    // Flow: intro elapses, rhythm phase, rest, heat hold, final confirm.
    engine::tick(&mut s, 2.1, 0.0);
    let mut now = 50.0;
    let mut guard = 0;
    loop {
        let sym = match &s.run {
            StepRun::Flow(r) => match &r.phase {
                FlowPhase::Combo { run } => run.seq[run.idx],
                FlowPhase::Transition { .. } => break,
                other => panic!("unexpected flow phase {other:?}"),
            },
            other => panic!("expected a flow run, got {other:?}"),
        };
        engine::handle_key(&mut s, Key::Sym(sym), now);
        engine::handle_key_up(&mut s, Key::Sym(sym));
        now += 0.2;
        guard += 1;
        assert!(guard < 20);
    }
    engine::tick(&mut s, 1.6, now); // rest

    engine::handle_key(&mut s, Key::Space, now);
    for _ in 0..60 {
        engine::tick(&mut s, 0.1, now);
        if matches!(&s.run, StepRun::Flow(r) if matches!(r.phase, FlowPhase::Final { .. })) {
            break;
        }
    }
    assert!(
        matches!(&s.run, StepRun::Flow(r) if matches!(r.phase, FlowPhase::Final { .. })),
        "held space builds heat to the final confirm"
    );
    engine::handle_key(&mut s, Key::Enter, now);
    assert_eq!(s.step_index, 3, "flow complete, serve is up");

    engine::handle_key(&mut s, Key::Enter, now);
    assert!(s.completed.contains("CHILLI CRAB"));
}

#[test]
fn running_out_of_time_records_a_loss() {
    let mut s = Session::new(no_scan(), 42);
    s.start();
    engine::handle_key(&mut s, Key::Digit(2), 0.0);
    s.drain_effects();

    for _ in 0..s.config.start_time {
        s.clock_tick();
    }
    assert_eq!(s.phase, Phase::GameOver);
    let over = s
        .drain_effects()
        .into_iter()
        .find_map(|e| match e {
            Effect::SessionOver { score, win } => Some((score, win)),
            _ => None,
        })
        .expect("session-over effect");
    assert_eq!(over, (s.score, false));

    // The glue records the run on the local table.
    let mut table = Vec::new();
    leaderboard::insert(
        &mut table,
        Entry {
            score: over.0,
            date: "2025-01-01".to_owned(),
            time: "18:00:00".to_owned(),
        },
    );
    assert_eq!(table.len(), 1);

    engine::handle_key(&mut s, Key::Enter, 0.0);
    assert_eq!(s.phase, Phase::Menu);
}
