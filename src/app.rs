//! Browser glue: canvas + HUD setup, keyboard listeners, the animation loop,
//! and the wall-clock interval. This is the only module that talks to the
//! DOM; game logic stays behind the effect queue.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::engine;
use crate::keys;
use crate::leaderboard::{self, Entry};
use crate::render;
use crate::session::{Config, Effect, Session};
use crate::audio;

const CANVAS_W: u32 = 960;
const CANVAS_H: u32 = 600;

/// Frame delta clamp; a backgrounded tab must not fast-forward the wok.
const MAX_DT: f64 = 0.05;

struct App {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    session: Session,
    scores: Vec<Entry>,
    last_ts: Option<f64>,
    clock_handle: Option<i32>,
}

thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

pub fn boot() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id("wh-canvas") {
        el.dyn_into()?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id("wh-canvas");
        c.set_width(CANVAS_W);
        c.set_height(CANVAS_H);
        c.set_attribute("style", "position:fixed; left:50%; top:50%; transform:translate(-50%,-50%); box-shadow:0 0 32px 0 rgba(0,0,0,0.25); border-radius:14px; border:2px solid #222; background:#17120e; z-index:20;").ok();
        doc.body().unwrap().append_child(&c)?;
        c
    };
    let ctx: CanvasRenderingContext2d = canvas.get_context("2d")?.unwrap().dyn_into()?;
    ctx.set_text_align("center");

    ensure_hud(&doc)?;

    let perf_now = win.performance().map(|p| p.now()).unwrap_or(0.0);
    let seed = (perf_now * 1000.0) as u64 | 1;
    let scores = win
        .local_storage()
        .ok()
        .flatten()
        .and_then(|st| st.get_item(leaderboard::STORAGE_KEY).ok().flatten());
    let app = App {
        canvas,
        ctx,
        session: Session::new(Config::default(), seed),
        scores: leaderboard::decode(scores.as_deref()),
        last_ts: None,
        clock_handle: None,
    };
    APP.with(|cell| cell.replace(Some(app)));

    // Keyboard listeners. OS auto-repeat is skipped; the held set already
    // models keys being down.
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            if evt.repeat() {
                return;
            }
            let Some(key) = keys::from_dom_key(&evt.key()) else {
                return;
            };
            evt.prevent_default();
            let now = window()
                .and_then(|w| w.performance())
                .map(|p| p.now() / 1000.0)
                .unwrap_or(0.0);
            APP.with(|cell| {
                if let Some(app) = cell.borrow_mut().as_mut() {
                    engine::handle_key(&mut app.session, key, now);
                }
            });
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            let Some(key) = keys::from_dom_key(&evt.key()) else {
                return;
            };
            APP.with(|cell| {
                if let Some(app) = cell.borrow_mut().as_mut() {
                    engine::handle_key_up(&mut app.session, key);
                }
            });
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    start_frame_loop();
    log::info!("wok hero booted");
    Ok(())
}

fn ensure_hud(doc: &Document) -> Result<(), JsValue> {
    let specs = [
        ("wh-score", "SCORE 0", "left:12px;"),
        ("wh-combo", "COMBO x0", "left:190px;"),
        ("wh-time", "TIME 180", "left:360px;"),
    ];
    for (id, text, pos) in specs {
        if doc.get_element_by_id(id).is_none() {
            if let Some(body) = doc.body() {
                let div = doc.create_element("div")?;
                div.set_id(id);
                div.set_text_content(Some(text));
                div.set_attribute("style", &format!("position:fixed; top:10px; {pos} font-family:'Fira Code', monospace; font-size:15px; padding:4px 8px; background:rgba(0,0,0,0.42); border:1px solid #333; border-radius:6px; color:#ffd166; z-index:45; letter-spacing:0.5px;")).ok();
                body.append_child(&div)?;
            }
        }
    }
    Ok(())
}

fn start_frame_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        APP.with(|cell| {
            if let Some(app) = cell.borrow_mut().as_mut() {
                frame(app, ts);
            }
        });
        if let Some(w) = window() {
            let _ =
                w.request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(w) = window() {
        let _ = w.request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}

fn frame(app: &mut App, ts: f64) {
    let dt = match app.last_ts {
        Some(last) => ((ts - last) / 1000.0).clamp(0.0, MAX_DT),
        None => 0.0,
    };
    app.last_ts = Some(ts);

    engine::tick(&mut app.session, dt, ts / 1000.0);

    for effect in app.session.drain_effects() {
        match effect {
            Effect::Beep { freq, dur } => audio::beep(freq, dur),
            Effect::ClockStart => start_clock(app),
            Effect::SessionOver { score, win: _ } => finish_session(app, score),
        }
    }

    let fraction = engine::step_fraction(&app.session);
    render::draw(&app.ctx, &app.canvas, &app.session, fraction, &app.scores);
    update_hud(&app.session);
}

fn update_hud(s: &Session) {
    if let Some(doc) = window().and_then(|w| w.document()) {
        if let Some(el) = doc.get_element_by_id("wh-score") {
            el.set_text_content(Some(&format!("SCORE {}", s.score)));
        }
        if let Some(el) = doc.get_element_by_id("wh-combo") {
            el.set_text_content(Some(&format!("COMBO x{}", s.combo)));
        }
        if let Some(el) = doc.get_element_by_id("wh-time") {
            el.set_text_content(Some(&format!("TIME {}", s.time)));
        }
    }
}

/// One-second wall clock, independent of the animation loop so tab jank
/// never stretches the round timer.
fn start_clock(app: &mut App) {
    let Some(win) = window() else { return };
    if let Some(handle) = app.clock_handle.take() {
        win.clear_interval_with_handle(handle);
    }
    let closure = Closure::wrap(Box::new(move || {
        APP.with(|cell| {
            if let Some(app) = cell.borrow_mut().as_mut() {
                app.session.clock_tick();
            }
        });
    }) as Box<dyn FnMut()>);
    match win.set_interval_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        1000,
    ) {
        Ok(handle) => app.clock_handle = Some(handle),
        Err(_) => log::warn!("could not start the round clock"),
    }
    closure.forget();
}

fn finish_session(app: &mut App, score: u32) {
    if let Some(win) = window() {
        if let Some(handle) = app.clock_handle.take() {
            win.clear_interval_with_handle(handle);
        }
    }

    // ISO split keeps the table readable without pulling in a time crate.
    let iso: String = js_sys::Date::new_0().to_iso_string().into();
    let date = iso.get(..10).unwrap_or("").to_owned();
    let time = iso.get(11..19).unwrap_or("").to_owned();
    leaderboard::insert(&mut app.scores, Entry { score, date, time });

    if let Some(storage) = window().and_then(|w| w.local_storage().ok().flatten()) {
        storage
            .set_item(leaderboard::STORAGE_KEY, &leaderboard::encode(&app.scores))
            .ok();
    }
}
