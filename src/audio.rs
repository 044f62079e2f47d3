//! One-oscillator beeper on the Web Audio API.
//!
//! The context is created lazily on the first beep, which in practice happens
//! after a key press, so browser autoplay policies are satisfied. Every
//! failure path is swallowed: a muted game is better than a crashed one.

use std::cell::RefCell;

use web_sys::AudioContext;

const GAIN: f32 = 0.18;
const GAIN_FLOOR: f32 = 0.0001;

thread_local! {
    static AUDIO: RefCell<Option<AudioContext>> = RefCell::new(None);
}

fn with_ctx<F: FnOnce(&AudioContext)>(f: F) {
    AUDIO.with(|cell| {
        let mut slot = cell.borrow_mut();
        if slot.is_none() {
            *slot = AudioContext::new().ok();
        }
        if let Some(ctx) = slot.as_ref() {
            f(ctx);
        }
    });
}

/// Short sine blip with an exponential fade-out.
pub fn beep(freq: f32, dur: f64) {
    with_ctx(|ctx| {
        let Ok(osc) = ctx.create_oscillator() else {
            return;
        };
        let Ok(gain) = ctx.create_gain() else {
            return;
        };
        let t = ctx.current_time();
        osc.frequency().set_value(freq);
        gain.gain().set_value_at_time(GAIN, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(GAIN_FLOOR, t + dur)
            .ok();
        if osc.connect_with_audio_node(&gain).is_err() {
            return;
        }
        if gain.connect_with_audio_node(&ctx.destination()).is_err() {
            return;
        }
        osc.start().ok();
        osc.stop_with_when(t + dur).ok();
    });
}
