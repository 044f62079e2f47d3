//! Canvas rendering. Pure read-side: draws one frame from the session
//! snapshot and never mutates game state.

use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::catalog::{Step, DISHES};
use crate::keys::KEY_LABELS;
use crate::leaderboard::Entry;
use crate::resolvers::{FlowPhase, StepRun};
use crate::session::{Phase, Session};

const BG: &str = "#17120e";
const PANEL: &str = "rgba(0,0,0,0.45)";
const INK: &str = "#f5e9d6";
const DIM: &str = "#9b8c77";
const ACCENT: &str = "#ffd166";
const BAR_BG: &str = "#2a2017";
const BAR_FILL: &str = "#ff9f43";
const ZONE: &str = "rgba(128,255,114,0.35)";

pub fn draw(
    ctx: &CanvasRenderingContext2d,
    canvas: &HtmlCanvasElement,
    s: &Session,
    fraction: f64,
    scores: &[Entry],
) {
    let w = canvas.width() as f64;
    let h = canvas.height() as f64;

    ctx.set_fill_style_str(BG);
    ctx.fill_rect(0.0, 0.0, w, h);

    ctx.save();
    ctx.translate(s.shake_offset.0, s.shake_offset.1).ok();

    match s.phase {
        Phase::Menu => draw_menu(ctx, w, h),
        Phase::DishSelect => draw_dish_select(ctx, w, h),
        Phase::Scan => draw_scan(ctx, s, w, h),
        Phase::Playing => draw_playing(ctx, s, fraction, w, h),
        Phase::GameOver => draw_end(ctx, s, scores, w, h, "TIME'S UP!"),
        Phase::Win => draw_end(ctx, s, scores, w, h, "KITCHEN CLEARED!"),
    }

    draw_alert(ctx, s, w, h);
    ctx.restore();
}

fn draw_menu(ctx: &CanvasRenderingContext2d, w: f64, h: f64) {
    ctx.set_text_align("center");
    ctx.set_fill_style_str(ACCENT);
    ctx.set_font("64px 'Fira Code', monospace");
    ctx.fill_text("WOK HERO", w / 2.0, h * 0.38).ok();
    ctx.set_fill_style_str(INK);
    ctx.set_font("22px 'Fira Code', monospace");
    ctx.fill_text("a hawker-stall cooking game", w / 2.0, h * 0.47)
        .ok();
    ctx.set_fill_style_str(DIM);
    ctx.fill_text("press ENTER to start", w / 2.0, h * 0.62).ok();
}

fn draw_dish_select(ctx: &CanvasRenderingContext2d, w: f64, h: f64) {
    ctx.set_text_align("center");
    ctx.set_fill_style_str(ACCENT);
    ctx.set_font("36px 'Fira Code', monospace");
    ctx.fill_text("CHOOSE A DISH", w / 2.0, h * 0.16).ok();

    ctx.set_font("20px 'Fira Code', monospace");
    for (i, dish) in DISHES.iter().enumerate() {
        let y = h * 0.28 + i as f64 * 44.0;
        ctx.set_fill_style_str(INK);
        ctx.fill_text(&format!("[{}] {}", i + 1, dish.name), w / 2.0, y)
            .ok();
        ctx.set_fill_style_str(DIM);
        ctx.set_font("14px 'Fira Code', monospace");
        ctx.fill_text(dish.culture, w / 2.0, y + 18.0).ok();
        ctx.set_font("20px 'Fira Code', monospace");
    }
    ctx.set_fill_style_str(DIM);
    ctx.set_font("16px 'Fira Code', monospace");
    ctx.fill_text("ENTER = surprise me", w / 2.0, h * 0.92).ok();
}

fn draw_scan(ctx: &CanvasRenderingContext2d, s: &Session, w: f64, h: f64) {
    ctx.set_text_align("center");
    ctx.set_fill_style_str(ACCENT);
    ctx.set_font("30px 'Fira Code', monospace");
    ctx.fill_text("SCAN YOUR INGREDIENTS", w / 2.0, h * 0.18)
        .ok();

    ctx.set_font("20px 'Fira Code', monospace");
    for (i, ing) in s.dish().ingredients.iter().enumerate() {
        let y = h * 0.32 + i as f64 * 40.0;
        let mark = if s.scan.scanned[i] { "[x]" } else { "[ ]" };
        ctx.set_fill_style_str(if s.scan.scanned[i] { ACCENT } else { INK });
        ctx.fill_text(
            &format!("{} {} (#{})", mark, ing.label(), ing.id()),
            w / 2.0,
            y,
        )
        .ok();
    }

    ctx.set_fill_style_str(PANEL);
    ctx.fill_rect(w / 2.0 - 90.0, h * 0.72, 180.0, 44.0);
    ctx.set_fill_style_str(ACCENT);
    ctx.set_font("26px 'Fira Code', monospace");
    ctx.fill_text(&format!("{}_", s.scan.buffer), w / 2.0, h * 0.72 + 31.0)
        .ok();
    ctx.set_fill_style_str(DIM);
    ctx.set_font("14px 'Fira Code', monospace");
    ctx.fill_text("type the id, ENTER to scan", w / 2.0, h * 0.85)
        .ok();
}

fn draw_playing(ctx: &CanvasRenderingContext2d, s: &Session, fraction: f64, w: f64, h: f64) {
    ctx.set_text_align("center");

    // Dish header
    ctx.set_fill_style_str(ACCENT);
    ctx.set_font("26px 'Fira Code', monospace");
    ctx.fill_text(s.dish().name, w / 2.0, 46.0).ok();

    if s.dish_countdown > 0 {
        ctx.set_fill_style_str(INK);
        ctx.set_font("96px 'Fira Code', monospace");
        ctx.fill_text(&s.dish_countdown.to_string(), w / 2.0, h * 0.5)
            .ok();
        return;
    }

    let Some(step) = s.current_step() else { return };

    // Step label + progress bar
    ctx.set_fill_style_str(INK);
    ctx.set_font("22px 'Fira Code', monospace");
    ctx.fill_text(step.label(), w / 2.0, 92.0).ok();

    let bar_w = w * 0.6;
    let bar_x = (w - bar_w) / 2.0;
    ctx.set_fill_style_str(BAR_BG);
    ctx.fill_rect(bar_x, 108.0, bar_w, 14.0);
    ctx.set_fill_style_str(BAR_FILL);
    ctx.fill_rect(bar_x, 108.0, bar_w * fraction.clamp(0.0, 1.0), 14.0);

    match (step, &s.run) {
        (Step::Stir(_), StepRun::Stir(r)) => draw_stir_bar(ctx, r, w, h),
        (Step::Combo(_), StepRun::Combo(r)) => {
            draw_sequence(ctx, &r.seq, r.idx, w, h);
            if let Some(cue) = &r.cue {
                ctx.set_fill_style_str(ACCENT);
                ctx.set_font("28px 'Fira Code', monospace");
                ctx.fill_text(
                    &format!("CUE! {}", KEY_LABELS[cue.sym as usize]),
                    w / 2.0,
                    h * 0.42,
                )
                .ok();
            }
        }
        (Step::CookSeq(_), StepRun::CookSeq(r)) => draw_sequence(ctx, &r.seq, r.idx, w, h),
        (Step::Scoop(_), StepRun::Scoop(r)) => draw_fill_meter(ctx, r.fill, w, h, "HOLD!"),
        (Step::Flow(_), StepRun::Flow(r)) => match &r.phase {
            FlowPhase::Combo { run } => draw_sequence(ctx, &run.seq, run.idx, w, h),
            FlowPhase::HeatHold { fill } => draw_fill_meter(ctx, *fill, w, h, "HEAT"),
            FlowPhase::Final { .. } => {
                ctx.set_fill_style_str(ACCENT);
                ctx.set_font("48px 'Fira Code', monospace");
                ctx.fill_text("ENTER!", w / 2.0, h * 0.5).ok();
            }
            _ => {}
        },
        _ => {}
    }

    draw_key_row(ctx, s, w, h);
    draw_ledger(ctx, s, h);
}

fn draw_stir_bar(ctx: &CanvasRenderingContext2d, r: &crate::resolvers::StirRun, w: f64, h: f64) {
    let bar_w = w * 0.5;
    let bar_x = (w - bar_w) / 2.0;
    let y = h * 0.45;
    ctx.set_fill_style_str(BAR_BG);
    ctx.fill_rect(bar_x, y, bar_w, 26.0);
    ctx.set_fill_style_str(ZONE);
    ctx.fill_rect(
        bar_x + r.zone.0 * bar_w,
        y,
        (r.zone.1 - r.zone.0) * bar_w,
        26.0,
    );
    ctx.set_fill_style_str(INK);
    ctx.fill_rect(bar_x + r.pointer * bar_w - 2.0, y - 4.0, 4.0, 34.0);

    ctx.set_fill_style_str(ACCENT);
    ctx.set_font("30px 'Fira Code', monospace");
    ctx.fill_text(
        &format!("PRESS {}", KEY_LABELS[r.target as usize]),
        w / 2.0,
        y - 24.0,
    )
    .ok();
}

fn draw_sequence(ctx: &CanvasRenderingContext2d, seq: &[u8], idx: usize, w: f64, h: f64) {
    ctx.set_font("34px 'Fira Code', monospace");
    let spacing = 52.0;
    let start = w / 2.0 - (seq.len() as f64 - 1.0) * spacing / 2.0;
    for (i, sym) in seq.iter().enumerate() {
        let color = if i < idx {
            DIM
        } else if i == idx {
            ACCENT
        } else {
            INK
        };
        ctx.set_fill_style_str(color);
        ctx.fill_text(
            KEY_LABELS[*sym as usize],
            start + i as f64 * spacing,
            h * 0.52,
        )
        .ok();
    }
}

fn draw_fill_meter(ctx: &CanvasRenderingContext2d, fill: f64, w: f64, h: f64, label: &str) {
    let meter_h = h * 0.3;
    let x = w / 2.0 - 24.0;
    let y = h * 0.3;
    ctx.set_fill_style_str(BAR_BG);
    ctx.fill_rect(x, y, 48.0, meter_h);
    let filled = meter_h * fill.clamp(0.0, 1.0);
    ctx.set_fill_style_str(BAR_FILL);
    ctx.fill_rect(x, y + meter_h - filled, 48.0, filled);
    ctx.set_fill_style_str(INK);
    ctx.set_font("20px 'Fira Code', monospace");
    ctx.fill_text(label, w / 2.0, y - 12.0).ok();
}

/// Shuffled Q/W/E/R to ingredient legend along the bottom.
fn draw_key_row(ctx: &CanvasRenderingContext2d, s: &Session, w: f64, h: f64) {
    ctx.set_font("18px 'Fira Code', monospace");
    let spacing = w / (s.key_map.len().max(1) as f64 + 1.0);
    for (i, ing) in s.key_map.iter().enumerate() {
        let x = spacing * (i as f64 + 1.0);
        ctx.set_fill_style_str(ACCENT);
        ctx.fill_text(KEY_LABELS[i], x, h - 64.0).ok();
        ctx.set_fill_style_str(INK);
        ctx.fill_text(ing.label(), x, h - 40.0).ok();
    }
}

fn draw_ledger(ctx: &CanvasRenderingContext2d, s: &Session, h: f64) {
    ctx.set_text_align("left");
    ctx.set_font("14px 'Fira Code', monospace");
    for (i, (ing, tally)) in s.ing_counts.iter().enumerate() {
        let done = tally.done >= tally.need;
        ctx.set_fill_style_str(if done { DIM } else { INK });
        ctx.fill_text(
            &format!("{} {}/{}", ing.label(), tally.done, tally.need),
            16.0,
            h * 0.25 + i as f64 * 22.0,
        )
        .ok();
    }
    ctx.set_text_align("center");
}

fn draw_end(
    ctx: &CanvasRenderingContext2d,
    s: &Session,
    scores: &[Entry],
    w: f64,
    h: f64,
    title: &str,
) {
    ctx.set_text_align("center");
    ctx.set_fill_style_str(ACCENT);
    ctx.set_font("48px 'Fira Code', monospace");
    ctx.fill_text(title, w / 2.0, h * 0.2).ok();
    ctx.set_fill_style_str(INK);
    ctx.set_font("26px 'Fira Code', monospace");
    ctx.fill_text(&format!("FINAL SCORE {}", s.score), w / 2.0, h * 0.3)
        .ok();

    ctx.set_font("16px 'Fira Code', monospace");
    ctx.set_fill_style_str(DIM);
    ctx.fill_text("BEST RUNS", w / 2.0, h * 0.4).ok();
    for (i, entry) in scores.iter().take(5).enumerate() {
        let y = h * 0.46 + i as f64 * 26.0;
        ctx.set_fill_style_str(if entry.score == s.score { ACCENT } else { INK });
        ctx.fill_text(
            &format!("{:>2}. {:>6}  {} {}", i + 1, entry.score, entry.date, entry.time),
            w / 2.0,
            y,
        )
        .ok();
    }

    ctx.set_fill_style_str(DIM);
    ctx.fill_text("press ENTER for the menu", w / 2.0, h * 0.88)
        .ok();
}

fn draw_alert(ctx: &CanvasRenderingContext2d, s: &Session, w: f64, h: f64) {
    if s.alert.ttl <= 0.0 || s.alert.text.is_empty() {
        return;
    }
    ctx.set_text_align("center");
    ctx.set_fill_style_str(s.alert.color);
    ctx.set_font("30px 'Fira Code', monospace");
    ctx.fill_text(&s.alert.text, w / 2.0, h * 0.66).ok();
}
