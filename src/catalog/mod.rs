//! Static recipe catalog: ingredients, step descriptors, and dish templates.
//!
//! Everything in this module is immutable template data. A session clones a
//! dish's step list on load so per-step counters never touch the shared
//! catalog. Dish definitions live in `dishes.rs`.

mod dishes;

pub use dishes::DISHES;

/// Every ingredient the catalog can ask for. The numeric id is what the
/// scan screen expects the player to type (first digit groups by family:
/// 1xx proteins, 2xx aromatics, 3xx bases, 4xx dessert).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ingredient {
    Chicken,
    Pork,
    Crab,
    Garlic,
    Ginger,
    Chili,
    Shrimp,
    Coconut,
    Rice,
    ShavedIce,
    GulaMelaka,
    RedBean,
}

impl Ingredient {
    pub fn id(&self) -> u16 {
        match self {
            Ingredient::Chicken => 101,
            Ingredient::Pork => 102,
            Ingredient::Crab => 103,
            Ingredient::Garlic => 201,
            Ingredient::Ginger => 202,
            Ingredient::Chili => 203,
            Ingredient::Shrimp => 301,
            Ingredient::Coconut => 302,
            Ingredient::Rice => 303,
            Ingredient::ShavedIce => 401,
            Ingredient::GulaMelaka => 402,
            Ingredient::RedBean => 403,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Ingredient::Chicken => "chicken",
            Ingredient::Pork => "pork",
            Ingredient::Crab => "crab",
            Ingredient::Garlic => "garlic",
            Ingredient::Ginger => "ginger",
            Ingredient::Chili => "chili",
            Ingredient::Shrimp => "shrimp",
            Ingredient::Coconut => "coconut",
            Ingredient::Rice => "rice",
            Ingredient::ShavedIce => "shaved ice",
            Ingredient::GulaMelaka => "gula melaka",
            Ingredient::RedBean => "red bean",
        }
    }
}

// --- Stir window constants (legacy cook steps) -------------------------------

pub const STIR_WIDTH: f64 = 0.40;
pub const STIR_CENTER: f64 = 0.50;
pub const STIR_PERFECT: (f64, f64) = (
    STIR_CENTER - STIR_WIDTH / 2.0,
    STIR_CENTER + STIR_WIDTH / 2.0,
);

// --- Step descriptors --------------------------------------------------------

/// Ingredient-tally step: each listed ingredient must be added the required
/// number of times; anything outside `uses` is a wrong input.
#[derive(Clone, Debug)]
pub struct TallySpec {
    pub label: &'static str,
    pub uses: &'static [Ingredient],
    pub counts: &'static [(Ingredient, u32)],
}

/// Legacy timed cook. Progress accumulates as `dt / max(0.2, time)`; the
/// optional window is the progress fraction band where a held Space counts
/// as a perfect stir.
#[derive(Clone, Debug)]
pub struct CookSpec {
    pub label: &'static str,
    pub time: f64,
    pub stir_window: Option<(f64, f64)>,
}

/// Sequence-matching cook: a generated run of symbol keys must be pressed in
/// order, `sequences_need` full passes, regenerated each pass.
#[derive(Clone, Debug)]
pub struct CookSeqSpec {
    pub label: &'static str,
    pub seq_len: usize,
    pub sequences_need: u32,
    /// Whether a wrong key rewinds the sequence position to the start.
    pub reset_on_miss: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComboMode {
    Smash,
    Sizzle,
    Stir,
    Plate,
}

/// Rhythm-combo step. `target_beats` is the generated sequence length;
/// hits landing within `beat_window` seconds of the previous hit count as
/// in-rhythm. `time` is the intended round duration (pacing/render only).
#[derive(Clone, Debug)]
pub struct ComboSpec {
    pub process: &'static str,
    pub label: &'static str,
    pub mode: ComboMode,
    pub target_beats: u32,
    pub time: f64,
    pub beat_window: f64,
    /// Fixed base pattern cycled to length instead of uniform random keys.
    pub base_pattern: Option<&'static [u8]>,
    /// Reactive cue: flash a random key every N beats.
    pub cue_every: Option<u32>,
    pub cue_window: f64,
    pub perfect_power_up: bool,
    pub allow_master_chef: bool,
    pub reset_on_miss: bool,
    pub sequences_need: u32,
}

/// Sweet-spot timing bar: an oscillating pointer must be inside the sweet
/// zone when the flashed target key is pressed.
#[derive(Clone, Debug)]
pub struct StirSpec {
    pub label: &'static str,
    pub pointer_speed: f64,
    pub zone_width: f64,
    pub hits_need: u32,
}

/// Hold-to-fill step: every key in `holds` must be down at once for the fill
/// level to rise.
#[derive(Clone, Debug)]
pub struct ScoopSpec {
    pub label: &'static str,
    pub holds: &'static [crate::keys::Key],
    pub fill_rate: f64,
    pub decay_rate: f64,
}

/// Multi-phase flow: intro -> rhythm combo -> transition -> heat hold ->
/// final confirm, each phase gated by elapsed time or explicit input.
#[derive(Clone, Debug)]
pub struct FlowSpec {
    pub label: &'static str,
    pub intro_time: f64,
    pub combo_beats: u32,
    pub beat_window: f64,
    pub transition_time: f64,
    pub heat_rate: f64,
    pub heat_decay: f64,
    pub final_window: f64,
}

/// One timed unit of work within a dish.
#[derive(Clone, Debug)]
pub enum Step {
    Prep(TallySpec),
    Action(TallySpec),
    Cook(CookSpec),
    CookSeq(CookSeqSpec),
    Combo(ComboSpec),
    Stir(StirSpec),
    Scoop(ScoopSpec),
    Flow(FlowSpec),
    Serve,
}

impl Step {
    /// Short name used in alerts and logs.
    pub fn noun(&self) -> &'static str {
        match self {
            Step::Prep(_) => "prep",
            Step::Action(_) => "action",
            Step::Cook(_) => "cook",
            Step::CookSeq(_) => "cook sequence",
            Step::Combo(_) => "combo",
            Step::Stir(_) => "stir",
            Step::Scoop(_) => "scoop",
            Step::Flow(_) => "flow",
            Step::Serve => "serve",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Step::Prep(s) | Step::Action(s) => s.label,
            Step::Cook(s) => s.label,
            Step::CookSeq(s) => s.label,
            Step::Combo(s) => s.label,
            Step::Stir(s) => s.label,
            Step::Scoop(s) => s.label,
            Step::Flow(s) => s.label,
            Step::Serve => "Serve: press ENTER",
        }
    }
}

/// Immutable dish template; sessions reference these and never mutate them.
#[derive(Clone, Debug)]
pub struct Dish {
    pub name: &'static str,
    pub culture: &'static str,
    pub ingredients: [Ingredient; 4],
    pub steps: &'static [Step],
}
