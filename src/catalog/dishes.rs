//! Dish definitions. One static step list per dish, referenced by `DISHES`.

use super::{
    ComboMode, ComboSpec, CookSeqSpec, CookSpec, Dish, FlowSpec, ScoopSpec, Step, StirSpec,
    TallySpec, STIR_PERFECT,
};
use crate::catalog::Ingredient::*;
use crate::keys::Key;

static AYAM_BUAH_KELUAK_STEPS: [Step; 5] = [
    Step::Combo(ComboSpec {
        process: "Process 1: Smash & Prep Keluak",
        label: "Hit random 8-beat chop/mash combos (QWER). Fast rhythm = smooth paste.",
        mode: ComboMode::Smash,
        target_beats: 8,
        time: 10.0,
        beat_window: 0.38,
        base_pattern: None,
        cue_every: None,
        cue_window: 0.0,
        perfect_power_up: true,
        allow_master_chef: false,
        reset_on_miss: false,
        sequences_need: 1,
    }),
    Step::Combo(ComboSpec {
        process: "Process 2: Sizzle & Fry",
        label: "Follow alternating rhythm W-E-R-Q. Build aroma; wrong hits create smoke.",
        mode: ComboMode::Sizzle,
        target_beats: 12,
        time: 12.0,
        beat_window: 0.34,
        base_pattern: Some(&[1, 2, 3, 0]),
        cue_every: None,
        cue_window: 0.0,
        perfect_power_up: false,
        allow_master_chef: false,
        reset_on_miss: false,
        sequences_need: 1,
    }),
    Step::Combo(ComboSpec {
        process: "Process 3: Stir & Cook Chicken",
        label: "Rapid combos + random cue hits for juicy chicken. Misses can burn the pan.",
        mode: ComboMode::Stir,
        target_beats: 14,
        time: 14.0,
        beat_window: 0.40,
        base_pattern: None,
        cue_every: Some(4),
        cue_window: 1.0,
        perfect_power_up: false,
        allow_master_chef: false,
        reset_on_miss: false,
        sequences_need: 1,
    }),
    Step::Combo(ComboSpec {
        process: "Process 4: Plate & Garnish",
        label: "Complete the plating chain in rhythm. Perfect garnish timing gives flair bonus.",
        mode: ComboMode::Plate,
        target_beats: 10,
        time: 11.0,
        beat_window: 0.30,
        base_pattern: None,
        cue_every: None,
        cue_window: 0.0,
        perfect_power_up: false,
        allow_master_chef: true,
        reset_on_miss: false,
        sequences_need: 1,
    }),
    Step::Serve,
];

static CURRY_FENG_STEPS: [Step; 6] = [
    Step::Prep(TallySpec {
        label: "Prep aromatics",
        uses: &[Garlic, Ginger],
        counts: &[(Garlic, 4), (Ginger, 4)],
    }),
    Step::Cook(CookSpec {
        label: "Fry aromatics",
        time: 4.0,
        stir_window: Some(STIR_PERFECT),
    }),
    Step::Serve,
    Step::Action(TallySpec {
        label: "Add pork",
        uses: &[Pork],
        counts: &[(Pork, 2)],
    }),
    Step::Cook(CookSpec {
        label: "Simmer curry",
        time: 4.0,
        stir_window: Some(STIR_PERFECT),
    }),
    Step::Serve,
];

static LAKSA_SIGLAP_STEPS: [Step; 11] = [
    Step::Action(TallySpec {
        label: "Add chili (make the paste)",
        uses: &[Chili],
        counts: &[(Chili, 3)],
    }),
    Step::Cook(CookSpec {
        label: "Saute chili paste",
        time: 4.0,
        stir_window: Some(STIR_PERFECT),
    }),
    Step::Serve,
    Step::Action(TallySpec {
        label: "Add coconut milk",
        uses: &[Coconut],
        counts: &[(Coconut, 2)],
    }),
    Step::Cook(CookSpec {
        label: "Simmer broth",
        time: 4.0,
        stir_window: Some(STIR_PERFECT),
    }),
    Step::Serve,
    Step::Action(TallySpec {
        label: "Add shrimp",
        uses: &[Shrimp],
        counts: &[(Shrimp, 3)],
    }),
    Step::Cook(CookSpec {
        label: "Cook shrimp quickly (no stir)",
        time: 4.0,
        stir_window: None,
    }),
    Step::Serve,
    Step::Action(TallySpec {
        label: "Serve with rice",
        uses: &[Rice],
        counts: &[(Rice, 2)],
    }),
    Step::Serve,
];

static LOR_KAI_YIK_STEPS: [Step; 6] = [
    Step::Prep(TallySpec {
        label: "Prep garlic/ginger",
        uses: &[Garlic, Ginger],
        counts: &[(Garlic, 3), (Ginger, 4)],
    }),
    Step::Action(TallySpec {
        label: "Add chicken pieces",
        uses: &[Chicken],
        counts: &[(Chicken, 2)],
    }),
    Step::Cook(CookSpec {
        label: "Simmer chicken",
        time: 4.0,
        stir_window: Some(STIR_PERFECT),
    }),
    Step::Serve,
    Step::Action(TallySpec {
        label: "Add rice",
        uses: &[Rice],
        counts: &[(Rice, 2)],
    }),
    Step::Serve,
];

static CHILLI_CRAB_STEPS: [Step; 4] = [
    Step::Prep(TallySpec {
        label: "Pound chili and garlic",
        uses: &[Chili, Garlic],
        counts: &[(Chili, 3), (Garlic, 3)],
    }),
    Step::CookSeq(CookSeqSpec {
        label: "Wok-toss the crab: match the key sequence",
        seq_len: 4,
        sequences_need: 2,
        reset_on_miss: true,
    }),
    Step::Flow(FlowSpec {
        label: "Build the gravy: follow each phase",
        intro_time: 2.0,
        combo_beats: 8,
        beat_window: 0.35,
        transition_time: 1.5,
        heat_rate: 0.5,
        heat_decay: 0.25,
        final_window: 2.5,
    }),
    Step::Serve,
];

static CHENDOL_STEPS: [Step; 4] = [
    Step::Scoop(ScoopSpec {
        label: "Hold Q + SPACE to pile shaved ice",
        holds: &[Key::Sym(0), Key::Space],
        fill_rate: 0.55,
        decay_rate: 0.25,
    }),
    Step::Stir(StirSpec {
        label: "Swirl in gula melaka: hit the key in the sweet zone",
        pointer_speed: 0.9,
        zone_width: 0.20,
        hits_need: 3,
    }),
    Step::Action(TallySpec {
        label: "Top with red bean",
        uses: &[RedBean],
        counts: &[(RedBean, 2)],
    }),
    Step::Serve,
];

pub static DISHES: [Dish; 6] = [
    Dish {
        name: "AYAM BUAH KELUAK",
        culture: "Peranakan",
        ingredients: [Chicken, Garlic, Ginger, Chili],
        steps: &AYAM_BUAH_KELUAK_STEPS,
    },
    Dish {
        name: "CURRY FENG",
        culture: "Eurasian",
        ingredients: [Pork, Garlic, Ginger, Chili],
        steps: &CURRY_FENG_STEPS,
    },
    Dish {
        name: "LAKSA SIGLAP",
        culture: "Malay",
        ingredients: [Shrimp, Coconut, Chili, Rice],
        steps: &LAKSA_SIGLAP_STEPS,
    },
    Dish {
        name: "LOR KAI YIK",
        culture: "Chinese",
        ingredients: [Chicken, Garlic, Ginger, Rice],
        steps: &LOR_KAI_YIK_STEPS,
    },
    Dish {
        name: "CHILLI CRAB",
        culture: "Singaporean",
        ingredients: [Crab, Chili, Garlic, Ginger],
        steps: &CHILLI_CRAB_STEPS,
    },
    Dish {
        name: "CHENDOL",
        culture: "Peranakan",
        ingredients: [Coconut, ShavedIce, GulaMelaka, RedBean],
        steps: &CHENDOL_STEPS,
    },
];
