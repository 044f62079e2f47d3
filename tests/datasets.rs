// Catalog invariant tests.
// These tests are native-friendly and avoid wasm/browser APIs.

use std::collections::HashSet;

use wok_hero::catalog::{Step, DISHES};

#[test]
fn dish_names_and_ingredient_ids_are_unique() {
    let mut names = HashSet::new();
    for dish in DISHES.iter() {
        assert!(names.insert(dish.name), "duplicate dish '{}'", dish.name);
        let mut ids = HashSet::new();
        for ing in dish.ingredients {
            assert!(
                ids.insert(ing.id()),
                "dish '{}' lists ingredient #{} twice",
                dish.name,
                ing.id()
            );
        }
    }
}

#[test]
fn every_dish_ends_with_a_serve() {
    for dish in DISHES.iter() {
        assert!(
            matches!(dish.steps.last(), Some(Step::Serve)),
            "dish '{}' must end on a serve step",
            dish.name
        );
        assert!(!dish.steps.is_empty());
    }
}

#[test]
fn tally_steps_only_count_listed_ingredients() {
    for dish in DISHES.iter() {
        for step in dish.steps {
            if let Step::Prep(spec) | Step::Action(spec) = step {
                for (ing, need) in spec.counts {
                    assert!(*need > 0, "zero-count entry in dish '{}'", dish.name);
                    if !spec.uses.is_empty() {
                        assert!(
                            spec.uses.contains(ing),
                            "dish '{}' counts '{}' outside its allow list",
                            dish.name,
                            ing.label()
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn tally_ingredients_come_from_the_dish_pantry() {
    for dish in DISHES.iter() {
        for step in dish.steps {
            if let Step::Prep(spec) | Step::Action(spec) = step {
                for (ing, _) in spec.counts {
                    assert!(
                        dish.ingredients.contains(ing),
                        "dish '{}' counts '{}' which is not on its key map",
                        dish.name,
                        ing.label()
                    );
                }
            }
        }
    }
}

#[test]
fn ingredient_ids_group_by_family_digit() {
    for dish in DISHES.iter() {
        for ing in dish.ingredients {
            let id = ing.id();
            assert!((101..=499).contains(&id), "id {} out of range", id);
        }
    }
}

#[test]
fn step_specs_carry_sane_timings() {
    for dish in DISHES.iter() {
        for step in dish.steps {
            match step {
                Step::Cook(spec) => {
                    assert!(spec.time > 0.0);
                    if let Some((lo, hi)) = spec.stir_window {
                        assert!(0.0 <= lo && lo < hi && hi <= 1.0);
                    }
                }
                Step::Combo(spec) => {
                    assert!(spec.target_beats > 0);
                    assert!(spec.beat_window > 0.0);
                    assert!(spec.sequences_need > 0);
                    if let Some(pattern) = spec.base_pattern {
                        assert!(pattern.iter().all(|&sym| sym < 4));
                    }
                }
                Step::CookSeq(spec) => {
                    assert!(spec.seq_len > 0 && spec.sequences_need > 0);
                }
                Step::Stir(spec) => {
                    assert!(spec.pointer_speed > 0.0);
                    assert!(spec.zone_width > 0.0 && spec.zone_width < 1.0);
                    assert!(spec.hits_need > 0);
                }
                Step::Scoop(spec) => {
                    assert!(!spec.holds.is_empty());
                    assert!(spec.fill_rate > spec.decay_rate);
                }
                Step::Flow(spec) => {
                    assert!(spec.combo_beats > 0);
                    assert!(spec.heat_rate > spec.heat_decay);
                    assert!(spec.final_window > 0.0);
                }
                Step::Prep(_) | Step::Action(_) | Step::Serve => {}
            }
        }
    }
}
