//! Ingredient-tally resolver for prep/action steps.

use crate::catalog::{Ingredient, TallySpec};
use crate::scoring::{apply_penalty, award_step_points, PenaltyKind};
use crate::session::{Session, COLOR_BAD, COLOR_GOOD};

const PREP_MULT: f64 = 0.40;
const ACTION_MULT: f64 = 0.55;
const STEP_BONUS_MULT: f64 = 1.1;

#[derive(Clone, Debug)]
pub struct TallyRun {
    done: Vec<(Ingredient, u32)>,
}

impl TallyRun {
    pub fn new(spec: &TallySpec) -> Self {
        Self {
            done: spec.counts.iter().map(|&(ing, _)| (ing, 0)).collect(),
        }
    }

    pub fn done_for(&self, ing: Ingredient) -> u32 {
        self.done
            .iter()
            .find(|(i, _)| *i == ing)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    fn inc(&mut self, ing: Ingredient) {
        if let Some((_, n)) = self.done.iter_mut().find(|(i, _)| *i == ing) {
            *n += 1;
        }
    }

    pub fn is_complete(&self, spec: &TallySpec) -> bool {
        spec.counts
            .iter()
            .all(|&(ing, need)| self.done_for(ing) >= need)
    }

    pub fn fraction(&self, spec: &TallySpec) -> f64 {
        let need: u32 = spec.counts.iter().map(|(_, n)| n).sum();
        if need == 0 {
            return 1.0;
        }
        let done: u32 = self.done.iter().map(|(_, n)| n).sum();
        f64::from(done) / f64::from(need)
    }
}

/// Resolve one mapped ingredient press. Returns true when the step is done.
pub fn handle(
    s: &mut Session,
    spec: &TallySpec,
    run: &mut TallyRun,
    ing: Ingredient,
    is_prep: bool,
) -> bool {
    if !spec.uses.is_empty() && !spec.uses.contains(&ing) {
        apply_penalty(s, PenaltyKind::WrongInput);
        return false;
    }

    let need = spec
        .counts
        .iter()
        .find(|(i, _)| *i == ing)
        .map(|(_, n)| *n)
        .unwrap_or(0);
    if need == 0 {
        apply_penalty(s, PenaltyKind::WrongInput);
        return false;
    }

    if run.done_for(ing) >= need {
        // Over-collecting for partial credit is rejected.
        apply_penalty(s, PenaltyKind::WrongInput);
        s.set_alert("TOO MANY OF THAT INGREDIENT", COLOR_BAD, 0.8);
        return false;
    }

    run.inc(ing);
    s.ledger_inc(ing);
    award_step_points(s, if is_prep { PREP_MULT } else { ACTION_MULT });

    if run.is_complete(spec) {
        s.set_alert("STEP COMPLETE!", COLOR_GOOD, 0.7);
        award_step_points(s, STEP_BONUS_MULT);
        return true;
    }
    false
}
