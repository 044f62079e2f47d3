//! Mini-game resolvers: one module per step archetype.
//!
//! A resolver owns the transient run state for the current step (rebuilt on
//! every step entry) and decides, per input or per tick, whether the step
//! completed or a penalty applies. Resolvers never advance any step other
//! than the current one; the engine observes the completion signal.

pub mod cook;
pub mod flow;
pub mod rhythm;
pub mod scoop;
pub mod stirbar;
pub mod tally;

use rand_chacha::ChaCha8Rng;

pub use cook::{CookRun, CookSeqRun};
pub use flow::{FlowPhase, FlowRun};
pub use rhythm::ComboRun;
pub use scoop::ScoopRun;
pub use stirbar::StirRun;
pub use tally::TallyRun;

use crate::catalog::Step;

/// Per-step transient state. A step is current exactly once, so a single
/// slot on the session suffices; advancing rebuilds it from the new step.
#[derive(Clone, Debug)]
pub enum StepRun {
    /// No dish loaded yet.
    Idle,
    Tally(TallyRun),
    Cook(CookRun),
    CookSeq(CookSeqRun),
    Combo(ComboRun),
    Stir(StirRun),
    Scoop(ScoopRun),
    Flow(FlowRun),
    Serve,
}

impl StepRun {
    /// Zero the transient state and run any step-specific generator (key
    /// sequences, sweet zones, target keys) off the session RNG.
    pub fn for_step(step: &Step, rng: &mut ChaCha8Rng) -> Self {
        match step {
            Step::Prep(spec) | Step::Action(spec) => StepRun::Tally(TallyRun::new(spec)),
            Step::Cook(_) => StepRun::Cook(CookRun::default()),
            Step::CookSeq(spec) => StepRun::CookSeq(CookSeqRun::new(spec, rng)),
            Step::Combo(spec) => StepRun::Combo(ComboRun::new(
                spec.target_beats as usize,
                spec.base_pattern,
                rng,
            )),
            Step::Stir(spec) => StepRun::Stir(StirRun::new(spec, rng)),
            Step::Scoop(_) => StepRun::Scoop(ScoopRun::default()),
            Step::Flow(spec) => StepRun::Flow(FlowRun::new(spec)),
            Step::Serve => StepRun::Serve,
        }
    }
}

/// Progress fraction for the active step, for the on-screen bar. Timed cook
/// steps track progress on the session itself; everything else derives it
/// from the run state.
pub fn progress(step: &Step, run: &StepRun, step_progress: f64) -> f64 {
    match (step, run) {
        (Step::Cook(_), _) => step_progress,
        (Step::Prep(spec) | Step::Action(spec), StepRun::Tally(r)) => r.fraction(spec),
        (Step::CookSeq(spec), StepRun::CookSeq(r)) => r.fraction(spec),
        (Step::Combo(spec), StepRun::Combo(r)) => r.fraction(spec.sequences_need),
        (Step::Stir(spec), StepRun::Stir(r)) => r.fraction(spec),
        (Step::Scoop(_), StepRun::Scoop(r)) => r.fraction(),
        (Step::Flow(_), StepRun::Flow(r)) => r.fraction(),
        _ => 0.0,
    }
}
