use super::{MilpSettings, lower};
use crate::{Model, Solution, SolveError, Solver};

/// Backend over the pure-Rust `microlp` branch-and-bound solver. Builds
/// everywhere without native libraries, which is why it is the default.
#[derive(Debug, Clone, Default)]
pub struct MicrolpSolver(MilpSettings);

impl Solver for MicrolpSolver {
    type Settings = MilpSettings;

    fn new(settings: Self::Settings) -> Self {
        Self(settings)
    }

    fn solve(&self, model: &Model) -> Result<Solution, SolveError> {
        lower::solve_via(model, &self.0, good_lp::solvers::microlp::microlp)
    }
}
