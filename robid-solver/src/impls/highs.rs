use super::{MilpSettings, lower};
use crate::{Model, Solution, SolveError, Solver};

/// Backend over the HiGHS solver, via its native library. Markedly faster
/// than microlp on day-scale horizons; prefer it when the build environment
/// can link HiGHS.
#[derive(Debug, Clone, Default)]
pub struct HighsSolver(MilpSettings);

impl Solver for HighsSolver {
    type Settings = MilpSettings;

    fn new(settings: Self::Settings) -> Self {
        Self(settings)
    }

    fn solve(&self, model: &Model) -> Result<Solution, SolveError> {
        lower::solve_via(model, &self.0, good_lp::solvers::highs::highs)
    }
}
