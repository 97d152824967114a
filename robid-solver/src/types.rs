mod variable;
pub use variable::*;

mod constraint;
pub use constraint::*;

mod model;
pub use model::*;

mod outcome;
pub use outcome::*;

use thiserror::Error;

/// The ways a solve can fail.
///
/// Infeasibility is a property of the scenario (for example a robust band
/// the committed capacity cannot cover), not a formulation defect, and is
/// reported distinctly so callers can surface it as such. No partial
/// assignment is ever produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    /// The model admits no feasible assignment.
    #[error("model is infeasible")]
    Infeasible,
    /// The objective is unbounded above.
    #[error("model is unbounded")]
    Unbounded,
    /// A pinned variable key does not exist in the model.
    #[error("cannot pin unknown variable {0}")]
    UnknownVariable(VarKey),
    /// The backend failed for its own reasons.
    #[error("solver backend failure: {0}")]
    Backend(String),
}

/// The Solver trait defines the interface for MILP backends.
///
/// A backend consumes an assembled [`Model`] and returns either a complete
/// assignment with its objective value, or a [`SolveError`]. Implementations
/// differ in algorithm and build requirements, not in semantics; one model
/// solved by any backend must report the same objective up to tolerance.
pub trait Solver {
    /// The configuration type for this solver
    type Settings;

    /// Create a new instance with the provided settings
    fn new(settings: Self::Settings) -> Self;

    /// Solve the given model to optimality.
    ///
    /// # Returns
    /// * `Solution` - an assignment for every declared variable, plus the
    ///   objective value recomputed from the model's own terms
    fn solve(&self, model: &Model) -> Result<Solution, SolveError>;
}
