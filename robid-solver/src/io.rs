use crate::export::export_lp;
use crate::{BuildError, Map, Model, Solution, SolveError, Solver};
use robid_core::models::{MemoryTables, ParameterSet};
use serde::{Deserialize, Serialize};
use std::io::Write;
use thiserror::Error;

/// A failure while running a scenario end to end.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// Assembly failed.
    #[error(transparent)]
    Build(#[from] BuildError),
    /// The solve failed.
    #[error(transparent)]
    Solve(#[from] SolveError),
    /// Writing an export failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A complete run input: the validated parameter set plus in-memory tables.
///
/// Deserializing a scenario runs the parameter-set validation, so a scenario
/// that loads is a scenario that assembles (up to missing table cells).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Structural configuration.
    pub parameters: ParameterSet,
    /// Price and forecast tables.
    #[serde(default)]
    pub tables: MemoryTables,
}

/// A serializable view of a solved scenario: the objective plus every
/// variable's value keyed by its display form, e.g. `da_sell(t=3)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// The achieved objective value.
    pub objective: f64,
    /// Every declared variable's value.
    pub values: Map<String, f64>,
}

impl From<&Solution> for Outcome {
    fn from(solution: &Solution) -> Self {
        Self {
            objective: solution.objective(),
            values: solution
                .iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
        }
    }
}

impl Scenario {
    /// Assemble the scenario's model.
    pub fn assemble(&self) -> Result<Model, BuildError> {
        crate::assemble(&self.parameters, &self.tables)
    }

    /// Assemble and solve in one step.
    pub fn solve<T: Solver>(&self, solver: &T) -> Result<Outcome, ScenarioError> {
        let model = self.assemble()?;
        let solution = solver.solve(&model)?;
        Ok(Outcome::from(&solution))
    }

    /// Assemble and export in LP format.
    pub fn export_lp(&self, buffer: &mut impl Write) -> Result<(), ScenarioError> {
        let model = self.assemble()?;
        export_lp(&model, buffer)?;
        Ok(())
    }
}
