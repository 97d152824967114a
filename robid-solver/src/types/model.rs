use super::constraint::{Constraint, Family, Objective};
use super::variable::{VariableRegistry, VarKind};
use std::fmt;

/// An assembled model: immutable, self-contained, backend-agnostic.
///
/// Construction happens only through assembly, which either returns a
/// complete model or an error; there is no way to observe a half-built one.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    name: String,
    variables: VariableRegistry,
    constraints: Vec<Constraint>,
    objective: Objective,
}

impl Model {
    pub(crate) fn new(
        name: String,
        variables: VariableRegistry,
        constraints: Vec<Constraint>,
        objective: Objective,
    ) -> Self {
        Self {
            name,
            variables,
            constraints,
            objective,
        }
    }

    /// The model's name, used in exports.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declaration-ordered variable table.
    pub fn variables(&self) -> &VariableRegistry {
        &self.variables
    }

    /// All rows, in emission order.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// The maximization objective.
    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    /// Counts by kind and family.
    pub fn summary(&self) -> ModelSummary {
        let families = Family::ALL
            .iter()
            .map(|&family| {
                let count = self
                    .constraints
                    .iter()
                    .filter(|c| c.family == family)
                    .count();
                (family, count)
            })
            .collect();
        ModelSummary {
            name: self.name.clone(),
            variables: self.variables.len(),
            continuous: self.variables.kind_count(VarKind::Continuous),
            binary: self.variables.kind_count(VarKind::Binary),
            constraints: self.constraints.len(),
            families,
        }
    }
}

/// Size information about an assembled model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSummary {
    /// The model's name.
    pub name: String,
    /// Total declared variables.
    pub variables: usize,
    /// Continuous variables.
    pub continuous: usize,
    /// Binary variables.
    pub binary: usize,
    /// Total rows.
    pub constraints: usize,
    /// Row counts by family, in emission order.
    pub families: Vec<(Family, usize)>,
}

impl fmt::Display for ModelSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "model {}: {} variables ({} continuous, {} binary), {} constraints",
            self.name, self.variables, self.continuous, self.binary, self.constraints
        )?;
        for (family, count) in &self.families {
            writeln!(f, "  {family}: {count}")?;
        }
        Ok(())
    }
}
