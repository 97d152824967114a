use super::variable::{IndexTuple, VarId};
use std::fmt;

/// The constraint families of the formulation.
///
/// Every row belongs to exactly one family; assembly emits families in this
/// order and each family walks its own index set in hour-major order, so row
/// order is a pure function of the inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Day-ahead/reserve schedules (and commitments) equal across the
    /// sub-intervals of each hour.
    HourlyInvariance,
    /// Hourly and per-slot market quantities tied to unit schedules.
    MarketAggregation,
    /// Regulation deployment within `[0, reserve]`, per unit and aggregated.
    DeploymentCap,
    /// Storage state-of-charge recursion with anchored boundaries.
    StorageEnergy,
    /// Storage power/energy limits, scaled by commitment binaries.
    StorageCapacity,
    /// Charge/discharge exclusivity.
    BinaryLink,
    /// Wind schedule/realization commitment sandwich.
    WindLink,
    /// Wind spillage accounting.
    WindSpillage,
    /// Ramp-rate limits over consecutive periods.
    RampRate,
    /// Box bounds pinning uncertain quantities to their forecast bands.
    RobustBound,
    /// Upper bounds on the per-hour worst-case margin auxiliaries.
    RobustValue,
}

impl Family {
    /// Every family, in emission order.
    pub const ALL: [Family; 11] = [
        Family::HourlyInvariance,
        Family::MarketAggregation,
        Family::DeploymentCap,
        Family::StorageEnergy,
        Family::StorageCapacity,
        Family::BinaryLink,
        Family::WindLink,
        Family::WindSpillage,
        Family::RampRate,
        Family::RobustBound,
        Family::RobustValue,
    ];

    /// Short snake-case label, used for display and error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Family::HourlyInvariance => "hourly_invariance",
            Family::MarketAggregation => "market_aggregation",
            Family::DeploymentCap => "deployment_cap",
            Family::StorageEnergy => "storage_energy",
            Family::StorageCapacity => "storage_capacity",
            Family::BinaryLink => "binary_link",
            Family::WindLink => "wind_link",
            Family::WindSpillage => "wind_spillage",
            Family::RampRate => "ramp_rate",
            Family::RobustBound => "robust_bound",
            Family::RobustValue => "robust_value",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The sense of a linear row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sense {
    /// `lhs <= rhs`
    Le,
    /// `lhs == rhs`
    Eq,
    /// `lhs >= rhs`
    Ge,
}

impl fmt::Display for Sense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Sense::Le => "<=",
            Sense::Eq => "=",
            Sense::Ge => ">=",
        })
    }
}

/// One linear row: `Σ coefficient · variable  sense  rhs`.
///
/// The index tuple records which member of the family this row is; it is for
/// reporting and errors, and need not be unique (the last storage slot, for
/// instance, carries both its recursion row and the cyclic pin).
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    /// The family this row belongs to.
    pub family: Family,
    /// The family member this row was emitted for.
    pub index: IndexTuple,
    /// Left-hand side as `(variable, coefficient)` terms.
    pub terms: Vec<(VarId, f64)>,
    /// Row sense.
    pub sense: Sense,
    /// Right-hand side constant.
    pub rhs: f64,
}

/// The linear maximization objective.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Objective {
    /// Objective coefficients as `(variable, coefficient)` terms, at most one
    /// term per variable.
    pub terms: Vec<(VarId, f64)>,
}
