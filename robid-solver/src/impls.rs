use crate::types::VarKey;

#[cfg(any(feature = "highs", feature = "microlp"))]
mod lower;

/// Implementation using the HiGHS simplex/branch-and-bound solver
#[cfg(feature = "highs")]
pub mod highs;

/// Implementation using the pure-Rust microlp solver
#[cfg(feature = "microlp")]
pub mod microlp;

/// Settings shared by the MILP backends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MilpSettings {
    /// Variables pinned to a fixed value before the solve, by key.
    ///
    /// A pinned variable is lowered as a continuous variable whose bounds
    /// collapse to the value, binaries included; pinning a commitment flag
    /// to 0 or 1 is how a what-if run forces a unit out of or into the
    /// market. A key that names no variable of the model fails the solve
    /// up front.
    pub fixed: Vec<(VarKey, f64)>,
}
