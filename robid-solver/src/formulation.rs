use crate::types::{Family, IndexTuple, Model};
use robid_core::models::{ConfigError, ParameterSet};
use robid_core::ports::{MarketTables, Table};
use thiserror::Error;

mod context;
mod market;
mod objective;
mod ramp;
mod robust;
mod schema;
mod storage;
mod wind;

use context::Builder;

/// The ways assembly can fail. Failure is atomic: no partial model escapes.
///
/// Configuration problems are caught when the parameter set is constructed;
/// the variant here exists so callers composing construction and assembly can
/// use one error type. Missing table cells are found while the families (or
/// the objective) fetch their coefficients, and abort the build with the
/// offending table and index.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    /// A parameter-set invariant was violated.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A table cell needed by a constraint family is missing.
    #[error("missing {table} value at {index} while building {family} rows")]
    MissingCoefficient {
        /// The table with the hole.
        table: Table,
        /// The family that needed the cell.
        family: Family,
        /// The index of the missing cell.
        index: IndexTuple,
    },
    /// A table cell needed by the objective is missing.
    #[error("missing {table} value at {index} while building the objective")]
    MissingObjectiveCoefficient {
        /// The table with the hole.
        table: Table,
        /// The index of the missing cell.
        index: IndexTuple,
    },
}

/// Assemble the bidding model for one run.
///
/// A single synchronous pass: declare every variable, emit every family in
/// [`Family`] order, then the objective. Identical inputs produce equal
/// models: iteration is append-only over deterministically ordered domains,
/// with no map-order or threading effects anywhere.
pub fn assemble<T: MarketTables>(
    parameters: &ParameterSet,
    tables: &T,
) -> Result<Model, BuildError> {
    let mut builder = Builder::new(parameters, tables);

    schema::declare(&mut builder)?;

    market::hourly_invariance(&mut builder);
    market::aggregation(&mut builder);
    market::deployment_caps(&mut builder);
    storage::energy_recursion(&mut builder);
    storage::capacity(&mut builder);
    storage::binary_links(&mut builder);
    wind::commitment_links(&mut builder);
    wind::spillage(&mut builder);
    ramp::limits(&mut builder);
    robust::bounds(&mut builder)?;
    objective::build(&mut builder)?;

    let model = builder.finish("joint_market_bid");
    tracing::debug!(
        variables = model.variables().len(),
        constraints = model.constraints().len(),
        "assembled bidding model"
    );
    Ok(model)
}
