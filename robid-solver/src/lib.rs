/**
 * The formulation engine: variable schema, constraint families, robust
 * objective rows, and one-pass deterministic model assembly.
 */
mod formulation;
pub use formulation::*;

/**
 * These are the solver implementations consuming an assembled model.
 */
mod impls;
pub use impls::*;

/**
 * These are the core data types the implementations operate on.
 */
mod types;
pub use types::*;

/// Plain-text LP export of an assembled model.
pub mod export;

/// Serde representations of scenarios and solutions.
#[cfg(feature = "io")]
pub mod io;

// We use non-std collections here for their ordering semantics and performance
pub(crate) type Map<K, V> = indexmap::IndexMap<K, V, rustc_hash::FxBuildHasher>;
