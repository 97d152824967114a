#![warn(missing_docs)]
//! Domain models and ports for robust joint-market bidding.
//!
//! A portfolio of battery storage units and wind resources participates in a
//! day-ahead energy market, a reserve-capacity market, and real-time up/down
//! regulation. The quantities unknown at bid time (regulation deployment,
//! realized wind output) are confined to configurable boxes around their
//! forecasts, which makes the bidding problem a mixed-integer linear program
//! with a single-level robust objective.
//!
//! This crate holds the inputs of that problem. The formulation itself lives
//! in `robid-solver`.

/// Core domain models for the bidding problem.
///
/// The types in this module are primarily data with validation at the
/// construction boundary: once a [`models::ParameterSet`] exists, everything
/// downstream may rely on its invariants (positive dimensions, consistent
/// unit limits, half-widths inside the unit interval).
pub mod models;

/// Interface traits between the domain logic and its data sources.
///
/// These are the "ports" in the hexagonal architecture sense: the formulation
/// engine is generic over where its price and forecast tables come from, and
/// adapters (in-memory fixtures, files, services) implement the traits
/// without the engine knowing.
pub mod ports;
