use crate::models::{Hour, TimeSlot, WindId};
use std::fmt;

/// Names the input tables, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    /// Day-ahead energy price, by hour.
    DayAheadPrice,
    /// Reserve capacity price, by hour.
    ReservePrice,
    /// Up-regulation price, by slot.
    UpRegulationPrice,
    /// Down-regulation price, by slot.
    DownRegulationPrice,
    /// Expected up-regulation deployment, by slot.
    ExpectedUpRegulation,
    /// Expected down-regulation deployment, by slot.
    ExpectedDownRegulation,
    /// Expected wind output, by slot and unit.
    ExpectedWindOutput,
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Table::DayAheadPrice => "day-ahead price",
            Table::ReservePrice => "reserve price",
            Table::UpRegulationPrice => "up-regulation price",
            Table::DownRegulationPrice => "down-regulation price",
            Table::ExpectedUpRegulation => "expected up-regulation",
            Table::ExpectedDownRegulation => "expected down-regulation",
            Table::ExpectedWindOutput => "expected wind output",
        })
    }
}

/// The input-side port: price and forecast tables for one bidding run.
///
/// Every lookup returns `Option<f64>`; `None` is a missing cell, which the
/// formulation engine turns into a fatal data error carrying the table name
/// and the offending index. Implementations do not interpolate, default, or
/// otherwise paper over holes; a run is built from complete data or not at
/// all.
pub trait MarketTables {
    /// Day-ahead energy price for `hour`.
    fn day_ahead_price(&self, hour: Hour) -> Option<f64>;

    /// Reserve capacity price for `hour`.
    fn reserve_price(&self, hour: Hour) -> Option<f64>;

    /// Up-regulation price at `slot`.
    fn up_regulation_price(&self, slot: TimeSlot) -> Option<f64>;

    /// Down-regulation price at `slot`.
    fn down_regulation_price(&self, slot: TimeSlot) -> Option<f64>;

    /// Expected up-regulation deployment at `slot`.
    fn expected_up_regulation(&self, slot: TimeSlot) -> Option<f64>;

    /// Expected down-regulation deployment at `slot`.
    fn expected_down_regulation(&self, slot: TimeSlot) -> Option<f64>;

    /// Expected real-time output of wind `unit` at `slot`.
    fn expected_wind_output(&self, slot: TimeSlot, unit: WindId) -> Option<f64>;
}
