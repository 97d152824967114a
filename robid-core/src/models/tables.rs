use super::time::{Horizon, Hour, TimeSlot};
use super::units::WindId;
use crate::ports::MarketTables;

/// Vector-backed market tables, the reference adapter for
/// [`MarketTables`].
///
/// Hourly tables are indexed by hour; sub-interval tables are one row per
/// hour; the wind forecast has one table per unit. An out-of-range lookup is
/// the in-memory form of a missing cell, so deliberately short tables are how
/// tests exercise the data-error path.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemoryTables {
    /// Day-ahead energy price by hour.
    #[cfg_attr(feature = "serde", serde(default))]
    pub day_ahead_price: Vec<f64>,
    /// Reserve capacity price by hour.
    #[cfg_attr(feature = "serde", serde(default))]
    pub reserve_price: Vec<f64>,
    /// Up-regulation price by hour and sub-interval.
    #[cfg_attr(feature = "serde", serde(default))]
    pub up_regulation_price: Vec<Vec<f64>>,
    /// Down-regulation price by hour and sub-interval.
    #[cfg_attr(feature = "serde", serde(default))]
    pub down_regulation_price: Vec<Vec<f64>>,
    /// Expected up-regulation deployment by hour and sub-interval.
    #[cfg_attr(feature = "serde", serde(default))]
    pub expected_up_regulation: Vec<Vec<f64>>,
    /// Expected down-regulation deployment by hour and sub-interval.
    #[cfg_attr(feature = "serde", serde(default))]
    pub expected_down_regulation: Vec<Vec<f64>>,
    /// Expected wind output by unit, hour, and sub-interval.
    #[cfg_attr(feature = "serde", serde(default))]
    pub expected_wind_output: Vec<Vec<Vec<f64>>>,
}

/// Constant values for every cell of a [`MemoryTables`], for fixtures.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UniformFill {
    /// Day-ahead energy price.
    pub day_ahead_price: f64,
    /// Reserve capacity price.
    pub reserve_price: f64,
    /// Up-regulation price.
    pub up_regulation_price: f64,
    /// Down-regulation price.
    pub down_regulation_price: f64,
    /// Expected up-regulation deployment.
    pub expected_up_regulation: f64,
    /// Expected down-regulation deployment.
    pub expected_down_regulation: f64,
    /// Expected wind output.
    pub expected_wind_output: f64,
}

impl MemoryTables {
    /// Fill every table of `horizon`'s shape with the given constants.
    pub fn uniform(horizon: Horizon, wind_units: usize, fill: UniformFill) -> Self {
        let hours = horizon.hour_count();
        let subs = horizon.subinterval_count();
        let per_hour = |value: f64| vec![value; hours];
        let per_slot = |value: f64| vec![vec![value; subs]; hours];
        Self {
            day_ahead_price: per_hour(fill.day_ahead_price),
            reserve_price: per_hour(fill.reserve_price),
            up_regulation_price: per_slot(fill.up_regulation_price),
            down_regulation_price: per_slot(fill.down_regulation_price),
            expected_up_regulation: per_slot(fill.expected_up_regulation),
            expected_down_regulation: per_slot(fill.expected_down_regulation),
            expected_wind_output: vec![per_slot(fill.expected_wind_output); wind_units],
        }
    }
}

fn hourly(table: &[f64], hour: Hour) -> Option<f64> {
    table.get((hour.0 as usize).checked_sub(1)?).copied()
}

fn per_slot(table: &[Vec<f64>], slot: TimeSlot) -> Option<f64> {
    table
        .get((slot.hour.0 as usize).checked_sub(1)?)?
        .get((slot.interval as usize).checked_sub(1)?)
        .copied()
}

impl MarketTables for MemoryTables {
    fn day_ahead_price(&self, hour: Hour) -> Option<f64> {
        hourly(&self.day_ahead_price, hour)
    }

    fn reserve_price(&self, hour: Hour) -> Option<f64> {
        hourly(&self.reserve_price, hour)
    }

    fn up_regulation_price(&self, slot: TimeSlot) -> Option<f64> {
        per_slot(&self.up_regulation_price, slot)
    }

    fn down_regulation_price(&self, slot: TimeSlot) -> Option<f64> {
        per_slot(&self.down_regulation_price, slot)
    }

    fn expected_up_regulation(&self, slot: TimeSlot) -> Option<f64> {
        per_slot(&self.expected_up_regulation, slot)
    }

    fn expected_down_regulation(&self, slot: TimeSlot) -> Option<f64> {
        per_slot(&self.expected_down_regulation, slot)
    }

    fn expected_wind_output(&self, slot: TimeSlot, unit: WindId) -> Option<f64> {
        per_slot(self.expected_wind_output.get(unit.0)?, slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(t: u16, j: u16) -> TimeSlot {
        TimeSlot {
            hour: Hour(t),
            interval: j,
        }
    }

    #[test]
    fn uniform_covers_the_horizon() {
        let horizon = Horizon::new(2, 3).unwrap();
        let tables = MemoryTables::uniform(
            horizon,
            2,
            UniformFill {
                day_ahead_price: 50.0,
                expected_wind_output: 4.0,
                ..UniformFill::default()
            },
        );
        assert_eq!(tables.day_ahead_price(Hour(2)), Some(50.0));
        assert_eq!(tables.day_ahead_price(Hour(3)), None);
        assert_eq!(tables.up_regulation_price(slot(2, 3)), Some(0.0));
        assert_eq!(tables.up_regulation_price(slot(2, 4)), None);
        assert_eq!(tables.expected_wind_output(slot(1, 1), WindId(1)), Some(4.0));
        assert_eq!(tables.expected_wind_output(slot(1, 1), WindId(2)), None);
    }

    #[test]
    fn empty_tables_miss_everywhere() {
        let tables = MemoryTables::default();
        assert_eq!(tables.day_ahead_price(Hour(1)), None);
        assert_eq!(tables.expected_down_regulation(slot(1, 1)), None);
        assert_eq!(tables.expected_wind_output(slot(1, 1), WindId(0)), None);
    }

    #[test]
    fn zero_indices_are_missing_not_panicking() {
        let horizon = Horizon::new(1, 1).unwrap();
        let tables = MemoryTables::uniform(horizon, 0, UniformFill::default());
        assert_eq!(tables.day_ahead_price(Hour(0)), None);
        assert_eq!(tables.reserve_price(Hour(0)), None);
        assert_eq!(tables.up_regulation_price(slot(0, 0)), None);
    }

    #[test]
    fn deserializes_with_missing_sections() {
        let tables: MemoryTables =
            serde_json::from_str(r#"{"day_ahead_price":[50.0],"reserve_price":[10.0]}"#).unwrap();
        assert_eq!(tables.day_ahead_price(Hour(1)), Some(50.0));
        assert_eq!(tables.expected_wind_output(slot(1, 1), WindId(0)), None);
    }
}
