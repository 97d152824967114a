use super::model::Model;
use super::variable::{IndexTuple, Quantity, VarKey};
use crate::Map;
use robid_core::models::{Hour, StorageId, TimeSlot, WindId};

/// A complete assignment for an assembled model.
///
/// Values are keyed by variable address in declaration order, so a solution
/// can be inspected without the model in hand; the grouped accessors are the
/// shapes downstream consumers (sinks, reports) want.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    objective: f64,
    values: Map<VarKey, f64>,
}

impl Solution {
    pub(crate) fn new(objective: f64, values: Map<VarKey, f64>) -> Self {
        Self { objective, values }
    }

    /// The objective value, recomputed from the model's own terms.
    pub fn objective(&self) -> f64 {
        self.objective
    }

    /// The value of one variable, if it exists in the model.
    pub fn get(&self, key: &VarKey) -> Option<f64> {
        self.values.get(key).copied()
    }

    /// All values in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&VarKey, f64)> {
        self.values.iter().map(|(key, value)| (key, *value))
    }

    /// The hourly series of an hourly quantity.
    pub fn hourly(&self, quantity: Quantity) -> Vec<(Hour, f64)> {
        self.values
            .iter()
            .filter(|(key, _)| key.quantity == quantity)
            .filter_map(|(key, value)| match key.index {
                IndexTuple::Hour(t) => Some((t, *value)),
                _ => None,
            })
            .collect()
    }

    /// The per-slot series of a storage quantity for one unit.
    pub fn for_storage(&self, quantity: Quantity, unit: StorageId) -> Vec<(TimeSlot, f64)> {
        self.values
            .iter()
            .filter(|(key, _)| key.quantity == quantity)
            .filter_map(|(key, value)| match key.index {
                IndexTuple::Storage(slot, s) if s == unit => Some((slot, *value)),
                _ => None,
            })
            .collect()
    }

    /// The per-slot series of a wind quantity for one unit.
    pub fn for_wind(&self, quantity: Quantity, unit: WindId) -> Vec<(TimeSlot, f64)> {
        self.values
            .iter()
            .filter(|(key, _)| key.quantity == quantity)
            .filter_map(|(key, value)| match key.index {
                IndexTuple::Wind(slot, w) if w == unit => Some((slot, *value)),
                _ => None,
            })
            .collect()
    }

    /// Decompose the objective into per-hour revenue and cost buckets.
    ///
    /// Every objective term is attributed to the hour of its variable:
    /// day-ahead sales net of purchases, reserve capacity revenue, the
    /// worst-case regulation margin, and the marginal cost of the day-ahead
    /// schedules. The buckets sum to the objective.
    pub fn report(&self, model: &Model) -> RevenueReport {
        let mut hours: Map<Hour, HourlyRevenue> = Map::default();
        for &(id, coefficient) in &model.objective().terms {
            let info = model.variables().info(id);
            let value = self.get(&info.key).unwrap_or_default();
            let contribution = coefficient * value;
            let entry = hours
                .entry(info.key.index.hour())
                .or_insert_with(|| HourlyRevenue::zero(info.key.index.hour()));
            match info.key.quantity {
                Quantity::DaSell | Quantity::DaBuy => entry.day_ahead += contribution,
                Quantity::Reserve => entry.reserve += contribution,
                Quantity::RobustValue => entry.regulation += contribution,
                // cost terms carry negative coefficients
                _ => entry.marginal_cost -= contribution,
            }
        }
        RevenueReport {
            hours: hours.into_values().collect(),
            total: self.objective,
        }
    }
}

/// Per-hour revenue and cost buckets of a solved model.
#[derive(Debug, Clone, PartialEq)]
pub struct RevenueReport {
    /// One bucket set per hour, ascending.
    pub hours: Vec<HourlyRevenue>,
    /// The objective value; equals the sum of the hourly nets.
    pub total: f64,
}

/// The objective contribution of one hour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlyRevenue {
    /// The hour.
    pub hour: Hour,
    /// Day-ahead sales revenue net of purchases.
    pub day_ahead: f64,
    /// Reserve capacity revenue.
    pub reserve: f64,
    /// Worst-case real-time regulation margin.
    pub regulation: f64,
    /// Marginal cost of the day-ahead schedules (a positive cost).
    pub marginal_cost: f64,
}

impl HourlyRevenue {
    fn zero(hour: Hour) -> Self {
        Self {
            hour,
            day_ahead: 0.0,
            reserve: 0.0,
            regulation: 0.0,
            marginal_cost: 0.0,
        }
    }

    /// This hour's net contribution to the objective.
    pub fn net(&self) -> f64 {
        self.day_ahead + self.reserve + self.regulation - self.marginal_cost
    }
}
