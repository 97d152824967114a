use super::BuildError;
use crate::types::{
    Constraint, Family, IndexTuple, Model, Objective, Quantity, Sense, VariableRegistry, VarId,
    VarKey,
};
use robid_core::models::{Hour, ParameterSet, StorageId, TimeSlot, WindId};
use robid_core::ports::{MarketTables, Table};

/// Mutable assembly state threaded through the schema, the families, and the
/// objective builder. Rows and objective terms are append-only.
pub(crate) struct Builder<'a, T> {
    pub(crate) params: &'a ParameterSet,
    pub(crate) tables: &'a T,
    pub(crate) vars: VariableRegistry,
    pub(crate) constraints: Vec<Constraint>,
    pub(crate) objective: Vec<(VarId, f64)>,
    /// Per wind unit: the widest admissible realization over the horizon,
    /// which is both the shared upper bound of the unit's variables and the
    /// base of its commitment big-M constants.
    pub(crate) wind_caps: Vec<f64>,
}

impl<'a, T: MarketTables> Builder<'a, T> {
    pub(crate) fn new(params: &'a ParameterSet, tables: &'a T) -> Self {
        Self {
            params,
            tables,
            vars: VariableRegistry::default(),
            constraints: Vec::new(),
            objective: Vec::new(),
            wind_caps: Vec::new(),
        }
    }

    pub(crate) fn declare(&mut self, key: VarKey, lower: f64, upper: f64) {
        self.vars.declare(key, key.quantity.kind(), lower, upper);
    }

    fn var(&self, key: VarKey) -> VarId {
        self.vars
            .id(&key)
            .expect("every variable is declared before any row is built")
    }

    pub(crate) fn hourly(&self, quantity: Quantity, hour: Hour) -> VarId {
        self.var(VarKey::hourly(quantity, hour))
    }

    pub(crate) fn slot(&self, quantity: Quantity, slot: TimeSlot) -> VarId {
        self.var(VarKey::slot(quantity, slot))
    }

    pub(crate) fn storage(&self, quantity: Quantity, slot: TimeSlot, unit: StorageId) -> VarId {
        self.var(VarKey::storage(quantity, slot, unit))
    }

    pub(crate) fn wind(&self, quantity: Quantity, slot: TimeSlot, unit: WindId) -> VarId {
        self.var(VarKey::wind(quantity, slot, unit))
    }

    pub(crate) fn push(
        &mut self,
        family: Family,
        index: IndexTuple,
        terms: Vec<(VarId, f64)>,
        sense: Sense,
        rhs: f64,
    ) {
        self.constraints.push(Constraint {
            family,
            index,
            terms,
            sense,
            rhs,
        });
    }

    pub(crate) fn da_price(&self, hour: Hour) -> Result<f64, BuildError> {
        self.tables
            .day_ahead_price(hour)
            .ok_or(BuildError::MissingObjectiveCoefficient {
                table: Table::DayAheadPrice,
                index: IndexTuple::Hour(hour),
            })
    }

    pub(crate) fn rs_price(&self, hour: Hour) -> Result<f64, BuildError> {
        self.tables
            .reserve_price(hour)
            .ok_or(BuildError::MissingObjectiveCoefficient {
                table: Table::ReservePrice,
                index: IndexTuple::Hour(hour),
            })
    }

    pub(crate) fn up_price(&self, slot: TimeSlot) -> Result<f64, BuildError> {
        self.tables
            .up_regulation_price(slot)
            .ok_or(BuildError::MissingCoefficient {
                table: Table::UpRegulationPrice,
                family: Family::RobustValue,
                index: IndexTuple::Slot(slot),
            })
    }

    pub(crate) fn down_price(&self, slot: TimeSlot) -> Result<f64, BuildError> {
        self.tables
            .down_regulation_price(slot)
            .ok_or(BuildError::MissingCoefficient {
                table: Table::DownRegulationPrice,
                family: Family::RobustValue,
                index: IndexTuple::Slot(slot),
            })
    }

    pub(crate) fn expected_up(&self, slot: TimeSlot) -> Result<f64, BuildError> {
        self.tables
            .expected_up_regulation(slot)
            .ok_or(BuildError::MissingCoefficient {
                table: Table::ExpectedUpRegulation,
                family: Family::RobustBound,
                index: IndexTuple::Slot(slot),
            })
    }

    pub(crate) fn expected_down(&self, slot: TimeSlot) -> Result<f64, BuildError> {
        self.tables
            .expected_down_regulation(slot)
            .ok_or(BuildError::MissingCoefficient {
                table: Table::ExpectedDownRegulation,
                family: Family::RobustBound,
                index: IndexTuple::Slot(slot),
            })
    }

    pub(crate) fn expected_wind(
        &self,
        slot: TimeSlot,
        unit: WindId,
        family: Family,
    ) -> Result<f64, BuildError> {
        self.tables
            .expected_wind_output(slot, unit)
            .ok_or(BuildError::MissingCoefficient {
                table: Table::ExpectedWindOutput,
                family,
                index: IndexTuple::Wind(slot, unit),
            })
    }

    pub(crate) fn finish(self, name: &str) -> Model {
        Model::new(
            name.to_string(),
            self.vars,
            self.constraints,
            Objective {
                terms: self.objective,
            },
        )
    }
}
