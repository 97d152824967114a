mod config;
mod tables;
mod time;
mod uncertainty;
mod units;

pub use config::{ConfigError, EnergyAccounting, FormulationOptions, ParameterSet, RampGranularity};
pub use tables::{MemoryTables, UniformFill};
pub use time::{Horizon, HorizonError, Hour, TimeSlot};
pub use uncertainty::{BandError, UncertaintyBand, UncertaintySpec};
pub use units::{StorageId, StorageUnit, UnitError, WindId, WindUnit};
