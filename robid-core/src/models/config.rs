use super::time::{Horizon, HorizonError};
use super::uncertainty::UncertaintySpec;
use super::units::{StorageId, StorageUnit, UnitError, WindId, WindUnit};
use thiserror::Error;

/// How finely ramp-rate limits are enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum RampGranularity {
    /// One ramp check per consecutive hour pair, against the full-hour limit.
    Hourly,
    /// One ramp check per consecutive sub-interval pair, against the limit
    /// scaled by the sub-interval duration.
    #[default]
    SubInterval,
}

/// How storage state of charge is tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum EnergyAccounting {
    /// A single trajectory driven by day-ahead and regulation flows together.
    Combined,
    /// Parallel day-ahead-only and realized trajectories, plus an explicit
    /// wind spillage quantity.
    #[default]
    Split,
}

/// Structural choices of the formulation that are configuration rather than
/// data: ramp granularity and energy accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormulationOptions {
    /// Ramp-rate enforcement granularity.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ramp_granularity: RampGranularity,
    /// State-of-charge accounting shape.
    #[cfg_attr(feature = "serde", serde(default))]
    pub accounting: EnergyAccounting,
}

/// A violation of the parameter set's invariants, raised before any model
/// entity is created.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    /// The horizon has a zero dimension.
    #[error(transparent)]
    Horizon(#[from] HorizonError),
    /// A storage unit fails field validation.
    #[error("storage unit {unit}: {source}")]
    Storage {
        /// Position of the offending unit.
        unit: StorageId,
        /// The field-level violation.
        source: UnitError,
    },
    /// A wind unit fails field validation.
    #[error("wind unit {unit}: {source}")]
    Wind {
        /// Position of the offending unit.
        unit: WindId,
        /// The field-level violation.
        source: UnitError,
    },
    /// Neither storage nor wind units are present.
    #[error("parameter set contains no storage or wind units")]
    EmptyPortfolio,
}

/// The complete static configuration of one bidding run.
///
/// Read once, validated as a whole, then treated as immutable: the engine
/// never mutates a parameter set and every run builds exactly one model from
/// it. Prices and forecasts are deliberately *not* here; they arrive through
/// [`crate::ports::MarketTables`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "ParameterSetDto", into = "ParameterSetDto")
)]
pub struct ParameterSet {
    horizon: Horizon,
    storages: Vec<StorageUnit>,
    winds: Vec<WindUnit>,
    uncertainty: UncertaintySpec,
    options: FormulationOptions,
}

impl ParameterSet {
    /// Validate and assemble a parameter set.
    ///
    /// Every unit is checked field by field, and the portfolio must contain
    /// at least one unit of either kind.
    pub fn new(
        horizon: Horizon,
        storages: Vec<StorageUnit>,
        winds: Vec<WindUnit>,
        uncertainty: UncertaintySpec,
        options: FormulationOptions,
    ) -> Result<Self, ConfigError> {
        if storages.is_empty() && winds.is_empty() {
            return Err(ConfigError::EmptyPortfolio);
        }
        for (index, unit) in storages.iter().enumerate() {
            unit.validate().map_err(|source| ConfigError::Storage {
                unit: StorageId(index),
                source,
            })?;
        }
        for (index, unit) in winds.iter().enumerate() {
            unit.validate().map_err(|source| ConfigError::Wind {
                unit: WindId(index),
                source,
            })?;
        }
        Ok(Self {
            horizon,
            storages,
            winds,
            uncertainty,
            options,
        })
    }

    /// The bidding horizon.
    pub fn horizon(&self) -> Horizon {
        self.horizon
    }

    /// The storage units, in id order.
    pub fn storages(&self) -> &[StorageUnit] {
        &self.storages
    }

    /// The wind units, in id order.
    pub fn winds(&self) -> &[WindUnit] {
        &self.winds
    }

    /// The uncertainty configuration.
    pub fn uncertainty(&self) -> UncertaintySpec {
        self.uncertainty
    }

    /// The structural formulation options.
    pub fn options(&self) -> FormulationOptions {
        self.options
    }

    /// Storage unit ids in ascending order.
    pub fn storage_ids(&self) -> impl Iterator<Item = StorageId> {
        (0..self.storages.len()).map(StorageId)
    }

    /// Wind unit ids in ascending order.
    pub fn wind_ids(&self) -> impl Iterator<Item = WindId> {
        (0..self.winds.len()).map(WindId)
    }

    /// The storage unit at `id`. Panics on an id from a different set.
    pub fn storage(&self, id: StorageId) -> &StorageUnit {
        &self.storages[id.0]
    }

    /// The wind unit at `id`. Panics on an id from a different set.
    pub fn wind(&self, id: WindId) -> &WindUnit {
        &self.winds[id.0]
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct ParameterSetDto {
    horizon: Horizon,
    #[serde(default)]
    storages: Vec<StorageUnit>,
    #[serde(default)]
    winds: Vec<WindUnit>,
    #[serde(default)]
    uncertainty: UncertaintySpec,
    #[serde(default)]
    options: FormulationOptions,
}

#[cfg(feature = "serde")]
impl TryFrom<ParameterSetDto> for ParameterSet {
    type Error = ConfigError;

    fn try_from(value: ParameterSetDto) -> Result<Self, Self::Error> {
        ParameterSet::new(
            value.horizon,
            value.storages,
            value.winds,
            value.uncertainty,
            value.options,
        )
    }
}

#[cfg(feature = "serde")]
impl From<ParameterSet> for ParameterSetDto {
    fn from(value: ParameterSet) -> Self {
        Self {
            horizon: value.horizon,
            storages: value.storages,
            winds: value.winds,
            uncertainty: value.uncertainty,
            options: value.options,
        }
    }
}
