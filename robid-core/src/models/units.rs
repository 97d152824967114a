use std::fmt;
use thiserror::Error;

/// A 0-based position into the parameter set's storage unit list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[repr(transparent)]
pub struct StorageId(pub usize);

/// A 0-based position into the parameter set's wind unit list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[repr(transparent)]
pub struct WindId(pub usize);

impl fmt::Display for StorageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

impl fmt::Display for WindId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.0)
    }
}

/// A field-level violation of a unit's admissible parameter ranges.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum UnitError {
    /// A field that must be finite and non-negative was not.
    #[error("{field} must be finite and non-negative (got {value})")]
    Negative {
        /// The offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A field that must be strictly positive was not.
    #[error("{field} must be finite and strictly positive (got {value})")]
    NonPositive {
        /// The offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// `min_power > max_power`.
    #[error("power limits are inverted ({min} > {max})")]
    InvertedPower {
        /// The configured minimum.
        min: f64,
        /// The configured maximum.
        max: f64,
    },
    /// `min_energy > max_energy`.
    #[error("energy limits are inverted ({min} > {max})")]
    InvertedEnergy {
        /// The configured minimum.
        min: f64,
        /// The configured maximum.
        max: f64,
    },
    /// The anchor state of charge is not reachable within the energy limits.
    #[error("anchor energy {anchor} lies outside [{min}, {max}]")]
    AnchorOutOfRange {
        /// The configured anchor.
        anchor: f64,
        /// The energy lower limit.
        min: f64,
        /// The energy upper limit.
        max: f64,
    },
}

fn non_negative(field: &'static str, value: f64) -> Result<(), UnitError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(UnitError::Negative { field, value })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), UnitError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(UnitError::NonPositive { field, value })
    }
}

/// Physical and economic parameters of one battery storage unit.
///
/// Power quantities are in MW, energies in MWh, costs in currency per MWh.
/// The anchor is both the state of charge entering the horizon and the state
/// the cyclic closure returns to at the final slot.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StorageUnit {
    /// Minimum charge/discharge power while committed.
    pub min_power: f64,
    /// Maximum charge/discharge power.
    pub max_power: f64,
    /// Minimum state of charge while committed.
    pub min_energy: f64,
    /// Maximum state of charge.
    pub max_energy: f64,
    /// Largest admissible schedule change per hour, in MW.
    pub ramp_rate: f64,
    /// State of charge at the horizon boundary.
    pub anchor_energy: f64,
    /// Marginal cost of charging.
    pub charge_cost: f64,
    /// Marginal cost of discharging.
    pub discharge_cost: f64,
}

impl StorageUnit {
    /// Check every field against its admissible range.
    pub fn validate(&self) -> Result<(), UnitError> {
        non_negative("min_power", self.min_power)?;
        positive("max_power", self.max_power)?;
        non_negative("min_energy", self.min_energy)?;
        positive("max_energy", self.max_energy)?;
        positive("ramp_rate", self.ramp_rate)?;
        non_negative("anchor_energy", self.anchor_energy)?;
        non_negative("charge_cost", self.charge_cost)?;
        non_negative("discharge_cost", self.discharge_cost)?;
        if self.min_power > self.max_power {
            return Err(UnitError::InvertedPower {
                min: self.min_power,
                max: self.max_power,
            });
        }
        if self.min_energy > self.max_energy {
            return Err(UnitError::InvertedEnergy {
                min: self.min_energy,
                max: self.max_energy,
            });
        }
        if self.anchor_energy < self.min_energy || self.anchor_energy > self.max_energy {
            return Err(UnitError::AnchorOutOfRange {
                anchor: self.anchor_energy,
                min: self.min_energy,
                max: self.max_energy,
            });
        }
        Ok(())
    }
}

/// Parameters of one wind unit.
///
/// A wind unit has no state of charge; its output capability comes from the
/// expected-output table, so only the ramp limit and the marginal cost live
/// here.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindUnit {
    /// Largest admissible schedule change per hour, in MW.
    pub ramp_rate: f64,
    /// Marginal cost of scheduled output.
    pub marginal_cost: f64,
}

impl WindUnit {
    /// Check every field against its admissible range.
    pub fn validate(&self) -> Result<(), UnitError> {
        positive("ramp_rate", self.ramp_rate)?;
        non_negative("marginal_cost", self.marginal_cost)?;
        Ok(())
    }
}
