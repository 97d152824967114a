use thiserror::Error;

/// The error produced by [`UncertaintyBand::new`] for half-widths outside
/// the open unit interval.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("fractional half-width must lie in (0, 1), got {0}")]
pub struct BandError(pub f64);

/// A symmetric box around a forecast, as a fractional half-width.
///
/// A band of 0.1 confines the realized quantity to ±10% of its forecast.
/// Widths outside `(0, 1)` are rejected: zero would pin the realization to
/// the forecast exactly (drop the band instead and fix the variable), and
/// one or more would admit negative quantities.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "f64", into = "f64")
)]
pub struct UncertaintyBand(f64);

impl UncertaintyBand {
    /// Create a band, rejecting half-widths outside `(0, 1)`.
    pub fn new(half_width: f64) -> Result<Self, BandError> {
        if half_width.is_finite() && half_width > 0.0 && half_width < 1.0 {
            Ok(Self(half_width))
        } else {
            Err(BandError(half_width))
        }
    }

    /// The fractional half-width itself.
    pub fn half_width(&self) -> f64 {
        self.0
    }

    /// The factor applied to a forecast for the box floor, `1 - δ`.
    pub fn lower(&self) -> f64 {
        1.0 - self.0
    }

    /// The factor applied to a forecast for the box ceiling, `1 + δ`.
    pub fn upper(&self) -> f64 {
        1.0 + self.0
    }
}

impl TryFrom<f64> for UncertaintyBand {
    type Error = BandError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UncertaintyBand> for f64 {
    fn from(value: UncertaintyBand) -> Self {
        value.0
    }
}

/// Which of the uncertain quantities carry a box, and how wide.
///
/// A `None` entry means the quantity is not treated as uncertain: it remains
/// a free decision within its other constraints. The two historical
/// conventions are both expressible: bands on all three quantities, or a
/// band on wind output alone.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UncertaintySpec {
    /// Box around the expected up-regulation deployment.
    #[cfg_attr(feature = "serde", serde(default))]
    pub up_regulation: Option<UncertaintyBand>,
    /// Box around the expected down-regulation deployment.
    #[cfg_attr(feature = "serde", serde(default))]
    pub down_regulation: Option<UncertaintyBand>,
    /// Box around the expected wind output, per unit.
    #[cfg_attr(feature = "serde", serde(default))]
    pub wind_output: Option<UncertaintyBand>,
}

impl UncertaintySpec {
    /// A spec with no uncertain quantities at all.
    pub fn none() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_factors() {
        let band = UncertaintyBand::new(0.1).unwrap();
        assert_eq!(band.lower(), 0.9);
        assert_eq!(band.upper(), 1.1);
        assert_eq!(band.half_width(), 0.1);
    }

    #[test]
    fn band_range_is_open() {
        assert!(UncertaintyBand::new(0.0).is_err());
        assert!(UncertaintyBand::new(1.0).is_err());
        assert!(UncertaintyBand::new(-0.2).is_err());
        assert!(UncertaintyBand::new(f64::NAN).is_err());
        assert!(UncertaintyBand::new(0.5).is_ok());
    }

    #[test]
    fn serde_rejects_out_of_range() {
        let ok: UncertaintyBand = serde_json::from_str("0.5").unwrap();
        assert_eq!(ok.half_width(), 0.5);
        assert!(serde_json::from_str::<UncertaintyBand>("1.5").is_err());

        let spec: UncertaintySpec = serde_json::from_str(r#"{"wind_output":0.5}"#).unwrap();
        assert_eq!(spec.wind_output, Some(ok));
        assert_eq!(spec.up_regulation, None);
    }
}
