use super::BuildError;
use super::context::Builder;
use crate::types::{Family, IndexTuple, Quantity, Sense};
use robid_core::ports::MarketTables;

/// Pin each uncertain realization inside its configured band around the
/// point forecast, one (>=, <=) pair per cell.
///
/// Every admissible realization is then a feasible point of the model, so
/// maximizing an objective that only upper-bounds the real-time term yields
/// the worst case over the band without enumerating its vertices. A quantity
/// with no configured band keeps only its variable bounds.
pub(crate) fn bounds<T: MarketTables>(b: &mut Builder<'_, T>) -> Result<(), BuildError> {
    let params = b.params;
    let horizon = params.horizon();
    let uncertainty = params.uncertainty();

    if let Some(band) = uncertainty.up_regulation {
        for slot in horizon.slots() {
            let forecast = b.expected_up(slot)?;
            let deployment = b.slot(Quantity::UpDeployment, slot);
            let index = IndexTuple::Slot(slot);
            b.push(
                Family::RobustBound,
                index,
                vec![(deployment, 1.0)],
                Sense::Ge,
                band.lower() * forecast,
            );
            b.push(
                Family::RobustBound,
                index,
                vec![(deployment, 1.0)],
                Sense::Le,
                band.upper() * forecast,
            );
        }
    }

    if let Some(band) = uncertainty.down_regulation {
        for slot in horizon.slots() {
            let forecast = b.expected_down(slot)?;
            let deployment = b.slot(Quantity::DownDeployment, slot);
            let index = IndexTuple::Slot(slot);
            b.push(
                Family::RobustBound,
                index,
                vec![(deployment, 1.0)],
                Sense::Ge,
                band.lower() * forecast,
            );
            b.push(
                Family::RobustBound,
                index,
                vec![(deployment, 1.0)],
                Sense::Le,
                band.upper() * forecast,
            );
        }
    }

    if let Some(band) = uncertainty.wind_output {
        for w in params.wind_ids() {
            for slot in horizon.slots() {
                let forecast = b.expected_wind(slot, w, Family::RobustBound)?;
                let realized = b.wind(Quantity::WindRealized, slot, w);
                let index = IndexTuple::Wind(slot, w);
                b.push(
                    Family::RobustBound,
                    index,
                    vec![(realized, 1.0)],
                    Sense::Ge,
                    band.lower() * forecast,
                );
                b.push(
                    Family::RobustBound,
                    index,
                    vec![(realized, 1.0)],
                    Sense::Le,
                    band.upper() * forecast,
                );
            }
        }
    }

    Ok(())
}
