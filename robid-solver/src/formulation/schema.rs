use super::BuildError;
use super::context::Builder;
use crate::types::{Family, Quantity, VarKey};
use robid_core::models::EnergyAccounting;
use robid_core::ports::MarketTables;

/// Declare every decision variable, in a fixed block order: hourly
/// aggregates, per-slot aggregates, storage units, wind units.
///
/// All quantities are non-negative. Flows are uncapped here (their limits are
/// commitment-scaled rows, not plain bounds); state of charge is capped by
/// unit capacity; every wind quantity is capped by the unit's widest
/// admissible realization, computed from the forecast peak and the band
/// ceiling. A unit whose forecast is zero everywhere gets a zero cap and is
/// thereby excluded from all markets without any special casing.
pub(crate) fn declare<T: MarketTables>(b: &mut Builder<'_, T>) -> Result<(), BuildError> {
    let params = b.params;
    let horizon = params.horizon();
    let split = params.options().accounting == EnergyAccounting::Split;

    // realization caps first: wind variable bounds derive from them
    let ceiling = params
        .uncertainty()
        .wind_output
        .map(|band| band.upper())
        .unwrap_or(1.0);
    for w in params.wind_ids() {
        let mut peak = 0.0f64;
        for slot in horizon.slots() {
            peak = peak.max(b.expected_wind(slot, w, Family::WindLink)?);
        }
        b.wind_caps.push(ceiling * peak);
    }

    for quantity in [
        Quantity::DaSell,
        Quantity::DaBuy,
        Quantity::Reserve,
        Quantity::RobustValue,
    ] {
        for t in horizon.hours() {
            b.declare(VarKey::hourly(quantity, t), 0.0, f64::INFINITY);
        }
    }

    for quantity in [Quantity::UpDeployment, Quantity::DownDeployment] {
        for slot in horizon.slots() {
            b.declare(VarKey::slot(quantity, slot), 0.0, f64::INFINITY);
        }
    }

    for s in params.storage_ids() {
        let unit = *params.storage(s);
        for quantity in [
            Quantity::DaCharge,
            Quantity::DaDischarge,
            Quantity::ReserveCharge,
            Quantity::ReserveDischarge,
            Quantity::UpCharge,
            Quantity::UpDischarge,
            Quantity::DownCharge,
            Quantity::DownDischarge,
        ] {
            for slot in horizon.slots() {
                b.declare(VarKey::storage(quantity, slot, s), 0.0, f64::INFINITY);
            }
        }
        if split {
            for slot in horizon.slots() {
                b.declare(
                    VarKey::storage(Quantity::EnergyDayAhead, slot, s),
                    0.0,
                    unit.max_energy,
                );
            }
        }
        for slot in horizon.slots() {
            b.declare(
                VarKey::storage(Quantity::EnergyRealized, slot, s),
                0.0,
                unit.max_energy,
            );
        }
        for quantity in [Quantity::ChargeFlag, Quantity::DischargeFlag] {
            for slot in horizon.slots() {
                b.declare(VarKey::storage(quantity, slot, s), 0.0, 1.0);
            }
        }
    }

    for w in params.wind_ids() {
        let cap = b.wind_caps[w.0];
        for quantity in [
            Quantity::WindDaSchedule,
            Quantity::WindReserve,
            Quantity::WindUp,
            Quantity::WindDown,
            Quantity::WindRealized,
        ] {
            for slot in horizon.slots() {
                b.declare(VarKey::wind(quantity, slot, w), 0.0, cap);
            }
        }
        if split {
            for slot in horizon.slots() {
                b.declare(VarKey::wind(Quantity::WindSpillage, slot, w), 0.0, cap);
            }
        }
        for slot in horizon.slots() {
            b.declare(VarKey::wind(Quantity::WindCommit, slot, w), 0.0, 1.0);
        }
    }

    Ok(())
}
