use super::context::Builder;
use crate::types::{Family, IndexTuple, Quantity, Sense};
use robid_core::models::EnergyAccounting;
use robid_core::ports::MarketTables;

/// The state-of-charge trajectories a unit carries under the configured
/// accounting, with the flows that drive each.
fn trajectories(accounting: EnergyAccounting) -> &'static [(Quantity, bool)] {
    // (energy quantity, day-ahead flows only)
    match accounting {
        EnergyAccounting::Split => &[
            (Quantity::EnergyDayAhead, true),
            (Quantity::EnergyRealized, false),
        ],
        EnergyAccounting::Combined => &[(Quantity::EnergyRealized, false)],
    }
}

/// State-of-charge recursion per unit and trajectory.
///
/// Each slot's energy equals the previous slot's energy plus the
/// duration-scaled net inflow; the first slot starts from the unit's anchor
/// energy, and the last slot is pinned back to it so a day's schedule is
/// repeatable. On a single-slot horizon the pin would contradict the opening
/// balance, so it is skipped and only the recursion constrains the slot.
pub(crate) fn energy_recursion<T: MarketTables>(b: &mut Builder<'_, T>) {
    let params = b.params;
    let horizon = params.horizon();
    let delta = horizon.interval();

    for s in params.storage_ids() {
        let anchor = params.storage(s).anchor_energy;
        for &(energy, da_only) in trajectories(params.options().accounting) {
            for slot in horizon.slots() {
                let mut terms = vec![
                    (b.storage(energy, slot, s), 1.0),
                    (b.storage(Quantity::DaCharge, slot, s), -delta),
                    (b.storage(Quantity::DaDischarge, slot, s), delta),
                ];
                if !da_only {
                    terms.push((b.storage(Quantity::DownCharge, slot, s), -delta));
                    terms.push((b.storage(Quantity::UpDischarge, slot, s), delta));
                }
                let rhs = match horizon.predecessor(slot) {
                    Some(prev) => {
                        terms.push((b.storage(energy, prev, s), -1.0));
                        0.0
                    }
                    None => anchor,
                };
                b.push(
                    Family::StorageEnergy,
                    IndexTuple::Storage(slot, s),
                    terms,
                    Sense::Eq,
                    rhs,
                );
            }
            if horizon.slot_count() > 1 {
                let last = horizon.last_slot();
                b.push(
                    Family::StorageEnergy,
                    IndexTuple::Storage(last, s),
                    vec![(b.storage(energy, last, s), 1.0)],
                    Sense::Eq,
                    anchor,
                );
            }
        }
    }
}

/// Power and energy capacity, gated by the commitment binaries.
///
/// Per slot and direction: the scheduled flow alone, and the flow plus its
/// reserve headroom, both sit inside `[min_power, max_power]` scaled by the
/// direction's binary, so an uncommitted direction collapses to zero. The
/// reserve enters the lower-bound rows with the opposite sign because a
/// deployed reserve moves the flow toward zero. Stored energy sits inside
/// `[min_energy, max_energy]` scaled by the active binary.
pub(crate) fn capacity<T: MarketTables>(b: &mut Builder<'_, T>) {
    let params = b.params;
    let horizon = params.horizon();

    for s in params.storage_ids() {
        let unit = params.storage(s);
        for slot in horizon.slots() {
            let index = IndexTuple::Storage(slot, s);
            let alpha = b.storage(Quantity::ChargeFlag, slot, s);
            let beta = b.storage(Quantity::DischargeFlag, slot, s);

            for (flow, reserve, binary) in [
                (Quantity::DaCharge, Quantity::ReserveCharge, alpha),
                (Quantity::DaDischarge, Quantity::ReserveDischarge, beta),
            ] {
                let flow = b.storage(flow, slot, s);
                let reserve = b.storage(reserve, slot, s);
                b.push(
                    Family::StorageCapacity,
                    index,
                    vec![(flow, 1.0), (binary, -unit.max_power)],
                    Sense::Le,
                    0.0,
                );
                b.push(
                    Family::StorageCapacity,
                    index,
                    vec![(flow, 1.0), (reserve, 1.0), (binary, -unit.max_power)],
                    Sense::Le,
                    0.0,
                );
                b.push(
                    Family::StorageCapacity,
                    index,
                    vec![(flow, 1.0), (binary, -unit.min_power)],
                    Sense::Ge,
                    0.0,
                );
                b.push(
                    Family::StorageCapacity,
                    index,
                    vec![(flow, 1.0), (reserve, -1.0), (binary, -unit.min_power)],
                    Sense::Ge,
                    0.0,
                );
            }

            for &(energy, _) in trajectories(params.options().accounting) {
                let energy = b.storage(energy, slot, s);
                b.push(
                    Family::StorageCapacity,
                    index,
                    vec![
                        (energy, 1.0),
                        (alpha, -unit.max_energy),
                        (beta, -unit.max_energy),
                    ],
                    Sense::Le,
                    0.0,
                );
                b.push(
                    Family::StorageCapacity,
                    index,
                    vec![
                        (energy, 1.0),
                        (alpha, -unit.min_energy),
                        (beta, -unit.min_energy),
                    ],
                    Sense::Ge,
                    0.0,
                );
            }
        }
    }
}

/// A unit charges or discharges in a slot, never both.
pub(crate) fn binary_links<T: MarketTables>(b: &mut Builder<'_, T>) {
    let params = b.params;
    let horizon = params.horizon();

    for s in params.storage_ids() {
        for slot in horizon.slots() {
            let alpha = b.storage(Quantity::ChargeFlag, slot, s);
            let beta = b.storage(Quantity::DischargeFlag, slot, s);
            b.push(
                Family::BinaryLink,
                IndexTuple::Storage(slot, s),
                vec![(alpha, 1.0), (beta, 1.0)],
                Sense::Le,
                1.0,
            );
        }
    }
}
