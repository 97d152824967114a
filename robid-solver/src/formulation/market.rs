use super::context::Builder;
use crate::types::{Family, IndexTuple, Quantity, Sense};
use robid_core::ports::MarketTables;

/// Storage quantities that must be equal across the sub-intervals of an hour.
const STORAGE_HOUR_CONSTANT: [Quantity; 6] = [
    Quantity::DaCharge,
    Quantity::DaDischarge,
    Quantity::ReserveCharge,
    Quantity::ReserveDischarge,
    Quantity::ChargeFlag,
    Quantity::DischargeFlag,
];

/// Wind quantities that must be equal across the sub-intervals of an hour.
const WIND_HOUR_CONSTANT: [Quantity; 3] = [
    Quantity::WindDaSchedule,
    Quantity::WindReserve,
    Quantity::WindCommit,
];

/// Day-ahead and reserve schedules are bid hourly, so every unit's schedule
/// (and commitment) is pinned equal across the sub-intervals of each hour.
///
/// One equality per adjacent sub-interval pair chains the whole hour; an
/// hour with a single sub-interval needs no rows. Regulation deployments are
/// genuinely sub-hourly and stay free.
pub(crate) fn hourly_invariance<T: MarketTables>(b: &mut Builder<'_, T>) {
    let params = b.params;
    let horizon = params.horizon();

    for s in params.storage_ids() {
        for quantity in STORAGE_HOUR_CONSTANT {
            for t in horizon.hours() {
                let slots: Vec<_> = horizon.subintervals_of(t).collect();
                for pair in slots.windows(2) {
                    let lead = b.storage(quantity, pair[0], s);
                    let next = b.storage(quantity, pair[1], s);
                    b.push(
                        Family::HourlyInvariance,
                        IndexTuple::Storage(pair[0], s),
                        vec![(lead, 1.0), (next, -1.0)],
                        Sense::Eq,
                        0.0,
                    );
                }
            }
        }
    }

    for w in params.wind_ids() {
        for quantity in WIND_HOUR_CONSTANT {
            for t in horizon.hours() {
                let slots: Vec<_> = horizon.subintervals_of(t).collect();
                for pair in slots.windows(2) {
                    let lead = b.wind(quantity, pair[0], w);
                    let next = b.wind(quantity, pair[1], w);
                    b.push(
                        Family::HourlyInvariance,
                        IndexTuple::Wind(pair[0], w),
                        vec![(lead, 1.0), (next, -1.0)],
                        Sense::Eq,
                        0.0,
                    );
                }
            }
        }
    }
}

/// Tie the market-level quantities to the unit schedules.
///
/// Hourly energies are duration-scaled sums over the hour's sub-intervals:
/// sell aggregates storage discharge and wind schedules, buy aggregates
/// storage charge, reserve aggregates both reserve directions and wind.
/// Deployments aggregate per slot without scaling; they are instantaneous
/// power, not energy.
pub(crate) fn aggregation<T: MarketTables>(b: &mut Builder<'_, T>) {
    let params = b.params;
    let horizon = params.horizon();
    let delta = horizon.interval();

    for t in horizon.hours() {
        let mut sell = vec![(b.hourly(Quantity::DaSell, t), 1.0)];
        let mut buy = vec![(b.hourly(Quantity::DaBuy, t), 1.0)];
        let mut reserve = vec![(b.hourly(Quantity::Reserve, t), 1.0)];
        for slot in horizon.subintervals_of(t) {
            for s in params.storage_ids() {
                sell.push((b.storage(Quantity::DaDischarge, slot, s), -delta));
                buy.push((b.storage(Quantity::DaCharge, slot, s), -delta));
                reserve.push((b.storage(Quantity::ReserveCharge, slot, s), -delta));
                reserve.push((b.storage(Quantity::ReserveDischarge, slot, s), -delta));
            }
            for w in params.wind_ids() {
                sell.push((b.wind(Quantity::WindDaSchedule, slot, w), -delta));
                reserve.push((b.wind(Quantity::WindReserve, slot, w), -delta));
            }
        }
        let index = IndexTuple::Hour(t);
        b.push(Family::MarketAggregation, index, sell, Sense::Eq, 0.0);
        b.push(Family::MarketAggregation, index, buy, Sense::Eq, 0.0);
        b.push(Family::MarketAggregation, index, reserve, Sense::Eq, 0.0);
    }

    for slot in horizon.slots() {
        let mut up = vec![(b.slot(Quantity::UpDeployment, slot), 1.0)];
        let mut down = vec![(b.slot(Quantity::DownDeployment, slot), 1.0)];
        for s in params.storage_ids() {
            up.push((b.storage(Quantity::UpCharge, slot, s), -1.0));
            up.push((b.storage(Quantity::UpDischarge, slot, s), -1.0));
            down.push((b.storage(Quantity::DownCharge, slot, s), -1.0));
            down.push((b.storage(Quantity::DownDischarge, slot, s), -1.0));
        }
        for w in params.wind_ids() {
            up.push((b.wind(Quantity::WindUp, slot, w), -1.0));
            down.push((b.wind(Quantity::WindDown, slot, w), -1.0));
        }
        let index = IndexTuple::Slot(slot);
        b.push(Family::MarketAggregation, index, up, Sense::Eq, 0.0);
        b.push(Family::MarketAggregation, index, down, Sense::Eq, 0.0);
    }
}

/// Regulation deployment lives inside `[0, reserve]`: per unit against the
/// unit's own reserve schedule, and in aggregate against the hourly reserve
/// bid. The lower ends are the variable bounds.
pub(crate) fn deployment_caps<T: MarketTables>(b: &mut Builder<'_, T>) {
    let params = b.params;
    let horizon = params.horizon();

    for s in params.storage_ids() {
        for slot in horizon.slots() {
            let index = IndexTuple::Storage(slot, s);
            let rs_ch = b.storage(Quantity::ReserveCharge, slot, s);
            let rs_dch = b.storage(Quantity::ReserveDischarge, slot, s);
            for (deployment, reserve) in [
                (Quantity::UpCharge, rs_ch),
                (Quantity::DownCharge, rs_ch),
                (Quantity::UpDischarge, rs_dch),
                (Quantity::DownDischarge, rs_dch),
            ] {
                let dep = b.storage(deployment, slot, s);
                b.push(
                    Family::DeploymentCap,
                    index,
                    vec![(dep, 1.0), (reserve, -1.0)],
                    Sense::Le,
                    0.0,
                );
            }
        }
    }

    for w in params.wind_ids() {
        for slot in horizon.slots() {
            let index = IndexTuple::Wind(slot, w);
            let reserve = b.wind(Quantity::WindReserve, slot, w);
            for deployment in [Quantity::WindUp, Quantity::WindDown] {
                let dep = b.wind(deployment, slot, w);
                b.push(
                    Family::DeploymentCap,
                    index,
                    vec![(dep, 1.0), (reserve, -1.0)],
                    Sense::Le,
                    0.0,
                );
            }
        }
    }

    for slot in horizon.slots() {
        let reserve = b.hourly(Quantity::Reserve, slot.hour);
        let index = IndexTuple::Slot(slot);
        for deployment in [Quantity::UpDeployment, Quantity::DownDeployment] {
            let dep = b.slot(deployment, slot);
            b.push(
                Family::DeploymentCap,
                index,
                vec![(dep, 1.0), (reserve, -1.0)],
                Sense::Le,
                0.0,
            );
        }
    }
}
