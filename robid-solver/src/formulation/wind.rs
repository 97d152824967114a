use super::context::Builder;
use crate::types::{Family, IndexTuple, Quantity, Sense};
use robid_core::models::EnergyAccounting;
use robid_core::ports::MarketTables;

/// Big-M sandwiches tying each wind unit's schedules to its commitment
/// binary.
///
/// Committed, the absolute-difference pairs collapse: the realized output
/// equals the day-ahead schedule and the reserve offer drops to zero.
/// Uncommitted, the schedule pairs force day-ahead and reserve to zero and
/// the realization roams free under its bound. M constants come from the
/// unit's realization cap; the three-variable pair needs twice that because
/// it bounds a sum of two capped schedules.
///
/// The last row keeps the reserve offer inside the day-ahead schedule, so a
/// called reserve is always backed by energy the unit already sold.
pub(crate) fn commitment_links<T: MarketTables>(b: &mut Builder<'_, T>) {
    let params = b.params;
    let horizon = params.horizon();

    for w in params.wind_ids() {
        let m1 = b.wind_caps[w.0];
        let m2 = 2.0 * m1;
        for slot in horizon.slots() {
            let index = IndexTuple::Wind(slot, w);
            let da = b.wind(Quantity::WindDaSchedule, slot, w);
            let rs = b.wind(Quantity::WindReserve, slot, w);
            let rt = b.wind(Quantity::WindRealized, slot, w);
            let commit = b.wind(Quantity::WindCommit, slot, w);

            // |rt - da| <= m1 (1 - commit)
            b.push(
                Family::WindLink,
                index,
                vec![(rt, 1.0), (da, -1.0), (commit, m1)],
                Sense::Le,
                m1,
            );
            b.push(
                Family::WindLink,
                index,
                vec![(da, 1.0), (rt, -1.0), (commit, m1)],
                Sense::Le,
                m1,
            );
            // |da| <= m1 commit
            b.push(
                Family::WindLink,
                index,
                vec![(da, 1.0), (commit, -m1)],
                Sense::Le,
                0.0,
            );
            b.push(
                Family::WindLink,
                index,
                vec![(da, -1.0), (commit, -m1)],
                Sense::Le,
                0.0,
            );
            // |rt - da - rs| <= m2 (1 - commit)
            b.push(
                Family::WindLink,
                index,
                vec![(rt, 1.0), (da, -1.0), (rs, -1.0), (commit, m2)],
                Sense::Le,
                m2,
            );
            b.push(
                Family::WindLink,
                index,
                vec![(rs, 1.0), (da, 1.0), (rt, -1.0), (commit, m2)],
                Sense::Le,
                m2,
            );
            // |da + rs| <= m2 commit
            b.push(
                Family::WindLink,
                index,
                vec![(da, 1.0), (rs, 1.0), (commit, -m2)],
                Sense::Le,
                0.0,
            );
            b.push(
                Family::WindLink,
                index,
                vec![(da, -1.0), (rs, -1.0), (commit, -m2)],
                Sense::Le,
                0.0,
            );
            // rs <= da
            b.push(
                Family::WindLink,
                index,
                vec![(rs, 1.0), (da, -1.0)],
                Sense::Le,
                0.0,
            );
        }
    }
}

/// Explicit spillage accounting, split mode only: spilled output is whatever
/// the realization delivers beyond the day-ahead schedule and the net
/// regulation deployment.
pub(crate) fn spillage<T: MarketTables>(b: &mut Builder<'_, T>) {
    let params = b.params;
    if params.options().accounting != EnergyAccounting::Split {
        return;
    }
    let horizon = params.horizon();

    for w in params.wind_ids() {
        for slot in horizon.slots() {
            let spill = b.wind(Quantity::WindSpillage, slot, w);
            let rt = b.wind(Quantity::WindRealized, slot, w);
            let da = b.wind(Quantity::WindDaSchedule, slot, w);
            let up = b.wind(Quantity::WindUp, slot, w);
            let down = b.wind(Quantity::WindDown, slot, w);
            b.push(
                Family::WindSpillage,
                IndexTuple::Wind(slot, w),
                vec![
                    (spill, 1.0),
                    (rt, -1.0),
                    (da, 1.0),
                    (up, 1.0),
                    (down, -1.0),
                ],
                Sense::Eq,
                0.0,
            );
        }
    }
}
