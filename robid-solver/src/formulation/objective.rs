use super::BuildError;
use super::context::Builder;
use crate::types::{Family, IndexTuple, Quantity, Sense};
use robid_core::ports::MarketTables;

/// Objective terms and the per-hour robust value rows, built together
/// because they share the price lookups.
///
/// Per hour the objective collects day-ahead revenue (sell minus buy),
/// reserve revenue, the marginal cost of every scheduled flow, and the
/// robust value variable at coefficient one. That variable is only
/// upper-bounded, by one row per hour: the regulation revenue minus
/// deployment cost summed over the hour's sub-intervals. Maximization
/// presses it against whichever deployment the robust bounds admit as the
/// worst, so the objective prices real-time exposure at its minimum over
/// the band.
pub(crate) fn build<T: MarketTables>(b: &mut Builder<'_, T>) -> Result<(), BuildError> {
    let params = b.params;
    let horizon = params.horizon();
    let delta = horizon.interval();

    for t in horizon.hours() {
        let p_da = b.da_price(t)?;
        let p_rs = b.rs_price(t)?;
        let sell = b.hourly(Quantity::DaSell, t);
        let buy = b.hourly(Quantity::DaBuy, t);
        let reserve = b.hourly(Quantity::Reserve, t);
        let robust = b.hourly(Quantity::RobustValue, t);
        b.objective.push((sell, p_da));
        b.objective.push((buy, -p_da));
        b.objective.push((reserve, p_rs));
        b.objective.push((robust, 1.0));

        let mut worst = vec![(robust, 1.0)];
        for slot in horizon.subintervals_of(t) {
            let p_ur = b.up_price(slot)?;
            let p_dr = b.down_price(slot)?;
            for s in params.storage_ids() {
                let unit = params.storage(s);
                let discharge = b.storage(Quantity::DaDischarge, slot, s);
                let charge = b.storage(Quantity::DaCharge, slot, s);
                b.objective.push((discharge, -delta * unit.discharge_cost));
                b.objective.push((charge, -delta * unit.charge_cost));

                let up_charge = b.storage(Quantity::UpCharge, slot, s);
                let up_discharge = b.storage(Quantity::UpDischarge, slot, s);
                let down_charge = b.storage(Quantity::DownCharge, slot, s);
                let down_discharge = b.storage(Quantity::DownDischarge, slot, s);
                worst.push((up_charge, -delta * p_ur));
                worst.push((up_discharge, -delta * (p_ur - unit.discharge_cost)));
                worst.push((down_charge, -delta * (p_dr - unit.charge_cost)));
                worst.push((down_discharge, -delta * p_dr));
            }
            for w in params.wind_ids() {
                let unit = params.wind(w);
                let schedule = b.wind(Quantity::WindDaSchedule, slot, w);
                b.objective.push((schedule, -delta * unit.marginal_cost));

                let up = b.wind(Quantity::WindUp, slot, w);
                let down = b.wind(Quantity::WindDown, slot, w);
                worst.push((up, -delta * (p_ur - unit.marginal_cost)));
                worst.push((down, -delta * p_dr));
            }
        }
        b.push(Family::RobustValue, IndexTuple::Hour(t), worst, Sense::Le, 0.0);
    }

    Ok(())
}
