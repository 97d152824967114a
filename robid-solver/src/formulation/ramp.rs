use super::context::Builder;
use crate::types::{Family, IndexTuple, Quantity, Sense};
use robid_core::models::{Horizon, RampGranularity, TimeSlot};
use robid_core::ports::MarketTables;

/// The (current, previous) slot pairs a ramp row spans under the configured
/// granularity, with the factor applied to each unit's hourly limit.
///
/// Sub-interval granularity checks every consecutive slot pair against the
/// duration-scaled limit. Hourly granularity checks only the pairs that
/// straddle an hour boundary, against the unscaled limit; within an hour the
/// schedules are already held constant.
fn spans(horizon: Horizon, granularity: RampGranularity) -> (f64, Vec<(TimeSlot, TimeSlot)>) {
    match granularity {
        RampGranularity::SubInterval => (
            horizon.interval(),
            horizon
                .slots()
                .filter_map(|slot| horizon.predecessor(slot).map(|prev| (slot, prev)))
                .collect(),
        ),
        RampGranularity::Hourly => (
            1.0,
            horizon
                .slots()
                .filter(|slot| slot.interval == 1)
                .filter_map(|slot| horizon.predecessor(slot).map(|prev| (slot, prev)))
                .collect(),
        ),
    }
}

/// Ramp-rate limits on every scheduled flow.
///
/// The opening slot gets its own body: each schedule, and each schedule plus
/// its reserve, ramps up from an idle unit. Every spanned pair then bounds
/// three movements per direction: the day-ahead schedule alone (two-sided),
/// the reserves of both endpoints in sum (a called reserve can swing either
/// endpoint), and the combined worst case where the current slot deploys
/// toward the schedule and the previous slot deployed away from it.
pub(crate) fn limits<T: MarketTables>(b: &mut Builder<'_, T>) {
    let params = b.params;
    let horizon = params.horizon();
    let (scale, pairs) = spans(horizon, params.options().ramp_granularity);
    let first = horizon.first_slot();

    for s in params.storage_ids() {
        let r = params.storage(s).ramp_rate * scale;

        let index = IndexTuple::Storage(first, s);
        let ch = b.storage(Quantity::DaCharge, first, s);
        let dch = b.storage(Quantity::DaDischarge, first, s);
        let rs_ch = b.storage(Quantity::ReserveCharge, first, s);
        let rs_dch = b.storage(Quantity::ReserveDischarge, first, s);
        for terms in [
            vec![(ch, 1.0)],
            vec![(dch, 1.0)],
            vec![(rs_ch, 1.0)],
            vec![(rs_dch, 1.0)],
            vec![(ch, 1.0), (rs_ch, 1.0)],
            vec![(dch, 1.0), (rs_dch, 1.0)],
        ] {
            b.push(Family::RampRate, index, terms, Sense::Le, r);
        }

        for &(cur, prev) in &pairs {
            let index = IndexTuple::Storage(cur, s);
            for (flow, reserve) in [
                (Quantity::DaCharge, Quantity::ReserveCharge),
                (Quantity::DaDischarge, Quantity::ReserveDischarge),
            ] {
                let f_c = b.storage(flow, cur, s);
                let f_p = b.storage(flow, prev, s);
                let rs_c = b.storage(reserve, cur, s);
                let rs_p = b.storage(reserve, prev, s);
                for terms in [
                    vec![(f_c, 1.0), (f_p, -1.0)],
                    vec![(f_c, -1.0), (f_p, 1.0)],
                    vec![(rs_c, 1.0), (rs_p, 1.0)],
                    // (f + rs) now minus (f - rs) then, and its reverse
                    vec![(f_c, 1.0), (rs_c, 1.0), (f_p, -1.0), (rs_p, 1.0)],
                    vec![(f_c, -1.0), (rs_c, -1.0), (f_p, 1.0), (rs_p, -1.0)],
                ] {
                    b.push(Family::RampRate, index, terms, Sense::Le, r);
                }
            }
        }
    }

    for w in params.wind_ids() {
        let r = params.wind(w).ramp_rate * scale;

        let index = IndexTuple::Wind(first, w);
        let da = b.wind(Quantity::WindDaSchedule, first, w);
        let rs = b.wind(Quantity::WindReserve, first, w);
        for terms in [
            vec![(da, 1.0)],
            vec![(rs, 1.0)],
            vec![(da, 1.0), (rs, 1.0)],
        ] {
            b.push(Family::RampRate, index, terms, Sense::Le, r);
        }

        for &(cur, prev) in &pairs {
            let index = IndexTuple::Wind(cur, w);
            let da_c = b.wind(Quantity::WindDaSchedule, cur, w);
            let da_p = b.wind(Quantity::WindDaSchedule, prev, w);
            let rs_c = b.wind(Quantity::WindReserve, cur, w);
            let rs_p = b.wind(Quantity::WindReserve, prev, w);
            for terms in [
                vec![(da_c, 1.0), (da_p, -1.0)],
                vec![(da_c, -1.0), (da_p, 1.0)],
                vec![(rs_c, 1.0), (rs_p, 1.0)],
                vec![(da_c, 1.0), (rs_c, 1.0), (da_p, -1.0), (rs_p, 1.0)],
                vec![(da_c, -1.0), (rs_c, -1.0), (da_p, 1.0), (rs_p, -1.0)],
            ] {
                b.push(Family::RampRate, index, terms, Sense::Le, r);
            }
        }
    }
}
