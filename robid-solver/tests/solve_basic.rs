use approx::assert_abs_diff_eq;
use robid_core::models::{
    FormulationOptions, Horizon, MemoryTables, ParameterSet, StorageId, StorageUnit,
    UncertaintySpec, UniformFill,
};
use robid_solver::{Quantity, assemble};
use rstest::*;
use rstest_reuse::{self, *};

mod all_solvers;
use all_solvers::all_solvers;

/// Two hours of three sub-intervals with an expensive first hour and a cheap
/// second one, so the optimum sells stored energy early and buys it back
/// late. The properties below hold for any optimal point, so none of the
/// assertions depend on how a backend breaks ties.
#[fixture]
pub fn arbitrage_scenario() -> (ParameterSet, MemoryTables) {
    let horizon = Horizon::new(2, 3).unwrap();
    let unit = StorageUnit {
        min_power: 0.0,
        max_power: 5.0,
        min_energy: 0.0,
        max_energy: 30.0,
        ramp_rate: 10.0,
        anchor_energy: 15.0,
        charge_cost: 0.5,
        discharge_cost: 0.5,
    };
    let params = ParameterSet::new(
        horizon,
        vec![unit],
        vec![],
        UncertaintySpec::none(),
        FormulationOptions::default(),
    )
    .unwrap();

    let mut tables = MemoryTables::uniform(
        horizon,
        0,
        UniformFill {
            reserve_price: 10.0,
            up_regulation_price: 5.0,
            down_regulation_price: 2.0,
            ..UniformFill::default()
        },
    );
    tables.day_ahead_price = vec![50.0, 20.0];

    (params, tables)
}

#[apply(all_solvers)]
#[rstest]
fn schedules_are_constant_within_each_hour(
    solver: impl robid_solver::Solver,
    arbitrage_scenario: (ParameterSet, MemoryTables),
) {
    let (params, tables) = arbitrage_scenario;
    let model = assemble(&params, &tables).unwrap();
    let solution = solver.solve(&model).unwrap();

    for quantity in [
        Quantity::DaCharge,
        Quantity::DaDischarge,
        Quantity::ReserveCharge,
        Quantity::ReserveDischarge,
        Quantity::ChargeFlag,
        Quantity::DischargeFlag,
    ] {
        let series = solution.for_storage(quantity, StorageId(0));
        assert_eq!(series.len(), 6);
        for pair in series.windows(2) {
            let ((lead, a), (next, b)) = (pair[0], pair[1]);
            if lead.hour == next.hour {
                assert_abs_diff_eq!(a, b, epsilon = 1e-6);
            }
        }
    }
}

#[apply(all_solvers)]
#[rstest]
fn energy_returns_to_the_anchor(
    solver: impl robid_solver::Solver,
    arbitrage_scenario: (ParameterSet, MemoryTables),
) {
    let (params, tables) = arbitrage_scenario;
    let model = assemble(&params, &tables).unwrap();
    let solution = solver.solve(&model).unwrap();

    // both trajectories close the cycle at the final slot
    for quantity in [Quantity::EnergyDayAhead, Quantity::EnergyRealized] {
        let series = solution.for_storage(quantity, StorageId(0));
        let &(slot, value) = series.last().unwrap();
        assert_eq!(slot, params.horizon().last_slot());
        assert_abs_diff_eq!(value, 15.0, epsilon = 1e-6);
    }
}

#[apply(all_solvers)]
#[rstest]
fn commitments_are_integral_and_exclusive(
    solver: impl robid_solver::Solver,
    arbitrage_scenario: (ParameterSet, MemoryTables),
) {
    let (params, tables) = arbitrage_scenario;
    let model = assemble(&params, &tables).unwrap();
    let solution = solver.solve(&model).unwrap();

    let charging = solution.for_storage(Quantity::ChargeFlag, StorageId(0));
    let discharging = solution.for_storage(Quantity::DischargeFlag, StorageId(0));
    for (&(_, alpha), &(_, beta)) in charging.iter().zip(discharging.iter()) {
        for flag in [alpha, beta] {
            assert!(
                flag.abs() < 1e-6 || (flag - 1.0).abs() < 1e-6,
                "commitment flag is fractional: {flag}"
            );
        }
        assert!(alpha + beta <= 1.0 + 1e-6);
    }
}

#[apply(all_solvers)]
#[rstest]
fn deployment_stays_inside_the_reserve_schedule(
    solver: impl robid_solver::Solver,
    arbitrage_scenario: (ParameterSet, MemoryTables),
) {
    let (params, tables) = arbitrage_scenario;
    let model = assemble(&params, &tables).unwrap();
    let solution = solver.solve(&model).unwrap();

    for (deployment, reserve) in [
        (Quantity::UpCharge, Quantity::ReserveCharge),
        (Quantity::DownCharge, Quantity::ReserveCharge),
        (Quantity::UpDischarge, Quantity::ReserveDischarge),
        (Quantity::DownDischarge, Quantity::ReserveDischarge),
    ] {
        let deployed = solution.for_storage(deployment, StorageId(0));
        let reserved = solution.for_storage(reserve, StorageId(0));
        for (&(_, dep), &(_, rs)) in deployed.iter().zip(reserved.iter()) {
            assert!(dep >= -1e-6);
            assert!(dep <= rs + 1e-6, "deployment {dep} exceeds reserve {rs}");
        }
    }
}

#[apply(all_solvers)]
#[rstest]
fn revenue_report_buckets_sum_to_the_objective(
    solver: impl robid_solver::Solver,
    arbitrage_scenario: (ParameterSet, MemoryTables),
) {
    let (params, tables) = arbitrage_scenario;
    let model = assemble(&params, &tables).unwrap();
    let solution = solver.solve(&model).unwrap();

    let report = solution.report(&model);
    assert_eq!(report.hours.len(), 2);
    assert_abs_diff_eq!(report.total, solution.objective(), epsilon = 1e-9);

    let nets: f64 = report.hours.iter().map(|hour| hour.net()).sum();
    assert_abs_diff_eq!(nets, solution.objective(), epsilon = 1e-6);
}
