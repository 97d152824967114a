use approx::assert_abs_diff_eq;
use robid_core::models::{
    FormulationOptions, Horizon, Hour, MemoryTables, ParameterSet, StorageId, StorageUnit,
    TimeSlot, UncertaintyBand, UncertaintySpec, UniformFill, WindId, WindUnit,
};
use robid_solver::microlp::MicrolpSolver;
use robid_solver::{MilpSettings, Quantity, SolveError, Solver, VarKey, assemble};
use rstest::*;
use rstest_reuse::{self, *};

mod all_solvers;
use all_solvers::all_solvers;

fn slot(t: u16, j: u16) -> TimeSlot {
    TimeSlot {
        hour: Hour(t),
        interval: j,
    }
}

/// One wind unit forecast at 4 with a ±50% output band, so the committed
/// realization may sit anywhere in [2, 6].
fn wind_scenario() -> (ParameterSet, MemoryTables) {
    let horizon = Horizon::new(1, 1).unwrap();
    let params = ParameterSet::new(
        horizon,
        vec![],
        vec![WindUnit {
            ramp_rate: 10.0,
            marginal_cost: 3.0,
        }],
        UncertaintySpec {
            wind_output: Some(UncertaintyBand::new(0.5).unwrap()),
            ..UncertaintySpec::none()
        },
        FormulationOptions::default(),
    )
    .unwrap();
    let tables = MemoryTables::uniform(
        horizon,
        1,
        UniformFill {
            day_ahead_price: 50.0,
            reserve_price: 10.0,
            up_regulation_price: 5.0,
            down_regulation_price: 2.0,
            expected_wind_output: 4.0,
            ..UniformFill::default()
        },
    );
    (params, tables)
}

#[test]
fn pinning_commitment_off_zeroes_the_wind_schedules() {
    let (params, tables) = wind_scenario();
    let model = assemble(&params, &tables).unwrap();

    let commit = VarKey::wind(Quantity::WindCommit, slot(1, 1), WindId(0));
    let solver = MicrolpSolver::new(MilpSettings {
        fixed: vec![(commit, 0.0)],
    });
    let solution = solver.solve(&model).unwrap();

    for quantity in [Quantity::WindDaSchedule, Quantity::WindReserve] {
        for (_, value) in solution.for_wind(quantity, WindId(0)) {
            assert_abs_diff_eq!(value, 0.0, epsilon = 1e-6);
        }
    }
    assert_abs_diff_eq!(solution.objective(), 0.0, epsilon = 1e-6);
}

#[test]
fn pinning_commitment_on_keeps_the_schedule_inside_the_band() {
    let (params, tables) = wind_scenario();
    let model = assemble(&params, &tables).unwrap();

    let commit = VarKey::wind(Quantity::WindCommit, slot(1, 1), WindId(0));
    let solver = MicrolpSolver::new(MilpSettings {
        fixed: vec![(commit, 1.0)],
    });
    let solution = solver.solve(&model).unwrap();

    let da = solution
        .get(&VarKey::wind(Quantity::WindDaSchedule, slot(1, 1), WindId(0)))
        .unwrap();
    let rt = solution
        .get(&VarKey::wind(Quantity::WindRealized, slot(1, 1), WindId(0)))
        .unwrap();
    let rs = solution
        .get(&VarKey::wind(Quantity::WindReserve, slot(1, 1), WindId(0)))
        .unwrap();

    // committed: the schedule tracks the realization inside the band, and
    // the sandwich leaves no reserve headroom to offer
    assert_abs_diff_eq!(da, rt, epsilon = 1e-6);
    assert!(da >= 2.0 - 1e-6 && da <= 6.0 + 1e-6);
    assert_abs_diff_eq!(rs, 0.0, epsilon = 1e-6);
}

#[test]
fn a_pin_on_an_unknown_key_fails_before_solving() {
    let (params, tables) = wind_scenario();
    let model = assemble(&params, &tables).unwrap();

    let stray = VarKey::wind(Quantity::WindCommit, slot(1, 1), WindId(7));
    let solver = MicrolpSolver::new(MilpSettings {
        fixed: vec![(stray, 1.0)],
    });
    assert_eq!(
        solver.solve(&model).unwrap_err(),
        SolveError::UnknownVariable(stray)
    );
}

/// One storage unit, one slot, an up-regulation band of ±10% around a
/// forecast of 10: deployment must land in [9, 11]. Reserve capacity peaks
/// at `max_power / 2` (the schedule and its headroom share the power
/// limit), so `max_power` decides which end of the band binds.
fn regulation_scenario(
    max_power: f64,
    anchor: f64,
    max_energy: f64,
    day_ahead: f64,
) -> (ParameterSet, MemoryTables) {
    let horizon = Horizon::new(1, 1).unwrap();
    let params = ParameterSet::new(
        horizon,
        vec![StorageUnit {
            min_power: 0.0,
            max_power,
            min_energy: 0.0,
            max_energy,
            ramp_rate: 1000.0,
            anchor_energy: anchor,
            charge_cost: 0.0,
            discharge_cost: 0.0,
        }],
        vec![],
        UncertaintySpec {
            up_regulation: Some(UncertaintyBand::new(0.1).unwrap()),
            ..UncertaintySpec::none()
        },
        FormulationOptions::default(),
    )
    .unwrap();
    let tables = MemoryTables::uniform(
        horizon,
        0,
        UniformFill {
            day_ahead_price: day_ahead,
            reserve_price: 10.0,
            up_regulation_price: 5.0,
            down_regulation_price: 0.0,
            expected_up_regulation: 10.0,
            ..UniformFill::default()
        },
    );
    (params, tables)
}

#[apply(all_solvers)]
#[rstest]
fn scarce_reserve_is_priced_at_the_band_floor(solver: impl robid_solver::Solver) {
    // max_power 18 caps the reserve at 9, exactly the band floor: the whole
    // schedule is forced, and the margin auxiliary equals the up price times
    // the floor deployment.
    let (params, tables) = regulation_scenario(18.0, 20.0, 40.0, 50.0);
    let model = assemble(&params, &tables).unwrap();
    let solution = solver.solve(&model).unwrap();

    let at = |quantity| {
        solution
            .get(&VarKey::storage(quantity, slot(1, 1), StorageId(0)))
            .unwrap()
    };
    assert_abs_diff_eq!(at(Quantity::DaDischarge), 9.0, epsilon = 1e-6);
    assert_abs_diff_eq!(at(Quantity::ReserveDischarge), 9.0, epsilon = 1e-6);
    assert_abs_diff_eq!(at(Quantity::UpDischarge), 9.0, epsilon = 1e-6);

    let deployment = solution
        .get(&VarKey::slot(Quantity::UpDeployment, slot(1, 1)))
        .unwrap();
    assert_abs_diff_eq!(deployment, 9.0, epsilon = 1e-6);

    let margin = solution
        .get(&VarKey::hourly(Quantity::RobustValue, Hour(1)))
        .unwrap();
    assert_abs_diff_eq!(margin, 45.0, epsilon = 1e-6);

    // 50 * 9 day-ahead + 10 * 9 reserve + 45 worst-case margin
    assert_abs_diff_eq!(solution.objective(), 585.0, epsilon = 1e-6);
}

#[apply(all_solvers)]
#[rstest]
fn ample_reserve_rides_the_band_ceiling(solver: impl robid_solver::Solver) {
    // with capacity to spare and regulation priced above the day-ahead
    // trade-off, deployment climbs to the top of the band instead
    let (params, tables) = regulation_scenario(100.0, 100.0, 150.0, 12.0);
    let model = assemble(&params, &tables).unwrap();
    let solution = solver.solve(&model).unwrap();

    let deployment = solution
        .get(&VarKey::slot(Quantity::UpDeployment, slot(1, 1)))
        .unwrap();
    assert_abs_diff_eq!(deployment, 11.0, epsilon = 1e-6);

    let margin = solution
        .get(&VarKey::hourly(Quantity::RobustValue, Hour(1)))
        .unwrap();
    assert_abs_diff_eq!(margin, 55.0, epsilon = 1e-6);

    let discharge = solution
        .get(&VarKey::storage(Quantity::DaDischarge, slot(1, 1), StorageId(0)))
        .unwrap();
    assert_abs_diff_eq!(discharge, 89.0, epsilon = 1e-6);

    // 12 * 89 day-ahead + 10 * 11 reserve + 55 worst-case margin
    assert_abs_diff_eq!(solution.objective(), 1233.0, epsilon = 1e-6);
}

#[apply(all_solvers)]
#[rstest]
fn an_uncoverable_band_floor_is_infeasible(solver: impl robid_solver::Solver) {
    // max_power 8 caps the reserve at 4, below the band floor of 9; the
    // model still assembles, and the failure is the solver's to report
    let (params, tables) = regulation_scenario(8.0, 20.0, 40.0, 50.0);
    let model = assemble(&params, &tables).unwrap();
    assert_eq!(solver.solve(&model).unwrap_err(), SolveError::Infeasible);
}
