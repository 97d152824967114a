use approx::assert_abs_diff_eq;
use robid_solver::io::{Outcome, Scenario};
use rstest::*;
use rstest_reuse::{self, *};
use std::{fs::File, io::BufReader, path::PathBuf};

mod all_solvers;
use all_solvers::all_solvers;

// This test case is a dynamically generated Cartesian product of test cases.
// For every solver implementation, and for every (scenario.json, expected.json)
// pair in `./samples/**`,
//   1. Read in the scenario,
//   2. Read in the known-good outcome,
//   3. Assemble and solve the scenario,
//   4. Compare the solution to the known-good outcome.
// The expected file lists the objective and the variables whose optimal value
// is unique; a variable it omits (one the optimum leaves undetermined) is not
// checked, so backends are free to disagree on it.

#[apply(all_solvers)]
#[rstest]
fn run_scenario(
    solver: impl robid_solver::Solver,
    #[files("tests/samples/**/scenario.json")] input: PathBuf,
) {
    let mut output = input.clone();
    output.set_file_name("expected.json");

    let scenario: Scenario =
        serde_json::from_reader(BufReader::new(File::open(input).unwrap())).unwrap();

    let reference: Outcome =
        serde_json::from_reader(BufReader::new(File::open(output).unwrap())).unwrap();

    let outcome = scenario.solve(&solver).unwrap();

    cmp(&outcome, &reference, 1e-6);
}

fn cmp(actual: &Outcome, reference: &Outcome, eps: f64) {
    assert_abs_diff_eq!(actual.objective, reference.objective, epsilon = eps);

    for (name, expected) in &reference.values {
        let value = actual
            .values
            .get(name)
            .copied()
            .unwrap_or_else(|| panic!("solution has no value for {name}"));
        assert_abs_diff_eq!(value, *expected, epsilon = eps);
    }
}
