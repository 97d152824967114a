#![allow(unused_macros)]
use rstest_reuse::template;

// This creates a testing "template" to allow for the injection of each solver
// implementation

#[template]
#[rstest]
#[case::microlp(robid_solver::microlp::MicrolpSolver::default())]
pub fn all_solvers(#[case] solver: impl robid_solver::Solver) -> () {}
