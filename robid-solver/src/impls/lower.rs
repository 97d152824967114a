use super::MilpSettings;
use crate::{Map, Model, Sense, Solution, SolveError, VarKey, VarKind};
use good_lp::{
    Expression, ProblemVariables, ResolutionError, Solution as _, SolverModel, constraint, variable,
};

/// Lower the model into a `good_lp` problem, run the backend, and lift the
/// assignment back out. Shared by every backend; they differ only in the
/// solver function passed in.
pub(crate) fn solve_via<S: good_lp::Solver>(
    model: &Model,
    settings: &MilpSettings,
    backend: S,
) -> Result<Solution, SolveError>
where
    S::Model: SolverModel<Error = ResolutionError>,
{
    let registry = model.variables();

    // Reject unknown pins before building anything.
    let mut fixed = Map::<VarKey, f64>::default();
    for &(key, value) in &settings.fixed {
        if registry.id(&key).is_none() {
            return Err(SolveError::UnknownVariable(key));
        }
        fixed.insert(key, value);
    }

    // Mirror the registry into backend variables, in declaration order, so
    // a variable's id doubles as its index here. A pinned variable becomes
    // continuous with collapsed bounds whatever its declared kind.
    let mut problem = ProblemVariables::new();
    let mut lowered = Vec::with_capacity(registry.len());
    for (_, info) in registry.iter() {
        let definition = match fixed.get(&info.key) {
            Some(&value) => variable().min(value).max(value),
            None => match info.kind {
                VarKind::Binary => variable().binary(),
                VarKind::Continuous => {
                    let definition = variable().min(info.lower);
                    if info.upper.is_finite() {
                        definition.max(info.upper)
                    } else {
                        definition
                    }
                }
            },
        };
        lowered.push(problem.add(definition));
    }

    let objective = model
        .objective()
        .terms
        .iter()
        .map(|&(id, coefficient)| coefficient * lowered[id.as_usize()])
        .sum::<Expression>();

    let mut solver = problem.maximise(objective).using(backend);
    for row in model.constraints() {
        let body = row
            .terms
            .iter()
            .map(|&(id, coefficient)| coefficient * lowered[id.as_usize()])
            .sum::<Expression>();
        solver = solver.with(match row.sense {
            Sense::Le => constraint::leq(body, row.rhs),
            Sense::Eq => constraint::eq(body, row.rhs),
            Sense::Ge => constraint::geq(body, row.rhs),
        });
    }

    let assignment = solver.solve().map_err(|error| match error {
        ResolutionError::Infeasible => SolveError::Infeasible,
        ResolutionError::Unbounded => SolveError::Unbounded,
        ResolutionError::Other(message) => SolveError::Backend(message.to_owned()),
        ResolutionError::Str(message) => SolveError::Backend(message),
    })?;

    // The objective is recomputed from the model's own terms rather than
    // read from the backend, so every backend reports the same number for
    // the same assignment.
    let values = registry
        .iter()
        .map(|(id, info)| (info.key, assignment.value(lowered[id.as_usize()])))
        .collect::<Map<_, _>>();
    let objective = model
        .objective()
        .terms
        .iter()
        .map(|&(id, coefficient)| coefficient * assignment.value(lowered[id.as_usize()]))
        .sum::<f64>();

    tracing::debug!(objective, "solved bidding model");
    Ok(Solution::new(objective, values))
}
