use crate::config::SearchParams;
use crate::error::LfResult;
use crate::optimizer::{LocalSearch, SearchObserver, SearchOptions, Termination};
use crate::problem::Problem;
use serde::Serialize;

/// Outcome of one optimization run, with sequences in identifier form.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct OptimizationReport {
    pub initial_sequence: Vec<String>,
    pub final_sequence: Vec<String>,
    pub initial_cost: i64,
    pub final_cost: i64,
    pub improvement: i64,
    pub passes: usize,
    pub termination: Termination,
    pub elapsed_ms: f64,
}

fn to_strings(ids: Vec<&str>) -> Vec<String> {
    ids.into_iter().map(str::to_string).collect()
}

/// Service: run the local search on a loaded problem.
pub fn optimize<O: SearchObserver + ?Sized>(
    problem: &Problem,
    params: &SearchParams,
    observer: &mut O,
) -> LfResult<OptimizationReport> {
    let search = LocalSearch::new(
        &problem.model,
        problem.sequence.clone(),
        SearchOptions::from(params),
    )?;
    let result = search.run_with(observer);

    Ok(OptimizationReport {
        initial_sequence: to_strings(problem.lookup.decode(&problem.sequence)),
        final_sequence: to_strings(problem.lookup.decode(&result.sequence)),
        initial_cost: result.initial_cost,
        final_cost: result.final_cost,
        improvement: result.improvement(),
        passes: result.passes,
        termination: result.termination,
        elapsed_ms: result.elapsed.as_secs_f64() * 1000.0,
    })
}

/// Service: total cost of an arbitrary ordering of known jobs.
pub fn evaluate<S: AsRef<str>>(problem: &Problem, order: &[S]) -> LfResult<i64> {
    let sequence = problem.lookup.encode(order)?;
    Ok(problem.model.total_cost(&sequence))
}
