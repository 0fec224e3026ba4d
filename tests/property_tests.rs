mod common;

use common::{brute_force_delta, is_local_optimum};
use lineforge::optimizer::{
    CandidateQueue, LocalSearch, PassEvent, SearchObserver, SearchOptions, Termination,
};
use lineforge::scorer::CostModel;
use proptest::prelude::*;

// --- STRATEGIES ---

prop_compose! {
    fn arb_model(max_jobs: usize)(jobs in 1..=max_jobs)(
        changeover in proptest::collection::vec(
            proptest::collection::vec(0i64..50, jobs),
            jobs
        ),
        durations in proptest::collection::vec(0i64..20, jobs)
    ) -> CostModel {
        CostModel::new(changeover, durations).unwrap()
    }
}

prop_compose! {
    fn arb_line()(model in arb_model(6))(
        sequence in proptest::collection::vec(0..model.job_count(), 0..40),
        model in Just(model)
    ) -> (CostModel, Vec<usize>) {
        (model, sequence)
    }
}

/// Checks the running cost against a full recompute on every pass.
struct CostAudit<'a> {
    model: &'a CostModel,
    last_cost: i64,
    violations: usize,
}

impl SearchObserver for CostAudit<'_> {
    fn on_pass(&mut self, event: &PassEvent<'_>) -> bool {
        let actual = self.model.total_cost(event.sequence);
        if actual != event.swap.cost_after || event.swap.cost_after >= self.last_cost {
            self.violations += 1;
        }
        self.last_cost = event.swap.cost_after;
        true
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn test_swap_delta_equals_recompute((model, sequence) in arb_line()) {
        for i in 0..sequence.len().saturating_sub(1) {
            prop_assert_eq!(model.swap_delta(&sequence, i), brute_force_delta(&model, &sequence, i));
        }
    }

    #[test]
    fn test_search_reaches_local_optimum((model, sequence) in arb_line()) {
        let initial = model.total_cost(&sequence);
        let mut audit = CostAudit { model: &model, last_cost: initial, violations: 0 };

        let result = LocalSearch::new(&model, sequence.clone(), SearchOptions::default())
            .unwrap()
            .run_with(&mut audit);

        prop_assert_eq!(audit.violations, 0);
        prop_assert_eq!(result.termination, Termination::Converged);
        prop_assert_eq!(result.initial_cost, initial);
        prop_assert_eq!(result.final_cost, model.total_cost(&result.sequence));
        prop_assert!(result.final_cost <= initial);
        prop_assert!(is_local_optimum(&model, &result.sequence));

        let mut before = sequence;
        let mut after = result.sequence;
        before.sort_unstable();
        after.sort_unstable();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn test_pass_limit_is_respected((model, sequence) in arb_line(), limit in 0usize..5) {
        let options = SearchOptions { max_passes: Some(limit), ..Default::default() };
        let result = LocalSearch::new(&model, sequence, options).unwrap().run();

        prop_assert!(result.passes <= limit);
        if result.termination == Termination::PassLimit {
            prop_assert_eq!(result.passes, limit);
        }
    }

    #[test]
    fn test_queue_pops_in_delta_order(
        entries in proptest::collection::btree_map(0usize..64, -1000i64..0, 0..40)
    ) {
        let mut queue = CandidateQueue::with_positions(64);
        for (&pos, &delta) in &entries {
            queue.insert(pos, delta);
        }
        prop_assert_eq!(queue.len(), entries.len());

        let mut last: Option<(i64, usize)> = None;
        while let Some(best) = queue.pop_best() {
            prop_assert_eq!(entries.get(&best.position), Some(&best.delta));
            let key = (best.delta, best.position);
            if let Some(prev) = last {
                prop_assert!(prev < key);
            }
            last = Some(key);
        }
        prop_assert!(queue.is_empty());
    }
}
