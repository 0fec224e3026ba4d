pub mod queue;
pub mod runner;

pub use self::queue::{CandidateQueue, SwapCandidate};
pub use self::runner::{
    NoopObserver, PassEvent, SearchObserver, SearchOptions, SearchResult, Termination,
};

use crate::error::LfResult;
use crate::scorer::CostModel;
use serde::Serialize;
use std::time::Duration;
use strum_macros::Display;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "snake_case")]
pub enum SearchState {
    Initializing,
    Seeking,
    Converged,
}

/// One accepted swap (a "pass").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AppliedSwap {
    pub pass: usize,
    pub position: usize,
    pub delta: i64,
    pub cost_after: i64,
}

/// Steepest-descent adjacent-swap search over a production sequence.
///
/// The queue only ever holds strictly improving swaps whose deltas match the
/// current sequence. After a swap at `i`, the only candidates whose delta can
/// change are `i-2, i-1, i+1, i+2` (plus `i` itself, which just flipped sign
/// and so is never improving), so those four are the only ones re-scored.
pub struct LocalSearch<'m> {
    model: &'m CostModel,
    sequence: Vec<usize>,
    queue: CandidateQueue,
    state: SearchState,
    options: SearchOptions,

    initial_cost: i64,
    current_cost: i64,
    passes: usize,

    // Filled in by the runner
    elapsed: Duration,
    termination: Option<Termination>,
}

impl<'m> LocalSearch<'m> {
    /// Takes ownership of `sequence` for the duration of the search.
    ///
    /// Fails if the sequence references a job the model does not know.
    pub fn new(model: &'m CostModel, sequence: Vec<usize>, options: SearchOptions) -> LfResult<Self> {
        model.check_sequence(&sequence)?;
        let cost = model.total_cost(&sequence);
        let queue = CandidateQueue::for_sequence(sequence.len());

        Ok(Self {
            model,
            sequence,
            queue,
            state: SearchState::Initializing,
            options,
            initial_cost: cost,
            current_cost: cost,
            passes: 0,
            elapsed: Duration::ZERO,
            termination: None,
        })
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn sequence(&self) -> &[usize] {
        &self.sequence
    }

    pub fn passes(&self) -> usize {
        self.passes
    }

    pub fn initial_cost(&self) -> i64 {
        self.initial_cost
    }

    /// Total cost of the current sequence, tracked from the applied deltas.
    pub fn current_cost(&self) -> i64 {
        self.current_cost
    }

    /// Number of improving swaps currently known.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Snapshot of the live candidates, best first.
    pub fn ranked_candidates(&self) -> Vec<SwapCandidate> {
        self.queue.ranked()
    }

    /// Scans every adjacent pair once and queues the improving ones.
    /// No-op unless the search is still initializing.
    pub fn seed(&mut self) {
        if self.state != SearchState::Initializing {
            return;
        }

        for i in 0..self.queue.positions() {
            let delta = self.model.swap_delta(&self.sequence, i);
            if delta < 0 {
                self.queue.insert(i, delta);
            }
        }

        self.state = if self.queue.is_empty() {
            SearchState::Converged
        } else {
            SearchState::Seeking
        };

        debug!(
            "Seeded {} improving swaps over {} positions",
            self.queue.len(),
            self.queue.positions()
        );
    }

    /// Applies the best pending swap and repairs the queue around it.
    ///
    /// Returns `None` once no improving swap remains.
    pub fn step(&mut self) -> Option<AppliedSwap> {
        self.seed();

        let Some(best) = self.queue.pop_best() else {
            self.state = SearchState::Converged;
            return None;
        };
        let i = best.position;

        self.sequence.swap(i, i + 1);
        self.current_cost += best.delta;
        self.passes += 1;

        self.rescore_neighbors(i);

        if self.queue.is_empty() {
            self.state = SearchState::Converged;
        }

        let swap = AppliedSwap {
            pass: self.passes,
            position: i,
            delta: best.delta,
            cost_after: self.current_cost,
        };
        debug!(
            "Pass {}: swapped positions {} and {} ({:+}), cost now {}",
            swap.pass,
            i,
            i + 1,
            swap.delta,
            swap.cost_after
        );
        Some(swap)
    }

    // Each neighbor is bounds-checked on its own; near either end of the
    // sequence any subset of the four may be missing.
    fn rescore_neighbors(&mut self, i: usize) {
        let positions = self.queue.positions();

        if let Some(p) = i.checked_sub(2) {
            self.rescore(p);
        }
        if let Some(p) = i.checked_sub(1) {
            self.rescore(p);
        }
        if i + 1 < positions {
            self.rescore(i + 1);
        }
        if i + 2 < positions {
            self.rescore(i + 2);
        }
    }

    fn rescore(&mut self, position: usize) {
        self.queue.invalidate(position);
        let delta = self.model.swap_delta(&self.sequence, position);
        trace!("  rescored position {} -> {:+}", position, delta);
        if delta < 0 {
            self.queue.insert(position, delta);
        }
    }

    pub fn into_result(self) -> SearchResult {
        let termination = self.termination.unwrap_or(match self.state {
            SearchState::Converged => Termination::Converged,
            _ => Termination::Cancelled,
        });

        SearchResult {
            sequence: self.sequence,
            initial_cost: self.initial_cost,
            final_cost: self.current_cost,
            passes: self.passes,
            termination,
            elapsed: self.elapsed,
        }
    }
}
