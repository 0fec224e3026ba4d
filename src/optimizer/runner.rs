use super::{AppliedSwap, LocalSearch, SearchState, SwapCandidate};
use crate::config::{Diagnostics, SearchParams};
use serde::Serialize;
use std::time::{Duration, Instant};
use strum_macros::Display;
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Produce a ranked queue snapshot for the observer after every pass.
    pub diagnostics: Diagnostics,
    pub max_passes: Option<usize>,
    pub time_limit: Option<Duration>,
}

impl From<&SearchParams> for SearchOptions {
    fn from(params: &SearchParams) -> Self {
        Self {
            diagnostics: params.diagnostics,
            max_passes: params.max_passes,
            time_limit: params.time_limit_ms.map(Duration::from_millis),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// No improving adjacent swap remains.
    Converged,
    PassLimit,
    TimeLimit,
    /// Stopped by the observer (or by the caller) before converging.
    Cancelled,
}

impl Termination {
    pub fn is_converged(&self) -> bool {
        matches!(self, Termination::Converged)
    }
}

pub struct PassEvent<'a> {
    pub swap: AppliedSwap,
    pub sequence: &'a [usize],
    /// Only present when diagnostics are enabled.
    pub ranked: Option<&'a [SwapCandidate]>,
}

/// Receives updates while the search runs.
/// `on_pass` returning `false` stops the search after that pass.
pub trait SearchObserver {
    fn on_seeded(&mut self, _pending: usize, _ranked: Option<&[SwapCandidate]>) {}

    fn on_pass(&mut self, _event: &PassEvent<'_>) -> bool {
        true
    }
}

pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub sequence: Vec<usize>,
    pub initial_cost: i64,
    pub final_cost: i64,
    pub passes: usize,
    pub termination: Termination,
    pub elapsed: Duration,
}

impl SearchResult {
    pub fn improvement(&self) -> i64 {
        self.initial_cost - self.final_cost
    }
}

impl<'m> LocalSearch<'m> {
    /// Runs to convergence (or the configured limits) and returns the result.
    pub fn run(self) -> SearchResult {
        self.run_with(&mut NoopObserver)
    }

    pub fn run_with<O: SearchObserver + ?Sized>(mut self, observer: &mut O) -> SearchResult {
        self.drive(observer);
        self.into_result()
    }

    /// Drives the search in place. Can be called again after a limit was hit
    /// to continue from where it stopped.
    pub fn drive<O: SearchObserver + ?Sized>(&mut self, observer: &mut O) -> Termination {
        let start = Instant::now();
        let diagnostics = self.options.diagnostics.is_enabled();

        if self.state == SearchState::Initializing {
            self.seed();
            let ranked = diagnostics.then(|| self.queue.ranked());
            observer.on_seeded(self.queue.len(), ranked.as_deref());
        }

        info!(
            "🔍 Searching {} jobs ({} improving swaps queued, cost {})",
            self.sequence.len(),
            self.queue.len(),
            self.current_cost
        );

        let termination = loop {
            if self.state == SearchState::Converged {
                break Termination::Converged;
            }
            if let Some(limit) = self.options.max_passes {
                if self.passes >= limit {
                    break Termination::PassLimit;
                }
            }
            if let Some(limit) = self.options.time_limit {
                if self.elapsed + start.elapsed() >= limit {
                    break Termination::TimeLimit;
                }
            }

            let Some(swap) = self.step() else {
                break Termination::Converged;
            };

            let ranked = diagnostics.then(|| self.queue.ranked());
            let event = PassEvent {
                swap,
                sequence: &self.sequence,
                ranked: ranked.as_deref(),
            };
            if !observer.on_pass(&event) && self.state != SearchState::Converged {
                break Termination::Cancelled;
            }
        };

        self.elapsed += start.elapsed();
        self.termination = Some(termination);

        info!(
            "✅ {} after {} passes in {:.2?} (cost {} -> {})",
            termination, self.passes, self.elapsed, self.initial_cost, self.current_cost
        );

        termination
    }
}
