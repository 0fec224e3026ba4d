pub mod loader;

use crate::error::{LfResult, LineForgeError};

/// Largest accepted duration or changeover cost.
///
/// With every entry at most `i32::MAX`, totals stay within `i64` for any
/// sequence shorter than `2^31` jobs and a swap delta never exceeds six entries.
pub const MAX_COST: i64 = i32::MAX as i64;

/// Immutable cost tables for one production line.
///
/// The changeover matrix is stored flattened (`from * job_count + to`) so the
/// hot delta computation is a pair of indexed loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostModel {
    job_count: usize,
    changeover: Vec<i64>,
    durations: Vec<i64>,
}

impl CostModel {
    /// Builds a model from a square changeover matrix and a duration vector.
    ///
    /// Dimensions must agree and every entry must lie in `0..=MAX_COST`.
    pub fn new(changeover: Vec<Vec<i64>>, durations: Vec<i64>) -> LfResult<Self> {
        let job_count = durations.len();

        if changeover.len() != job_count {
            return Err(LineForgeError::Validation(format!(
                "Changeover matrix has {} rows but {} job durations were given",
                changeover.len(),
                job_count
            )));
        }

        let mut flat = Vec::with_capacity(job_count * job_count);
        for (row_idx, row) in changeover.into_iter().enumerate() {
            if row.len() != job_count {
                return Err(LineForgeError::Validation(format!(
                    "Changeover row {} has {} columns, expected {}",
                    row_idx,
                    row.len(),
                    job_count
                )));
            }
            if let Some(col) = row.iter().position(|&c| !(0..=MAX_COST).contains(&c)) {
                return Err(LineForgeError::Validation(format!(
                    "Changeover cost {} at [{}][{}] is outside 0..={}",
                    row[col], row_idx, col, MAX_COST
                )));
            }
            flat.extend(row);
        }

        if let Some(job) = durations.iter().position(|&d| !(0..=MAX_COST).contains(&d)) {
            return Err(LineForgeError::Validation(format!(
                "Duration {} for job index {} is outside 0..={}",
                durations[job], job, MAX_COST
            )));
        }

        Ok(Self {
            job_count,
            changeover: flat,
            durations,
        })
    }

    pub fn job_count(&self) -> usize {
        self.job_count
    }

    #[inline(always)]
    pub fn changeover(&self, from: usize, to: usize) -> i64 {
        self.changeover[from * self.job_count + to]
    }

    #[inline(always)]
    pub fn duration(&self, job: usize) -> i64 {
        self.durations[job]
    }

    pub fn durations(&self) -> &[i64] {
        &self.durations
    }

    /// Rows of the changeover matrix, in job index order.
    pub fn changeover_rows(&self) -> impl Iterator<Item = &[i64]> {
        // chunks(0) panics, and an empty model has no rows anyway
        self.changeover.chunks(self.job_count.max(1))
    }

    /// Checks that every entry of `sequence` is a known job index.
    pub fn check_sequence(&self, sequence: &[usize]) -> LfResult<()> {
        match sequence.iter().position(|&j| j >= self.job_count) {
            Some(pos) => Err(LineForgeError::Validation(format!(
                "Sequence position {} holds job index {}, but only {} jobs exist",
                pos, sequence[pos], self.job_count
            ))),
            None => Ok(()),
        }
    }

    /// Processing time of every job plus the changeover between each
    /// consecutive pair.
    pub fn total_cost(&self, sequence: &[usize]) -> i64 {
        let processing: i64 = sequence.iter().map(|&j| self.duration(j)).sum();
        let setups: i64 = sequence
            .windows(2)
            .map(|pair| self.changeover(pair[0], pair[1]))
            .sum();
        processing + setups
    }

    /// Net change of `total_cost` if `sequence[i]` and `sequence[i + 1]` were
    /// exchanged. Negative means the swap improves the sequence.
    ///
    /// Durations never contribute: they are position independent and cancel.
    #[inline(always)]
    pub fn swap_delta(&self, sequence: &[usize], i: usize) -> i64 {
        let n = sequence.len();
        assert!(
            i + 1 < n,
            "swap position {} out of range for sequence of length {}",
            i,
            n
        );

        let a = sequence[i];
        let b = sequence[i + 1];

        // The flipped pair itself
        let mut delta = self.changeover(b, a) - self.changeover(a, b);

        // Pair behind: (prev, a) becomes (prev, b)
        if i > 0 {
            let prev = sequence[i - 1];
            delta += self.changeover(prev, b) - self.changeover(prev, a);
        }

        // Pair ahead: (b, next) becomes (a, next)
        if i + 2 < n {
            let next = sequence[i + 2];
            delta += self.changeover(a, next) - self.changeover(b, next);
        }

        delta
    }
}
