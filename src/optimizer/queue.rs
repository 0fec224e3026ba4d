use serde::Serialize;
use std::collections::BTreeSet;

/// A pending improvement: exchanging `sequence[position]` and
/// `sequence[position + 1]` would change total cost by `delta` (< 0).
///
/// Identity is the position alone; `delta` is derived from the sequence.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SwapCandidate {
    pub position: usize,
    pub delta: i64,
}

impl PartialEq for SwapCandidate {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl Eq for SwapCandidate {}

/// Priority set of improving swaps, ordered by delta (most negative first)
/// and removable by position.
///
/// `ranked` orders entries by `(delta, position)`; `slots[p]` holds the delta
/// currently stored for position `p`, which is the key needed to find the
/// entry again. Insert, pop and invalidate are all `O(log n)`.
#[derive(Debug, Clone, Default)]
pub struct CandidateQueue {
    ranked: BTreeSet<(i64, usize)>,
    slots: Vec<Option<i64>>,
}

impl CandidateQueue {
    /// Queue for a sequence of `sequence_len` jobs, i.e. positions
    /// `0..sequence_len - 1`.
    pub fn for_sequence(sequence_len: usize) -> Self {
        Self::with_positions(sequence_len.saturating_sub(1))
    }

    pub fn with_positions(positions: usize) -> Self {
        Self {
            ranked: BTreeSet::new(),
            slots: vec![None; positions],
        }
    }

    /// Number of addressable positions.
    pub fn positions(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    /// Adds a live candidate.
    ///
    /// Panics if the position is out of range, already holds a live
    /// candidate, or the delta is not strictly improving.
    pub fn insert(&mut self, position: usize, delta: i64) {
        assert!(
            delta < 0,
            "candidate at position {} is not improving (delta {})",
            position,
            delta
        );
        let slot = self.slot_mut(position);
        assert!(
            slot.is_none(),
            "duplicate live candidate at position {}",
            position
        );
        *slot = Some(delta);
        self.ranked.insert((delta, position));
    }

    /// Removes and returns the candidate with the most negative delta.
    /// Equal deltas come out lowest position first.
    pub fn pop_best(&mut self) -> Option<SwapCandidate> {
        let (delta, position) = self.ranked.pop_first()?;
        self.slots[position] = None;
        Some(SwapCandidate { position, delta })
    }

    /// Drops the live candidate at `position`, if any. Returns whether one
    /// was removed.
    ///
    /// Panics if the position is out of range.
    pub fn invalidate(&mut self, position: usize) -> bool {
        match self.slot_mut(position).take() {
            Some(delta) => {
                let removed = self.ranked.remove(&(delta, position));
                debug_assert!(removed, "slot and ranking disagree at {}", position);
                true
            }
            None => false,
        }
    }

    /// All live candidates, best first. Leaves the queue untouched.
    pub fn ranked(&self) -> Vec<SwapCandidate> {
        self.ranked
            .iter()
            .map(|&(delta, position)| SwapCandidate { position, delta })
            .collect()
    }

    fn slot_mut(&mut self, position: usize) -> &mut Option<i64> {
        assert!(
            position < self.slots.len(),
            "candidate position {} out of range (0..{})",
            position,
            self.slots.len()
        );
        &mut self.slots[position]
    }
}
