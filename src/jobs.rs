use crate::error::{LfResult, LineForgeError};
use std::collections::HashMap;

/// Bijective translation between external job identifiers ("A", "Ab", ...)
/// and the dense indices used by the cost tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobLookup {
    identifiers: Vec<String>,
    indices: HashMap<String, usize>,
}

impl JobLookup {
    /// Builds the lookup from `(identifier, index)` pairs.
    ///
    /// The indices must cover `0..pairs.len()` exactly once and identifiers
    /// must be unique.
    pub fn new(pairs: Vec<(String, usize)>) -> LfResult<Self> {
        let job_count = pairs.len();
        let mut slots: Vec<Option<String>> = vec![None; job_count];
        let mut indices = HashMap::with_capacity(job_count);

        for (id, idx) in pairs {
            if id.is_empty() {
                return Err(LineForgeError::Validation(format!(
                    "Empty job identifier for index {}",
                    idx
                )));
            }
            if idx >= job_count {
                return Err(LineForgeError::Validation(format!(
                    "Job '{}' has index {}, but only {} jobs are defined",
                    id, idx, job_count
                )));
            }
            if let Some(existing) = &slots[idx] {
                return Err(LineForgeError::Validation(format!(
                    "Index {} is assigned to both '{}' and '{}'",
                    idx, existing, id
                )));
            }
            if indices.insert(id.clone(), idx).is_some() {
                return Err(LineForgeError::Validation(format!(
                    "Job identifier '{}' is defined twice",
                    id
                )));
            }
            slots[idx] = Some(id);
        }

        // Every slot is filled: n distinct in-range indices for n pairs
        let identifiers = slots.into_iter().flatten().collect();

        Ok(Self {
            identifiers,
            indices,
        })
    }

    /// Identity-style lookup where job `i` is named by `names[i]`.
    pub fn from_identifiers<S: AsRef<str>>(names: &[S]) -> LfResult<Self> {
        Self::new(
            names
                .iter()
                .enumerate()
                .map(|(i, s)| (s.as_ref().to_string(), i))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    pub fn to_index(&self, identifier: &str) -> LfResult<usize> {
        self.indices
            .get(identifier)
            .copied()
            .ok_or_else(|| LineForgeError::UnknownJob(identifier.to_string()))
    }

    /// Panics if `index` is not a job index of this lookup.
    pub fn to_identifier(&self, index: usize) -> &str {
        &self.identifiers[index]
    }

    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    pub fn encode<S: AsRef<str>>(&self, identifiers: &[S]) -> LfResult<Vec<usize>> {
        identifiers
            .iter()
            .map(|s| self.to_index(s.as_ref()))
            .collect()
    }

    pub fn decode(&self, sequence: &[usize]) -> Vec<&str> {
        sequence.iter().map(|&i| self.to_identifier(i)).collect()
    }
}
