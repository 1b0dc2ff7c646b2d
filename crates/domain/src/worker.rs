// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Worker identity and the operator's selection set.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Opaque identifier for a worker.
///
/// Carries no payload beyond identity; the workflow never inspects it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WorkerRef {
    /// The identifier value.
    value: String,
}

impl WorkerRef {
    /// Creates a new `WorkerRef`, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidWorkerId` if the value is empty or
    /// whitespace only.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidWorkerId(value.to_string()));
        }
        Ok(Self {
            value: trimmed.to_string(),
        })
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for WorkerRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// The mutable set of workers chosen by the operator for a generation
/// request.
///
/// Set semantics: toggling an already-selected worker removes it, so
/// duplicates are impossible by construction. Iteration order is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerSelection {
    selected: BTreeSet<WorkerRef>,
}

impl WorkerSelection {
    /// Creates an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            selected: BTreeSet::new(),
        }
    }

    /// Toggles a worker in or out of the selection.
    ///
    /// Returns `true` if the worker is selected after the call.
    pub fn toggle(&mut self, worker: WorkerRef) -> bool {
        if self.selected.remove(&worker) {
            false
        } else {
            self.selected.insert(worker);
            true
        }
    }

    /// Adds every worker in the iterator to the selection.
    pub fn select_all<I>(&mut self, workers: I)
    where
        I: IntoIterator<Item = WorkerRef>,
    {
        self.selected.extend(workers);
    }

    /// Removes all workers from the selection.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Checks whether a worker is currently selected.
    #[must_use]
    pub fn contains(&self, worker: &WorkerRef) -> bool {
        self.selected.contains(worker)
    }

    /// Returns the number of selected workers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Checks whether the selection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Returns the selected workers in stable order.
    #[must_use]
    pub fn workers(&self) -> Vec<WorkerRef> {
        self.selected.iter().cloned().collect()
    }
}
