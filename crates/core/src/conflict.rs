// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Conflict recovery for the generation workflow.
//!
//! When creation collides with an existing aggregate, only the period
//! is known; the resolver looks the aggregate up by period and hands
//! its id to the merge mutation.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{PayrollError, ServiceError, translate_service_error};
use crate::service::PayrollService;
use crate::session::SessionContext;
use planilla_domain::{PayrollAggregate, PeriodKey, WorkerRef};

/// Looks up the canonical aggregate for a conflicted period and merges
/// the requested workers into it.
pub struct ConflictResolver {
    service: Arc<dyn PayrollService>,
}

impl ConflictResolver {
    /// Creates a new resolver over the given service boundary.
    #[must_use]
    pub fn new(service: Arc<dyn PayrollService>) -> Self {
        Self { service }
    }

    /// Fetches the canonical aggregate for a period after a conflict
    /// was signaled.
    ///
    /// # Errors
    ///
    /// Returns `PayrollError::ResolutionFailed` if the lookup returns
    /// nothing: the caller knows an aggregate exists for this period,
    /// so absence indicates a backend inconsistency rather than a plain
    /// not-found. Other service failures are classified as usual.
    pub async fn resolve(&self, period: &PeriodKey) -> Result<PayrollAggregate, PayrollError> {
        match self.service.aggregate_by_period(period).await {
            Ok(Some(aggregate)) => {
                debug!(id = %aggregate.id, period = %period, "Resolved existing payroll");
                Ok(aggregate)
            }
            Ok(None) | Err(ServiceError::NotFound { .. }) => {
                warn!(
                    period = %period,
                    "Conflict was signaled but no payroll was found for the period"
                );
                Err(PayrollError::ResolutionFailed { period: *period })
            }
            Err(err) => Err(translate_service_error(err)),
        }
    }

    /// Submits the member delta to an existing aggregate.
    ///
    /// # Errors
    ///
    /// Returns `PayrollError::StateConflict` if the aggregate is no
    /// longer editable, either by the local pre-check or because the
    /// server refused the mutation. Other service failures are
    /// classified as usual.
    pub async fn merge_members(
        &self,
        existing: &PayrollAggregate,
        workers: &[WorkerRef],
        initiator: &SessionContext,
    ) -> Result<PayrollAggregate, PayrollError> {
        if !existing.state.is_editable() {
            return Err(PayrollError::StateConflict {
                id: existing.id.clone(),
                state: existing.state,
            });
        }

        match self
            .service
            .add_members(&existing.id, workers, initiator)
            .await
        {
            Ok(aggregate) => Ok(aggregate),
            Err(ServiceError::StateConflict { message }) => {
                // The resolved snapshot predicted an editable state but
                // the server disagreed; surface the last known state.
                warn!(id = %existing.id, message, "Server refused merge on state grounds");
                Err(PayrollError::StateConflict {
                    id: existing.id.clone(),
                    state: existing.state,
                })
            }
            Err(err) => Err(translate_service_error(err)),
        }
    }
}
