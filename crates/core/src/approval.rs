// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bulk approval of generated payrolls.

use std::sync::Arc;

use tracing::{info, warn};

use crate::adapter::{CacheScope, QueryCache, WorkflowNotifier, WorkflowOutcome};
use crate::error::{PayrollError, translate_service_error};
use crate::request::{ApprovalBatch, ApprovedSummary};
use crate::service::PayrollService;

/// Submits batches of aggregate ids for transition to approved.
///
/// The batch is a single mutation and the backend applies it
/// all-or-nothing; partial application is never observed.
pub struct ApprovalCoordinator {
    service: Arc<dyn PayrollService>,
    cache: Arc<dyn QueryCache>,
    notifier: Arc<dyn WorkflowNotifier>,
}

impl ApprovalCoordinator {
    /// Creates a new coordinator.
    ///
    /// # Arguments
    ///
    /// * `service` - The remote payroll service boundary
    /// * `cache` - The query-cache invalidation hook
    /// * `notifier` - The operator notification hook
    #[must_use]
    pub fn new(
        service: Arc<dyn PayrollService>,
        cache: Arc<dyn QueryCache>,
        notifier: Arc<dyn WorkflowNotifier>,
    ) -> Self {
        Self {
            service,
            cache,
            notifier,
        }
    }

    /// Approves every aggregate in the batch, or none of them.
    ///
    /// On success only the list cache is invalidated; the caller
    /// already knows the affected ids. The operator is notified exactly
    /// once per terminal outcome.
    ///
    /// # Errors
    ///
    /// Returns `PayrollError::Validation` if the batch is empty or the
    /// approver could not be resolved (no network call is made), and
    /// otherwise the classified service failure.
    pub async fn approve(&self, batch: ApprovalBatch) -> Result<ApprovedSummary, PayrollError> {
        match self.run(batch).await {
            Ok(summary) => {
                self.cache.invalidate(CacheScope::PayrollList);
                self.notifier.notify(&WorkflowOutcome::Approved {
                    approved_count: summary.approved_count,
                });
                Ok(summary)
            }
            Err(err) => {
                self.notifier.notify(&WorkflowOutcome::Failed {
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    async fn run(&self, batch: ApprovalBatch) -> Result<ApprovedSummary, PayrollError> {
        let Some(approver) = batch.approver.clone() else {
            return Err(PayrollError::Validation {
                field: String::from("approver"),
                message: String::from("no active session; sign in before approving payrolls"),
            });
        };
        if batch.aggregate_ids.is_empty() {
            return Err(PayrollError::Validation {
                field: String::from("aggregate_ids"),
                message: String::from("must include at least one payroll"),
            });
        }

        info!(
            count = batch.aggregate_ids.len(),
            approver = approver.operator_id(),
            "Submitting bulk approval"
        );

        match self
            .service
            .bulk_approve(&batch.aggregate_ids, &approver, batch.notes.as_deref())
            .await
        {
            Ok(summary) => {
                info!(approved = summary.approved_count, "Bulk approval applied");
                Ok(summary)
            }
            Err(err) => {
                warn!(error = %err, "Bulk approval failed; no payroll changed state");
                Err(translate_service_error(err))
            }
        }
    }
}
