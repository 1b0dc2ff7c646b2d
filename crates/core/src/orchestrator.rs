// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The payroll generation state machine.
//!
//! Drives create-or-merge against the remote payroll resource. The
//! backend's create operation is not idempotent: a second creation for
//! a period that already has an aggregate fails with a conflict signal,
//! and the orchestrator recovers by resolving the existing aggregate
//! and merging the requested workers into it. The operator only sees
//! the difference in the final confirmation wording.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use tracing::{debug, info, warn};

use crate::adapter::{CacheScope, QueryCache, WorkflowNotifier, WorkflowOutcome};
use crate::conflict::ConflictResolver;
use crate::error::{PayrollError, ServiceError, translate_service_error};
use crate::request::PayrollGenerationRequest;
use crate::service::PayrollService;
use crate::session::SessionContext;
use planilla_domain::{PayrollAggregate, PeriodKey, WorkerRef};

/// Observable phase of the generation state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum GenerationPhase {
    /// No generation is running.
    Idle = 0,
    /// The create call is in flight.
    Submitting = 1,
    /// The create call collided with an existing aggregate.
    ConflictDetected = 2,
    /// Looking up the existing aggregate for the period.
    Resolving = 3,
    /// The merge mutation is in flight.
    Merging = 4,
    /// The run completed successfully (created or merged).
    Done = 5,
    /// The run failed after submission.
    Failed = 6,
}

impl GenerationPhase {
    /// Returns the string representation of the phase.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::ConflictDetected => "conflict_detected",
            Self::Resolving => "resolving",
            Self::Merging => "merging",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }

    const fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Submitting,
            2 => Self::ConflictDetected,
            3 => Self::Resolving,
            4 => Self::Merging,
            5 => Self::Done,
            6 => Self::Failed,
            _ => Self::Idle,
        }
    }
}

/// Drives period-scoped payroll generation against the remote service.
///
/// At most one `generate` is in flight at a time; a second call while
/// one is outstanding is rejected synchronously without queuing and
/// without touching the outstanding run.
pub struct GenerationOrchestrator {
    service: Arc<dyn PayrollService>,
    cache: Arc<dyn QueryCache>,
    notifier: Arc<dyn WorkflowNotifier>,
    resolver: ConflictResolver,
    in_flight: AtomicBool,
    phase: AtomicU8,
}

/// Clears the in-flight flag on every exit path of a run.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

impl GenerationOrchestrator {
    /// Creates a new orchestrator.
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
            resolver: ConflictResolver::new(Arc::clone(&service)),
            service,
            cache,
            notifier,
            in_flight: AtomicBool::new(false),
            phase: AtomicU8::new(GenerationPhase::Idle as u8),
        }
    }

    /// Returns the current phase of the state machine.
    #[must_use]
    pub fn phase(&self) -> GenerationPhase {
        GenerationPhase::from_u8(self.phase.load(Ordering::SeqCst))
    }

    /// Returns true while a generation run is outstanding.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    fn set_phase(&self, phase: GenerationPhase) {
        self.phase.store(phase as u8, Ordering::SeqCst);
        debug!(phase = phase.as_str(), "Generation phase changed");
    }

    /// Generates the payroll for the requested period, creating the
    /// aggregate or merging into the existing one.
    ///
    /// On success the dependent cached queries are invalidated and the
    /// operator is notified exactly once; on failure nothing is
    /// invalidated and the operator is notified exactly once. The busy
    /// rejection is the one exception: it reports nothing, because the
    /// outstanding run still owns its terminal outcome.
    ///
    /// # Errors
    ///
    /// Returns `PayrollError::GenerationInFlight` if a run is already
    /// outstanding, `PayrollError::Validation` if the initiator or the
    /// worker set is missing (no network call is made), and otherwise
    /// the classified failure of the create/resolve/merge sequence. A
    /// period conflict is never an error; it is recovered internally.
    pub async fn generate(
        &self,
        request: PayrollGenerationRequest,
    ) -> Result<PayrollAggregate, PayrollError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("Rejected generate call while another run is outstanding");
            return Err(PayrollError::GenerationInFlight);
        }
        let guard = InFlightGuard {
            flag: &self.in_flight,
        };

        let result = self.run(request).await;
        drop(guard);

        match result {
            Ok((aggregate, outcome)) => {
                self.cache.invalidate(CacheScope::PayrollList);
                self.cache
                    .invalidate(CacheScope::PayrollDetail(aggregate.id.clone()));
                self.cache
                    .invalidate(CacheScope::WorkersWithoutPayroll(aggregate.period));
                self.notifier.notify(&outcome);
                Ok(aggregate)
            }
            Err(err) => {
                self.notifier.notify(&WorkflowOutcome::Failed {
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Lists the workers not yet covered by a payroll for the period.
    ///
    /// Read-only convenience for populating the selection set; not part
    /// of the generation state machine.
    ///
    /// # Errors
    ///
    /// Returns the classified service failure.
    pub async fn workers_without_payroll(
        &self,
        period: &PeriodKey,
    ) -> Result<Vec<WorkerRef>, PayrollError> {
        self.service
            .workers_without_aggregate(period)
            .await
            .map_err(translate_service_error)
    }

    async fn run(
        &self,
        request: PayrollGenerationRequest,
    ) -> Result<(PayrollAggregate, WorkflowOutcome), PayrollError> {
        let initiator: SessionContext = validate_request(&request)?;

        self.set_phase(GenerationPhase::Submitting);
        info!(
            period = %request.period,
            workers = request.workers.len(),
            initiator = initiator.operator_id(),
            initiator_name = initiator.display_name(),
            "Submitting payroll generation"
        );

        match self
            .service
            .create_aggregate(
                &request.period,
                request.scheduled_payment_date,
                &request.workers,
                &initiator,
            )
            .await
        {
            Ok(aggregate) => {
                self.set_phase(GenerationPhase::Done);
                info!(id = %aggregate.id, "Payroll created");
                let outcome = WorkflowOutcome::Created {
                    period: aggregate.period,
                    member_count: aggregate.members.len(),
                };
                Ok((aggregate, outcome))
            }
            Err(ServiceError::Conflict { period }) => {
                self.set_phase(GenerationPhase::ConflictDetected);
                debug!(
                    period = %period,
                    "Create collided with an existing payroll; switching to merge"
                );
                match self.recover(&request, &initiator).await {
                    Ok(done) => Ok(done),
                    Err(err) => {
                        self.set_phase(GenerationPhase::Failed);
                        Err(err)
                    }
                }
            }
            Err(err) => {
                self.set_phase(GenerationPhase::Failed);
                warn!(error = %err, "Payroll creation failed");
                Err(translate_service_error(err))
            }
        }
    }

    /// The merge path: resolve the existing aggregate, then submit the
    /// member delta. Resolve-then-merge is strictly sequential.
    async fn recover(
        &self,
        request: &PayrollGenerationRequest,
        initiator: &SessionContext,
    ) -> Result<(PayrollAggregate, WorkflowOutcome), PayrollError> {
        self.set_phase(GenerationPhase::Resolving);
        let existing: PayrollAggregate = self.resolver.resolve(&request.period).await?;

        if !existing.state.is_editable() {
            warn!(
                id = %existing.id,
                state = %existing.state,
                "Existing payroll is no longer editable; refusing merge"
            );
            return Err(PayrollError::StateConflict {
                id: existing.id.clone(),
                state: existing.state,
            });
        }

        let delta: Vec<WorkerRef> = existing.missing_members(&request.workers);
        if delta.is_empty() {
            // Idempotent union: every requested worker is already a member.
            self.set_phase(GenerationPhase::Done);
            info!(id = %existing.id, "All requested workers already covered; nothing to merge");
            let outcome = WorkflowOutcome::Merged {
                period: existing.period,
                added_count: 0,
            };
            return Ok((existing, outcome));
        }

        self.set_phase(GenerationPhase::Merging);
        let merged: PayrollAggregate = self
            .resolver
            .merge_members(&existing, &delta, initiator)
            .await?;

        self.set_phase(GenerationPhase::Done);
        info!(
            id = %merged.id,
            added = delta.len(),
            "Workers merged into existing payroll"
        );
        let outcome = WorkflowOutcome::Merged {
            period: merged.period,
            added_count: delta.len(),
        };
        Ok((merged, outcome))
    }
}

/// Validates a generation request before any network I/O.
fn validate_request(request: &PayrollGenerationRequest) -> Result<SessionContext, PayrollError> {
    let Some(initiator) = request.initiator.clone() else {
        return Err(PayrollError::Validation {
            field: String::from("initiator"),
            message: String::from("no active session; sign in before generating a payroll"),
        });
    };
    if request.workers.is_empty() {
        return Err(PayrollError::Validation {
            field: String::from("workers"),
            message: String::from("must select at least one worker"),
        });
    }
    Ok(initiator)
}
