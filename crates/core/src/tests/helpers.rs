// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use time::Date;
use tokio::sync::Notify;

use crate::adapter::{CacheScope, QueryCache, WorkflowNotifier, WorkflowOutcome};
use crate::error::ServiceError;
use crate::orchestrator::GenerationOrchestrator;
use crate::request::{ApprovedSummary, PayrollGenerationRequest};
use crate::service::PayrollService;
use crate::session::SessionContext;
use planilla_domain::{
    AggregateId, PayrollAggregate, PayrollState, PeriodKey, ResolvedPeriod, WorkerRef,
    WorkerSelection, resolve_period,
};

pub fn test_session() -> SessionContext {
    SessionContext::new(String::from("op-17"), String::from("Laura Ramos"))
}

pub fn worker(id: &str) -> WorkerRef {
    WorkerRef::new(id).expect("valid worker id")
}

pub fn march_2025() -> ResolvedPeriod {
    resolve_period(3, 2025).expect("valid period")
}

pub fn request_for(workers: &[&str]) -> PayrollGenerationRequest {
    let mut selection: WorkerSelection = WorkerSelection::new();
    selection.select_all(workers.iter().map(|id| worker(id)));
    PayrollGenerationRequest::from_selection(&march_2025(), &selection, Some(test_session()))
}

/// In-memory stand-in for the remote payroll resource.
///
/// Mirrors the backend's non-idempotent create: a second creation for a
/// period that already has an aggregate fails with the conflict signal.
/// Every call is recorded by name so tests can assert on exactly which
/// network operations were issued.
pub struct FakePayrollService {
    pub aggregates: Mutex<Vec<PayrollAggregate>>,
    pub calls: Mutex<Vec<&'static str>>,
    pub fail_create: Mutex<Option<ServiceError>>,
    pub lookup_returns_none: Mutex<bool>,
    pub hold_create: Option<Arc<Notify>>,
    pub unassigned: Mutex<Vec<WorkerRef>>,
    next_id: Mutex<u32>,
}

impl FakePayrollService {
    pub fn new() -> Self {
        Self {
            aggregates: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            fail_create: Mutex::new(None),
            lookup_returns_none: Mutex::new(false),
            hold_create: None,
            unassigned: Mutex::new(Vec::new()),
            next_id: Mutex::new(0),
        }
    }

    pub fn holding_create(notify: Arc<Notify>) -> Self {
        let mut service = Self::new();
        service.hold_create = Some(notify);
        service
    }

    /// Seeds an aggregate directly, bypassing the create path.
    pub fn seed_aggregate(
        &self,
        period: ResolvedPeriod,
        members: &[&str],
        state: PayrollState,
    ) -> AggregateId {
        let id: AggregateId = self.mint_id();
        let aggregate = PayrollAggregate {
            id: id.clone(),
            period: period.key(),
            members: members.iter().map(|m| worker(m)).collect(),
            state,
            scheduled_payment_date: period.scheduled_payment_date(),
            total_net: None,
        };
        self.aggregates.lock().unwrap().push(aggregate);
        id
    }

    pub fn recorded_calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn aggregate(&self, id: &AggregateId) -> PayrollAggregate {
        self.aggregates
            .lock()
            .unwrap()
            .iter()
            .find(|a| &a.id == id)
            .cloned()
            .expect("aggregate exists")
    }

    fn mint_id(&self) -> AggregateId {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        AggregateId::new(&format!("pl-{next}"))
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl PayrollService for FakePayrollService {
    async fn create_aggregate(
        &self,
        period: &PeriodKey,
        scheduled_payment_date: Date,
        workers: &[WorkerRef],
        _initiator: &SessionContext,
    ) -> Result<PayrollAggregate, ServiceError> {
        self.record("create");
        if let Some(hold) = &self.hold_create {
            hold.notified().await;
        }
        if let Some(err) = self.fail_create.lock().unwrap().take() {
            return Err(err);
        }

        let mut aggregates = self.aggregates.lock().unwrap();
        if aggregates.iter().any(|a| a.period == *period) {
            return Err(ServiceError::Conflict { period: *period });
        }

        let aggregate = PayrollAggregate {
            id: self.mint_id(),
            period: *period,
            members: workers.iter().cloned().collect::<BTreeSet<WorkerRef>>(),
            state: PayrollState::Generated,
            scheduled_payment_date,
            total_net: None,
        };
        aggregates.push(aggregate.clone());
        Ok(aggregate)
    }

    async fn aggregate_by_period(
        &self,
        period: &PeriodKey,
    ) -> Result<Option<PayrollAggregate>, ServiceError> {
        self.record("lookup");
        if *self.lookup_returns_none.lock().unwrap() {
            return Ok(None);
        }
        Ok(self
            .aggregates
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.period == *period)
            .cloned())
    }

    async fn add_members(
        &self,
        id: &AggregateId,
        workers: &[WorkerRef],
        _initiator: &SessionContext,
    ) -> Result<PayrollAggregate, ServiceError> {
        self.record("add_members");
        let mut aggregates = self.aggregates.lock().unwrap();
        let Some(aggregate) = aggregates.iter_mut().find(|a| &a.id == id) else {
            return Err(ServiceError::NotFound {
                resource: String::from("Payroll"),
                message: format!("no payroll with id {id}"),
            });
        };
        if !aggregate.state.is_editable() {
            return Err(ServiceError::StateConflict {
                message: format!("payroll {id} is {}", aggregate.state),
            });
        }
        aggregate.members.extend(workers.iter().cloned());
        Ok(aggregate.clone())
    }

    async fn bulk_approve(
        &self,
        aggregate_ids: &[AggregateId],
        _approver: &SessionContext,
        _notes: Option<&str>,
    ) -> Result<ApprovedSummary, ServiceError> {
        self.record("approve");
        let mut aggregates = self.aggregates.lock().unwrap();

        // All-or-nothing: verify the whole batch before mutating anything.
        for id in aggregate_ids {
            let Some(aggregate) = aggregates.iter().find(|a| &a.id == id) else {
                return Err(ServiceError::NotFound {
                    resource: String::from("Payroll"),
                    message: format!("no payroll with id {id}"),
                });
            };
            if !aggregate.state.is_editable() {
                return Err(ServiceError::StateConflict {
                    message: format!("payroll {id} is {}", aggregate.state),
                });
            }
        }

        for id in aggregate_ids {
            if let Some(aggregate) = aggregates.iter_mut().find(|a| &a.id == id) {
                aggregate.state = PayrollState::Approved;
            }
        }
        Ok(ApprovedSummary {
            approved_count: aggregate_ids.len(),
        })
    }

    async fn workers_without_aggregate(
        &self,
        _period: &PeriodKey,
    ) -> Result<Vec<WorkerRef>, ServiceError> {
        self.record("unassigned");
        Ok(self.unassigned.lock().unwrap().clone())
    }
}

pub struct RecordingCache {
    pub scopes: Mutex<Vec<CacheScope>>,
}

impl RecordingCache {
    pub fn new() -> Self {
        Self {
            scopes: Mutex::new(Vec::new()),
        }
    }

    pub fn recorded(&self) -> Vec<CacheScope> {
        self.scopes.lock().unwrap().clone()
    }
}

impl QueryCache for RecordingCache {
    fn invalidate(&self, scope: CacheScope) {
        self.scopes.lock().unwrap().push(scope);
    }
}

pub struct RecordingNotifier {
    pub outcomes: Mutex<Vec<WorkflowOutcome>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            outcomes: Mutex::new(Vec::new()),
        }
    }

    pub fn recorded(&self) -> Vec<WorkflowOutcome> {
        self.outcomes.lock().unwrap().clone()
    }
}

impl WorkflowNotifier for RecordingNotifier {
    fn notify(&self, outcome: &WorkflowOutcome) {
        self.outcomes.lock().unwrap().push(outcome.clone());
    }
}

/// Orchestrator plus the recording doubles behind it.
pub struct Harness {
    pub service: Arc<FakePayrollService>,
    pub cache: Arc<RecordingCache>,
    pub notifier: Arc<RecordingNotifier>,
    pub orchestrator: Arc<GenerationOrchestrator>,
}

pub fn harness() -> Harness {
    harness_with(FakePayrollService::new())
}

pub fn harness_with(service: FakePayrollService) -> Harness {
    let service: Arc<FakePayrollService> = Arc::new(service);
    let cache: Arc<RecordingCache> = Arc::new(RecordingCache::new());
    let notifier: Arc<RecordingNotifier> = Arc::new(RecordingNotifier::new());
    let orchestrator: Arc<GenerationOrchestrator> = Arc::new(GenerationOrchestrator::new(
        Arc::clone(&service) as Arc<dyn PayrollService>,
        Arc::clone(&cache) as Arc<dyn QueryCache>,
        Arc::clone(&notifier) as Arc<dyn WorkflowNotifier>,
    ));
    Harness {
        service,
        cache,
        notifier,
        orchestrator,
    }
}
