// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;

use super::helpers::{Harness, harness, march_2025, request_for, test_session, worker};
use crate::adapter::WorkflowOutcome;
use crate::conflict::ConflictResolver;
use crate::error::PayrollError;
use crate::service::PayrollService;
use planilla_domain::PayrollState;

#[tokio::test]
async fn test_conflict_recovers_by_merging_into_existing_aggregate() {
    let h: Harness = harness();
    let id = h
        .service
        .seed_aggregate(march_2025(), &["w1", "w2"], PayrollState::Generated);

    let merged = h
        .orchestrator
        .generate(request_for(&["w2", "w3"]))
        .await
        .expect("merge succeeds");

    assert_eq!(merged.id, id);
    assert_eq!(
        merged.members,
        [worker("w1"), worker("w2"), worker("w3")]
            .into_iter()
            .collect()
    );
    assert_eq!(merged.state, PayrollState::Generated);
    assert_eq!(
        h.service.recorded_calls(),
        vec!["create", "lookup", "add_members"]
    );
}

#[tokio::test]
async fn test_merge_notifies_merged_not_created() {
    let h: Harness = harness();
    h.service
        .seed_aggregate(march_2025(), &["w1"], PayrollState::Generated);

    let merged = h
        .orchestrator
        .generate(request_for(&["w2"]))
        .await
        .expect("merge succeeds");

    assert_eq!(
        h.notifier.recorded(),
        vec![WorkflowOutcome::Merged {
            period: merged.period,
            added_count: 1
        }]
    );
}

#[tokio::test]
async fn test_merge_submits_only_the_member_delta() {
    let h: Harness = harness();
    let id = h
        .service
        .seed_aggregate(march_2025(), &["w1", "w2"], PayrollState::Generated);

    h.orchestrator
        .generate(request_for(&["w1", "w2", "w3"]))
        .await
        .expect("merge succeeds");

    // The union has no duplicates even though w1 and w2 were requested again.
    assert_eq!(h.service.aggregate(&id).members.len(), 3);
}

#[tokio::test]
async fn test_merge_with_all_workers_present_is_a_no_op() {
    let h: Harness = harness();
    h.service
        .seed_aggregate(march_2025(), &["w1", "w2"], PayrollState::Generated);

    let merged = h
        .orchestrator
        .generate(request_for(&["w1", "w2"]))
        .await
        .expect("no-op merge succeeds");

    assert_eq!(h.service.recorded_calls(), vec!["create", "lookup"]);
    assert_eq!(
        h.notifier.recorded(),
        vec![WorkflowOutcome::Merged {
            period: merged.period,
            added_count: 0
        }]
    );
    // Still exactly one invalidation pass.
    assert_eq!(h.cache.recorded().len(), 3);
}

#[tokio::test]
async fn test_merge_against_approved_payroll_fails_with_state_conflict() {
    let h: Harness = harness();
    let id = h
        .service
        .seed_aggregate(march_2025(), &["w1"], PayrollState::Approved);

    let result = h.orchestrator.generate(request_for(&["w2"])).await;

    assert_eq!(
        result,
        Err(PayrollError::StateConflict {
            id: id.clone(),
            state: PayrollState::Approved,
        })
    );
    // Members are untouched and no merge mutation was issued.
    assert_eq!(h.service.aggregate(&id).members.len(), 1);
    assert_eq!(h.service.recorded_calls(), vec!["create", "lookup"]);
    assert!(h.cache.recorded().is_empty());
}

#[tokio::test]
async fn test_missing_aggregate_after_conflict_is_resolution_failure() {
    let h: Harness = harness();
    h.service
        .seed_aggregate(march_2025(), &["w1"], PayrollState::Generated);
    *h.service.lookup_returns_none.lock().unwrap() = true;

    let result = h.orchestrator.generate(request_for(&["w2"])).await;

    assert_eq!(
        result,
        Err(PayrollError::ResolutionFailed {
            period: march_2025().key(),
        })
    );
    assert!(h.cache.recorded().is_empty());
    assert_eq!(h.notifier.recorded().len(), 1);
}

#[tokio::test]
async fn test_resolver_merge_refuses_paid_aggregate_locally() {
    let h: Harness = harness();
    let id = h
        .service
        .seed_aggregate(march_2025(), &["w1"], PayrollState::Paid);
    let resolver = ConflictResolver::new(Arc::clone(&h.service) as Arc<dyn PayrollService>);

    let existing = resolver
        .resolve(&march_2025().key())
        .await
        .expect("aggregate resolves");
    let result = resolver
        .merge_members(&existing, &[worker("w2")], &test_session())
        .await;

    assert_eq!(
        result,
        Err(PayrollError::StateConflict {
            id,
            state: PayrollState::Paid,
        })
    );
    // The local pre-check refused before any mutation was issued.
    assert_eq!(h.service.recorded_calls(), vec!["lookup"]);
}
