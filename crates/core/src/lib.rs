// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod adapter;
mod approval;
mod conflict;
mod error;
mod orchestrator;
mod request;
mod service;
mod session;

#[cfg(test)]
mod tests;

// Re-export public types
pub use adapter::{CacheScope, QueryCache, WorkflowNotifier, WorkflowOutcome};
pub use approval::ApprovalCoordinator;
pub use conflict::ConflictResolver;
pub use error::{PayrollError, ServiceError, translate_domain_error};
pub use orchestrator::{GenerationOrchestrator, GenerationPhase};
pub use request::{ApprovalBatch, ApprovedSummary, PayrollGenerationRequest};
pub use service::PayrollService;
pub use session::SessionContext;
