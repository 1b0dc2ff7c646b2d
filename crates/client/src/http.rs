// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The HTTP binding of the payroll service boundary.
//!
//! Endpoints are versioned under `/api/v1`. Every failure response is
//! classified into a [`ServiceError`] by [`classify_error`], which is
//! pure so the mapping is testable without a server.

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use time::Date;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::wire::{
    AddMembersBody, ApprovalSummaryDto, BulkApproveBody, CreatePayrollBody, ErrorBody, PayrollDto,
    WorkerDto,
};
use planilla::{ApprovedSummary, PayrollService, ServiceError, SessionContext};
use planilla_domain::{AggregateId, PayrollAggregate, PeriodKey, WorkerRef};

/// Which endpoint a failure response came from.
///
/// Classification depends on it: a 409 on create is the period conflict
/// the orchestrator recovers from, while a 409 anywhere else is a state
/// refusal the operator has to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WireOperation {
    Create(PeriodKey),
    Lookup,
    AddMembers,
    Approve,
    ListWorkers,
}

impl WireOperation {
    const fn resource(self) -> &'static str {
        match self {
            Self::Create(_) | Self::Lookup | Self::AddMembers | Self::Approve => "Payroll",
            Self::ListWorkers => "Worker listing",
        }
    }
}

/// Classifies a failure response into the service error taxonomy.
pub(crate) fn classify_error(
    operation: WireOperation,
    status: StatusCode,
    body: &ErrorBody,
) -> ServiceError {
    if let WireOperation::Create(period) = operation
        && (status == StatusCode::CONFLICT || body.is_period_conflict())
    {
        return ServiceError::Conflict { period };
    }

    match status {
        StatusCode::NOT_FOUND => ServiceError::NotFound {
            resource: operation.resource().to_string(),
            message: body.message_or("the requested resource does not exist"),
        },
        StatusCode::CONFLICT => ServiceError::StateConflict {
            message: body.message_or("the payroll state forbids this mutation"),
        },
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ServiceError::Validation {
            message: body.message_or("the server rejected the request"),
        },
        // 401/403 land here too: an expired session is retryable after
        // signing in again, not a flaw in the request itself.
        _ => ServiceError::Transient {
            message: body.message_or(&format!("server responded with status {status}")),
        },
    }
}

/// Classifies a transport-level failure (no response at all).
fn classify_transport(err: &reqwest::Error) -> ServiceError {
    let message = if err.is_timeout() {
        String::from("request timed out")
    } else {
        format!("request failed: {err}")
    };
    ServiceError::Transient { message }
}

/// Talks to the payroll backend over HTTP.
pub struct HttpPayrollClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl HttpPayrollClient {
    /// Builds a client from the given settings.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Transient` if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(config: ClientConfig) -> Result<Self, ServiceError> {
        let http: reqwest::Client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|err| ServiceError::Transient {
                message: format!("failed to build HTTP client: {err}"),
            })?;
        Ok(Self { http, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{path}", self.config.base_url())
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.config.bearer_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(
        &self,
        request: RequestBuilder,
        operation: WireOperation,
    ) -> Result<Response, ServiceError> {
        let response: Response = self
            .authorized(request)
            .send()
            .await
            .map_err(|err| classify_transport(&err))?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status: StatusCode = response.status();
        let body: ErrorBody = response.json::<ErrorBody>().await.unwrap_or_default();
        let classified: ServiceError = classify_error(operation, status, &body);
        warn!(?operation, %status, error = %classified, "Payroll backend refused request");
        Err(classified)
    }

    async fn decode<T>(response: Response) -> Result<T, ServiceError>
    where
        T: serde::de::DeserializeOwned,
    {
        response
            .json::<T>()
            .await
            .map_err(|err| ServiceError::Transient {
                message: format!("malformed response payload: {err}"),
            })
    }
}

#[async_trait]
impl PayrollService for HttpPayrollClient {
    async fn create_aggregate(
        &self,
        period: &PeriodKey,
        scheduled_payment_date: Date,
        workers: &[WorkerRef],
        initiator: &SessionContext,
    ) -> Result<PayrollAggregate, ServiceError> {
        debug!(%period, workers = workers.len(), "POST /payrolls");
        let body = CreatePayrollBody::new(
            period,
            scheduled_payment_date,
            workers,
            initiator.operator_id(),
        );
        let response: Response = self
            .send(
                self.http.post(self.url("/payrolls")).json(&body),
                WireOperation::Create(*period),
            )
            .await?;
        Self::decode::<PayrollDto>(response).await?.into_aggregate()
    }

    async fn aggregate_by_period(
        &self,
        period: &PeriodKey,
    ) -> Result<Option<PayrollAggregate>, ServiceError> {
        debug!(%period, "GET /payrolls/by-period");
        let request: RequestBuilder = self
            .http
            .get(self.url("/payrolls/by-period"))
            .query(&[("month", u16::from(period.month())), ("year", period.year())]);

        match self.send(request, WireOperation::Lookup).await {
            Ok(response) => {
                let aggregate = Self::decode::<PayrollDto>(response)
                    .await?
                    .into_aggregate()?;
                Ok(Some(aggregate))
            }
            Err(ServiceError::NotFound { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn add_members(
        &self,
        id: &AggregateId,
        workers: &[WorkerRef],
        initiator: &SessionContext,
    ) -> Result<PayrollAggregate, ServiceError> {
        debug!(%id, workers = workers.len(), "POST /payrolls/{{id}}/members");
        let body = AddMembersBody::new(workers, initiator.operator_id());
        let response: Response = self
            .send(
                self.http
                    .post(self.url(&format!("/payrolls/{}/members", id.value())))
                    .json(&body),
                WireOperation::AddMembers,
            )
            .await?;
        Self::decode::<PayrollDto>(response).await?.into_aggregate()
    }

    async fn bulk_approve(
        &self,
        aggregate_ids: &[AggregateId],
        approver: &SessionContext,
        notes: Option<&str>,
    ) -> Result<ApprovedSummary, ServiceError> {
        debug!(count = aggregate_ids.len(), "POST /payrolls/approvals");
        let body = BulkApproveBody::new(aggregate_ids, approver.operator_id(), notes);
        let response: Response = self
            .send(
                self.http.post(self.url("/payrolls/approvals")).json(&body),
                WireOperation::Approve,
            )
            .await?;
        Ok(Self::decode::<ApprovalSummaryDto>(response)
            .await?
            .into_summary())
    }

    async fn workers_without_aggregate(
        &self,
        period: &PeriodKey,
    ) -> Result<Vec<WorkerRef>, ServiceError> {
        debug!(%period, "GET /workers/without-payroll");
        let request: RequestBuilder = self
            .http
            .get(self.url("/workers/without-payroll"))
            .query(&[("month", u16::from(period.month())), ("year", period.year())]);

        let response: Response = self.send(request, WireOperation::ListWorkers).await?;
        let rows: Vec<WorkerDto> = Self::decode(response).await?;
        rows.iter()
            .map(|row| {
                WorkerRef::new(&row.id).map_err(|err| ServiceError::Transient {
                    message: format!("malformed worker payload: {err}"),
                })
            })
            .collect()
    }
}
