//! HTTP handlers for the contact API.
//!
//! Each handler reads its inputs, hands them to the [`ContactService`] and
//! turns the result into an [`ApiReply`]. Failures are logged and counted
//! here; the body only ever carries the client-safe message.

use super::response::{ApiReply, DeletedMessage};
use crate::error::{ServiceError, ServiceResult};
use crate::filter::{ContactQuery, ContactQueryParams};
use crate::metrics::{Metrics, MetricsSummary, Mutation, Outcome};
use crate::models::Contact;
use crate::services::ContactService;
use crate::store::StoreProvider;
use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn ContactService>,
    pub store: StoreProvider,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(service: Arc<dyn ContactService>, store: StoreProvider) -> Self {
        Self {
            service,
            store,
            metrics: Metrics::new(),
        }
    }

    /// Log, count and wrap the result of a service call.
    fn finish<T: Serialize>(
        &self,
        route: &'static str,
        result: ServiceResult<T>,
        success: StatusCode,
    ) -> ApiReply<T> {
        match result {
            Ok(data) => {
                self.metrics.record_request(Outcome::Success);
                ApiReply::success(success, data)
            }
            Err(err) => {
                let outcome = match &err {
                    ServiceError::Validation(issues) => {
                        tracing::warn!(route, issues = issues.len(), "Rejected invalid contact data");
                        Outcome::ValidationFailed
                    }
                    ServiceError::InvalidBody(reason) => {
                        tracing::warn!(route, reason = %reason, "Rejected unreadable request body");
                        Outcome::ValidationFailed
                    }
                    ServiceError::NotFound => {
                        tracing::info!(route, "Contact not found");
                        Outcome::NotFound
                    }
                    ServiceError::OperationFailed(message) => {
                        tracing::error!(route, error = %message, "Request failed");
                        Outcome::OperationFailed
                    }
                };
                self.metrics.record_request(outcome);
                ApiReply::from_error(&err)
            }
        }
    }
}

fn parse_body(body: &Bytes) -> ServiceResult<Value> {
    serde_json::from_slice(body).map_err(|e| ServiceError::InvalidBody(e.to_string()))
}

/// `GET /contacts`
pub async fn list_contacts(
    State(state): State<AppState>,
    params: Result<Query<ContactQueryParams>, QueryRejection>,
) -> ApiReply<Vec<Contact>> {
    tracing::debug!("GET /contacts");
    let result = match params {
        Ok(Query(params)) => match ContactQuery::from_params(&params) {
            Ok(query) => state.service.list_contacts(&query).await,
            Err(issues) => Err(ServiceError::Validation(issues)),
        },
        Err(rejection) => Err(ServiceError::InvalidBody(rejection.body_text())),
    };
    state.finish("GET /contacts", result, StatusCode::OK)
}

/// `POST /contacts`
pub async fn create_contact(State(state): State<AppState>, body: Bytes) -> ApiReply<Contact> {
    tracing::debug!(bytes = body.len(), "POST /contacts");
    let result = match parse_body(&body) {
        Ok(input) => state.service.create_contact(&input).await,
        Err(err) => Err(err),
    };
    if result.is_ok() {
        state.metrics.record_mutation(Mutation::Created);
    }
    state.finish("POST /contacts", result, StatusCode::CREATED)
}

/// `GET /contacts/{id}`
pub async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiReply<Contact> {
    tracing::debug!(id = %id, "GET /contacts/{{id}}");
    let result = state.service.get_contact(&id).await;
    state.finish("GET /contacts/{id}", result, StatusCode::OK)
}

/// `PUT /contacts/{id}`
pub async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiReply<Contact> {
    tracing::debug!(id = %id, bytes = body.len(), "PUT /contacts/{{id}}");
    let result = match parse_body(&body) {
        Ok(input) => state.service.update_contact(&id, &input).await,
        Err(err) => Err(err),
    };
    if result.is_ok() {
        state.metrics.record_mutation(Mutation::Updated);
    }
    state.finish("PUT /contacts/{id}", result, StatusCode::OK)
}

/// `DELETE /contacts/{id}`
pub async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiReply<DeletedMessage> {
    tracing::debug!(id = %id, "DELETE /contacts/{{id}}");
    let result = state
        .service
        .delete_contact(&id)
        .await
        .map(|()| DeletedMessage::new());
    if result.is_ok() {
        state.metrics.record_mutation(Mutation::Deleted);
    }
    state.finish("DELETE /contacts/{id}", result, StatusCode::OK)
}

/// Body of a healthy `/healthz` response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub metrics: MetricsSummary,
}

/// `GET /healthz`
pub async fn healthz(State(state): State<AppState>) -> ApiReply<HealthReport> {
    let ping = match state.store.handle().await {
        Ok(store) => store.ping().await,
        Err(e) => Err(e),
    };
    match ping {
        Ok(()) => ApiReply::ok(HealthReport {
            status: "ok",
            metrics: state.metrics.summary(),
        }),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            ApiReply::failure(StatusCode::INTERNAL_SERVER_ERROR, "Store unavailable")
        }
    }
}

/// Fallback for paths outside the API.
pub async fn not_found() -> ApiReply<()> {
    ApiReply::failure(StatusCode::NOT_FOUND, "Route not found")
}
