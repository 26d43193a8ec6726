//! Newsletter form endpoints.

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dashmap::DashSet;
use serde::{Deserialize, Serialize};

use crate::http::server::AppState;
use crate::observability::metrics;
use crate::signup::{SignupAttempt, SignupStatus};

#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubscribeResponse {
    pub status: SignupStatus,
    pub message: Option<String>,
    pub waitlist_count: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountResponse {
    pub waitlist_count: Option<u64>,
}

/// Normalized emails with an insert currently pending.
#[derive(Debug, Default, Clone)]
pub struct InFlight {
    emails: Arc<DashSet<String>>,
}

impl InFlight {
    /// Claim `email`; `None` if another request already holds it.
    pub fn claim(&self, email: &str) -> Option<InFlightGuard> {
        if self.emails.insert(email.to_string()) {
            Some(InFlightGuard {
                emails: self.emails.clone(),
                email: email.to_string(),
            })
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}

/// Releases the claim when dropped, once the attempt holding it has settled.
#[derive(Debug)]
pub struct InFlightGuard {
    emails: Arc<DashSet<String>>,
    email: String,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.emails.remove(&self.email);
    }
}

/// `POST /api/newsletter`
pub async fn subscribe(
    State(state): State<AppState>,
    Json(request): Json<SubscribeRequest>,
) -> Response {
    let mut attempt = SignupAttempt::new(request.email);
    if !attempt.begin() {
        metrics::record_signup("skipped");
        return reply(StatusCode::BAD_REQUEST, &attempt, &state);
    }

    let Some(claim) = state.in_flight.claim(attempt.normalized_email()) else {
        metrics::record_signup("in_flight");
        tracing::debug!(email = %attempt.normalized_email(), "Signup already pending");
        return reply(StatusCode::CONFLICT, &attempt, &state);
    };

    // A dropped request must not cancel the insert.
    let submitter = state.submitter.clone();
    let waitlist = state.waitlist.clone();
    let email = attempt.normalized_email().to_string();
    let task = tokio::spawn(async move {
        let _claim = claim;
        submitter.complete(attempt, &waitlist).await
    });

    let attempt = match task.await {
        Ok(attempt) => attempt,
        Err(e) => {
            tracing::error!(email = %email, error = %e, "Signup task aborted");
            let body = SubscribeResponse {
                status: SignupStatus::Failed,
                message: Some(state.submitter.messages().failure_message.clone()),
                waitlist_count: state.waitlist.get(),
            };
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
        }
    };

    let status = if attempt.status().is_confirmation() {
        StatusCode::OK
    } else {
        StatusCode::BAD_GATEWAY
    };
    reply(status, &attempt, &state)
}

/// `GET /api/newsletter/count`
pub async fn count(State(state): State<AppState>) -> Json<CountResponse> {
    Json(CountResponse {
        waitlist_count: state.waitlist.get(),
    })
}

fn reply(code: StatusCode, attempt: &SignupAttempt, state: &AppState) -> Response {
    let body = SubscribeResponse {
        status: attempt.status(),
        message: attempt.message().map(String::from),
        waitlist_count: state.waitlist.get(),
    };
    (code, Json(body)).into_response()
}
