//! Waitlist signup routes.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::{
    adapters::http::app_state::AppState,
    app_error::{AppError, AppResult},
    domain::entities::waitlist_entry::WaitlistEntry,
    use_cases::waitlist::WaitlistUseCases,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_waitlist).post(join_waitlist))
}

#[derive(Deserialize)]
struct JoinWaitlistPayload {
    email: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JoinWaitlistResponse {
    success: bool,
    message: &'static str,
    total_members: usize,
}

#[derive(Serialize)]
struct WaitlistResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    waitlist: Option<Vec<WaitlistEntry>>,
    count: usize,
}

/// POST /api/waitlist
/// Adds an email to the waitlist and returns the new member count.
async fn join_waitlist(
    State(waitlist): State<Arc<WaitlistUseCases>>,
    payload: Result<Json<JoinWaitlistPayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let email = match payload {
        Ok(Json(JoinWaitlistPayload { email: Some(email) })) => email,
        Ok(_) => return Err(AppError::InvalidEmail),
        Err(rejection) => {
            tracing::debug!(rejection = %rejection, "Unreadable waitlist payload");
            return Err(AppError::InvalidEmail);
        }
    };

    let total_members = waitlist.join(&email).await?;

    Ok((
        StatusCode::OK,
        Json(JoinWaitlistResponse {
            success: true,
            message: "Successfully joined waitlist!",
            total_members,
        }),
    ))
}

/// GET /api/waitlist?full=true
/// Count only unless the first `full` parameter is exactly "true".
/// Repeated or unparsable parameters never fail the request.
async fn get_waitlist(
    State(waitlist): State<Arc<WaitlistUseCases>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let full = match query {
        Ok(Query(params)) => wants_full_listing(&params),
        Err(rejection) => {
            tracing::debug!(rejection = %rejection, "Unreadable waitlist query");
            false
        }
    };

    let snapshot = waitlist.snapshot(full).await?;

    Ok(Json(WaitlistResponse {
        waitlist: snapshot.entries,
        count: snapshot.count,
    }))
}

fn wants_full_listing(params: &[(String, String)]) -> bool {
    params
        .iter()
        .find(|(key, _)| key == "full")
        .is_some_and(|(_, value)| value == "true")
}
