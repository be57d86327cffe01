use std::collections::HashSet;

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app::AppState;
use crate::authz::{build_filter_signatures, build_role_signatures};
use crate::errors::AppResult;
use crate::jwt::AuthActor;
use crate::models::search::SearchRequest;

#[derive(Debug, Serialize, ToSchema)]
pub struct SignatureResponse {
    #[schema(example = json!(["IA:1:765324:hmcts-judiciary:*:r:U:*"]))]
    pub grant_signatures: Vec<String>,
    #[schema(example = json!(["U:IA:*:*:*:*"]))]
    pub filter_signatures: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FilterSignatureResponse {
    pub filter_signatures: Vec<String>,
}

#[utoipa::path(
    post,
    path = "/signatures/evaluate",
    tag = "Signatures",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Signature sets for the caller's search", body = SignatureResponse),
        (status = 400, description = "Filter value carries a reserved character"),
        (status = 401, description = "Missing or invalid bearer token")
    )
)]
pub async fn evaluate(
    State(state): State<AppState>,
    auth: AuthActor,
    Json(request): Json<SearchRequest>,
) -> AppResult<Json<SignatureResponse>> {
    request.validate()?;

    let mut assignments = state.roles.assignments_for(auth.actor_id).await?;

    // Lapsed and not-yet-started assignments grant nothing.
    let now = Utc::now();
    assignments.retain(|assignment| assignment.is_active_at(now));

    let grant_signatures = sorted(build_role_signatures(&assignments, &request));
    let filter_signatures = sorted(build_filter_signatures(&request));

    tracing::debug!(
        actor_id = %auth.actor_id,
        grants = grant_signatures.len(),
        filters = filter_signatures.len(),
        "evaluated search signatures"
    );

    Ok(Json(SignatureResponse {
        grant_signatures,
        filter_signatures,
    }))
}

#[utoipa::path(
    post,
    path = "/signatures/filters",
    tag = "Signatures",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Filter signatures for the search request", body = FilterSignatureResponse),
        (status = 400, description = "Filter value carries a reserved character"),
        (status = 401, description = "Missing or invalid bearer token")
    )
)]
pub async fn filters(
    State(_state): State<AppState>,
    _auth: AuthActor,
    Json(request): Json<SearchRequest>,
) -> AppResult<Json<FilterSignatureResponse>> {
    request.validate()?;

    let filter_signatures = sorted(build_filter_signatures(&request));

    Ok(Json(FilterSignatureResponse { filter_signatures }))
}

fn sorted(signatures: HashSet<String>) -> Vec<String> {
    let mut list: Vec<String> = signatures.into_iter().collect();
    list.sort();
    list
}
