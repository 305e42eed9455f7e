use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use busplan::planner;
use std::{collections::HashMap, sync::Arc};
use tracing::{debug, info};

use crate::{api::endpoints, dto::PlanDto, state::AppState};

pub async fn plan(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let (from, to) = endpoints(&params)?;
    let result = state.repository.plan(from, to).map_err(|err| {
        info!("Planning {from} -> {to} failed: {err}");
        match err {
            planner::Error::StopNotFound(_) => StatusCode::NOT_FOUND,
            planner::Error::NoRouteFound => StatusCode::UNPROCESSABLE_ENTITY,
        }
    })?;
    debug!(
        "Planned {from} -> {to} over {} segments",
        result.segments.len()
    );
    Ok(Json(PlanDto::from(result)).into_response())
}

pub async fn direct_routes(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let (from, to) = endpoints(&params)?;
    let routes: Vec<String> = state
        .repository
        .list_direct_routes(from, to)
        .into_iter()
        .map(|id| id.to_string())
        .collect();
    Ok(Json(routes).into_response())
}

pub async fn candidate_routes(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let (from, to) = endpoints(&params)?;
    let routes: Vec<String> = state
        .repository
        .list_candidate_routes(from, to)
        .into_iter()
        .map(|id| id.to_string())
        .collect();
    Ok(Json(routes).into_response())
}
