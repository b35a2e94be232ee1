use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::score::{ClearScoreRequest, ScoreListQuery, UpsertScoreRequest},
    models::Score,
};
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/scores",
    params(ScoreListQuery),
    responses(
        (status = 200, description = "Score rows of the event ordered by hole", body = Vec<Score>),
        (status = 400, description = "Missing or invalid event_id")
    ),
    tag = "scores"
)]
pub async fn list_scores(
    State(db): State<Database>,
    Query(query): Query<ScoreListQuery>,
) -> Result<Json<Vec<Score>>, WebError> {
    let scores = services::list_scores(db.pool(), query.event_id, query.team_id).await?;

    Ok(Json(scores))
}

#[utoipa::path(
    post,
    path = "/api/scores/upsert",
    request_body = UpsertScoreRequest,
    responses(
        (status = 200, description = "Score saved", body = Score),
        (status = 400, description = "Invalid hole, owner or team"),
        (status = 403, description = "Scorer may not edit this team"),
        (status = 404, description = "Event not found"),
        (status = 409, description = "Event is locked or the player does not exist")
    ),
    tag = "scores"
)]
pub async fn upsert_score(
    State(db): State<Database>,
    Json(req): Json<UpsertScoreRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let score = services::upsert_score(db.pool(), &req).await?;

    Ok(Json(score).into_response())
}

#[utoipa::path(
    post,
    path = "/api/scores/clear",
    request_body = ClearScoreRequest,
    responses(
        (status = 204, description = "Score cleared"),
        (status = 400, description = "Invalid hole, owner or team"),
        (status = 403, description = "Scorer may not edit this team"),
        (status = 404, description = "Event not found"),
        (status = 409, description = "Event is locked")
    ),
    tag = "scores"
)]
pub async fn clear_score(
    State(db): State<Database>,
    Json(req): Json<ClearScoreRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    services::clear_score(db.pool(), &req).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
