use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::player::{
        ClaimProfileRequest, ClaimedProfileResponse, CreatePlayerRequest, PlayerResponse,
        PlayersByIdsRequest, UpdatePlayerRequest,
    },
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/players",
    responses(
        (status = 200, description = "List all players by last name", body = Vec<PlayerResponse>)
    ),
    tag = "players"
)]
pub async fn list_players(
    State(db): State<Database>,
) -> Result<Json<Vec<PlayerResponse>>, WebError> {
    let players = services::list_players(db.pool()).await?;

    let response: Vec<PlayerResponse> = players.into_iter().map(PlayerResponse::from).collect();

    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/players/{id}",
    params(
        ("id" = Uuid, Path, description = "Player ID")
    ),
    responses(
        (status = 200, description = "Player found", body = PlayerResponse),
        (status = 404, description = "Player not found")
    ),
    tag = "players"
)]
pub async fn get_player(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let player = services::get_player(db.pool(), id).await?;

    Ok(Json(PlayerResponse::from(player)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/players/by-ids",
    request_body = PlayersByIdsRequest,
    responses(
        (status = 200, description = "Players matching the given ids; unknown ids are skipped", body = Vec<PlayerResponse>),
        (status = 400, description = "Validation error")
    ),
    tag = "players"
)]
pub async fn get_players_by_ids(
    State(db): State<Database>,
    Json(req): Json<PlayersByIdsRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let players = services::get_players_by_ids(db.pool(), &req.ids).await?;

    let response: Vec<PlayerResponse> = players.into_iter().map(PlayerResponse::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    post,
    path = "/api/players/{id}/claim",
    params(
        ("id" = Uuid, Path, description = "Player ID")
    ),
    request_body = ClaimProfileRequest,
    responses(
        (status = 200, description = "Profile claimed", body = ClaimedProfileResponse),
        (status = 400, description = "Player has no secret set"),
        (status = 403, description = "Invalid secret code"),
        (status = 404, description = "Player not found")
    ),
    tag = "players"
)]
pub async fn claim_profile(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(req): Json<ClaimProfileRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let (player, session) = services::claim_profile(db.pool(), id, &req.secret).await?;

    let response = ClaimedProfileResponse {
        player: PlayerResponse::from(player),
        is_admin: session.is_admin,
    };

    Ok(Json(response).into_response())
}

#[utoipa::path(
    post,
    path = "/api/players",
    request_body = CreatePlayerRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Player created successfully", body = PlayerResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "players"
)]
pub async fn create_player(
    State(db): State<Database>,
    Json(req): Json<CreatePlayerRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let player = services::create_player(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(PlayerResponse::from(player))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/players/{id}",
    params(
        ("id" = Uuid, Path, description = "Player ID")
    ),
    request_body = UpdatePlayerRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Player updated successfully", body = PlayerResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Player not found")
    ),
    tag = "players"
)]
pub async fn update_player(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(update_req): Json<UpdatePlayerRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let updated = services::update_player(db.pool(), id, &update_req).await?;

    Ok(Json(PlayerResponse::from(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/players/{id}",
    params(
        ("id" = Uuid, Path, description = "Player ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Player deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Player not found"),
        (status = 409, description = "Player is still on a team or has scores")
    ),
    tag = "players"
)]
pub async fn delete_player(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_player(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
