use sqlx::PgPool;
use storage::{
    dto::player::{CreatePlayerRequest, UpdatePlayerRequest},
    error::Result,
    models::Player,
    repository::PlayerRepository,
    services::session::ScoringSession,
};
use uuid::Uuid;

use crate::error::WebResult;

pub async fn list_players(pool: &PgPool) -> Result<Vec<Player>> {
    PlayerRepository::new(pool).list().await
}

pub async fn get_player(pool: &PgPool, id: Uuid) -> Result<Player> {
    PlayerRepository::new(pool).find_by_id(id).await
}

pub async fn get_players_by_ids(pool: &PgPool, ids: &[Uuid]) -> Result<Vec<Player>> {
    PlayerRepository::new(pool).find_by_ids(ids).await
}

pub async fn create_player(pool: &PgPool, req: &CreatePlayerRequest) -> Result<Player> {
    let player = PlayerRepository::new(pool).create(req).await?;
    tracing::info!(player_id = %player.player_id, "Player created");
    Ok(player)
}

pub async fn update_player(pool: &PgPool, id: Uuid, req: &UpdatePlayerRequest) -> Result<Player> {
    let repo = PlayerRepository::new(pool);
    let existing = repo.find_by_id(id).await?;
    repo.update(id, &existing, req).await
}

pub async fn delete_player(pool: &PgPool, id: Uuid) -> Result<()> {
    PlayerRepository::new(pool).delete(id).await?;
    tracing::info!(player_id = %id, "Player deleted");
    Ok(())
}

/// Checks the profile secret and returns the player together with the session
/// the client should act as.
pub async fn claim_profile(
    pool: &PgPool,
    id: Uuid,
    secret: &str,
) -> WebResult<(Player, ScoringSession)> {
    let player = PlayerRepository::new(pool).find_by_id(id).await?;

    let session = ScoringSession::claim(&player, secret).inspect_err(|e| {
        tracing::warn!(player_id = %id, error = %e, "Profile claim rejected");
    })?;

    tracing::info!(player_id = %id, is_admin = session.is_admin, "Profile claimed");

    Ok((player, session))
}
