use sqlx::PgPool;
use storage::{
    dto::team::{CreateTeamRequest, UpdateTeamRequest, check_starting_hole},
    error::Result,
    models::Team,
    repository::{EventRepository, TeamRepository},
};
use uuid::Uuid;

use crate::error::{WebError, WebResult};

pub async fn list_teams(pool: &PgPool, event_id: Uuid) -> Result<Vec<Team>> {
    TeamRepository::new(pool).list_by_event(event_id).await
}

pub async fn get_team(pool: &PgPool, id: Uuid) -> Result<Team> {
    TeamRepository::new(pool).find_by_id(id).await
}

pub async fn create_team(pool: &PgPool, req: &CreateTeamRequest) -> WebResult<Team> {
    // 404 for an unknown event rather than a constraint error
    let event = EventRepository::new(pool).find_by_id(req.event_id).await?;
    check_starting_hole(req.starting_hole, event.hole_count).map_err(WebError::BadRequest)?;

    let team = TeamRepository::new(pool).create(req).await?;
    tracing::info!(team_id = %team.team_id, event_id = %team.event_id, "Team created");
    Ok(team)
}

pub async fn update_team(pool: &PgPool, id: Uuid, req: &UpdateTeamRequest) -> WebResult<Team> {
    let repo = TeamRepository::new(pool);
    let existing = repo.find_by_id(id).await?;

    if req.starting_hole.is_some() {
        let event = EventRepository::new(pool).find_by_id(existing.event_id).await?;
        check_starting_hole(req.starting_hole, event.hole_count).map_err(WebError::BadRequest)?;
    }

    Ok(repo.update(id, &existing, req).await?)
}

pub async fn delete_team(pool: &PgPool, id: Uuid) -> Result<()> {
    TeamRepository::new(pool).delete(id).await?;
    tracing::info!(team_id = %id, "Team deleted");
    Ok(())
}
