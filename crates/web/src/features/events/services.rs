use sqlx::PgPool;
use storage::{
    Database,
    dto::{
        event::{CreateEventRequest, UpdateEventRequest},
        leaderboard::{LeaderboardResponse, ScoreMode},
    },
    error::Result,
    models::Event,
    repository::EventRepository,
    services::leaderboard::load_leaderboard,
};
use uuid::Uuid;

pub async fn list_events(pool: &PgPool) -> Result<Vec<Event>> {
    EventRepository::new(pool).list().await
}

pub async fn get_event(pool: &PgPool, id: Uuid) -> Result<Event> {
    EventRepository::new(pool).find_by_id(id).await
}

pub async fn get_event_by_share_code(pool: &PgPool, code: &str) -> Result<Event> {
    EventRepository::new(pool).find_by_share_code(code).await
}

pub async fn create_event(pool: &PgPool, req: &CreateEventRequest) -> Result<Event> {
    let event = EventRepository::new(pool).create(req).await?;
    tracing::info!(event_id = %event.event_id, share_code = %event.share_code, "Event created");
    Ok(event)
}

pub async fn update_event(pool: &PgPool, id: Uuid, req: &UpdateEventRequest) -> Result<Event> {
    let repo = EventRepository::new(pool);
    let existing = repo.find_by_id(id).await?;
    let event = repo.update(id, &existing, req).await?;

    if existing.is_locked != event.is_locked {
        tracing::info!(event_id = %id, locked = event.is_locked, "Event lock changed");
    }

    Ok(event)
}

pub async fn delete_event(pool: &PgPool, id: Uuid) -> Result<()> {
    EventRepository::new(pool).delete(id).await?;
    tracing::info!(event_id = %id, "Event deleted");
    Ok(())
}

/// Recomputed from the current rows on every call
pub async fn get_leaderboard(
    db: &Database,
    event_id: Uuid,
    mode: ScoreMode,
) -> Result<LeaderboardResponse> {
    load_leaderboard(db, event_id, mode).await
}
