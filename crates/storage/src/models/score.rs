use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A single hole entry. Team-mode rows carry `team_id` with `player_id` left
/// empty; player-mode rows carry `player_id`. `strokes == None` means the hole
/// has not been played yet.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Score {
    pub score_id: Uuid,
    pub event_id: Uuid,
    pub player_id: Option<Uuid>,
    pub team_id: Option<Uuid>,
    pub hole_number: i32,
    pub strokes: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
