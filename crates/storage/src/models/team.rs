use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Maximum number of players on a team.
pub const TEAM_SLOTS: usize = 4;

/// The four named roster slots of a team. Any subset may be empty.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema,
)]
pub struct TeamPlayers {
    pub player1: Option<Uuid>,
    pub player2: Option<Uuid>,
    pub player3: Option<Uuid>,
    pub player4: Option<Uuid>,
}

impl TeamPlayers {
    pub fn slots(&self) -> [Option<Uuid>; TEAM_SLOTS] {
        [self.player1, self.player2, self.player3, self.player4]
    }

    /// Filled slots in slot order.
    pub fn player_ids(&self) -> impl Iterator<Item = Uuid> {
        self.slots().into_iter().flatten()
    }

    pub fn contains(&self, player_id: Uuid) -> bool {
        self.player_ids().any(|id| id == player_id)
    }

    pub fn is_empty(&self) -> bool {
        self.player_ids().next().is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Team {
    pub team_id: Uuid,
    pub event_id: Uuid,
    pub team_name: String,
    #[sqlx(flatten)]
    pub players: TeamPlayers,
    pub starting_hole: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
