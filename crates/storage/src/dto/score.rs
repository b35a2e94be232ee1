use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ScoreListQuery {
    pub event_id: Uuid,
    pub team_id: Option<Uuid>,
}

/// Who a score row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTarget {
    Team(Uuid),
    Player(Uuid),
}

impl ScoreTarget {
    fn from_ids(team_id: Option<Uuid>, player_id: Option<Uuid>) -> Result<Self, &'static str> {
        match (team_id, player_id) {
            (Some(team_id), None) => Ok(Self::Team(team_id)),
            (None, Some(player_id)) => Ok(Self::Player(player_id)),
            (Some(_), Some(_)) => Err("Provide either team_id or player_id, not both"),
            (None, None) => Err("team_id or player_id is required"),
        }
    }
}

/// Request payload for recording strokes on a hole
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpsertScoreRequest {
    pub event_id: Uuid,

    pub team_id: Option<Uuid>,

    pub player_id: Option<Uuid>,

    #[validate(range(min = 1, max = 18))]
    pub hole_number: i32,

    /// Defaults to the hole's par when omitted
    #[validate(range(min = 1, max = 20))]
    pub strokes: Option<i32>,

    /// Player acting as scorer (the claimed profile)
    pub claimed_player_id: Uuid,
}

impl UpsertScoreRequest {
    pub fn target(&self) -> Result<ScoreTarget, &'static str> {
        ScoreTarget::from_ids(self.team_id, self.player_id)
    }
}

/// Request payload for clearing a hole
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ClearScoreRequest {
    pub event_id: Uuid,

    pub team_id: Option<Uuid>,

    pub player_id: Option<Uuid>,

    #[validate(range(min = 1, max = 18))]
    pub hole_number: i32,

    pub claimed_player_id: Uuid,
}

impl ClearScoreRequest {
    pub fn target(&self) -> Result<ScoreTarget, &'static str> {
        ScoreTarget::from_ids(self.team_id, self.player_id)
    }
}
