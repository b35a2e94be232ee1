use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Which score drives the ranking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ScoreMode {
    /// Gross score relative to par
    #[default]
    Actual,
    /// Gross score relative to par minus the team handicap allowance
    Net,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct LeaderboardQuery {
    #[serde(default)]
    pub mode: ScoreMode,
}

/// One ranked team. `rank` is the 1-based position in the ordered board.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub team_id: Uuid,
    pub team_name: String,
    pub members: Vec<String>,
    pub front_strokes: i32,
    pub back_strokes: i32,
    pub total_strokes: i32,
    pub front_par: i32,
    pub back_par: i32,
    pub total_par: i32,
    pub front_to_par: i32,
    pub back_to_par: i32,
    pub score_to_par: i32,
    #[schema(value_type = f64)]
    pub handicap_allowance: Decimal,
    #[schema(value_type = f64)]
    pub net_to_par: Decimal,
    pub last_three_strokes: i32,
    pub holes_completed: u32,
}

impl LeaderboardEntry {
    /// Primary ranking key for the given mode
    pub fn score_for(&self, mode: ScoreMode) -> Decimal {
        match mode {
            ScoreMode::Actual => Decimal::from(self.score_to_par),
            ScoreMode::Net => self.net_to_par,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaderboardResponse {
    pub event_id: Uuid,
    pub event_name: String,
    pub hole_count: i32,
    pub mode: ScoreMode,
    pub entries: Vec<LeaderboardEntry>,
}
