use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Team, TeamPlayers};

#[derive(Debug, Deserialize, IntoParams)]
pub struct TeamListQuery {
    pub event_id: Uuid,
}

/// Request payload for creating a new team
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTeamRequest {
    pub event_id: Uuid,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Team name must be between 1 and 255 characters"
    ))]
    pub team_name: String,

    #[serde(default)]
    pub players: TeamPlayers,

    #[validate(range(min = 1, max = 18))]
    pub starting_hole: Option<i32>,
}

/// Request payload for a partial team update. A supplied `players` object
/// replaces the whole roster.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateTeamRequest {
    #[validate(length(min = 1, max = 255))]
    pub team_name: Option<String>,

    pub players: Option<TeamPlayers>,

    #[validate(range(min = 1, max = 18))]
    pub starting_hole: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamResponse {
    pub team_id: Uuid,
    pub event_id: Uuid,
    pub team_name: String,
    pub players: TeamPlayers,
    pub starting_hole: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// The same player may not fill two slots of one team.
pub fn check_roster(players: &TeamPlayers) -> Result<(), &'static str> {
    let ids: Vec<Uuid> = players.player_ids().collect();

    let has_duplicate = ids
        .iter()
        .enumerate()
        .any(|(idx, id)| ids[idx + 1..].contains(id));

    if has_duplicate {
        Err("A player can only occupy one slot on a team")
    } else {
        Ok(())
    }
}

/// A team can only tee off on a hole the event actually plays.
pub fn check_starting_hole(starting_hole: Option<i32>, hole_count: i32) -> Result<(), String> {
    match starting_hole {
        Some(hole) if !(1..=hole_count).contains(&hole) => Err(format!(
            "Starting hole must be between 1 and {}",
            hole_count
        )),
        _ => Ok(()),
    }
}

impl CreateTeamRequest {
    pub fn validate_roster(&self) -> Result<(), &'static str> {
        check_roster(&self.players)
    }
}

impl UpdateTeamRequest {
    pub fn validate_roster(&self) -> Result<(), &'static str> {
        match &self.players {
            Some(players) => check_roster(players),
            None => Ok(()),
        }
    }
}

impl From<Team> for TeamResponse {
    fn from(team: Team) -> Self {
        Self {
            team_id: team.team_id,
            event_id: team.event_id,
            team_name: team.team_name,
            players: team.players,
            starting_hole: team.starting_hole,
            created_at: team.created_at,
            updated_at: team.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_roster_from_json() {
        let player = Uuid::new_v4();
        let req: CreateTeamRequest = serde_json::from_value(serde_json::json!({
            "event_id": Uuid::new_v4(),
            "team_name": "Eagles",
            "players": { "player3": player }
        }))
        .unwrap();

        assert_eq!(req.players.player_ids().collect::<Vec<_>>(), vec![player]);
        assert!(req.validate().is_ok());
        assert!(req.validate_roster().is_ok());
    }

    #[test]
    fn test_rejects_duplicate_slot() {
        let player = Uuid::new_v4();
        let req = UpdateTeamRequest {
            players: Some(TeamPlayers {
                player1: Some(player),
                player2: None,
                player3: None,
                player4: Some(player),
            }),
            ..Default::default()
        };

        assert!(req.validate_roster().is_err());
    }

    #[test]
    fn test_rejects_starting_hole_out_of_range() {
        let req = UpdateTeamRequest {
            starting_hole: Some(19),
            ..Default::default()
        };

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_starting_hole_must_fit_the_round() {
        assert!(check_starting_hole(Some(14), 9).is_err());
        assert!(check_starting_hole(Some(0), 18).is_err());
        assert!(check_starting_hole(Some(9), 9).is_ok());
        assert!(check_starting_hole(Some(14), 18).is_ok());
        assert!(check_starting_hole(None, 9).is_ok());

        assert_eq!(
            check_starting_hole(Some(10), 9).unwrap_err(),
            "Starting hole must be between 1 and 9"
        );
    }
}
