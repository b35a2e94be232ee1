use thiserror::Error;
use uuid::Uuid;

use crate::models::{Player, Team};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimError {
    #[error("This profile does not have a secret set. Contact the tournament organizer.")]
    NoSecret,

    #[error("Invalid secret code")]
    InvalidSecret,
}

/// The player a scorer has claimed. Passed explicitly to anything that needs
/// to know who is entering scores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringSession {
    pub player_id: Uuid,
    pub is_admin: bool,
}

impl ScoringSession {
    /// Claims `player` with a secret. Matching ignores case and surrounding
    /// whitespace.
    pub fn claim(player: &Player, secret: &str) -> Result<Self, ClaimError> {
        let stored = player
            .profile_secret
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ClaimError::NoSecret)?;

        if !stored.eq_ignore_ascii_case(secret.trim()) {
            return Err(ClaimError::InvalidSecret);
        }

        Ok(Self::for_player(player))
    }

    pub fn for_player(player: &Player) -> Self {
        Self {
            player_id: player.player_id,
            is_admin: player.is_admin,
        }
    }

    /// Admins may score for any team, everyone else only for their own.
    pub fn can_edit_team(&self, team: &Team) -> bool {
        self.is_admin || team.players.contains(self.player_id)
    }

    pub fn can_edit_player(&self, player_id: Uuid) -> bool {
        self.is_admin || self.player_id == player_id
    }
}
