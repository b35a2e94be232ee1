use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::Player;

/// Public view of a player. The profile secret is never exposed.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlayerResponse {
    pub player_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub initials: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub handicap: Option<Decimal>,
    pub is_admin: bool,
    pub has_profile_secret: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Request payload for creating a new player
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePlayerRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "First name must be between 1 and 255 characters"
    ))]
    pub first_name: String,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Last name must be between 1 and 255 characters"
    ))]
    pub last_name: String,

    #[validate(length(max = 50))]
    pub phone: Option<String>,

    #[validate(email)]
    #[validate(length(max = 255))]
    pub email: Option<String>,

    #[validate(custom(function = "validate_handicap"))]
    #[schema(value_type = Option<f64>)]
    pub handicap: Option<Decimal>,

    #[validate(length(max = 255))]
    pub profile_secret: Option<String>,

    #[serde(default)]
    pub is_admin: bool,
}

/// Request payload for a partial player update
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdatePlayerRequest {
    #[validate(length(min = 1, max = 255))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub last_name: Option<String>,

    #[validate(length(max = 50))]
    pub phone: Option<String>,

    #[validate(email)]
    #[validate(length(max = 255))]
    pub email: Option<String>,

    #[validate(custom(function = "validate_handicap"))]
    #[schema(value_type = Option<f64>)]
    pub handicap: Option<Decimal>,

    #[validate(length(max = 255))]
    pub profile_secret: Option<String>,

    pub is_admin: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct PlayersByIdsRequest {
    #[validate(length(max = 200))]
    pub ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ClaimProfileRequest {
    #[validate(length(min = 1, max = 255, message = "Please enter your profile secret"))]
    pub secret: String,
}

/// Returned after a successful claim; clients keep it as their scoring session
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClaimedProfileResponse {
    pub player: PlayerResponse,
    pub is_admin: bool,
}

fn validate_handicap(handicap: &Decimal) -> Result<(), validator::ValidationError> {
    if (Decimal::from(-10)..=Decimal::from(54)).contains(handicap) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_handicap"))
    }
}

impl From<Player> for PlayerResponse {
    fn from(player: Player) -> Self {
        let initials = player.initials();
        let has_profile_secret = player.has_profile_secret();

        Self {
            player_id: player.player_id,
            first_name: player.first_name,
            last_name: player.last_name,
            initials,
            phone: player.phone,
            email: player.email,
            handicap: player.handicap,
            is_admin: player.is_admin,
            has_profile_secret,
            created_at: player.created_at,
            updated_at: player.updated_at,
        }
    }
}
