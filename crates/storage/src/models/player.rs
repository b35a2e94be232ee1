use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct Player {
    pub player_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub handicap: Option<Decimal>,
    pub profile_secret: Option<String>,
    pub is_admin: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Player {
    /// Upper-cased first letters of first and last name, e.g. "JD".
    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .next()
            .into_iter()
            .chain(self.last_name.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    pub fn has_profile_secret(&self) -> bool {
        self.profile_secret
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty())
    }
}
