use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::player::{CreatePlayerRequest, UpdatePlayerRequest};
use crate::error::{Result, StorageError};
use crate::models::Player;

pub struct PlayerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PlayerRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Player>> {
        let players = sqlx::query_as::<_, Player>(
            r#"
            SELECT player_id, first_name, last_name, phone, email, handicap,
                   profile_secret, is_admin, created_at, updated_at
            FROM players
            ORDER BY last_name, first_name
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(players)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Player> {
        let player = sqlx::query_as::<_, Player>(
            r#"
            SELECT player_id, first_name, last_name, phone, email, handicap,
                   profile_secret, is_admin, created_at, updated_at
            FROM players
            WHERE player_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(player)
    }

    /// Bulk lookup; unknown ids are silently skipped.
    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Player>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let players = sqlx::query_as::<_, Player>(
            r#"
            SELECT player_id, first_name, last_name, phone, email, handicap,
                   profile_secret, is_admin, created_at, updated_at
            FROM players
            WHERE player_id = ANY($1)
            ORDER BY last_name, first_name
            "#,
        )
        .bind(ids)
        .fetch_all(self.pool)
        .await?;

        Ok(players)
    }

    pub async fn create(&self, req: &CreatePlayerRequest) -> Result<Player> {
        let player = sqlx::query_as::<_, Player>(
            r#"
            INSERT INTO players (
                first_name, last_name, phone, email, handicap, profile_secret, is_admin
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING player_id, first_name, last_name, phone, email, handicap,
                      profile_secret, is_admin, created_at, updated_at
            "#,
        )
        .bind(req.first_name.trim())
        .bind(req.last_name.trim())
        .bind(&req.phone)
        .bind(&req.email)
        .bind(req.handicap)
        .bind(blank_to_none(req.profile_secret.as_deref()))
        .bind(req.is_admin)
        .fetch_one(self.pool)
        .await?;

        Ok(player)
    }

    pub async fn update(
        &self,
        id: Uuid,
        existing: &Player,
        req: &UpdatePlayerRequest,
    ) -> Result<Player> {
        let first_name = req
            .first_name
            .as_deref()
            .map(str::trim)
            .unwrap_or(&existing.first_name);
        let last_name = req
            .last_name
            .as_deref()
            .map(str::trim)
            .unwrap_or(&existing.last_name);
        let phone = req.phone.as_ref().or(existing.phone.as_ref());
        let email = req.email.as_ref().or(existing.email.as_ref());
        let handicap = req.handicap.or(existing.handicap);
        // An empty secret clears it
        let profile_secret = match req.profile_secret.as_deref() {
            Some(secret) => blank_to_none(Some(secret)),
            None => existing.profile_secret.clone(),
        };
        let is_admin = req.is_admin.unwrap_or(existing.is_admin);

        let player = sqlx::query_as::<_, Player>(
            r#"
            UPDATE players
            SET
                first_name = $2,
                last_name = $3,
                phone = $4,
                email = $5,
                handicap = $6,
                profile_secret = $7,
                is_admin = $8,
                updated_at = NOW()
            WHERE player_id = $1
            RETURNING player_id, first_name, last_name, phone, email, handicap,
                      profile_secret, is_admin, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(first_name)
        .bind(last_name)
        .bind(phone)
        .bind(email)
        .bind(handicap)
        .bind(profile_secret)
        .bind(is_admin)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(player)
    }

    /// Delete a player. Fails while the player is still referenced by a team
    /// or a score.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM players WHERE player_id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| {
                let error = StorageError::from(e);
                if error.is_foreign_key_violation() {
                    return StorageError::ConstraintViolation(
                        "Cannot delete player - they are part of existing teams or scores. \
                         Remove them from teams first."
                            .to_string(),
                    );
                }
                error
            })?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

fn blank_to_none(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
