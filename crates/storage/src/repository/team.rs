use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::team::{CreateTeamRequest, UpdateTeamRequest};
use crate::error::{Result, StorageError};
use crate::models::Team;

pub struct TeamRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TeamRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Teams of one event, alphabetical
    pub async fn list_by_event(&self, event_id: Uuid) -> Result<Vec<Team>> {
        let teams = sqlx::query_as::<_, Team>(
            r#"
            SELECT team_id, event_id, team_name, player1, player2, player3, player4,
                   starting_hole, created_at, updated_at
            FROM teams
            WHERE event_id = $1
            ORDER BY team_name, team_id
            "#,
        )
        .bind(event_id)
        .fetch_all(self.pool)
        .await?;

        Ok(teams)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Team> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            SELECT team_id, event_id, team_name, player1, player2, player3, player4,
                   starting_hole, created_at, updated_at
            FROM teams
            WHERE team_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(team)
    }

    pub async fn create(&self, req: &CreateTeamRequest) -> Result<Team> {
        let players = req.players;

        let team = sqlx::query_as::<_, Team>(
            r#"
            INSERT INTO teams (
                event_id, team_name, player1, player2, player3, player4, starting_hole
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING team_id, event_id, team_name, player1, player2, player3, player4,
                      starting_hole, created_at, updated_at
            "#,
        )
        .bind(req.event_id)
        .bind(req.team_name.trim())
        .bind(players.player1)
        .bind(players.player2)
        .bind(players.player3)
        .bind(players.player4)
        .bind(req.starting_hole)
        .fetch_one(self.pool)
        .await
        .map_err(map_unknown_reference)?;

        Ok(team)
    }

    pub async fn update(&self, id: Uuid, existing: &Team, req: &UpdateTeamRequest) -> Result<Team> {
        let team_name = req
            .team_name
            .as_deref()
            .map(str::trim)
            .unwrap_or(&existing.team_name);
        let players = req.players.unwrap_or(existing.players);
        let starting_hole = req.starting_hole.or(existing.starting_hole);

        let team = sqlx::query_as::<_, Team>(
            r#"
            UPDATE teams
            SET
                team_name = $2,
                player1 = $3,
                player2 = $4,
                player3 = $5,
                player4 = $6,
                starting_hole = $7,
                updated_at = NOW()
            WHERE team_id = $1
            RETURNING team_id, event_id, team_name, player1, player2, player3, player4,
                      starting_hole, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(team_name)
        .bind(players.player1)
        .bind(players.player2)
        .bind(players.player3)
        .bind(players.player4)
        .bind(starting_hole)
        .fetch_optional(self.pool)
        .await
        .map_err(map_unknown_reference)?
        .ok_or(StorageError::NotFound)?;

        Ok(team)
    }

    /// Delete a team and its scores.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM teams WHERE team_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

fn map_unknown_reference(e: sqlx::Error) -> StorageError {
    let error = StorageError::from(e);
    if error.is_foreign_key_violation() {
        return StorageError::ConstraintViolation(
            "Team references an unknown event or player".to_string(),
        );
    }
    error
}
