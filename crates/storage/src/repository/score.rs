use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::score::ScoreTarget;
use crate::error::{Result, StorageError};
use crate::models::Score;

pub struct ScoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ScoreRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All score rows of an event, optionally narrowed to one team
    pub async fn list_by_event(&self, event_id: Uuid, team_id: Option<Uuid>) -> Result<Vec<Score>> {
        let mut query = QueryBuilder::<Postgres>::new(
            r#"
            SELECT score_id, event_id, player_id, team_id, hole_number, strokes,
                   created_at, updated_at
            FROM scores
            WHERE event_id = "#,
        );
        query.push_bind(event_id);

        if let Some(team_id) = team_id {
            query.push(" AND team_id = ").push_bind(team_id);
        }

        query.push(" ORDER BY hole_number, created_at");

        let scores = query
            .build_query_as::<Score>()
            .fetch_all(self.pool)
            .await?;

        Ok(scores)
    }

    /// Insert or overwrite the strokes for one hole. There is at most one row
    /// per (event, team, hole) in team mode and per (event, player, hole) in
    /// player mode.
    pub async fn upsert(
        &self,
        event_id: Uuid,
        target: ScoreTarget,
        hole_number: i32,
        strokes: i32,
    ) -> Result<Score> {
        let query = match target {
            ScoreTarget::Team(_) => {
                r#"
                INSERT INTO scores (event_id, team_id, player_id, hole_number, strokes)
                VALUES ($1, $2, NULL, $3, $4)
                ON CONFLICT (event_id, team_id, hole_number) WHERE player_id IS NULL
                DO UPDATE SET strokes = EXCLUDED.strokes, updated_at = NOW()
                RETURNING score_id, event_id, player_id, team_id, hole_number, strokes,
                          created_at, updated_at
                "#
            }
            ScoreTarget::Player(_) => {
                r#"
                INSERT INTO scores (event_id, player_id, team_id, hole_number, strokes)
                VALUES ($1, $2, NULL, $3, $4)
                ON CONFLICT (event_id, player_id, hole_number) WHERE player_id IS NOT NULL
                DO UPDATE SET strokes = EXCLUDED.strokes, updated_at = NOW()
                RETURNING score_id, event_id, player_id, team_id, hole_number, strokes,
                          created_at, updated_at
                "#
            }
        };

        let owner = match target {
            ScoreTarget::Team(id) | ScoreTarget::Player(id) => id,
        };

        let score = sqlx::query_as::<_, Score>(query)
            .bind(event_id)
            .bind(owner)
            .bind(hole_number)
            .bind(strokes)
            .fetch_one(self.pool)
            .await
            .map_err(map_unknown_owner)?;

        Ok(score)
    }

    /// Remove the row for one hole. Returns whether anything was deleted.
    pub async fn clear(&self, event_id: Uuid, target: ScoreTarget, hole_number: i32) -> Result<bool> {
        let mut query = QueryBuilder::<Postgres>::new("DELETE FROM scores WHERE event_id = ");
        query.push_bind(event_id);

        match target {
            ScoreTarget::Team(team_id) => {
                query
                    .push(" AND team_id = ")
                    .push_bind(team_id)
                    .push(" AND player_id IS NULL");
            }
            ScoreTarget::Player(player_id) => {
                query.push(" AND player_id = ").push_bind(player_id);
            }
        }

        query.push(" AND hole_number = ").push_bind(hole_number);

        let result = query.build().execute(self.pool).await?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_unknown_owner(e: sqlx::Error) -> StorageError {
    let error = StorageError::from(e);
    if error.is_foreign_key_violation() {
        return StorageError::ConstraintViolation(
            "Score references an unknown team or player".to_string(),
        );
    }
    error
}
