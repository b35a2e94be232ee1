use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::dto::event::{CreateEventRequest, UpdateEventRequest};
use crate::error::{Result, StorageError};
use crate::models::{Event, generate_share_code, normalize_par};

/// Repository for Event database operations
pub struct EventRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EventRepository<'a> {
    /// Create a new EventRepository
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all events, most recent first
    pub async fn list(&self) -> Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT event_id, name, event_date, course_name, tees, format, hole_count,
                   par_per_hole, is_locked, share_code, status, created_at, updated_at
            FROM events
            ORDER BY event_date DESC, created_at DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(events)
    }

    /// Get an event by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            SELECT event_id, name, event_date, course_name, tees, format, hole_count,
                   par_per_hole, is_locked, share_code, status, created_at, updated_at
            FROM events
            WHERE event_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(event)
    }

    /// Get an event by its public share code, ignoring case
    pub async fn find_by_share_code(&self, code: &str) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            SELECT event_id, name, event_date, course_name, tees, format, hole_count,
                   par_per_hole, is_locked, share_code, status, created_at, updated_at
            FROM events
            WHERE UPPER(share_code) = UPPER($1)
            "#,
        )
        .bind(code.trim())
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(event)
    }

    /// Create a new event
    pub async fn create(&self, req: &CreateEventRequest) -> Result<Event> {
        let par = normalize_par(req.par_per_hole.as_deref().unwrap_or(&[]), req.hole_count);
        let share_code = req
            .share_code
            .as_deref()
            .map(|code| code.trim().to_uppercase())
            .unwrap_or_else(generate_share_code);

        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (
                name, event_date, course_name, tees, format, hole_count,
                par_per_hole, is_locked, share_code, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING event_id, name, event_date, course_name, tees, format, hole_count,
                      par_per_hole, is_locked, share_code, status, created_at, updated_at
            "#,
        )
        .bind(&req.name)
        .bind(req.event_date)
        .bind(&req.course_name)
        .bind(&req.tees)
        .bind(&req.format)
        .bind(req.hole_count)
        .bind(Json(par))
        .bind(req.is_locked)
        .bind(share_code)
        .bind(&req.status)
        .fetch_one(self.pool)
        .await
        .map_err(map_share_code_conflict)?;

        Ok(event)
    }

    /// Apply a partial update. The par card is re-fitted to the resulting
    /// hole count whenever either of them changes.
    pub async fn update(
        &self,
        id: Uuid,
        existing: &Event,
        req: &UpdateEventRequest,
    ) -> Result<Event> {
        let name = req.name.as_ref().unwrap_or(&existing.name);
        let event_date = req.event_date.unwrap_or(existing.event_date);
        let course_name = req.course_name.as_ref().unwrap_or(&existing.course_name);
        let tees = req.tees.as_ref().or(existing.tees.as_ref());
        let format = req.format.as_ref().or(existing.format.as_ref());
        let hole_count = req.hole_count.unwrap_or(existing.hole_count);
        let par_source = req.par_per_hole.as_deref().unwrap_or(existing.pars());
        let par = normalize_par(par_source, hole_count);
        let is_locked = req.is_locked.unwrap_or(existing.is_locked);
        let share_code = req
            .share_code
            .as_deref()
            .map(|code| code.trim().to_uppercase())
            .unwrap_or_else(|| existing.share_code.clone());
        let status = req.status.as_ref().unwrap_or(&existing.status);

        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET
                name = $2,
                event_date = $3,
                course_name = $4,
                tees = $5,
                format = $6,
                hole_count = $7,
                par_per_hole = $8,
                is_locked = $9,
                share_code = $10,
                status = $11,
                updated_at = NOW()
            WHERE event_id = $1
            RETURNING event_id, name, event_date, course_name, tees, format, hole_count,
                      par_per_hole, is_locked, share_code, status, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(event_date)
        .bind(course_name)
        .bind(tees)
        .bind(format)
        .bind(hole_count)
        .bind(Json(par))
        .bind(is_locked)
        .bind(share_code)
        .bind(status)
        .fetch_optional(self.pool)
        .await
        .map_err(map_share_code_conflict)?
        .ok_or(StorageError::NotFound)?;

        Ok(event)
    }

    /// Delete an event by ID. Teams and scores go with it.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM events WHERE event_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

fn map_share_code_conflict(e: sqlx::Error) -> StorageError {
    let error = StorageError::from(e);
    if error.is_unique_violation() {
        return StorageError::ConstraintViolation("Share code already exists".to_string());
    }
    error
}
