use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{EVENT_FORMATS, EVENT_STATUSES, Event, HOLE_COUNTS, PAR_RANGE};

/// Request payload for creating a new event
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateEventRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    pub event_date: NaiveDate,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Course name must be between 1 and 255 characters"
    ))]
    pub course_name: String,

    #[validate(length(max = 100))]
    pub tees: Option<String>,

    #[validate(custom(function = "validate_format"))]
    pub format: Option<String>,

    #[serde(default = "default_hole_count")]
    pub hole_count: i32,

    /// Normalized to `hole_count` entries; missing holes default to par 4
    #[validate(custom(function = "validate_par_card"))]
    pub par_per_hole: Option<Vec<i32>>,

    #[serde(default)]
    pub is_locked: bool,

    /// Generated when omitted
    #[validate(length(min = 4, max = 32))]
    #[validate(custom(function = "validate_share_code"))]
    pub share_code: Option<String>,

    #[validate(custom(function = "validate_status"))]
    #[serde(default = "default_status")]
    pub status: String,
}

/// Request payload for a partial event update
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    pub event_date: Option<NaiveDate>,

    #[validate(length(min = 1, max = 255))]
    pub course_name: Option<String>,

    #[validate(length(max = 100))]
    pub tees: Option<String>,

    #[validate(custom(function = "validate_format"))]
    pub format: Option<String>,

    pub hole_count: Option<i32>,

    #[validate(custom(function = "validate_par_card"))]
    pub par_per_hole: Option<Vec<i32>>,

    pub is_locked: Option<bool>,

    #[validate(length(min = 4, max = 32))]
    #[validate(custom(function = "validate_share_code"))]
    pub share_code: Option<String>,

    #[validate(custom(function = "validate_status"))]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventResponse {
    pub event_id: Uuid,
    pub name: String,
    pub event_date: NaiveDate,
    pub course_name: String,
    pub tees: Option<String>,
    pub format: Option<String>,
    pub hole_count: i32,
    pub par_per_hole: Vec<i32>,
    pub total_par: i32,
    pub is_locked: bool,
    pub share_code: String,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

fn default_hole_count() -> i32 {
    18
}

fn default_status() -> String {
    "Upcoming".to_string()
}

fn validate_format(format: &str) -> Result<(), validator::ValidationError> {
    if EVENT_FORMATS.contains(&format) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_format"))
    }
}

fn validate_status(status: &str) -> Result<(), validator::ValidationError> {
    if EVENT_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_status"))
    }
}

fn validate_par_card(par: &[i32]) -> Result<(), validator::ValidationError> {
    if par.len() <= 18 && par.iter().all(|p| PAR_RANGE.contains(p)) {
        return Ok(());
    }

    let mut error = validator::ValidationError::new("invalid_par");
    error.message = Some("Each hole's par must be between 3 and 6".into());
    Err(error)
}

fn validate_share_code(code: &str) -> Result<(), validator::ValidationError> {
    if code.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_share_code"))
    }
}

fn check_hole_count(hole_count: i32) -> Result<(), &'static str> {
    if HOLE_COUNTS.contains(&hole_count) {
        Ok(())
    } else {
        Err("Hole count must be 9 or 18")
    }
}

impl CreateEventRequest {
    /// Checks that need more than a single field attribute
    pub fn validate_holes(&self) -> Result<(), &'static str> {
        check_hole_count(self.hole_count)
    }
}

impl UpdateEventRequest {
    pub fn validate_holes(&self) -> Result<(), &'static str> {
        match self.hole_count {
            Some(hole_count) => check_hole_count(hole_count),
            None => Ok(()),
        }
    }
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        let total_par = event.pars().iter().sum();

        Self {
            event_id: event.event_id,
            name: event.name,
            event_date: event.event_date,
            course_name: event.course_name,
            tees: event.tees,
            format: event.format,
            hole_count: event.hole_count,
            par_per_hole: event.par_per_hole.0,
            total_par,
            is_locked: event.is_locked,
            share_code: event.share_code,
            status: event.status,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}
