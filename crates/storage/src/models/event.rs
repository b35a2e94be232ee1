use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;

/// Par assumed for any hole the course card does not cover.
pub const DEFAULT_PAR: i32 = 4;

pub const EVENT_FORMATS: &[&str] = &["Scramble", "Best Ball", "Stroke Play", "Match Play"];

pub const EVENT_STATUSES: &[&str] = &["Upcoming", "In Progress", "Completed"];

pub const HOLE_COUNTS: &[i32] = &[9, 18];

/// Par values a single hole may carry.
pub const PAR_RANGE: std::ops::RangeInclusive<i32> = 3..=6;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Event {
    pub event_id: Uuid,
    pub name: String,
    pub event_date: NaiveDate,
    pub course_name: String,
    pub tees: Option<String>,
    pub format: Option<String>,
    pub hole_count: i32,
    #[schema(value_type = Vec<i32>)]
    pub par_per_hole: Json<Vec<i32>>,
    pub is_locked: bool,
    pub share_code: String,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Event {
    pub fn pars(&self) -> &[i32] {
        &self.par_per_hole.0
    }

    /// Par for a 1-based hole number.
    pub fn par_for_hole(&self, hole_number: i32) -> i32 {
        usize::try_from(hole_number - 1)
            .ok()
            .and_then(|idx| self.pars().get(idx).copied())
            .unwrap_or(DEFAULT_PAR)
    }

    pub fn contains_hole(&self, hole_number: i32) -> bool {
        (1..=self.hole_count).contains(&hole_number)
    }
}

/// Fits a par card to the event's hole count: entries past the last hole are
/// dropped, missing holes and entries outside [`PAR_RANGE`] become [`DEFAULT_PAR`].
pub fn normalize_par(par: &[i32], hole_count: i32) -> Vec<i32> {
    let holes = usize::try_from(hole_count).unwrap_or(0);

    (0..holes)
        .map(|idx| match par.get(idx) {
            Some(&p) if PAR_RANGE.contains(&p) => p,
            _ => DEFAULT_PAR,
        })
        .collect()
}

/// Six upper-case hex characters, e.g. "3F9A0C".
pub fn generate_share_code() -> String {
    Uuid::new_v4().simple().to_string()[..6].to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_par_pads_with_default() {
        let par = normalize_par(&[3, 5], 9);
        assert_eq!(par, vec![3, 5, 4, 4, 4, 4, 4, 4, 4]);
    }

    #[test]
    fn test_normalize_par_truncates_extra_holes() {
        let card: Vec<i32> = (0..18).map(|i| if i % 2 == 0 { 4 } else { 5 }).collect();
        let par = normalize_par(&card, 9);
        assert_eq!(par.len(), 9);
        assert_eq!(par, card[..9].to_vec());
    }

    #[test]
    fn test_normalize_par_replaces_out_of_range_entries() {
        let par = normalize_par(&[0, -3, 5], 3);
        assert_eq!(par, vec![4, 4, 5]);

        let par = normalize_par(&[i32::MAX, 7, 2, 3, 6], 9);
        assert_eq!(par, vec![4, 4, 4, 3, 6, 4, 4, 4, 4]);
        assert_eq!(par.iter().sum::<i32>(), 37);
    }

    #[test]
    fn test_generate_share_code_shape() {
        let code = generate_share_code();
        assert_eq!(code.len(), 6);
        assert!(
            code.chars()
                .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
        );
    }

    #[test]
    fn test_normalize_par_from_empty_card() {
        assert_eq!(normalize_par(&[], 18), vec![DEFAULT_PAR; 18]);
        assert!(normalize_par(&[4, 4], 0).is_empty());
    }
}
