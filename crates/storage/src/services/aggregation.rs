use std::collections::BTreeMap;
use std::ops::Add;

use uuid::Uuid;

use crate::models::{DEFAULT_PAR, Score};

/// Last hole of the front nine.
pub const FRONT_NINE: i32 = 9;

/// Hole count of a round that has a back nine.
pub const FULL_ROUND: i32 = 18;

/// Strokes and par summed over the played holes of one segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentTotals {
    pub strokes: i32,
    pub par: i32,
}

impl SegmentTotals {
    fn record(&mut self, strokes: i32, par: i32) {
        self.strokes += strokes;
        self.par += par;
    }

    /// Strokes relative to par; 0 when nothing in the segment was played.
    pub fn to_par(&self) -> i32 {
        if self.par > 0 {
            self.strokes - self.par
        } else {
            0
        }
    }
}

impl Add for SegmentTotals {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            strokes: self.strokes + other.strokes,
            par: self.par + other.par,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeamAggregate {
    pub front: SegmentTotals,
    pub back: SegmentTotals,
    pub holes_completed: u32,
    /// Raw strokes over the final three holes of the round, unplayed holes as 0
    pub last_three_strokes: i32,
}

impl TeamAggregate {
    pub fn total(&self) -> SegmentTotals {
        self.front + self.back
    }

    pub fn score_to_par(&self) -> i32 {
        self.total().to_par()
    }
}

/// Recorded strokes per hole for a team. Player-mode rows, unplayed holes and
/// holes outside the round are skipped; the first row wins for a hole.
pub fn strokes_by_hole(team_id: Uuid, scores: &[Score], hole_count: i32) -> BTreeMap<i32, i32> {
    let mut by_hole = BTreeMap::new();

    for score in scores.iter().filter(|s| s.team_id == Some(team_id)) {
        let Some(strokes) = score.strokes else {
            continue;
        };

        if (1..=hole_count).contains(&score.hole_number) {
            by_hole.entry(score.hole_number).or_insert(strokes);
        }
    }

    by_hole
}

fn par_at(pars: &[i32], hole_number: i32) -> i32 {
    usize::try_from(hole_number - 1)
        .ok()
        .and_then(|idx| pars.get(idx).copied())
        .unwrap_or(DEFAULT_PAR)
}

/// Front/back/total figures for one team.
///
/// Only played holes add to both the stroke and the par sums, so a round in
/// progress is measured against the par of the holes actually completed.
pub fn aggregate_team(
    team_id: Uuid,
    scores: &[Score],
    pars: &[i32],
    hole_count: i32,
) -> TeamAggregate {
    let by_hole = strokes_by_hole(team_id, scores, hole_count);
    let mut aggregate = TeamAggregate::default();

    for (&hole, &strokes) in &by_hole {
        let par = par_at(pars, hole);

        if hole <= FRONT_NINE {
            aggregate.front.record(strokes, par);
        } else if hole_count == FULL_ROUND {
            aggregate.back.record(strokes, par);
        }
    }

    aggregate.holes_completed = by_hole.len() as u32;

    if hole_count >= 3 {
        aggregate.last_three_strokes = (hole_count - 2..=hole_count)
            .filter_map(|hole| by_hole.get(&hole))
            .sum();
    }

    aggregate
}
