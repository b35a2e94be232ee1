use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

use crate::models::{Player, Team};

/// Allowance weights in hundredths, lowest handicap first, by team size.
fn weights(slot_count: usize) -> &'static [i64] {
    match slot_count {
        0 => &[],
        1 => &[75],
        2 => &[35, 15],
        3 => &[25, 15, 10],
        _ => &[20, 15, 10, 5],
    }
}

/// Rounds to one decimal place, halves away from zero.
pub fn round_tenth(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// Stroke allowance for a team from its members' handicaps.
///
/// The handicaps are weighted lowest first; only the four lowest count for
/// teams of four or more. An empty team gets no allowance.
pub fn handicap_allowance(handicaps: &[Decimal]) -> Decimal {
    let mut sorted = handicaps.to_vec();
    sorted.sort();

    let allowance: Decimal = sorted
        .iter()
        .zip(weights(sorted.len()))
        .map(|(&handicap, &weight)| handicap * Decimal::new(weight, 2))
        .sum();

    round_tenth(allowance)
}

/// Handicaps of a team's filled slots, sorted ascending. A player missing
/// from `roster` or without a handicap counts as 0.
pub fn team_handicaps(team: &Team, roster: &HashMap<Uuid, &Player>) -> Vec<Decimal> {
    let mut handicaps: Vec<Decimal> = team
        .players
        .player_ids()
        .map(|id| {
            roster
                .get(&id)
                .and_then(|player| player.handicap)
                .unwrap_or(Decimal::ZERO)
        })
        .collect();

    handicaps.sort();
    handicaps
}
