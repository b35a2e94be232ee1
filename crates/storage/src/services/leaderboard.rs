use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::dto::leaderboard::{LeaderboardEntry, LeaderboardResponse, ScoreMode};
use crate::error::Result;
use crate::models::{Event, Player, Score, Team};
use crate::services::aggregation::aggregate_team;
use crate::services::handicap::{handicap_allowance, round_tenth, team_handicaps};
use crate::store::TournamentStore;

fn build_entry(
    event: &Event,
    team: &Team,
    scores: &[Score],
    roster: &HashMap<Uuid, &Player>,
) -> LeaderboardEntry {
    let aggregate = aggregate_team(team.team_id, scores, event.pars(), event.hole_count);
    let total = aggregate.total();
    let score_to_par = aggregate.score_to_par();

    let allowance = handicap_allowance(&team_handicaps(team, roster));
    let net_to_par = round_tenth(Decimal::from(score_to_par) - allowance);

    let members = team
        .players
        .player_ids()
        .filter_map(|id| roster.get(&id))
        .map(|player| player.initials())
        .filter(|initials| !initials.is_empty())
        .collect();

    LeaderboardEntry {
        rank: 0,
        team_id: team.team_id,
        team_name: team.team_name.clone(),
        members,
        front_strokes: aggregate.front.strokes,
        back_strokes: aggregate.back.strokes,
        total_strokes: total.strokes,
        front_par: aggregate.front.par,
        back_par: aggregate.back.par,
        total_par: total.par,
        front_to_par: aggregate.front.to_par(),
        back_to_par: aggregate.back.to_par(),
        score_to_par,
        handicap_allowance: allowance,
        net_to_par,
        last_three_strokes: aggregate.last_three_strokes,
        holes_completed: aggregate.holes_completed,
    }
}

/// Countback order: score for the mode, then back-nine strokes, then the last
/// three holes, then team name. Team id settles identical names.
///
/// The back-nine and last-three countbacks use raw strokes in both modes.
pub fn compare_entries(a: &LeaderboardEntry, b: &LeaderboardEntry, mode: ScoreMode) -> Ordering {
    a.score_for(mode)
        .cmp(&b.score_for(mode))
        .then_with(|| a.back_strokes.cmp(&b.back_strokes))
        .then_with(|| a.last_three_strokes.cmp(&b.last_three_strokes))
        .then_with(|| a.team_name.cmp(&b.team_name))
        .then_with(|| a.team_id.cmp(&b.team_id))
}

/// Ranks every team of an event from a snapshot of its scores.
///
/// Stateless: the same snapshot always yields the same board, and nothing is
/// carried over between calls.
pub fn rank_teams(
    event: &Event,
    teams: &[Team],
    scores: &[Score],
    players: &[Player],
    mode: ScoreMode,
) -> Vec<LeaderboardEntry> {
    let roster: HashMap<Uuid, &Player> = players.iter().map(|p| (p.player_id, p)).collect();

    let mut entries: Vec<LeaderboardEntry> = teams
        .iter()
        .map(|team| build_entry(event, team, scores, &roster))
        .collect();

    entries.sort_by(|a, b| compare_entries(a, b, mode));

    for (idx, entry) in entries.iter_mut().enumerate() {
        entry.rank = idx as u32 + 1;
    }

    entries
}

/// Loads a fresh snapshot for the event through `store` and ranks it.
pub async fn load_leaderboard<S>(
    store: &S,
    event_id: Uuid,
    mode: ScoreMode,
) -> Result<LeaderboardResponse>
where
    S: TournamentStore + ?Sized,
{
    let event = store.get_event(event_id).await?;
    let teams = store.list_teams(event_id).await?;
    let scores = store.list_scores(event_id).await?;

    let player_ids: Vec<Uuid> = teams
        .iter()
        .flat_map(|team| team.players.player_ids())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let players = if player_ids.is_empty() {
        Vec::new()
    } else {
        store.get_players_by_ids(&player_ids).await?
    };

    tracing::debug!(
        event_id = %event_id,
        teams = teams.len(),
        scores = scores.len(),
        players = players.len(),
        ?mode,
        "Ranking leaderboard snapshot"
    );

    let entries = rank_teams(&event, &teams, &scores, &players, mode);

    Ok(LeaderboardResponse {
        event_id: event.event_id,
        event_name: event.name,
        hole_count: event.hole_count,
        mode,
        entries,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use sqlx::types::Json;

    use super::*;
    use crate::error::StorageError;
    use crate::models::TeamPlayers;

    fn timestamp() -> chrono::NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn event(pars: Vec<i32>) -> Event {
        Event {
            event_id: Uuid::new_v4(),
            name: "Member Guest".to_string(),
            event_date: timestamp().date(),
            course_name: "Oak Hollow".to_string(),
            tees: None,
            format: Some("Scramble".to_string()),
            hole_count: pars.len() as i32,
            par_per_hole: Json(pars),
            is_locked: false,
            share_code: "ABC123".to_string(),
            status: "In Progress".to_string(),
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    fn player(first: &str, last: &str, handicap: Option<Decimal>) -> Player {
        Player {
            player_id: Uuid::new_v4(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            phone: None,
            email: None,
            handicap,
            profile_secret: None,
            is_admin: false,
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    fn team(event: &Event, name: &str, members: &[&Player]) -> Team {
        let mut slots = members.iter().map(|p| Some(p.player_id));
        Team {
            team_id: Uuid::new_v4(),
            event_id: event.event_id,
            team_name: name.to_string(),
            players: TeamPlayers {
                player1: slots.next().flatten(),
                player2: slots.next().flatten(),
                player3: slots.next().flatten(),
                player4: slots.next().flatten(),
            },
            starting_hole: None,
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    fn round(event: &Event, team: &Team, strokes: &[i32]) -> Vec<Score> {
        strokes
            .iter()
            .enumerate()
            .map(|(idx, &s)| Score {
                score_id: Uuid::new_v4(),
                event_id: event.event_id,
                player_id: None,
                team_id: Some(team.team_id),
                hole_number: idx as i32 + 1,
                strokes: Some(s),
                created_at: timestamp(),
                updated_at: timestamp(),
            })
            .collect()
    }

    /// 18 holes at par 4 with `over` extra strokes spread from hole 1.
    fn strokes_over_par(over: usize) -> Vec<i32> {
        (0..18).map(|idx| if idx < over { 5 } else { 4 }).collect()
    }

    fn names(entries: &[LeaderboardEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.team_name.as_str()).collect()
    }

    #[test]
    fn test_net_mode_applies_allowance() {
        let ev = event(vec![4; 18]);
        let p1 = player("Ann", "Lee", Some(Decimal::from(10)));
        let p2 = player("Bob", "Ray", Some(Decimal::from(20)));
        let team_a = team(&ev, "Team A", &[&p1, &p2]);
        let team_b = team(&ev, "Team B", &[]);

        let mut scores = round(&ev, &team_a, &strokes_over_par(5));
        scores.extend(round(&ev, &team_b, &strokes_over_par(0)));

        let board = rank_teams(&ev, &[team_b, team_a], &scores, &[p1, p2], ScoreMode::Net);

        assert_eq!(names(&board), vec!["Team A", "Team B"]);
        assert_eq!(board[0].rank, 1);
        assert_eq!(board[0].score_to_par, 5);
        assert_eq!(board[0].handicap_allowance, Decimal::new(65, 1));
        assert_eq!(board[0].net_to_par, Decimal::new(-15, 1));
        assert_eq!(board[0].members, vec!["AL".to_string(), "BR".to_string()]);
        assert_eq!(board[1].rank, 2);
        assert_eq!(board[1].net_to_par, Decimal::ZERO);
    }

    #[test]
    fn test_actual_mode_ignores_allowance() {
        let ev = event(vec![4; 18]);
        let p1 = player("Ann", "Lee", Some(Decimal::from(10)));
        let p2 = player("Bob", "Ray", Some(Decimal::from(20)));
        let team_a = team(&ev, "Team A", &[&p1, &p2]);
        let team_b = team(&ev, "Team B", &[]);

        let mut scores = round(&ev, &team_a, &strokes_over_par(5));
        scores.extend(round(&ev, &team_b, &strokes_over_par(0)));

        let board = rank_teams(&ev, &[team_a, team_b], &scores, &[p1, p2], ScoreMode::Actual);

        assert_eq!(names(&board), vec!["Team B", "Team A"]);
    }

    #[test]
    fn test_back_nine_countback() {
        let ev = event(vec![4; 18]);
        let front_heavy = team(&ev, "Alpha", &[]);
        let back_heavy = team(&ev, "Bravo", &[]);

        // Both +1: Alpha drops the shot on hole 1, Bravo on hole 12.
        let mut alpha = vec![4; 18];
        alpha[0] = 5;
        let mut bravo = vec![4; 18];
        bravo[11] = 5;

        let mut scores = round(&ev, &front_heavy, &alpha);
        scores.extend(round(&ev, &back_heavy, &bravo));

        let board = rank_teams(
            &ev,
            &[back_heavy, front_heavy],
            &scores,
            &[],
            ScoreMode::Actual,
        );

        assert_eq!(names(&board), vec!["Alpha", "Bravo"]);
        assert_eq!(board[0].back_strokes, 36);
        assert_eq!(board[1].back_strokes, 37);
    }

    #[test]
    fn test_last_three_countback() {
        let ev = event(vec![4; 18]);
        let early = team(&ev, "Yankee", &[]);
        let late = team(&ev, "Xray", &[]);

        // Same total and back nine; Xray's bogey comes on hole 17.
        let mut yankee = vec![4; 18];
        yankee[10] = 5;
        yankee[11] = 3;
        let mut xray = vec![4; 18];
        xray[16] = 5;
        xray[11] = 3;

        let mut scores = round(&ev, &early, &yankee);
        scores.extend(round(&ev, &late, &xray));

        let board = rank_teams(&ev, &[late, early], &scores, &[], ScoreMode::Actual);

        assert_eq!(names(&board), vec!["Yankee", "Xray"]);
        assert_eq!(board[0].last_three_strokes, 12);
        assert_eq!(board[1].last_three_strokes, 13);
    }

    #[test]
    fn test_back_nine_countback_uses_raw_strokes_in_net_mode() {
        let ev = event(vec![4; 18]);
        let cal = player("Cal", "Moe", Some(Decimal::from(8)));
        let dee = player("Dee", "Kay", Some(Decimal::from(8)));
        let gross_front = team(&ev, "Front", &[&cal]);
        let gross_back = team(&ev, "Back", &[&dee]);

        let mut front = vec![4; 18];
        front[2] = 6;
        let mut back = vec![4; 18];
        back[14] = 6;

        let mut scores = round(&ev, &gross_front, &front);
        scores.extend(round(&ev, &gross_back, &back));

        let board = rank_teams(
            &ev,
            &[gross_back, gross_front],
            &scores,
            &[cal, dee],
            ScoreMode::Net,
        );

        assert_eq!(board[0].net_to_par, board[1].net_to_par);
        assert_eq!(names(&board), vec!["Front", "Back"]);
    }

    #[test]
    fn test_full_tie_falls_back_to_team_name() {
        let ev = event(vec![4; 18]);
        let teams: Vec<Team> = ["Sharks", "Eagles", "Pumas"]
            .iter()
            .map(|name| team(&ev, name, &[]))
            .collect();
        let scores: Vec<Score> = teams
            .iter()
            .flat_map(|t| round(&ev, t, &strokes_over_par(2)))
            .collect();

        let board = rank_teams(&ev, &teams, &scores, &[], ScoreMode::Actual);
        assert_eq!(names(&board), vec!["Eagles", "Pumas", "Sharks"]);

        let mut reversed = teams.clone();
        reversed.reverse();
        let again = rank_teams(&ev, &reversed, &scores, &[], ScoreMode::Actual);
        assert_eq!(board, again);
    }

    #[test]
    fn test_same_name_is_still_deterministic() {
        let ev = event(vec![4; 9]);
        let first = team(&ev, "Twins", &[]);
        let second = team(&ev, "Twins", &[]);
        let expected_first = first.team_id.min(second.team_id);

        let board = rank_teams(
            &ev,
            &[first.clone(), second.clone()],
            &[],
            &[],
            ScoreMode::Actual,
        );
        let swapped = rank_teams(&ev, &[second, first], &[], &[], ScoreMode::Actual);

        assert_eq!(board[0].team_id, expected_first);
        assert_eq!(board, swapped);
    }

    #[test]
    fn test_ranking_is_idempotent() {
        let ev = event(vec![4; 18]);
        let p = player("Eve", "Ng", Some(Decimal::new(143, 1)));
        let teams = vec![
            team(&ev, "One", &[&p]),
            team(&ev, "Two", &[]),
            team(&ev, "Three", &[]),
        ];
        let mut scores = round(&ev, &teams[0], &[5, 4, 4]);
        scores.extend(round(&ev, &teams[1], &[3, 4]));

        let players = vec![p];
        let first = rank_teams(&ev, &teams, &scores, &players, ScoreMode::Net);
        let second = rank_teams(&ev, &teams, &scores, &players, ScoreMode::Net);

        assert_eq!(first, second);
        let ranks: Vec<u32> = first.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn test_team_without_scores_is_all_zero() {
        let ev = event(vec![4; 18]);
        let idle = team(&ev, "Idle", &[]);

        let board = rank_teams(&ev, &[idle], &[], &[], ScoreMode::Actual);
        let entry = &board[0];

        assert_eq!(entry.total_strokes, 0);
        assert_eq!(entry.total_par, 0);
        assert_eq!(entry.score_to_par, 0);
        assert_eq!(entry.holes_completed, 0);
        assert_eq!(entry.handicap_allowance, Decimal::ZERO);
        assert_eq!(entry.net_to_par, Decimal::ZERO);
    }

    struct MemoryStore {
        event: Event,
        teams: Vec<Team>,
        scores: Vec<Score>,
        players: Vec<Player>,
        player_lookups: Mutex<Vec<Vec<Uuid>>>,
    }

    #[async_trait]
    impl TournamentStore for MemoryStore {
        async fn get_event(&self, event_id: Uuid) -> Result<Event> {
            if event_id == self.event.event_id {
                Ok(self.event.clone())
            } else {
                Err(StorageError::NotFound)
            }
        }

        async fn list_teams(&self, event_id: Uuid) -> Result<Vec<Team>> {
            Ok(self
                .teams
                .iter()
                .filter(|t| t.event_id == event_id)
                .cloned()
                .collect())
        }

        async fn list_scores(&self, event_id: Uuid) -> Result<Vec<Score>> {
            Ok(self
                .scores
                .iter()
                .filter(|s| s.event_id == event_id)
                .cloned()
                .collect())
        }

        async fn get_players_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Player>> {
            self.player_lookups.lock().unwrap().push(ids.to_vec());
            Ok(self
                .players
                .iter()
                .filter(|p| ids.contains(&p.player_id))
                .cloned()
                .collect())
        }
    }

    #[tokio::test]
    async fn test_load_leaderboard_through_store() {
        let ev = event(vec![4, 4, 3, 5, 4, 4, 3, 5, 4]);
        let shared = player("Fay", "Orr", Some(Decimal::from(12)));
        let teams = vec![
            team(&ev, "Team X", &[&shared]),
            team(&ev, "Team Y", &[&shared]),
        ];
        let mut scores = round(&ev, &teams[0], &[4, 5, 3]);
        scores.extend(round(&ev, &teams[1], &[4, 4, 3]));

        let store = MemoryStore {
            event: ev.clone(),
            teams,
            scores,
            players: vec![shared.clone()],
            player_lookups: Mutex::new(Vec::new()),
        };

        let board = load_leaderboard(&store, ev.event_id, ScoreMode::Actual)
            .await
            .unwrap();

        assert_eq!(board.event_name, "Member Guest");
        assert_eq!(board.hole_count, 9);
        assert_eq!(names(&board.entries), vec!["Team Y", "Team X"]);

        let x = &board.entries[1];
        assert_eq!(x.front_strokes, 12);
        assert_eq!(x.front_par, 11);
        assert_eq!(x.score_to_par, 1);
        assert_eq!(x.holes_completed, 3);
        assert_eq!(x.back_strokes, 0);
        assert_eq!(x.back_par, 0);

        let lookups = store.player_lookups.lock().unwrap();
        assert_eq!(lookups.as_slice(), &[vec![shared.player_id]]);
    }

    #[tokio::test]
    async fn test_load_leaderboard_skips_player_lookup_for_empty_rosters() {
        let ev = event(vec![4; 9]);
        let store = MemoryStore {
            event: ev.clone(),
            teams: vec![team(&ev, "Solo", &[])],
            scores: Vec::new(),
            players: Vec::new(),
            player_lookups: Mutex::new(Vec::new()),
        };

        let board = load_leaderboard(&store, ev.event_id, ScoreMode::Net)
            .await
            .unwrap();

        assert_eq!(board.entries.len(), 1);
        assert!(store.player_lookups.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_leaderboard_unknown_event() {
        let ev = event(vec![4; 9]);
        let store = MemoryStore {
            event: ev,
            teams: Vec::new(),
            scores: Vec::new(),
            players: Vec::new(),
            player_lookups: Mutex::new(Vec::new()),
        };

        let result = load_leaderboard(&store, Uuid::new_v4(), ScoreMode::Actual).await;
        assert!(matches!(result, Err(StorageError::NotFound)));
    }
}
