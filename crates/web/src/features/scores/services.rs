use sqlx::PgPool;
use storage::{
    dto::score::{ClearScoreRequest, ScoreTarget, UpsertScoreRequest},
    error::{Result, StorageError},
    models::{Event, Score, Team},
    repository::{EventRepository, PlayerRepository, ScoreRepository, TeamRepository},
    services::session::ScoringSession,
};
use uuid::Uuid;

use crate::error::{WebError, WebResult};

pub async fn list_scores(pool: &PgPool, event_id: Uuid, team_id: Option<Uuid>) -> Result<Vec<Score>> {
    ScoreRepository::new(pool)
        .list_by_event(event_id, team_id)
        .await
}

/// Record strokes for one hole. Omitted strokes default to the hole's par.
pub async fn upsert_score(pool: &PgPool, req: &UpsertScoreRequest) -> WebResult<Score> {
    let target = req
        .target()
        .map_err(|e| WebError::BadRequest(e.to_string()))?;

    let event = prepare_write(pool, req.event_id, target, req.hole_number, req.claimed_player_id).await?;
    let strokes = req
        .strokes
        .unwrap_or_else(|| event.par_for_hole(req.hole_number));

    let score = ScoreRepository::new(pool)
        .upsert(event.event_id, target, req.hole_number, strokes)
        .await?;

    tracing::info!(
        event_id = %event.event_id,
        ?target,
        hole = req.hole_number,
        strokes,
        scorer = %req.claimed_player_id,
        "Score saved"
    );

    Ok(score)
}

/// Remove the entry for one hole. Clearing an empty hole is not an error.
pub async fn clear_score(pool: &PgPool, req: &ClearScoreRequest) -> WebResult<()> {
    let target = req
        .target()
        .map_err(|e| WebError::BadRequest(e.to_string()))?;

    let event = prepare_write(pool, req.event_id, target, req.hole_number, req.claimed_player_id).await?;

    let removed = ScoreRepository::new(pool)
        .clear(event.event_id, target, req.hole_number)
        .await?;

    tracing::info!(
        event_id = %event.event_id,
        ?target,
        hole = req.hole_number,
        removed,
        "Score cleared"
    );

    Ok(())
}

/// Loads everything a score write depends on and checks it may go ahead.
async fn prepare_write(
    pool: &PgPool,
    event_id: Uuid,
    target: ScoreTarget,
    hole_number: i32,
    claimed_player_id: Uuid,
) -> WebResult<Event> {
    let event = EventRepository::new(pool).find_by_id(event_id).await?;

    let scorer = match PlayerRepository::new(pool).find_by_id(claimed_player_id).await {
        Ok(player) => player,
        Err(StorageError::NotFound) => {
            return Err(WebError::Forbidden(
                "Claim your player profile before entering scores".to_string(),
            ));
        }
        Err(e) => return Err(e.into()),
    };
    let session = ScoringSession::for_player(&scorer);

    let team = match target {
        ScoreTarget::Team(team_id) => match TeamRepository::new(pool).find_by_id(team_id).await {
            Ok(team) => Some(team),
            Err(StorageError::NotFound) => None,
            Err(e) => return Err(e.into()),
        },
        ScoreTarget::Player(_) => None,
    };

    authorize_write(&event, hole_number, target, team.as_ref(), &session)?;

    Ok(event)
}

/// Rules every score write must pass, checked in order: event not locked,
/// hole inside the round, team belongs to the event, scorer allowed.
pub fn authorize_write(
    event: &Event,
    hole_number: i32,
    target: ScoreTarget,
    team: Option<&Team>,
    session: &ScoringSession,
) -> WebResult<()> {
    if event.is_locked {
        return Err(StorageError::Locked.into());
    }

    if !event.contains_hole(hole_number) {
        return Err(WebError::BadRequest(format!(
            "Hole number must be between 1 and {}",
            event.hole_count
        )));
    }

    match target {
        ScoreTarget::Team(_) => {
            let team = team
                .filter(|team| team.event_id == event.event_id)
                .ok_or_else(|| {
                    WebError::BadRequest("Team does not belong to this event".to_string())
                })?;

            if !session.can_edit_team(team) {
                return Err(WebError::Forbidden(
                    "You can only enter scores for your own team".to_string(),
                ));
            }
        }
        ScoreTarget::Player(player_id) => {
            if !session.can_edit_player(player_id) {
                return Err(WebError::Forbidden(
                    "You can only enter your own scores".to_string(),
                ));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use sqlx::types::Json;
    use storage::models::TeamPlayers;

    fn timestamp() -> chrono::NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn event(hole_count: i32, is_locked: bool) -> Event {
        Event {
            event_id: Uuid::new_v4(),
            name: "Member Guest".to_string(),
            event_date: timestamp().date(),
            course_name: "Lakeside".to_string(),
            tees: None,
            format: Some("Scramble".to_string()),
            hole_count,
            par_per_hole: Json(vec![4; hole_count as usize]),
            is_locked,
            share_code: "ABC123".to_string(),
            status: "In Progress".to_string(),
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    fn team(event_id: Uuid, member: Uuid) -> Team {
        Team {
            team_id: Uuid::new_v4(),
            event_id,
            team_name: "Birdie Hunters".to_string(),
            players: TeamPlayers {
                player1: Some(member),
                ..Default::default()
            },
            starting_hole: Some(1),
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    fn session(player_id: Uuid, is_admin: bool) -> ScoringSession {
        ScoringSession {
            player_id,
            is_admin,
        }
    }

    fn status(result: WebResult<()>) -> StatusCode {
        result.unwrap_err().status_code()
    }

    #[test]
    fn test_member_may_score_own_team() {
        let member = Uuid::new_v4();
        let event = event(18, false);
        let team = team(event.event_id, member);

        let result = authorize_write(
            &event,
            12,
            ScoreTarget::Team(team.team_id),
            Some(&team),
            &session(member, false),
        );

        assert!(result.is_ok());
    }

    #[test]
    fn test_locked_event_rejects_writes() {
        let member = Uuid::new_v4();
        let event = event(18, true);
        let team = team(event.event_id, member);

        let result = authorize_write(
            &event,
            1,
            ScoreTarget::Team(team.team_id),
            Some(&team),
            &session(member, true),
        );

        assert_eq!(status(result), StatusCode::CONFLICT);
    }

    #[test]
    fn test_hole_outside_round() {
        let member = Uuid::new_v4();
        let event = event(9, false);
        let team = team(event.event_id, member);

        let result = authorize_write(
            &event,
            10,
            ScoreTarget::Team(team.team_id),
            Some(&team),
            &session(member, false),
        );

        assert_eq!(status(result), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_team_from_other_event() {
        let member = Uuid::new_v4();
        let event = event(18, false);
        let foreign = team(Uuid::new_v4(), member);

        let result = authorize_write(
            &event,
            3,
            ScoreTarget::Team(foreign.team_id),
            Some(&foreign),
            &session(member, false),
        );
        assert_eq!(status(result), StatusCode::BAD_REQUEST);

        let missing = authorize_write(
            &event,
            3,
            ScoreTarget::Team(Uuid::new_v4()),
            None,
            &session(member, false),
        );
        assert_eq!(status(missing), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_non_member_is_forbidden_unless_admin() {
        let event = event(18, false);
        let team = team(event.event_id, Uuid::new_v4());
        let outsider = Uuid::new_v4();

        let denied = authorize_write(
            &event,
            5,
            ScoreTarget::Team(team.team_id),
            Some(&team),
            &session(outsider, false),
        );
        assert_eq!(status(denied), StatusCode::FORBIDDEN);

        let admin = authorize_write(
            &event,
            5,
            ScoreTarget::Team(team.team_id),
            Some(&team),
            &session(outsider, true),
        );
        assert!(admin.is_ok());
    }

    #[test]
    fn test_player_mode_only_own_card() {
        let event = event(18, false);
        let me = Uuid::new_v4();

        let own = authorize_write(&event, 7, ScoreTarget::Player(me), None, &session(me, false));
        assert!(own.is_ok());

        let other = authorize_write(
            &event,
            7,
            ScoreTarget::Player(Uuid::new_v4()),
            None,
            &session(me, false),
        );
        assert_eq!(status(other), StatusCode::FORBIDDEN);
    }
}
