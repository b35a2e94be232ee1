use async_trait::async_trait;
use uuid::Uuid;

use crate::Database;
use crate::error::Result;
use crate::models::{Event, Player, Score, Team};
use crate::repository::{
    event::EventRepository, player::PlayerRepository, score::ScoreRepository,
    team::TeamRepository,
};

/// Read access the leaderboard needs. Implemented by [`Database`]; tests
/// substitute an in-memory snapshot.
#[async_trait]
pub trait TournamentStore: Send + Sync {
    async fn get_event(&self, event_id: Uuid) -> Result<Event>;

    async fn list_teams(&self, event_id: Uuid) -> Result<Vec<Team>>;

    async fn list_scores(&self, event_id: Uuid) -> Result<Vec<Score>>;

    async fn get_players_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Player>>;
}

#[async_trait]
impl TournamentStore for Database {
    async fn get_event(&self, event_id: Uuid) -> Result<Event> {
        EventRepository::new(self.pool()).find_by_id(event_id).await
    }

    async fn list_teams(&self, event_id: Uuid) -> Result<Vec<Team>> {
        TeamRepository::new(self.pool()).list_by_event(event_id).await
    }

    async fn list_scores(&self, event_id: Uuid) -> Result<Vec<Score>> {
        ScoreRepository::new(self.pool())
            .list_by_event(event_id, None)
            .await
    }

    async fn get_players_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Player>> {
        PlayerRepository::new(self.pool()).find_by_ids(ids).await
    }
}
