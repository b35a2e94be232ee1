pub mod event;
pub mod leaderboard;
pub mod player;
pub mod score;
pub mod team;
