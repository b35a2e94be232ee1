pub mod aggregation;
pub mod handicap;
pub mod leaderboard;
pub mod session;
