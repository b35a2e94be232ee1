pub mod events;
pub mod players;
pub mod scores;
pub mod teams;
