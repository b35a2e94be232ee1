pub mod event;
pub mod player;
pub mod score;
pub mod team;

pub use event::EventRepository;
pub use player::PlayerRepository;
pub use score::ScoreRepository;
pub use team::TeamRepository;
