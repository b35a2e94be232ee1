pub mod event;
pub mod player;
pub mod score;
pub mod team;

pub use event::{
    DEFAULT_PAR, EVENT_FORMATS, EVENT_STATUSES, Event, HOLE_COUNTS, PAR_RANGE, generate_share_code,
    normalize_par,
};
pub use player::Player;
pub use score::Score;
pub use team::{TEAM_SLOTS, Team, TeamPlayers};
