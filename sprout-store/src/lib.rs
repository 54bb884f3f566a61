pub mod leveling;
pub mod model;
pub mod store;

pub use leveling::{Award, GainSource, LevelingConfig, RandomGain};
pub use model::UserRecord;
pub use store::{GuildEntry, LEADERBOARD_SIZE, Store, order_leaderboard};
