pub mod embeds;
pub mod leaderboard;
pub mod level;
pub mod rank;
pub mod resetxp;
pub mod setxp;
