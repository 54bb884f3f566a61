pub mod leveling;
pub mod utility;

use sprout_core::{Data, Error};

pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    utility::ping::META,
    utility::help::META,
    leveling::rank::META,
    leveling::level::META,
    leveling::leaderboard::META,
    leveling::setxp::META,
    leveling::resetxp::META,
];

pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        utility::ping::ping(),
        utility::help::help(),
        leveling::rank::rank(),
        leveling::level::level(),
        leveling::leaderboard::leaderboard(),
        leveling::setxp::setxp(),
        leveling::resetxp::resetxp(),
    ]
}
