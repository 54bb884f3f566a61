/// Shared embed colors and builders.
pub mod embed;
/// Display formatting helpers (rank prefixes, XP progress strings).
pub mod formatting;
/// Single source of truth for the message-command prefix.
pub const COMMAND_PREFIX: char = '!';
/// Permission helper utilities.
pub mod permissions;
/// Shared time helpers.
pub mod time;
