/// Default embed color for informational replies.
pub const DEFAULT_EMBED_COLOR: u32 = 0x34_98_DB;

/// Gold accent used for level-ups and the leaderboard.
pub const GOLD_EMBED_COLOR: u32 = 0xF1_C4_0F;
