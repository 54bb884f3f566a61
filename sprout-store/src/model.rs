use serde::{Deserialize, Serialize};

/// XP progression record for one (guild, user) pair.
///
/// Field names in the serialized form match the on-disk store format:
/// `xp`, `level`, `lastMessageAt`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// XP accumulated toward the current level.
    pub xp: u64,
    /// Current level, starts at 1.
    pub level: u32,
    /// Unix timestamp of the last XP-earning message; 0 if never.
    #[serde(rename = "lastMessageAt")]
    pub last_message_at: u64,
}

impl Default for UserRecord {
    fn default() -> Self {
        Self {
            xp: 0,
            level: 1,
            last_message_at: 0,
        }
    }
}
