use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use anyhow::Context as _;
use tracing::debug;

use crate::leveling::{self, Award, GainSource, LevelingConfig};
use crate::model::UserRecord;

/// Number of entries shown on a guild leaderboard.
pub const LEADERBOARD_SIZE: usize = 10;

/// One leaderboard row, produced by [`Store::list_by_guild`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GuildEntry {
    pub user_id: u64,
    pub level: u32,
    pub xp: u64,
}

/// Flat-file XP store shared across command and event handlers.
///
/// The in-memory map is authoritative for the process lifetime; the JSON
/// file is a write-through mirror rewritten after every mutation. All
/// mutating operations hold the lock across the whole get-modify-persist
/// sequence so concurrent message tasks cannot lose an XP gain.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    config: LevelingConfig,
    records: Mutex<HashMap<String, UserRecord>>,
}

fn record_key(guild_id: u64, user_id: u64) -> String {
    format!("{}_{}", guild_id, user_id)
}

impl Store {
    /// Open the store file at `path`, or start empty if it does not exist.
    ///
    /// A file that exists but cannot be parsed is a fatal startup error;
    /// silently replacing it would wipe every user's progress on the next
    /// flush.
    pub fn load(path: impl Into<PathBuf>, config: LevelingConfig) -> anyhow::Result<Self> {
        let path = path.into();
        let records = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("malformed store file {}", path.display()))?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to read store file {}", path.display()));
            }
        };

        Ok(Self {
            path,
            config,
            records: Mutex::new(records),
        })
    }

    /// The leveling parameters this store was opened with.
    pub fn config(&self) -> &LevelingConfig {
        &self.config
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Return the record for (guild, user), inserting a zeroed one if absent.
    ///
    /// The insert is in-memory only; the file is rewritten on the first real
    /// mutation, so read commands never touch the disk.
    pub fn get_or_create(&self, guild_id: u64, user_id: u64) -> UserRecord {
        let mut records = self.lock();
        *records.entry(record_key(guild_id, user_id)).or_default()
    }

    /// Apply one message's XP gain and flush if anything changed.
    ///
    /// Returns the post-award record alongside the award outcome.
    pub fn award_message_xp(
        &self,
        guild_id: u64,
        user_id: u64,
        now: u64,
        gains: &mut dyn GainSource,
    ) -> anyhow::Result<(UserRecord, Award)> {
        let mut records = self.lock();
        let record = records.entry(record_key(guild_id, user_id)).or_default();
        let award = leveling::award_xp(record, now, &self.config, gains);
        let record = *record;

        if let Award::Gained { amount, leveled_up } = award {
            debug!(guild_id, user_id, amount, leveled_up, "awarded message XP");
            self.persist_locked(&records)?;
        }

        Ok((record, award))
    }

    /// Overwrite a user's XP, clamping negative input to 0.
    ///
    /// Level and last-message time are left untouched.
    pub fn set_xp(&self, guild_id: u64, user_id: u64, amount: i64) -> anyhow::Result<UserRecord> {
        let mut records = self.lock();
        let record = records.entry(record_key(guild_id, user_id)).or_default();
        record.xp = u64::try_from(amount).unwrap_or(0);
        let record = *record;
        self.persist_locked(&records)?;
        Ok(record)
    }

    /// Reset a user's progression to xp 0 / level 1.
    ///
    /// The last-message time is kept so a reset does not bypass the cooldown.
    pub fn reset_xp(&self, guild_id: u64, user_id: u64) -> anyhow::Result<UserRecord> {
        let mut records = self.lock();
        let record = records.entry(record_key(guild_id, user_id)).or_default();
        record.xp = 0;
        record.level = 1;
        let record = *record;
        self.persist_locked(&records)?;
        Ok(record)
    }

    /// All records belonging to a guild, in no particular order.
    pub fn list_by_guild(&self, guild_id: u64) -> Vec<GuildEntry> {
        let prefix = format!("{}_", guild_id);
        let records = self.lock();

        records
            .iter()
            .filter_map(|(key, record)| {
                let user_id = key.strip_prefix(&prefix)?.parse::<u64>().ok()?;
                Some(GuildEntry {
                    user_id,
                    level: record.level,
                    xp: record.xp,
                })
            })
            .collect()
    }

    /// Rewrite the store file from the current in-memory map.
    pub fn persist(&self) -> anyhow::Result<()> {
        let records = self.lock();
        self.persist_locked(&records)
    }

    fn persist_locked(&self, records: &HashMap<String, UserRecord>) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(records)?;

        // Write-then-rename so a crash mid-write cannot corrupt the file.
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, json)
            .with_context(|| format!("failed to write store file {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("failed to replace store file {}", self.path.display()))?;

        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, UserRecord>> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Order leaderboard entries in place: level descending, XP breaking ties,
/// truncated to the top [`LEADERBOARD_SIZE`].
pub fn order_leaderboard(entries: &mut Vec<GuildEntry>) {
    entries.sort_by(|a, b| b.level.cmp(&a.level).then(b.xp.cmp(&a.xp)));
    entries.truncate(LEADERBOARD_SIZE);
}

#[cfg(test)]
mod tests {
    use super::{GuildEntry, Store, order_leaderboard};
    use crate::leveling::testing::FixedGain;
    use crate::leveling::{Award, LevelingConfig};
    use crate::model::UserRecord;

    const GUILD: u64 = 1_234;
    const USER: u64 = 42;

    fn open_store(dir: &tempfile::TempDir) -> Store {
        Store::load(dir.path().join("users.json"), LevelingConfig::default())
            .expect("store should open")
    }

    #[test]
    fn get_or_create_returns_zeroed_record_once() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = open_store(&dir);

        let record = store.get_or_create(GUILD, USER);
        assert_eq!(record, UserRecord::default());
        assert_eq!(store.len(), 1);

        let again = store.get_or_create(GUILD, USER);
        assert_eq!(again, record);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn set_xp_clamps_negative_and_keeps_other_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = open_store(&dir);

        let before = store
            .award_message_xp(GUILD, USER, 1_000, &mut FixedGain(20))
            .expect("award")
            .0;

        let record = store.set_xp(GUILD, USER, -5).expect("set_xp");
        assert_eq!(record.xp, 0);
        assert_eq!(record.level, before.level);
        assert_eq!(record.last_message_at, before.last_message_at);

        let record = store.set_xp(GUILD, USER, 70).expect("set_xp");
        assert_eq!(record.xp, 70);
    }

    #[test]
    fn reset_xp_restores_defaults_but_keeps_cooldown_stamp() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = open_store(&dir);

        store.set_xp(GUILD, USER, 9_999).expect("set_xp");
        store
            .award_message_xp(GUILD, USER, 5_000, &mut FixedGain(25))
            .expect("award");

        let record = store.reset_xp(GUILD, USER).expect("reset_xp");
        assert_eq!(record.xp, 0);
        assert_eq!(record.level, 1);
        assert_eq!(record.last_message_at, 5_000);
    }

    #[test]
    fn award_respects_cooldown_between_messages() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = open_store(&dir);

        let (_, first) = store
            .award_message_xp(GUILD, USER, 1_000, &mut FixedGain(20))
            .expect("award");
        assert!(matches!(first, Award::Gained { .. }));

        let (record, second) = store
            .award_message_xp(GUILD, USER, 1_030, &mut FixedGain(20))
            .expect("award");
        assert_eq!(second, Award::OnCooldown);
        assert_eq!(record.xp, 20);
    }

    #[test]
    fn list_by_guild_filters_other_guilds() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = open_store(&dir);

        store.set_xp(GUILD, 1, 10).expect("set_xp");
        store.set_xp(GUILD, 2, 20).expect("set_xp");
        store.set_xp(GUILD + 1, 3, 30).expect("set_xp");

        let mut entries = store.list_by_guild(GUILD);
        entries.sort_by_key(|entry| entry.user_id);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].user_id, 1);
        assert_eq!(entries[1].user_id, 2);
    }

    #[test]
    fn persisted_store_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("users.json");

        let store = Store::load(&path, LevelingConfig::default()).expect("open");
        store.set_xp(GUILD, 1, 150).expect("set_xp");
        store.set_xp(GUILD, 2, 75).expect("set_xp");
        store
            .award_message_xp(GUILD, 3, 1_000, &mut FixedGain(20))
            .expect("award");

        let reopened = Store::load(&path, LevelingConfig::default()).expect("reopen");
        assert_eq!(reopened.len(), store.len());
        for user_id in 1..=3 {
            assert_eq!(
                reopened.get_or_create(GUILD, user_id),
                store.get_or_create(GUILD, user_id)
            );
        }
    }

    #[test]
    fn missing_file_starts_empty_but_garbage_is_fatal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("users.json");

        let store = Store::load(&path, LevelingConfig::default()).expect("open");
        assert!(store.is_empty());

        std::fs::write(&path, "{ not json").expect("write");
        assert!(Store::load(&path, LevelingConfig::default()).is_err());
    }

    #[test]
    fn leaderboard_orders_by_level_then_xp() {
        let entry = |user_id, level, xp| GuildEntry { user_id, level, xp };
        let mut entries = vec![entry(1, 5, 10), entry(2, 5, 50), entry(3, 6, 0)];

        order_leaderboard(&mut entries);

        let users: Vec<u64> = entries.iter().map(|e| e.user_id).collect();
        assert_eq!(users, vec![3, 2, 1]);
    }

    #[test]
    fn leaderboard_keeps_top_ten_only() {
        let mut entries: Vec<GuildEntry> = (0..15)
            .map(|i| GuildEntry {
                user_id: i,
                level: 1,
                xp: i,
            })
            .collect();

        order_leaderboard(&mut entries);

        assert_eq!(entries.len(), 10);
        assert_eq!(entries[0].user_id, 14);
        assert_eq!(entries[9].user_id, 5);
    }
}
