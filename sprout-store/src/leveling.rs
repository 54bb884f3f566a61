use std::env;

use anyhow::bail;
use rand::Rng;

use crate::model::UserRecord;

pub const DEFAULT_XP_MIN: u64 = 15;
pub const DEFAULT_XP_MAX: u64 = 25;
pub const DEFAULT_COOLDOWN_SECS: u64 = 60;
pub const DEFAULT_LEVEL_MULTIPLIER: u64 = 100;

/// Leveling parameters, resolved once at startup.
#[derive(Clone, Copy, Debug)]
pub struct LevelingConfig {
    /// Inclusive lower bound of the random XP gain per message.
    pub xp_min: u64,
    /// Inclusive upper bound of the random XP gain per message.
    pub xp_max: u64,
    /// Minimum seconds between XP-earning messages per user.
    pub cooldown_secs: u64,
    /// Scales the level -> threshold formula.
    pub level_multiplier: u64,
}

impl Default for LevelingConfig {
    fn default() -> Self {
        Self {
            xp_min: DEFAULT_XP_MIN,
            xp_max: DEFAULT_XP_MAX,
            cooldown_secs: DEFAULT_COOLDOWN_SECS,
            level_multiplier: DEFAULT_LEVEL_MULTIPLIER,
        }
    }
}

impl LevelingConfig {
    /// Read the leveling parameters from the environment.
    ///
    /// Unset variables fall back to the defaults; a variable that is set but
    /// not a valid number, or an inconsistent combination, is a fatal
    /// configuration error.
    pub fn from_env() -> anyhow::Result<Self> {
        let config = Self {
            xp_min: env_u64("XP_MIN", DEFAULT_XP_MIN)?,
            xp_max: env_u64("XP_MAX", DEFAULT_XP_MAX)?,
            cooldown_secs: env_u64("COOLDOWN", DEFAULT_COOLDOWN_SECS)?,
            level_multiplier: env_u64("LEVEL_MULTIPLIER", DEFAULT_LEVEL_MULTIPLIER)?,
        };
        config.validated()
    }

    fn validated(self) -> anyhow::Result<Self> {
        if self.xp_min > self.xp_max {
            bail!(
                "XP_MIN ({}) must not exceed XP_MAX ({})",
                self.xp_min,
                self.xp_max
            );
        }
        if self.level_multiplier == 0 {
            bail!("LEVEL_MULTIPLIER must be at least 1");
        }
        Ok(self)
    }
}

fn env_u64(key: &str, default: u64) -> anyhow::Result<u64> {
    match env::var(key) {
        Ok(value) => match value.trim().parse::<u64>() {
            Ok(parsed) => Ok(parsed),
            Err(_) => bail!("{} must be a non-negative integer, got {:?}", key, value),
        },
        Err(_) => Ok(default),
    }
}

/// Source of the random XP amount granted per message.
///
/// Injectable so tests can supply a deterministic draw.
pub trait GainSource {
    /// Draw an amount from the inclusive range `[min, max]`.
    fn draw(&mut self, min: u64, max: u64) -> u64;
}

/// Production gain source backed by the thread-local RNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomGain;

impl GainSource for RandomGain {
    fn draw(&mut self, min: u64, max: u64) -> u64 {
        rand::thread_rng().gen_range(min..=max)
    }
}

/// Outcome of a single XP award attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Award {
    /// The cooldown has not elapsed; the record was left untouched.
    OnCooldown,
    /// XP was granted.
    Gained { amount: u64, leveled_up: bool },
}

impl Award {
    pub fn leveled_up(&self) -> bool {
        matches!(
            self,
            Award::Gained {
                leveled_up: true,
                ..
            }
        )
    }
}

/// XP required to advance from `level` to `level + 1`.
pub fn xp_threshold(config: &LevelingConfig, level: u32) -> u64 {
    let level = u64::from(level);
    config
        .level_multiplier
        .saturating_mul(level.saturating_mul(level))
}

/// Apply one message's worth of XP to `record`.
///
/// No-op while the cooldown is in effect. Otherwise draws a gain from the
/// configured range, carries excess XP across as many level thresholds as it
/// covers, and stamps `last_message_at`. Performs no I/O; the caller is
/// responsible for persisting the record.
pub fn award_xp(
    record: &mut UserRecord,
    now: u64,
    config: &LevelingConfig,
    gains: &mut dyn GainSource,
) -> Award {
    if now.saturating_sub(record.last_message_at) < config.cooldown_secs {
        return Award::OnCooldown;
    }

    let amount = gains.draw(config.xp_min, config.xp_max);
    record.xp = record.xp.saturating_add(amount);

    // A single gain can cross several thresholds when the multiplier is
    // small or the gain is large, so this must loop rather than check once.
    let mut leveled_up = false;
    loop {
        let threshold = xp_threshold(config, record.level);
        if threshold == 0 || record.xp < threshold {
            break;
        }
        record.xp -= threshold;
        record.level += 1;
        leveled_up = true;
    }

    record.last_message_at = now;
    Award::Gained { amount, leveled_up }
}

/// Progress toward the next level as a whole percentage, for display only.
pub fn rank_progress(config: &LevelingConfig, record: &UserRecord) -> u64 {
    let threshold = xp_threshold(config, record.level);
    if threshold == 0 {
        return 0;
    }
    record.xp.saturating_mul(100) / threshold
}

#[cfg(test)]
pub(crate) mod testing {
    use super::GainSource;

    /// Deterministic gain source that always yields the same amount.
    pub struct FixedGain(pub u64);

    impl GainSource for FixedGain {
        fn draw(&mut self, min: u64, max: u64) -> u64 {
            self.0.clamp(min, max)
        }
    }
}
