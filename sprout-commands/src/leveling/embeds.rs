use poise::serenity_prelude as serenity;

use sprout_store::leveling::{rank_progress, xp_threshold};
use sprout_store::{LevelingConfig, UserRecord};
use sprout_utils::embed::{DEFAULT_EMBED_COLOR, GOLD_EMBED_COLOR};
use sprout_utils::formatting::format_xp_progress;

pub fn guild_only_message() -> &'static str {
    "This command can only be used in a server."
}

pub fn usage_message(usage: &str) -> String {
    format!("Usage: `{}`", usage)
}

pub fn missing_admin_message() -> &'static str {
    "❌ You do not have permission to use this command!"
}

pub fn no_xp_message(display_name: &str) -> String {
    format!("{} hasn't earned any XP yet!", display_name)
}

/// Preferred display name for a user, falling back to the account name.
pub fn display_name(user: &serenity::User) -> String {
    user.global_name
        .clone()
        .unwrap_or_else(|| user.name.clone())
}

/// Rank card shown by the `rank` command.
pub fn rank_card_embed(
    user: &serenity::User,
    record: &UserRecord,
    config: &LevelingConfig,
) -> serenity::CreateEmbed {
    let threshold = xp_threshold(config, record.level);
    let progress = rank_progress(config, record);

    serenity::CreateEmbed::new()
        .title("📊 Rank Card")
        .color(DEFAULT_EMBED_COLOR)
        .author(serenity::CreateEmbedAuthor::new(display_name(user)).icon_url(user.face()))
        .field("Level", record.level.to_string(), true)
        .field("XP", format_xp_progress(record.xp, threshold), true)
        .field("Progress", format!("{}%", progress), true)
}

/// Notification sent to the channel when a message crosses a level threshold.
pub fn level_up_embed(
    user_id: serenity::UserId,
    record: &UserRecord,
    config: &LevelingConfig,
) -> serenity::CreateEmbed {
    let threshold = xp_threshold(config, record.level);

    serenity::CreateEmbed::new()
        .title("🎉 Level Up!")
        .color(GOLD_EMBED_COLOR)
        .description(format!(
            "Congratulations <@{}>! You've reached **Level {}**!",
            user_id.get(),
            record.level
        ))
        .field(
            "Current XP",
            format_xp_progress(record.xp, threshold),
            true,
        )
}
