use poise::serenity_prelude as serenity;
use tracing::error;

use sprout_commands::leveling::embeds::level_up_embed;
use sprout_core::Data;
use sprout_store::RandomGain;
use sprout_utils::time::now_unix_secs;

/// Award message XP for a qualifying inbound message and announce level-ups.
///
/// Store failures are logged and swallowed; the listener never takes the
/// process down over a single message.
pub async fn handle_message_xp(
    ctx: &serenity::Context,
    data: &Data,
    message: &serenity::Message,
) {
    // Ignore bots, webhooks, and DMs.
    if message.author.bot || message.webhook_id.is_some() {
        return;
    }
    let Some(guild_id) = message.guild_id else {
        return;
    };

    let now = now_unix_secs();
    let outcome = data.store.award_message_xp(
        guild_id.get(),
        message.author.id.get(),
        now,
        &mut RandomGain,
    );

    let record = match outcome {
        Ok((record, award)) if award.leveled_up() => record,
        Ok(_) => return,
        Err(source) => {
            error!(?source, "failed to award message XP");
            return;
        }
    };

    let embed = level_up_embed(message.author.id, &record, data.store.config());
    if let Err(source) = message
        .channel_id
        .send_message(&ctx.http, serenity::CreateMessage::new().embed(embed))
        .await
    {
        error!(?source, "failed to send level-up notification");
    }
}
