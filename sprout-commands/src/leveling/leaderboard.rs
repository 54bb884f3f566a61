use poise::serenity_prelude as serenity;
use tracing::debug;

use crate::CommandMeta;
use crate::leveling::embeds::{display_name, guild_only_message};
use sprout_core::{Context, Error};
use sprout_store::order_leaderboard;
use sprout_utils::embed::GOLD_EMBED_COLOR;
use sprout_utils::formatting::rank_prefix;

pub const META: CommandMeta = CommandMeta {
    name: "leaderboard",
    desc: "View the server's top 10 by level and XP.",
    category: "leveling",
    usage: "!leaderboard",
};

#[poise::command(prefix_command, slash_command, category = "Leveling", aliases("lb"))]
pub async fn leaderboard(ctx: Context<'_>) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    let mut entries = ctx.data().store.list_by_guild(guild_id.get());
    if entries.is_empty() {
        ctx.say("No users on the leaderboard yet!").await?;
        return Ok(());
    }
    order_leaderboard(&mut entries);

    let mut description = String::new();
    for (index, entry) in entries.iter().enumerate() {
        // A single failed name lookup must not sink the whole leaderboard.
        let name = match ctx
            .http()
            .get_user(serenity::UserId::new(entry.user_id))
            .await
        {
            Ok(user) => display_name(&user),
            Err(source) => {
                debug!(?source, user_id = entry.user_id, "name lookup failed");
                format!("User {}", entry.user_id)
            }
        };

        description.push_str(&format!(
            "{} **{}** - Level {} ({} XP)\n",
            rank_prefix(index + 1),
            name,
            entry.level,
            entry.xp
        ));
    }

    let guild_name = ctx.guild().map(|guild| guild.name.clone());

    let mut embed = serenity::CreateEmbed::new()
        .title("🏆 Server Leaderboard")
        .color(GOLD_EMBED_COLOR)
        .description(description);
    if let Some(guild_name) = guild_name {
        embed = embed.footer(serenity::CreateEmbedFooter::new(guild_name));
    }

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
