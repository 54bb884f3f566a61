use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::leveling::embeds::{display_name, guild_only_message, no_xp_message, rank_card_embed};
use sprout_core::{Context, Error};

pub const META: CommandMeta = CommandMeta {
    name: "rank",
    desc: "View your rank card or another user's rank.",
    category: "leveling",
    usage: "!rank [user]",
};

#[poise::command(prefix_command, slash_command, category = "Leveling")]
pub async fn rank(
    ctx: Context<'_>,
    #[description = "The user to look up"] user: Option<serenity::User>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    let target = user.unwrap_or_else(|| ctx.author().clone());
    let record = ctx
        .data()
        .store
        .get_or_create(guild_id.get(), target.id.get());

    if record.level == 1 && record.xp == 0 {
        ctx.say(no_xp_message(&display_name(&target))).await?;
        return Ok(());
    }

    let embed = rank_card_embed(&target, &record, ctx.data().store.config());
    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
