use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::leveling::embeds::{
    display_name, guild_only_message, missing_admin_message, usage_message,
};
use sprout_core::{Context, Error};
use sprout_utils::permissions::is_admin;

pub const META: CommandMeta = CommandMeta {
    name: "resetxp",
    desc: "Reset a user's XP and level (Admin only).",
    category: "leveling",
    usage: "!resetxp <user>",
};

#[poise::command(prefix_command, slash_command, category = "Leveling")]
pub async fn resetxp(
    ctx: Context<'_>,
    #[description = "The user to reset"] user: Option<serenity::User>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    if !is_admin(ctx.http(), guild_id, ctx.author().id).await? {
        ctx.say(missing_admin_message()).await?;
        return Ok(());
    }

    let Some(user) = user else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    ctx.data().store.reset_xp(guild_id.get(), user.id.get())?;
    ctx.say(format!("Reset {}'s XP and level!", display_name(&user)))
        .await?;

    Ok(())
}
