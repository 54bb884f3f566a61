use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::leveling::embeds::{
    display_name, guild_only_message, missing_admin_message, usage_message,
};
use sprout_core::{Context, Error};
use sprout_utils::permissions::is_admin;

pub const META: CommandMeta = CommandMeta {
    name: "setxp",
    desc: "Set a user's XP (Admin only).",
    category: "leveling",
    usage: "!setxp <user> <amount>",
};

#[poise::command(prefix_command, slash_command, category = "Leveling")]
pub async fn setxp(
    ctx: Context<'_>,
    #[description = "The user to modify"] user: Option<serenity::User>,
    #[description = "New XP amount"] amount: Option<i64>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    if !is_admin(ctx.http(), guild_id, ctx.author().id).await? {
        ctx.say(missing_admin_message()).await?;
        return Ok(());
    }

    let (Some(user), Some(amount)) = (user, amount) else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    let record = ctx
        .data()
        .store
        .set_xp(guild_id.get(), user.id.get(), amount)?;
    ctx.say(format!(
        "Set {}'s XP to {}!",
        display_name(&user),
        record.xp
    ))
    .await?;

    Ok(())
}
