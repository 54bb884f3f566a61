use crate::CommandMeta;
use crate::leveling::embeds::guild_only_message;
use sprout_core::{Context, Error};
use sprout_store::leveling::xp_threshold;

pub const META: CommandMeta = CommandMeta {
    name: "level",
    desc: "Check your current level and XP.",
    category: "leveling",
    usage: "!level",
};

#[poise::command(prefix_command, slash_command, category = "Leveling")]
pub async fn level(ctx: Context<'_>) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    let record = ctx
        .data()
        .store
        .get_or_create(guild_id.get(), ctx.author().id.get());

    if record.level == 1 && record.xp == 0 {
        ctx.say("You haven't earned any XP yet! Start chatting to gain XP!")
            .await?;
        return Ok(());
    }

    let threshold = xp_threshold(ctx.data().store.config(), record.level);
    ctx.say(format!(
        "You are **Level {}** with **{}/{} XP**!",
        record.level, record.xp, threshold
    ))
    .await?;

    Ok(())
}
