use poise::serenity_prelude as serenity;

use crate::utility::embeds::grouped_help_description;
use crate::{COMMANDS, CommandMeta};
use sprout_core::{Context, Error};
use sprout_utils::embed::DEFAULT_EMBED_COLOR;

pub const META: CommandMeta = CommandMeta {
    name: "help",
    desc: "Lists out all available commands.",
    category: "utility",
    usage: "!help",
};

#[poise::command(prefix_command, slash_command, category = "Utility")]
pub async fn help(ctx: Context<'_>) -> Result<(), Error> {
    let mut commands: Vec<&'static CommandMeta> = COMMANDS.iter().collect();
    commands.sort_unstable_by(|left, right| {
        left.category
            .cmp(right.category)
            .then(left.name.cmp(right.name))
    });

    let embed = serenity::CreateEmbed::new()
        .title("Available Commands")
        .color(DEFAULT_EMBED_COLOR)
        .description(grouped_help_description(&commands));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
