use poise::serenity_prelude as serenity;

/// Resolve a member's effective guild-level permissions from their roles.
///
/// The guild owner implicitly holds every permission.
pub async fn resolve_member_permissions(
    http: &serenity::Http,
    guild_id: serenity::GuildId,
    user_id: serenity::UserId,
) -> anyhow::Result<serenity::Permissions> {
    let guild = guild_id.to_partial_guild(http).await?;
    if guild.owner_id == user_id {
        return Ok(serenity::Permissions::all());
    }

    let member = guild_id.member(http, user_id).await?;
    let roles = guild_id.roles(http).await?;
    let everyone_role_id = serenity::RoleId::new(guild_id.get());

    let mut resolved = serenity::Permissions::empty();
    for role in roles.values() {
        if role.id == everyone_role_id || member.roles.contains(&role.id) {
            resolved |= role.permissions;
        }
    }

    Ok(resolved)
}

/// Whether a member may run admin-only leveling commands.
pub async fn is_admin(
    http: &serenity::Http,
    guild_id: serenity::GuildId,
    user_id: serenity::UserId,
) -> anyhow::Result<bool> {
    let perms = resolve_member_permissions(http, guild_id, user_id).await?;
    Ok(perms.contains(serenity::Permissions::ADMINISTRATOR))
}
