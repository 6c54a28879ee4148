// This file is part of the product SceneTag.
// SPDX-FileCopyrightText: 2026 SceneTag Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

//! Legacy prefix-style transport. The gateway hands over the raw message
//! text; a message that does not start with the configured prefix, or
//! names a command this bot does not know, is silently not ours.

use crate::bot::core::{
    BotCommand, PingRequest, SceneClearRequest, TagAddRequest, TagDeleteRequest, TagListRequest,
    TagRenameRequest, TagSetLevelRequest, TagShowRequest,
};
use crate::bot::errors::{CommandError, CommandErrorKind};

/// Parses a prefix message into the internal command type. `Ok(None)`
/// means the message is not addressed to this bot.
pub fn parse_message(prefix: &str, content: &str) -> Result<Option<BotCommand>, CommandError> {
    let Some(body) = content.strip_prefix(prefix) else {
        return Ok(None);
    };
    let tokens: Vec<&str> = body.split_whitespace().collect();
    let Some((command, args)) = tokens.split_first() else {
        return Ok(None);
    };

    match command.to_ascii_lowercase().as_str() {
        "ping" => Ok(Some(BotCommand::Ping(PingRequest {}))),
        "addtag" => parse_add(args).map(Some),
        "tags" => Ok(Some(BotCommand::ListTags(TagListRequest {}))),
        "tag" => parse_show(args).map(Some),
        "deltag" => parse_delete(args).map(Some),
        "modstatuslevel" => parse_set_level(args).map(Some),
        "modtagname" => parse_rename(args).map(Some),
        "wipescene" | "clearscene" => parse_clear_scene(args).map(Some),
        _ => Ok(None),
    }
}

/// User-facing text for a transport-level error, or `None` for errors
/// that stay silent.
pub fn render_error(error: &CommandError) -> Option<String> {
    match error.kind() {
        CommandErrorKind::UnknownCommand => None,
        CommandErrorKind::MissingArgument => {
            Some(format!("Missing argument: `{}`", error.message()))
        }
        _ => Some(format!("Error: {}", error.message())),
    }
}

fn parse_add(args: &[&str]) -> Result<BotCommand, CommandError> {
    let name = required(args, 0, "name")?;
    let scene = args.get(1).map(|value| value.to_string());
    let npc = args.get(2).map(|value| value.to_string());
    let level = match args.get(3) {
        Some(raw) => Some(parse_int(raw, "level")?),
        None => None,
    };
    Ok(BotCommand::AddTag(TagAddRequest {
        name: name.to_string(),
        scene,
        npc,
        level,
    }))
}

fn parse_show(args: &[&str]) -> Result<BotCommand, CommandError> {
    let id = parse_int(required(args, 0, "tag_id")?, "tag_id")?;
    Ok(BotCommand::ShowTag(TagShowRequest { id }))
}

fn parse_delete(args: &[&str]) -> Result<BotCommand, CommandError> {
    let id = parse_int(required(args, 0, "tag_id")?, "tag_id")?;
    Ok(BotCommand::DeleteTag(TagDeleteRequest { id }))
}

fn parse_set_level(args: &[&str]) -> Result<BotCommand, CommandError> {
    let id = parse_int(required(args, 0, "tag_id")?, "tag_id")?;
    let level = parse_int(required(args, 1, "level")?, "level")?;
    Ok(BotCommand::SetLevel(TagSetLevelRequest { id, level }))
}

// The new name is the rest of the message, so names may contain spaces.
fn parse_rename(args: &[&str]) -> Result<BotCommand, CommandError> {
    let id = parse_int(required(args, 0, "tag_id")?, "tag_id")?;
    let name = args[1..].join(" ");
    if name.is_empty() {
        return Err(CommandError::missing_argument("name"));
    }
    Ok(BotCommand::Rename(TagRenameRequest { id, name }))
}

// No scene argument targets the default scene, not a scene named "".
fn parse_clear_scene(args: &[&str]) -> Result<BotCommand, CommandError> {
    let scene = if args.is_empty() {
        None
    } else {
        Some(args.join(" "))
    };
    Ok(BotCommand::ClearScene(SceneClearRequest { scene }))
}

fn required<'a>(args: &[&'a str], index: usize, name: &str) -> Result<&'a str, CommandError> {
    args.get(index)
        .copied()
        .ok_or_else(|| CommandError::missing_argument(name))
}

fn parse_int(raw: &str, name: &str) -> Result<i64, CommandError> {
    raw.parse::<i64>()
        .map_err(|_| CommandError::validation(format!("`{}` must be an integer, got '{}'", name, raw)))
}
