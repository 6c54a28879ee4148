// This file is part of the product SceneTag.
// SPDX-FileCopyrightText: 2026 SceneTag Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::bot::errors::CommandError;
use crate::store::TagStore;
use std::sync::Arc;

pub const MAX_TAG_NAME_CHARS: usize = 256;
pub const MAX_SCENE_CHARS: usize = 128;
pub const MAX_NPC_CHARS: usize = 128;
pub const MAX_CHANNEL_CHARS: usize = 256;

#[derive(Clone)]
pub struct BotContext {
    pub store: Arc<TagStore>,
}

/// One parsed user request, as handed over by a transport. The gateway
/// supplies the invoking channel and, when it has one, its measured
/// latency (only the ping handler reads it).
#[derive(Debug, Clone)]
pub struct CommandRequest {
    pub channel: String,
    pub latency_ms: Option<u64>,
    pub command: BotCommand,
}

impl CommandRequest {
    pub(crate) fn validate(&self) -> Result<(), CommandError> {
        if self.channel.is_empty() {
            return Err(CommandError::validation("Channel is required"));
        }
        if self.channel.chars().count() > MAX_CHANNEL_CHARS {
            return Err(CommandError::validation(format!(
                "Channel must be at most {} characters",
                MAX_CHANNEL_CHARS
            )));
        }
        Ok(())
    }
}

/// The single text reply a request produces. Transports relay it to the
/// user exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResponse {
    pub message: String,
}

impl CommandResponse {
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            message: text.into(),
        }
    }
}

/// The internal command type both transports translate into. One variant
/// per user-visible operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    Ping(PingRequest),
    AddTag(TagAddRequest),
    ListTags(TagListRequest),
    ShowTag(TagShowRequest),
    DeleteTag(TagDeleteRequest),
    SetLevel(TagSetLevelRequest),
    Rename(TagRenameRequest),
    ClearScene(SceneClearRequest),
}

impl BotCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BotCommand::Ping(_) => "ping",
            BotCommand::AddTag(_) => "addtag",
            BotCommand::ListTags(_) => "tags",
            BotCommand::ShowTag(_) => "tag",
            BotCommand::DeleteTag(_) => "deltag",
            BotCommand::SetLevel(_) => "modstatuslevel",
            BotCommand::Rename(_) => "modtagname",
            BotCommand::ClearScene(_) => "clearscene",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PingRequest {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagAddRequest {
    pub name: String,
    pub scene: Option<String>,
    pub npc: Option<String>,
    pub level: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagListRequest {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagShowRequest {
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDeleteRequest {
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSetLevelRequest {
    pub id: i64,
    pub level: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRenameRequest {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneClearRequest {
    pub scene: Option<String>,
}

impl TagAddRequest {
    pub(crate) fn validate(&self) -> Result<(), CommandError> {
        validate_tag_name(&self.name)?;
        if let Some(scene) = &self.scene {
            validate_scene(scene)?;
        }
        if let Some(npc) = &self.npc {
            validate_npc(npc)?;
        }
        Ok(())
    }
}

impl TagRenameRequest {
    pub(crate) fn validate(&self) -> Result<(), CommandError> {
        validate_tag_name(&self.name)
    }
}

impl SceneClearRequest {
    pub(crate) fn validate(&self) -> Result<(), CommandError> {
        if let Some(scene) = &self.scene {
            validate_scene(scene)?;
        }
        Ok(())
    }
}

fn validate_tag_name(name: &str) -> Result<(), CommandError> {
    if name.is_empty() {
        return Err(CommandError::validation("Tag name is required"));
    }
    if name.chars().count() > MAX_TAG_NAME_CHARS {
        return Err(CommandError::validation(format!(
            "Tag name must be at most {} characters",
            MAX_TAG_NAME_CHARS
        )));
    }
    Ok(())
}

fn validate_scene(scene: &str) -> Result<(), CommandError> {
    if scene.is_empty() {
        return Err(CommandError::validation("Scene name cannot be empty"));
    }
    if scene.chars().count() > MAX_SCENE_CHARS {
        return Err(CommandError::validation(format!(
            "Scene name must be at most {} characters",
            MAX_SCENE_CHARS
        )));
    }
    Ok(())
}

fn validate_npc(npc: &str) -> Result<(), CommandError> {
    if npc.is_empty() {
        return Err(CommandError::validation("NPC name cannot be empty"));
    }
    if npc.chars().count() > MAX_NPC_CHARS {
        return Err(CommandError::validation(format!(
            "NPC name must be at most {} characters",
            MAX_NPC_CHARS
        )));
    }
    Ok(())
}
