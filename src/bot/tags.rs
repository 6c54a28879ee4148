// This file is part of the product SceneTag.
// SPDX-FileCopyrightText: 2026 SceneTag Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::bot::core::{
    BotCommand, BotContext, CommandRequest, CommandResponse, SceneClearRequest, TagAddRequest,
    TagDeleteRequest, TagRenameRequest, TagSetLevelRequest, TagShowRequest,
};
use crate::bot::format::{format_tag, format_tags_by_scene};
use crate::store::{StoreError, TagPatch};
use log::error;

/// Display label used in the wipe confirmation for the unset scene.
/// Purely presentational; the store never sees it.
const DEFAULT_SCENE_LABEL: &str = "Default Scene";

const STORAGE_FAILURE_MESSAGE: &str = "Something went wrong while talking to the tag store.";

pub(crate) async fn handle_request(
    request: CommandRequest,
    context: &BotContext,
) -> CommandResponse {
    let channel = request.channel;
    match request.command {
        BotCommand::Ping(_) => handle_ping(request.latency_ms),
        BotCommand::AddTag(payload) => handle_add(payload, &channel, context).await,
        BotCommand::ListTags(_) => handle_list(&channel, context).await,
        BotCommand::ShowTag(payload) => handle_show(payload, context).await,
        BotCommand::DeleteTag(payload) => handle_delete(payload, context).await,
        BotCommand::SetLevel(payload) => handle_set_level(payload, context).await,
        BotCommand::Rename(payload) => handle_rename(payload, context).await,
        BotCommand::ClearScene(payload) => handle_clear_scene(payload, &channel, context).await,
    }
}

fn handle_ping(latency_ms: Option<u64>) -> CommandResponse {
    match latency_ms {
        Some(latency) => CommandResponse::message(format!("Pong! Latency: {}ms", latency)),
        None => CommandResponse::message("Pong!"),
    }
}

async fn handle_add(
    payload: TagAddRequest,
    channel: &str,
    context: &BotContext,
) -> CommandResponse {
    if let Err(err) = payload.validate() {
        return CommandResponse::message(err.message());
    }
    match context
        .store
        .create(
            &payload.name,
            channel,
            payload.scene.as_deref(),
            payload.npc.as_deref(),
            payload.level,
        )
        .await
    {
        Ok(tag) => CommandResponse::message(format!("Created tag:\n{}", format_tag(&tag))),
        Err(err) => storage_failure("create tag", err),
    }
}

async fn handle_list(channel: &str, context: &BotContext) -> CommandResponse {
    let tags = match context.store.list_by_channel(channel).await {
        Ok(tags) => tags,
        Err(err) => return storage_failure("list tags", err),
    };
    if tags.is_empty() {
        return CommandResponse::message("No tags in this channel.");
    }
    CommandResponse::message(format_tags_by_scene(&tags, channel))
}

async fn handle_show(payload: TagShowRequest, context: &BotContext) -> CommandResponse {
    match context.store.get(payload.id).await {
        Ok(Some(tag)) => CommandResponse::message(format_tag(&tag)),
        Ok(None) => not_found(payload.id),
        Err(err) => storage_failure("fetch tag", err),
    }
}

async fn handle_delete(payload: TagDeleteRequest, context: &BotContext) -> CommandResponse {
    match context.store.delete(payload.id).await {
        Ok(true) => CommandResponse::message(format!("Deleted tag {}.", payload.id)),
        Ok(false) => not_found(payload.id),
        Err(err) => storage_failure("delete tag", err),
    }
}

async fn handle_set_level(payload: TagSetLevelRequest, context: &BotContext) -> CommandResponse {
    let patch = TagPatch {
        level: Some(payload.level),
        ..TagPatch::default()
    };
    match context.store.update(payload.id, patch).await {
        Ok(Some(tag)) => CommandResponse::message(format!("Updated tag:\n{}", format_tag(&tag))),
        Ok(None) => not_found(payload.id),
        Err(err) => storage_failure("update tag", err),
    }
}

async fn handle_rename(payload: TagRenameRequest, context: &BotContext) -> CommandResponse {
    if let Err(err) = payload.validate() {
        return CommandResponse::message(err.message());
    }
    let patch = TagPatch {
        name: Some(payload.name),
        ..TagPatch::default()
    };
    match context.store.update(payload.id, patch).await {
        Ok(Some(tag)) => CommandResponse::message(format!("Updated tag:\n{}", format_tag(&tag))),
        Ok(None) => not_found(payload.id),
        Err(err) => storage_failure("update tag", err),
    }
}

async fn handle_clear_scene(
    payload: SceneClearRequest,
    channel: &str,
    context: &BotContext,
) -> CommandResponse {
    if let Err(err) = payload.validate() {
        return CommandResponse::message(err.message());
    }
    match context
        .store
        .delete_by_scene(channel, payload.scene.as_deref())
        .await
    {
        Ok(count) => {
            let scene_display = payload.scene.as_deref().unwrap_or(DEFAULT_SCENE_LABEL);
            CommandResponse::message(format!(
                "Cleared {} tag(s) from **{}**.",
                count, scene_display
            ))
        }
        Err(err) => storage_failure("clear scene", err),
    }
}

fn not_found(id: i64) -> CommandResponse {
    CommandResponse::message(format!("No tag found with ID {}.", id))
}

fn storage_failure(action: &str, err: StoreError) -> CommandResponse {
    error!("Failed to {}: {}", action, err);
    CommandResponse::message(STORAGE_FAILURE_MESSAGE)
}
