// This file is part of the product SceneTag.
// SPDX-FileCopyrightText: 2026 SceneTag Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

//! End-to-end flows: transport → bus → handlers → store → rendered text.

use scenetag::bot::core::{BotCommand, BotContext, CommandRequest};
use scenetag::bot::errors::CommandErrorKind;
use scenetag::bot::{CommandBus, prefix, slash};
use scenetag::store::TagStore;
use std::sync::Arc;

async fn start_bus() -> CommandBus {
    let store = TagStore::open_in_memory().await.expect("in-memory store");
    CommandBus::start(BotContext {
        store: Arc::new(store),
    })
}

fn request(channel: &str, command: BotCommand) -> CommandRequest {
    CommandRequest {
        channel: channel.to_string(),
        latency_ms: None,
        command,
    }
}

async fn send_prefix(bus: &CommandBus, channel: &str, line: &str) -> String {
    let command = prefix::parse_message("!", line)
        .expect("parse")
        .expect("command for the bot");
    bus.send(request(channel, command))
        .await
        .expect("response")
        .message
}

#[tokio::test]
async fn prefix_addtag_roundtrip() {
    let bus = start_bus().await;
    let message = send_prefix(&bus, "general", "!addtag Wounded cave goblin 3").await;
    assert_eq!(message, "Created tag:\n**Wounded** [Level: 3] (ID: 1)");

    let shown = send_prefix(&bus, "general", "!tag 1").await;
    assert_eq!(shown, "**Wounded** [Level: 3] (ID: 1)");
}

#[tokio::test]
async fn listing_groups_by_scene_then_npc() {
    let bus = start_bus().await;

    // A: no scene, no NPC. B: NPC only (slash shape; the positional
    // prefix form cannot express npc-without-scene). C: scene only.
    send_prefix(&bus, "general", "!addtag A").await;
    let b = slash::translate(
        "addtag",
        &[
            slash::SlashOption::str("name", "B"),
            slash::SlashOption::str("npc", "Bob"),
        ],
    )
    .expect("translate");
    bus.send(request("general", b)).await.expect("response");
    send_prefix(&bus, "general", "!addtag C Cave").await;

    let listing = send_prefix(&bus, "general", "!tags").await;
    let expected = "__**general**__\n\
                    \t**Story Tags**\n\
                    \t\t**A** (ID: 1)\n\
                    \t**Bob**\n\
                    \t\t**B** (ID: 2)\n\
                    \n\
                    __**Cave**__\n\
                    \t**Story Tags**\n\
                    \t\t**C** (ID: 3)";
    assert_eq!(listing, expected);
}

#[tokio::test]
async fn listing_empty_channel_reports_no_tags() {
    let bus = start_bus().await;
    let listing = send_prefix(&bus, "quiet", "!tags").await;
    assert_eq!(listing, "No tags in this channel.");
}

#[tokio::test]
async fn listing_is_scoped_to_the_invoking_channel() {
    let bus = start_bus().await;
    send_prefix(&bus, "general", "!addtag Here").await;
    let listing = send_prefix(&bus, "other", "!tags").await;
    assert_eq!(listing, "No tags in this channel.");
}

#[tokio::test]
async fn delete_twice_reports_not_found_second_time() {
    let bus = start_bus().await;
    send_prefix(&bus, "general", "!addtag Doomed").await;
    assert_eq!(
        send_prefix(&bus, "general", "!deltag 1").await,
        "Deleted tag 1."
    );
    assert_eq!(
        send_prefix(&bus, "general", "!deltag 1").await,
        "No tag found with ID 1."
    );
}

#[tokio::test]
async fn rename_preserves_level_and_scene() {
    let bus = start_bus().await;
    send_prefix(&bus, "general", "!addtag Wounded cave goblin 3").await;
    let message = send_prefix(&bus, "general", "!modtagname 1 Badly Wounded").await;
    assert_eq!(message, "Updated tag:\n**Badly Wounded** [Level: 3] (ID: 1)");

    let listing = send_prefix(&bus, "general", "!tags").await;
    assert!(listing.contains("__**cave**__"));
    assert!(listing.contains("\t**goblin**"));
}

#[tokio::test]
async fn set_level_only_touches_level() {
    let bus = start_bus().await;
    send_prefix(&bus, "general", "!addtag Wounded cave").await;
    let message = send_prefix(&bus, "general", "!modstatuslevel 1 9").await;
    assert_eq!(message, "Updated tag:\n**Wounded** [Level: 9] (ID: 1)");
}

#[tokio::test]
async fn wipescene_without_scene_spares_literal_scenes() {
    let bus = start_bus().await;
    send_prefix(&bus, "general", "!addtag Unscoped").await;
    send_prefix(&bus, "general", "!addtag Literal default").await;

    let message = send_prefix(&bus, "general", "!wipescene").await;
    assert_eq!(message, "Cleared 1 tag(s) from **Default Scene**.");

    let listing = send_prefix(&bus, "general", "!tags").await;
    assert!(listing.contains("**Literal**"));
    assert!(!listing.contains("**Unscoped**"));
}

#[tokio::test]
async fn wipescene_with_scene_names_it_in_confirmation() {
    let bus = start_bus().await;
    send_prefix(&bus, "general", "!addtag One Cave").await;
    send_prefix(&bus, "general", "!addtag Two Cave").await;

    let message = send_prefix(&bus, "general", "!wipescene Cave").await;
    assert_eq!(message, "Cleared 2 tag(s) from **Cave**.");
}

#[tokio::test]
async fn both_transports_produce_identical_results() {
    let bus = start_bus().await;

    let from_prefix = prefix::parse_message("!", "!addtag Wounded cave goblin 3")
        .expect("parse")
        .expect("command");
    let from_slash = slash::translate(
        "addtag",
        &[
            slash::SlashOption::str("name", "Wounded"),
            slash::SlashOption::str("scene", "cave"),
            slash::SlashOption::str("npc", "goblin"),
            slash::SlashOption::int("level", 3),
        ],
    )
    .expect("translate");
    assert_eq!(from_prefix, from_slash);

    let first = bus
        .send(request("general", from_prefix))
        .await
        .expect("response");
    let second = bus
        .send(request("general", from_slash))
        .await
        .expect("response");
    assert_eq!(first.message, "Created tag:\n**Wounded** [Level: 3] (ID: 1)");
    assert_eq!(second.message, "Created tag:\n**Wounded** [Level: 3] (ID: 2)");
}

#[tokio::test]
async fn missing_prefix_argument_renders_its_name() {
    let error = prefix::parse_message("!", "!modstatuslevel 1").expect_err("missing level");
    assert_eq!(error.kind(), CommandErrorKind::MissingArgument);
    assert_eq!(
        prefix::render_error(&error).expect("rendered"),
        "Missing argument: `level`"
    );
}

#[tokio::test]
async fn unknown_prefix_command_stays_silent() {
    assert_eq!(prefix::parse_message("!", "!selfdestruct").expect("parse"), None);
    assert_eq!(prefix::parse_message("!", "plain chatter").expect("parse"), None);

    let error = slash::translate("selfdestruct", &[]).expect_err("unknown");
    assert_eq!(error.kind(), CommandErrorKind::UnknownCommand);
    assert_eq!(prefix::render_error(&error), None);
}
