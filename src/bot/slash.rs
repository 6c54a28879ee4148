// This file is part of the product SceneTag.
// SPDX-FileCopyrightText: 2026 SceneTag Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

//! Slash-style transport. The gateway delivers a command name plus typed
//! named options; `translate` turns that shape into the internal command
//! type, and `command_descriptors` is the table a gateway registers with
//! the chat platform.

use crate::bot::core::{
    BotCommand, PingRequest, SceneClearRequest, TagAddRequest, TagDeleteRequest, TagListRequest,
    TagRenameRequest, TagSetLevelRequest, TagShowRequest,
};
use crate::bot::errors::CommandError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Str(String),
    Int(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlashOption {
    pub name: String,
    pub value: OptionValue,
}

impl SlashOption {
    pub fn str(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: OptionValue::Str(value.into()),
        }
    }

    pub fn int(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value: OptionValue::Int(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Str,
    Int,
}

pub struct SlashOptionSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: OptionKind,
    pub required: bool,
}

pub struct SlashCommandSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub options: &'static [SlashOptionSpec],
}

/// Registration table for the gateway. Names and option metadata match
/// the prefix surface command for command.
pub fn command_descriptors() -> &'static [SlashCommandSpec] {
    &[
        SlashCommandSpec {
            name: "ping",
            description: "Check bot latency",
            options: &[],
        },
        SlashCommandSpec {
            name: "addtag",
            description: "Create a new tag",
            options: &[
                SlashOptionSpec {
                    name: "name",
                    description: "Tag name",
                    kind: OptionKind::Str,
                    required: true,
                },
                SlashOptionSpec {
                    name: "scene",
                    description: "Scene name (optional)",
                    kind: OptionKind::Str,
                    required: false,
                },
                SlashOptionSpec {
                    name: "npc",
                    description: "NPC name (optional)",
                    kind: OptionKind::Str,
                    required: false,
                },
                SlashOptionSpec {
                    name: "level",
                    description: "Level (optional)",
                    kind: OptionKind::Int,
                    required: false,
                },
            ],
        },
        SlashCommandSpec {
            name: "tags",
            description: "List all tags in this channel",
            options: &[],
        },
        SlashCommandSpec {
            name: "tag",
            description: "Get a specific tag by ID",
            options: &[SlashOptionSpec {
                name: "tag_id",
                description: "The tag ID to retrieve",
                kind: OptionKind::Int,
                required: true,
            }],
        },
        SlashCommandSpec {
            name: "deltag",
            description: "Delete a tag by ID",
            options: &[SlashOptionSpec {
                name: "tag_id",
                description: "The tag ID to delete",
                kind: OptionKind::Int,
                required: true,
            }],
        },
        SlashCommandSpec {
            name: "modstatuslevel",
            description: "Update a tag's level",
            options: &[
                SlashOptionSpec {
                    name: "tag_id",
                    description: "The tag ID to update",
                    kind: OptionKind::Int,
                    required: true,
                },
                SlashOptionSpec {
                    name: "level",
                    description: "New level value",
                    kind: OptionKind::Int,
                    required: true,
                },
            ],
        },
        SlashCommandSpec {
            name: "modtagname",
            description: "Update a tag's name",
            options: &[
                SlashOptionSpec {
                    name: "tag_id",
                    description: "The tag ID to update",
                    kind: OptionKind::Int,
                    required: true,
                },
                SlashOptionSpec {
                    name: "name",
                    description: "New name",
                    kind: OptionKind::Str,
                    required: true,
                },
            ],
        },
        SlashCommandSpec {
            name: "clearscene",
            description: "Clear all tags for a scene in this channel",
            options: &[SlashOptionSpec {
                name: "scene",
                description: "Scene name (leave empty for default scene)",
                kind: OptionKind::Str,
                required: false,
            }],
        },
    ]
}

/// Translates a slash invocation into the internal command type.
pub fn translate(name: &str, options: &[SlashOption]) -> Result<BotCommand, CommandError> {
    match name {
        "ping" => Ok(BotCommand::Ping(PingRequest {})),
        "addtag" => Ok(BotCommand::AddTag(TagAddRequest {
            name: required_str(options, "name")?,
            scene: optional_str(options, "scene")?,
            npc: optional_str(options, "npc")?,
            level: optional_int(options, "level")?,
        })),
        "tags" => Ok(BotCommand::ListTags(TagListRequest {})),
        "tag" => Ok(BotCommand::ShowTag(TagShowRequest {
            id: required_int(options, "tag_id")?,
        })),
        "deltag" => Ok(BotCommand::DeleteTag(TagDeleteRequest {
            id: required_int(options, "tag_id")?,
        })),
        "modstatuslevel" => Ok(BotCommand::SetLevel(TagSetLevelRequest {
            id: required_int(options, "tag_id")?,
            level: required_int(options, "level")?,
        })),
        "modtagname" => Ok(BotCommand::Rename(TagRenameRequest {
            id: required_int(options, "tag_id")?,
            name: required_str(options, "name")?,
        })),
        "clearscene" => Ok(BotCommand::ClearScene(SceneClearRequest {
            scene: optional_str(options, "scene")?,
        })),
        other => Err(CommandError::unknown_command(other)),
    }
}

fn find<'a>(options: &'a [SlashOption], name: &str) -> Option<&'a OptionValue> {
    options
        .iter()
        .find(|option| option.name == name)
        .map(|option| &option.value)
}

fn required_str(options: &[SlashOption], name: &str) -> Result<String, CommandError> {
    optional_str(options, name)?.ok_or_else(|| CommandError::missing_argument(name))
}

fn optional_str(options: &[SlashOption], name: &str) -> Result<Option<String>, CommandError> {
    match find(options, name) {
        Some(OptionValue::Str(value)) => Ok(Some(value.clone())),
        Some(OptionValue::Int(_)) => Err(CommandError::validation(format!(
            "`{}` must be a string",
            name
        ))),
        None => Ok(None),
    }
}

fn required_int(options: &[SlashOption], name: &str) -> Result<i64, CommandError> {
    optional_int(options, name)?.ok_or_else(|| CommandError::missing_argument(name))
}

fn optional_int(options: &[SlashOption], name: &str) -> Result<Option<i64>, CommandError> {
    match find(options, name) {
        Some(OptionValue::Int(value)) => Ok(Some(*value)),
        Some(OptionValue::Str(_)) => Err(CommandError::validation(format!(
            "`{}` must be an integer",
            name
        ))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::errors::CommandErrorKind;

    #[test]
    fn addtag_translates_typed_options() {
        let command = translate(
            "addtag",
            &[
                SlashOption::str("name", "Wounded"),
                SlashOption::str("npc", "goblin"),
                SlashOption::int("level", 3),
            ],
        )
        .expect("translate");
        assert_eq!(
            command,
            BotCommand::AddTag(TagAddRequest {
                name: "Wounded".to_string(),
                scene: None,
                npc: Some("goblin".to_string()),
                level: Some(3),
            })
        );
    }

    #[test]
    fn missing_required_option_is_reported_by_name() {
        let error = translate("deltag", &[]).expect_err("missing tag_id");
        assert_eq!(error.kind(), CommandErrorKind::MissingArgument);
        assert_eq!(error.message(), "tag_id");
    }

    #[test]
    fn wrong_option_type_is_a_validation_error() {
        let error =
            translate("tag", &[SlashOption::str("tag_id", "7")]).expect_err("wrong type");
        assert_eq!(error.kind(), CommandErrorKind::Validation);
    }

    #[test]
    fn unknown_slash_command_is_flagged() {
        let error = translate("frobnicate", &[]).expect_err("unknown");
        assert_eq!(error.kind(), CommandErrorKind::UnknownCommand);
    }

    #[test]
    fn clearscene_without_scene_targets_default() {
        let command = translate("clearscene", &[]).expect("translate");
        assert_eq!(
            command,
            BotCommand::ClearScene(SceneClearRequest { scene: None })
        );
    }

    #[test]
    fn descriptor_names_cover_the_whole_surface() {
        let names: Vec<&str> = command_descriptors()
            .iter()
            .map(|spec| spec.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "ping",
                "addtag",
                "tags",
                "tag",
                "deltag",
                "modstatuslevel",
                "modtagname",
                "clearscene"
            ]
        );
        for spec in command_descriptors() {
            assert!(translate(spec.name, &sample_options(spec)).is_ok());
        }
    }

    fn sample_options(spec: &SlashCommandSpec) -> Vec<SlashOption> {
        spec.options
            .iter()
            .map(|option| match option.kind {
                OptionKind::Str => SlashOption::str(option.name, "sample"),
                OptionKind::Int => SlashOption::int(option.name, 1),
            })
            .collect()
    }
}
