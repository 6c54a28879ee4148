// This file is part of the product SceneTag.
// SPDX-FileCopyrightText: 2026 SceneTag Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::store::Tag;
use indexmap::IndexMap;

/// Display label for tags with no NPC. Never stored.
pub const STORY_TAGS_LABEL: &str = "Story Tags";

/// One line per tag: name, `[Level: L]` when set, `(ID: id)`. The NPC is
/// not repeated here; it appears in the listing sub-heading.
pub fn format_tag(tag: &Tag) -> String {
    let mut parts = vec![format!("**{}**", tag.name)];
    if let Some(level) = tag.level {
        parts.push(format!("[Level: {}]", level));
    }
    parts.push(format!("(ID: {})", tag.id));
    parts.join(" ")
}

/// Grouped channel listing. Scene groups keep the first-seen order of the
/// input (which is the store's `ORDER BY id`); the label for an unset
/// scene is the channel's own name. Within a scene, the "Story Tags"
/// sub-group sorts first, remaining NPC names ascend lexically, and tags
/// inside a sub-group stay in input order.
pub fn format_tags_by_scene(tags: &[Tag], channel_name: &str) -> String {
    let mut by_scene: IndexMap<String, IndexMap<String, Vec<&Tag>>> = IndexMap::new();
    for tag in tags {
        let scene_name = tag
            .scene
            .clone()
            .unwrap_or_else(|| channel_name.to_string());
        let npc_name = tag
            .npc
            .clone()
            .unwrap_or_else(|| STORY_TAGS_LABEL.to_string());
        by_scene
            .entry(scene_name)
            .or_default()
            .entry(npc_name)
            .or_default()
            .push(tag);
    }

    let mut sections = Vec::with_capacity(by_scene.len());
    for (scene_name, npcs) in &by_scene {
        let mut npc_names: Vec<&String> = npcs.keys().collect();
        npc_names.sort_by(|a, b| {
            let left = (a.as_str() != STORY_TAGS_LABEL, a.as_str());
            let right = (b.as_str() != STORY_TAGS_LABEL, b.as_str());
            left.cmp(&right)
        });

        let mut npc_sections = Vec::with_capacity(npc_names.len());
        for npc_name in npc_names {
            let mut lines = vec![format!("\t**{}**", npc_name)];
            for tag in &npcs[npc_name] {
                lines.push(format!("\t\t{}", format_tag(tag)));
            }
            npc_sections.push(lines.join("\n"));
        }
        sections.push(format!(
            "__**{}**__\n{}",
            scene_name,
            npc_sections.join("\n")
        ));
    }

    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(id: i64, name: &str, scene: Option<&str>, npc: Option<&str>, level: Option<i64>) -> Tag {
        Tag {
            id,
            name: name.to_string(),
            channel: "general".to_string(),
            scene: scene.map(str::to_string),
            npc: npc.map(str::to_string),
            level,
        }
    }

    #[test]
    fn level_segment_present_only_when_set() {
        assert_eq!(
            format_tag(&tag(3, "Wounded", None, None, Some(5))),
            "**Wounded** [Level: 5] (ID: 3)"
        );
        assert_eq!(
            format_tag(&tag(3, "Wounded", None, None, None)),
            "**Wounded** (ID: 3)"
        );
    }

    #[test]
    fn groups_by_scene_then_npc_with_story_tags_first() {
        let tags = vec![
            tag(1, "A", None, None, None),
            tag(2, "B", None, Some("Bob"), None),
            tag(3, "C", Some("Cave"), None, None),
        ];
        let rendered = format_tags_by_scene(&tags, "general");
        let expected = "__**general**__\n\
                        \t**Story Tags**\n\
                        \t\t**A** (ID: 1)\n\
                        \t**Bob**\n\
                        \t\t**B** (ID: 2)\n\
                        \n\
                        __**Cave**__\n\
                        \t**Story Tags**\n\
                        \t\t**C** (ID: 3)";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn scene_groups_follow_first_seen_order_not_lexical() {
        let tags = vec![
            tag(1, "Z", Some("Zoo"), None, None),
            tag(2, "A", Some("Attic"), None, None),
        ];
        let rendered = format_tags_by_scene(&tags, "general");
        let zoo = rendered.find("__**Zoo**__").expect("Zoo section");
        let attic = rendered.find("__**Attic**__").expect("Attic section");
        assert!(zoo < attic);
    }

    #[test]
    fn npc_names_sort_lexically_after_story_tags() {
        let tags = vec![
            tag(1, "One", None, Some("Zed"), None),
            tag(2, "Two", None, Some("Anna"), None),
            tag(3, "Three", None, None, None),
        ];
        let rendered = format_tags_by_scene(&tags, "general");
        let story = rendered.find("**Story Tags**").expect("story");
        let anna = rendered.find("**Anna**").expect("anna");
        let zed = rendered.find("**Zed**").expect("zed");
        assert!(story < anna);
        assert!(anna < zed);
    }

    #[test]
    fn shared_subgroup_keeps_input_order() {
        let tags = vec![
            tag(1, "First", Some("Cave"), Some("Goblin"), None),
            tag(2, "Second", Some("Cave"), Some("Goblin"), None),
        ];
        let rendered = format_tags_by_scene(&tags, "general");
        let expected = "__**Cave**__\n\
                        \t**Goblin**\n\
                        \t\t**First** (ID: 1)\n\
                        \t\t**Second** (ID: 2)";
        assert_eq!(rendered, expected);
    }
}
