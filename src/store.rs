// This file is part of the product SceneTag.
// SPDX-FileCopyrightText: 2026 SceneTag Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use log::debug;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::fmt;
use std::path::Path;

const MAX_POOL_CONNECTIONS: u32 = 5;

// AUTOINCREMENT keeps ids monotonic across deletes; a freed id is never handed out again.
const TAGS_SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS tags (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        channel TEXT NOT NULL,
        scene TEXT,
        npc TEXT,
        level INTEGER
    )
"#;

/// A named annotation scoped to a channel, optionally grouped by scene and
/// NPC, with an optional numeric level. `scene`, `npc` and `level` are
/// independently nullable; absence is meaningful ("default scene", a
/// story-level tag with no NPC), never an error.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub channel: String,
    pub scene: Option<String>,
    pub npc: Option<String>,
    pub level: Option<i64>,
}

#[derive(Debug)]
pub struct StoreError {
    message: String,
}

impl StoreError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::new(err.to_string())
    }
}

/// Partial update for a tag. `Some` sets a field, the `clear_*` flags
/// explicitly null one out; a field that is neither set nor cleared keeps
/// its prior value. Clears apply before sets.
#[derive(Debug, Clone, Default)]
pub struct TagPatch {
    pub name: Option<String>,
    pub channel: Option<String>,
    pub scene: Option<String>,
    pub npc: Option<String>,
    pub level: Option<i64>,
    pub clear_scene: bool,
    pub clear_npc: bool,
    pub clear_level: bool,
}

impl TagPatch {
    fn apply(self, mut tag: Tag) -> Tag {
        if self.clear_scene {
            tag.scene = None;
        }
        if self.clear_npc {
            tag.npc = None;
        }
        if self.clear_level {
            tag.level = None;
        }
        if let Some(name) = self.name {
            tag.name = name;
        }
        if let Some(channel) = self.channel {
            tag.channel = channel;
        }
        if let Some(scene) = self.scene {
            tag.scene = Some(scene);
        }
        if let Some(npc) = self.npc {
            tag.npc = Some(npc);
        }
        if let Some(level) = self.level {
            tag.level = Some(level);
        }
        tag
    }
}

pub struct TagStore {
    pool: SqlitePool,
}

impl TagStore {
    pub async fn open(path: &Path) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_POOL_CONNECTIONS)
            .connect_with(options)
            .await?;
        Self::init_schema(&pool).await?;
        Ok(Self { pool })
    }

    /// In-memory store for tests. A single pinned connection, because each
    /// SQLite `:memory:` connection is its own database.
    pub async fn open_in_memory() -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        Self::init_schema(&pool).await?;
        Ok(Self { pool })
    }

    async fn init_schema(pool: &SqlitePool) -> Result<(), StoreError> {
        sqlx::query(TAGS_SCHEMA).execute(pool).await?;
        Ok(())
    }

    /// Creates a tag and returns the persisted record. No uniqueness
    /// constraint on name.
    pub async fn create(
        &self,
        name: &str,
        channel: &str,
        scene: Option<&str>,
        npc: Option<&str>,
        level: Option<i64>,
    ) -> Result<Tag, StoreError> {
        let result = sqlx::query(
            "INSERT INTO tags (name, channel, scene, npc, level) VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(name)
        .bind(channel)
        .bind(scene)
        .bind(npc)
        .bind(level)
        .execute(&self.pool)
        .await?;
        let id = result.last_insert_rowid();
        debug!("Created tag {} in channel '{}'", id, channel);
        Ok(Tag {
            id,
            name: name.to_string(),
            channel: channel.to_string(),
            scene: scene.map(str::to_string),
            npc: npc.map(str::to_string),
            level,
        })
    }

    pub async fn get(&self, id: i64) -> Result<Option<Tag>, StoreError> {
        let tag = sqlx::query_as::<_, Tag>(
            "SELECT id, name, channel, scene, npc, level FROM tags WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(tag)
    }

    /// All tags for a channel in storage order. Callers that group for
    /// display rely on this order, so it stays `ORDER BY id`.
    pub async fn list_by_channel(&self, channel: &str) -> Result<Vec<Tag>, StoreError> {
        let tags = sqlx::query_as::<_, Tag>(
            "SELECT id, name, channel, scene, npc, level FROM tags WHERE channel = ?1 ORDER BY id",
        )
        .bind(channel)
        .fetch_all(&self.pool)
        .await?;
        Ok(tags)
    }

    /// Applies a partial update and returns the updated record, or `None`
    /// when the id does not exist. No validation beyond what create
    /// enforces.
    pub async fn update(&self, id: i64, patch: TagPatch) -> Result<Option<Tag>, StoreError> {
        let existing = match self.get(id).await? {
            Some(tag) => tag,
            None => return Ok(None),
        };
        let updated = patch.apply(existing);
        sqlx::query(
            "UPDATE tags SET name = ?1, channel = ?2, scene = ?3, npc = ?4, level = ?5 WHERE id = ?6",
        )
        .bind(&updated.name)
        .bind(&updated.channel)
        .bind(updated.scene.as_deref())
        .bind(updated.npc.as_deref())
        .bind(updated.level)
        .bind(id)
        .execute(&self.pool)
        .await?;
        debug!("Updated tag {}", id);
        Ok(Some(updated))
    }

    /// Returns true iff a record existed and was removed.
    pub async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM tags WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Bulk delete for a (channel, scene) pair; returns the removed count.
    /// `None` targets rows whose scene is unset (SQL NULL), never rows
    /// whose scene equals any literal string.
    pub async fn delete_by_scene(
        &self,
        channel: &str,
        scene: Option<&str>,
    ) -> Result<u64, StoreError> {
        let result = match scene {
            Some(scene) => {
                sqlx::query("DELETE FROM tags WHERE channel = ?1 AND scene = ?2")
                    .bind(channel)
                    .bind(scene)
                    .execute(&self.pool)
                    .await?
            }
            None => {
                sqlx::query("DELETE FROM tags WHERE channel = ?1 AND scene IS NULL")
                    .bind(channel)
                    .execute(&self.pool)
                    .await?
            }
        };
        debug!(
            "Cleared {} tag(s) from channel '{}'",
            result.rows_affected(),
            channel
        );
        Ok(result.rows_affected())
    }

    /// Administrative/debug listing across all channels.
    pub async fn list_all(&self) -> Result<Vec<Tag>, StoreError> {
        let tags = sqlx::query_as::<_, Tag>(
            "SELECT id, name, channel, scene, npc, level FROM tags ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(tags)
    }
}
