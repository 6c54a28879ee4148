// This file is part of the product SceneTag.
// SPDX-FileCopyrightText: 2026 SceneTag Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

pub mod bus;
pub mod core;
pub mod errors;
pub mod format;
pub mod prefix;
pub mod slash;
mod tags;

pub use self::bus::CommandBus;
pub use self::core::{BotCommand, BotContext, CommandRequest, CommandResponse};
pub use self::errors::{CommandError, CommandErrorKind};
