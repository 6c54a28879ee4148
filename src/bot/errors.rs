// This file is part of the product SceneTag.
// SPDX-FileCopyrightText: 2026 SceneTag Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandErrorKind {
    /// The id does not resolve to a record. User-facing, not a fault.
    NotFound,
    /// A required command argument is absent; the message carries the
    /// argument name.
    MissingArgument,
    /// An argument failed shape or limit checks.
    Validation,
    /// The backing store is unreachable or erroring.
    Storage,
    /// Not a command this bot knows. Never surfaced to the user.
    UnknownCommand,
    Internal,
}

#[derive(Debug, Clone)]
pub struct CommandError {
    kind: CommandErrorKind,
    message: String,
}

impl CommandError {
    pub fn new(kind: CommandErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// `name` is the missing argument's name, rendered verbatim by the
    /// transports.
    pub fn missing_argument(name: impl Into<String>) -> Self {
        Self::new(CommandErrorKind::MissingArgument, name)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(CommandErrorKind::Validation, message)
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(CommandErrorKind::Storage, message)
    }

    pub fn unknown_command(name: impl Into<String>) -> Self {
        Self::new(CommandErrorKind::UnknownCommand, name)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(CommandErrorKind::Internal, message)
    }

    pub fn kind(&self) -> CommandErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} error: {}", self.kind, self.message)
    }
}

impl Error for CommandError {}
