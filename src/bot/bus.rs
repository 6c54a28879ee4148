// This file is part of the product SceneTag.
// SPDX-FileCopyrightText: 2026 SceneTag Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::bot::core::{BotContext, CommandRequest, CommandResponse};
use crate::bot::errors::CommandError;
use crate::bot::tags;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

const BUS_CHANNEL_DEPTH: usize = 64;

/// Serializes command dispatch: transports send a request and await the
/// single response. One task owns the context; conflicting writes are
/// left to the store to order.
#[derive(Clone)]
pub struct CommandBus {
    sender: mpsc::Sender<BusMessage>,
}

struct BusMessage {
    request: CommandRequest,
    reply: oneshot::Sender<CommandResponse>,
}

impl CommandBus {
    pub fn start(context: BotContext) -> Self {
        let (sender, mut receiver) = mpsc::channel::<BusMessage>(BUS_CHANNEL_DEPTH);
        let context = Arc::new(context);

        tokio::spawn(async move {
            while let Some(message) = receiver.recv().await {
                let response = tags::handle_request(message.request, &context).await;
                let _ = message.reply.send(response);
            }
        });

        Self { sender }
    }

    pub async fn send(&self, request: CommandRequest) -> Result<CommandResponse, CommandError> {
        request.validate()?;
        let (reply_tx, reply_rx) = oneshot::channel();
        let message = BusMessage {
            request,
            reply: reply_tx,
        };

        self.sender
            .send(message)
            .await
            .map_err(|_| CommandError::internal("Command bus is unavailable"))?;

        reply_rx
            .await
            .map_err(|_| CommandError::internal("Command bus dropped response"))
    }
}
