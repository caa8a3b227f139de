//! Telegram long-polling loop.
//!
//! Receives updates through the teloxide dispatcher, hands them to
//! [`TelegramHandler`] and performs the resulting [`Outgoing`] effects.

use std::sync::Arc;

use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{BotCommand, FileMeta, InlineKeyboardMarkup, MessageId};
use tracing::{error, info, warn};

use super::command::bot_commands;
use super::format;
use super::handler::{Outgoing, TelegramHandler};
use crate::domain::TelegramId;
use crate::error::{Error, Result};

/// Run the bot until Ctrl-C.
pub async fn run_bot(bot: Bot, handler: Arc<TelegramHandler>) -> Result<()> {
    if let Err(e) = register_bot_commands(&bot).await {
        warn!(error = %e, "Failed to register bot commands with Telegram");
    }

    let me = bot.get_me().await?;
    info!(username = %me.username(), "Telegram bot started");

    let tree = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_callback));

    Dispatcher::builder(bot, tree)
        .dependencies(dptree::deps![handler])
        .default_handler(|_| async {})
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Telegram bot stopped");
    Ok(())
}

/// Register bot commands with Telegram for the "/" menu.
async fn register_bot_commands(bot: &Bot) -> std::result::Result<(), teloxide::RequestError> {
    let commands: Vec<BotCommand> = bot_commands()
        .into_iter()
        .map(|(cmd, desc)| BotCommand::new(cmd, desc))
        .collect();

    bot.set_my_commands(commands).await?;
    info!("Registered bot commands with Telegram");
    Ok(())
}

async fn on_message(bot: Bot, msg: Message, handler: Arc<TelegramHandler>) -> ResponseResult<()> {
    let Some(from) = msg.from.as_ref() else {
        return Ok(());
    };
    let user = TelegramId::new(ChatId::from(from.id).0);
    if !handler.is_authorized(user) {
        return Ok(());
    }
    let chat = msg.chat.id;

    let outgoing = if let Some(voice) = msg.voice() {
        let placeholder = bot.send_message(chat, format::PROCESSING).await?;
        info!(user_id = user.get(), bytes = voice.file.size, "Voice note received");
        match download(&bot, &voice.file).await {
            Ok(audio) => handler.handle_voice(user, placeholder.id, audio).await,
            Err(e) => {
                error!(error = %e, "Failed to download voice note");
                vec![Outgoing::Edit {
                    message_id: placeholder.id,
                    text: format::processing_failed(&e.to_string()),
                    keyboard: None,
                }]
            }
        }
    } else if let Some(text) = msg.text() {
        handler.handle_text(chat, user, text).await
    } else {
        Vec::new()
    };

    deliver(&bot, chat, None, outgoing).await;
    Ok(())
}

async fn on_callback(
    bot: Bot,
    query: CallbackQuery,
    handler: Arc<TelegramHandler>,
) -> ResponseResult<()> {
    let user = TelegramId::new(ChatId::from(query.from.id).0);
    if !handler.is_authorized(user) {
        bot.answer_callback_query(query.id.clone()).await?;
        return Ok(());
    }

    let message = query.message.as_ref();
    let chat = message.map_or_else(|| ChatId::from(query.from.id), |m| m.chat().id);
    let message_id = message.map(|m| m.id());
    let data = query.data.as_deref().unwrap_or_default();

    let outgoing = handler.handle_callback(chat, user, message_id, data).await;
    deliver(&bot, chat, Some(&query), outgoing).await;
    Ok(())
}

async fn download(bot: &Bot, meta: &FileMeta) -> Result<Vec<u8>> {
    let file = bot.get_file(meta.id.clone()).await?;
    let mut audio = Vec::with_capacity(file.size as usize);
    bot.download_file(&file.path, &mut audio)
        .await
        .map_err(|e| Error::Connection(format!("voice download failed: {e}")))?;
    Ok(audio)
}

/// Perform effects in order. Failures are logged and skipped.
async fn deliver(
    bot: &Bot,
    chat: ChatId,
    callback: Option<&CallbackQuery>,
    outgoing: Vec<Outgoing>,
) {
    for effect in outgoing {
        let result = match effect {
            Outgoing::Send { text, keyboard } => send(bot, chat, text, keyboard).await,
            Outgoing::Edit {
                message_id,
                text,
                keyboard,
            } => edit(bot, chat, message_id, text, keyboard).await,
            Outgoing::Delete { message_id } => {
                bot.delete_message(chat, message_id).await.map(|_| ())
            }
            Outgoing::Answer { text, alert } => match callback {
                Some(query) => {
                    let mut request = bot.answer_callback_query(query.id.clone()).show_alert(alert);
                    if let Some(text) = text {
                        request = request.text(text);
                    }
                    request.await.map(|_| ())
                }
                None => Ok(()),
            },
        };
        if let Err(e) = result {
            error!(error = %e, chat_id = chat.0, "Failed to deliver Telegram reply");
        }
    }
}

async fn send(
    bot: &Bot,
    chat: ChatId,
    text: String,
    keyboard: Option<InlineKeyboardMarkup>,
) -> ResponseResult<()> {
    let mut request = bot.send_message(chat, text);
    if let Some(keyboard) = keyboard {
        request = request.reply_markup(keyboard);
    }
    request.await.map(|_| ())
}

async fn edit(
    bot: &Bot,
    chat: ChatId,
    message_id: MessageId,
    text: String,
    keyboard: Option<InlineKeyboardMarkup>,
) -> ResponseResult<()> {
    let mut request = bot.edit_message_text(chat, message_id, text);
    if let Some(keyboard) = keyboard {
        request = request.reply_markup(keyboard);
    }
    request.await.map(|_| ())
}
