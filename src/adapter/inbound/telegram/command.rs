//! Telegram command parsing.

/// Supported Telegram commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TelegramCommand {
    Start,
    Help,
    Today,
    History,
    Stats,
    /// `/exercise <name>`; `None` lists the user's exercises.
    Exercise(Option<String>),
    Cancel,
}

/// Parse error for Telegram command messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    NotACommand,
    UnknownCommand(String),
}

impl std::fmt::Display for CommandParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotACommand => write!(f, "message is not a command"),
            Self::UnknownCommand(cmd) => write!(f, "неизвестная команда `{cmd}`"),
        }
    }
}

impl std::error::Error for CommandParseError {}

/// Parse a Telegram message into a bot command.
pub fn parse_command(text: &str) -> Result<TelegramCommand, CommandParseError> {
    let text = text.trim_start();
    let (raw_command, rest) = text
        .split_once(char::is_whitespace)
        .map_or((text, ""), |(head, tail)| (head, tail.trim()));
    if !raw_command.starts_with('/') {
        return Err(CommandParseError::NotACommand);
    }

    let command = raw_command
        .split_once('@')
        .map_or(raw_command, |(head, _)| head);

    match command {
        "/start" => Ok(TelegramCommand::Start),
        "/help" => Ok(TelegramCommand::Help),
        "/today" => Ok(TelegramCommand::Today),
        "/history" => Ok(TelegramCommand::History),
        "/stats" => Ok(TelegramCommand::Stats),
        "/exercise" => Ok(TelegramCommand::Exercise(
            (!rest.is_empty()).then(|| rest.to_string()),
        )),
        "/cancel" => Ok(TelegramCommand::Cancel),
        other => Err(CommandParseError::UnknownCommand(other.to_string())),
    }
}

/// Greeting and help text returned by `/start` and `/help`.
#[must_use]
pub const fn command_help() -> &'static str {
    "👋 Привет! Я бот для логирования тренировок.\n\n\
    🎤 Отправь мне голосовое сообщение с описанием упражнения, и я запишу его в дневник.\n\n\
    Примеры:\n\
    • «присед 60 кг на 6 раз»\n\
    • «жим лёжа 80 на 5, тяжело»\n\
    • «подтягивания широким хватом 8 раз»\n\n\
    📝 Команды:\n\
    /today — текущая тренировка\n\
    /history — история тренировок\n\
    /stats — статистика\n\
    /exercise <название> — история упражнения\n\n\
    💡 После записи можно исправить любое поле кнопками."
}

/// Bot commands for Telegram menu registration.
///
/// Returns tuples of (command, description) for `set_my_commands`.
#[must_use]
pub fn bot_commands() -> Vec<(&'static str, &'static str)> {
    vec![
        ("today", "Текущая тренировка"),
        ("history", "История тренировок"),
        ("stats", "Статистика"),
        ("exercise", "История упражнения"),
        ("cancel", "Отменить редактирование"),
        ("help", "Справка"),
    ]
}
