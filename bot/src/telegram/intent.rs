use teloxide::utils::command::BotCommands;

use session::ChatId;

/// Inbound event handed to the router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// `/start`.
    Greet { chat_id: ChatId },
    /// Any non-command text: button labels and onboarding answers.
    Text { chat_id: ChatId, text: String },
}

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    Start,
}

/// Maps message text to an intent. `bot_username` lets `/start@name`
/// through only when addressed to this bot; other commands yield `None`.
pub fn intent_from_text(chat_id: ChatId, text: &str, bot_username: &str) -> Option<Intent> {
    if text.starts_with('/') {
        return match Command::parse(text, bot_username) {
            Ok(Command::Start) => Some(Intent::Greet { chat_id }),
            Err(_) => None,
        };
    }

    Some(Intent::Text {
        chat_id,
        text: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ME: &str = "pump_bot";

    #[test]
    fn start_command_is_greet() {
        assert_eq!(intent_from_text(42, "/start", ME), Some(Intent::Greet { chat_id: 42 }));
        assert_eq!(
            intent_from_text(42, "/start@pump_bot", ME),
            Some(Intent::Greet { chat_id: 42 })
        );
    }

    #[test]
    fn start_for_another_bot_is_dropped() {
        assert_eq!(intent_from_text(42, "/start@other_bot", ME), None);
    }

    #[test]
    fn plain_text_is_forwarded() {
        assert_eq!(
            intent_from_text(-100, "Отчёт", ME),
            Some(Intent::Text {
                chat_id: -100,
                text: "Отчёт".into()
            })
        );
    }

    #[test]
    fn other_commands_are_dropped() {
        assert_eq!(intent_from_text(1, "/help", ME), None);
    }
}
