use chrono::Local;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    Bot,
    User,
}

/// One message in the bot preview transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
    /// Wall-clock time as `HH:MM`.
    pub timestamp: String,
    /// Reply buttons offered under this message.
    pub keyboard: Vec<String>,
}

impl ChatTurn {
    pub fn bot(text: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Bot,
            text: text.into(),
            timestamp: timestamp.into(),
            keyboard: Vec::new(),
        }
    }

    pub fn user(text: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
            timestamp: timestamp.into(),
            keyboard: Vec::new(),
        }
    }

    pub fn with_keyboard<I, S>(mut self, buttons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keyboard = buttons.into_iter().map(Into::into).collect();
        self
    }
}

pub fn clock_now() -> String {
    Local::now().format("%H:%M").to_string()
}
