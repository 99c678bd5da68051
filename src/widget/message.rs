//! Transcript messages.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Who authored a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    /// CSS-ish tag used for the message container (`user-message`, `bot-message`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Bot => "bot",
        }
    }
}

/// A single rendered transcript entry.
///
/// Messages are immutable once created; the transcript only ever appends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub sender: Sender,
    pub is_error: bool,
    /// Local hour:minute at creation time, e.g. `14:05`.
    pub timestamp: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Sender::User, false)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(text, Sender::Bot, false)
    }

    pub fn bot_error(text: impl Into<String>) -> Self {
        Self::new(text, Sender::Bot, true)
    }

    fn new(text: impl Into<String>, sender: Sender, is_error: bool) -> Self {
        Self::at(text, sender, is_error, Local::now())
    }

    /// Create a message stamped with an explicit time.
    pub fn at(
        text: impl Into<String>,
        sender: Sender,
        is_error: bool,
        time: DateTime<Local>,
    ) -> Self {
        Self {
            text: text.into(),
            sender,
            is_error,
            timestamp: format_time_of_day(time),
        }
    }
}

/// Two-digit hour and minute.
pub fn format_time_of_day(time: DateTime<Local>) -> String {
    time.format("%H:%M").to_string()
}
