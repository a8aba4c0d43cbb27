use crate::domain::{ChatRole, ChatTurn};
use crate::error::BotError;

/// Visible messages plus the position inside the fixed script.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    turns: Vec<ChatTurn>,
    script: Vec<ChatTurn>,
    revealed: usize,
}

impl Transcript {
    /// Starts with the first script turn visible.
    pub fn new(script: Vec<ChatTurn>) -> Self {
        let mut transcript = Self {
            turns: Vec::new(),
            script,
            revealed: 0,
        };
        transcript.advance_script();
        transcript
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn script_exhausted(&self) -> bool {
        self.revealed >= self.script.len()
    }

    /// Appends the next script turn, if any is left.
    pub fn advance_script(&mut self) -> bool {
        match self.script.get(self.revealed) {
            Some(turn) => {
                self.turns.push(turn.clone());
                self.revealed += 1;
                true
            }
            None => false,
        }
    }

    /// Buttons of the most recent message.
    pub fn current_keyboard(&self) -> &[String] {
        self.turns.last().map(|t| t.keyboard.as_slice()).unwrap_or(&[])
    }

    /// Appends the user's choice. The label must be on the current keyboard.
    pub fn press(&mut self, label: &str, timestamp: impl Into<String>) -> Result<(), BotError> {
        if !self.current_keyboard().iter().any(|b| b == label) {
            return Err(BotError::UnknownButton(label.to_string()));
        }
        self.turns.push(ChatTurn::user(label, timestamp));
        Ok(())
    }

    pub fn push_bot(&mut self, turn: ChatTurn) {
        debug_assert_eq!(turn.role, ChatRole::Bot);
        self.turns.push(turn);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot_preview::{canned_reply, demo_script, MAIN_MENU};

    #[test]
    fn replay_reveals_one_turn_at_a_time_until_exhausted() {
        let mut transcript = Transcript::new(demo_script());
        assert_eq!(transcript.turns().len(), 1);
        while transcript.advance_script() {}
        assert_eq!(transcript.turns().len(), 5);
        assert!(transcript.script_exhausted());
        assert!(!transcript.advance_script());
    }

    #[test]
    fn pressing_unknown_button_is_rejected() {
        let mut transcript = Transcript::new(demo_script());
        let result = transcript.press("🎧 Аудиотехника", "10:40");
        assert_eq!(result, Err(BotError::UnknownButton("🎧 Аудиотехника".to_string())));
        assert_eq!(transcript.turns().len(), 1);
    }

    #[test]
    fn user_turn_hides_keyboard_until_bot_answers() {
        let mut transcript = Transcript::new(demo_script());
        transcript.press("ℹ️ Помощь", "10:40").unwrap();
        assert!(transcript.current_keyboard().is_empty());

        transcript.push_bot(canned_reply("ℹ️ Помощь", "10:40"));
        assert!(transcript.current_keyboard().iter().any(|b| b == MAIN_MENU));
    }

    #[test]
    fn empty_script_has_no_keyboard() {
        let transcript = Transcript::new(Vec::new());
        assert!(transcript.turns().is_empty());
        assert!(transcript.current_keyboard().is_empty());
        assert!(transcript.script_exhausted());
    }
}
