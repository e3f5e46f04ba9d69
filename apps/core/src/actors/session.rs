//! Per-session chat state held by the agent actor.

use std::collections::VecDeque;

use crate::actors::messages::HistoryEntry;
use crate::brain::analysis::Turn;
use crate::mode::{Mode, Transition};

/// Mode, context flag and bounded history of one conversation.
#[derive(Debug, Clone)]
pub struct ChatSession {
    mode: Mode,
    persistent_context: bool,
    history: VecDeque<Turn>,
    history_limit: usize,
}

impl ChatSession {
    /// New session in normal mode with persistent context on.
    pub fn new(history_limit: usize) -> Self {
        Self {
            mode: Mode::Normal,
            persistent_context: true,
            history: VecDeque::with_capacity(history_limit),
            history_limit,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn persistent_context(&self) -> bool {
        self.persistent_context
    }

    pub fn set_persistent_context(&mut self, enabled: bool) {
        self.persistent_context = enabled;
    }

    /// Switch mode. Without persistent context a new mode starts a fresh
    /// conversation.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode != self.mode && !self.persistent_context {
            self.history.clear();
        }
        self.mode = mode;
    }

    /// Adopt the outcome of the transition table.
    pub fn apply(&mut self, transition: &Transition) {
        self.set_mode(transition.to);
    }

    /// Record a turn, evicting the oldest beyond the limit.
    pub fn push(&mut self, turn: Turn) {
        while self.history.len() >= self.history_limit.max(1) {
            self.history.pop_front();
        }
        self.history.push_back(turn);
    }

    pub fn history(&self) -> Vec<Turn> {
        self.history.iter().cloned().collect()
    }

    pub fn history_entries(&self) -> Vec<HistoryEntry> {
        self.history.iter().map(HistoryEntry::from).collect()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::analysis::Role;

    #[test]
    fn test_history_is_bounded() {
        let mut session = ChatSession::new(3);
        for i in 0..5 {
            session.push(Turn::user(format!("m{}", i)));
        }

        let contents: Vec<String> = session.history().into_iter().map(|t| t.content).collect();
        assert_eq!(contents, vec!["m2", "m3", "m4"]);
    }

    #[test]
    fn test_mode_change_keeps_history_with_persistent_context() {
        let mut session = ChatSession::new(7);
        session.push(Turn::user("hola"));
        session.set_mode(Mode::PromptAuthoring);

        assert_eq!(session.mode(), Mode::PromptAuthoring);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_mode_change_resets_history_without_persistent_context() {
        let mut session = ChatSession::new(7);
        session.set_persistent_context(false);
        session.push(Turn::user("hola"));
        session.push(Turn::assistant("¡hola!"));

        session.set_mode(Mode::Normal);
        assert_eq!(session.history().len(), 2, "same mode must not reset");

        session.set_mode(Mode::ImageSchemaAuthoring);
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_history_entries() {
        let mut session = ChatSession::new(7);
        session.push(Turn::user("pregunta"));
        session.push(Turn::assistant("respuesta"));

        let entries = session.history_entries();
        assert_eq!(entries[0].role, Role::User);
        assert_eq!(entries[1].content, "respuesta");
    }
}
