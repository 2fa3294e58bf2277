//! Session bookkeeping: the ordered conversation log.
//!
//! [`SessionAggregator`] accumulates [`ConversationTurn`]s (user input and
//! assistant output) for the lifetime of one session.  It is pure
//! bookkeeping: no network, no speech I/O, no persistence across sessions.
//! Renderers read `turns()` to show history and `count()` for the trivial
//! derived statistic.

use std::time::SystemTime;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// A short label suitable for display next to the turn text.
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Assistant => "Bot",
        }
    }
}

// ---------------------------------------------------------------------------
// ConversationTurn
// ---------------------------------------------------------------------------

/// One entry in the conversation log.  Append-only; never edited in place.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationTurn {
    pub role: Role,
    pub text: String,
    pub timestamp: SystemTime,
}

impl ConversationTurn {
    /// A user turn stamped with the current time.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            timestamp: SystemTime::now(),
        }
    }

    /// An assistant turn stamped with the current time.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            timestamp: SystemTime::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// SessionAggregator
// ---------------------------------------------------------------------------

/// Append-only ordered log of conversation turns.
///
/// ```rust
/// use veganchef::session::{ConversationTurn, SessionAggregator};
///
/// let mut session = SessionAggregator::new();
/// session.push_user("pasta with basil");
/// session.push_assistant("Here is a vegan pasta recipe …");
/// assert_eq!(session.count(), 2);
///
/// session.reset();
/// assert_eq!(session.count(), 0);
/// assert!(session.turns().is_empty());
/// # let _ = ConversationTurn::user("x");
/// ```
#[derive(Debug, Default)]
pub struct SessionAggregator {
    turns: Vec<ConversationTurn>,
}

impl SessionAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn to the end of the log.
    pub fn append(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    /// Append a user turn stamped with the current time.
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.append(ConversationTurn::user(text));
    }

    /// Append an assistant turn stamped with the current time.
    pub fn push_assistant(&mut self, text: impl Into<String>) {
        self.append(ConversationTurn::assistant(text));
    }

    /// Clear the log atomically; no partial state is ever visible.
    pub fn reset(&mut self) {
        self.turns.clear();
    }

    /// The ordered sequence of turns, oldest first.
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// Number of turns in the log.
    pub fn count(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_empty() {
        let session = SessionAggregator::new();
        assert_eq!(session.count(), 0);
        assert!(session.is_empty());
        assert!(session.turns().is_empty());
    }

    #[test]
    fn append_preserves_order() {
        let mut session = SessionAggregator::new();
        session.push_user("first");
        session.push_assistant("second");
        session.push_user("third");

        let turns = session.turns();
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[0].text, "first");
        assert_eq!(turns[0].role, Role::User);
        assert_eq!(turns[1].role, Role::Assistant);
        assert_eq!(turns[2].text, "third");
    }

    #[test]
    fn append_then_reset_yields_empty_log() {
        let mut session = SessionAggregator::new();
        session.append(ConversationTurn::user("hello"));
        assert_eq!(session.count(), 1);

        session.reset();
        assert_eq!(session.count(), 0);
        assert!(session.turns().is_empty());
    }

    #[test]
    fn session_is_usable_after_reset() {
        let mut session = SessionAggregator::new();
        session.push_user("before");
        session.reset();
        session.push_user("after");
        assert_eq!(session.count(), 1);
        assert_eq!(session.turns()[0].text, "after");
    }

    #[test]
    fn timestamps_are_monotone_non_decreasing() {
        let mut session = SessionAggregator::new();
        session.push_user("a");
        session.push_assistant("b");
        let turns = session.turns();
        assert!(turns[0].timestamp <= turns[1].timestamp);
    }

    #[test]
    fn role_labels() {
        assert_eq!(Role::User.label(), "You");
        assert_eq!(Role::Assistant.label(), "Bot");
    }
}
