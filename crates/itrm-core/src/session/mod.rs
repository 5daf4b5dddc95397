//! Conversation sessions.
//!
//! Each session owns its own [`BudgetLedger`]. Nothing is shared between
//! sessions and nothing outlives the process: dropping a session drops its
//! ledger.

use std::collections::HashMap;

use chrono::{DateTime, Local};
use tracing::info;

use crate::ledger::BudgetLedger;

#[derive(Debug, Clone)]
pub struct Session {
    pub key: String,
    pub ledger: BudgetLedger,
    pub turns: u64,
    pub created_at: DateTime<Local>,
}

impl Session {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ledger: BudgetLedger::new(),
            turns: 0,
            created_at: Local::now(),
        }
    }

    /// Put the ledger back to its defaults and restart the turn count.
    /// `created_at` is kept.
    pub fn reset(&mut self) {
        info!(session = %self.key, "Session reset");
        self.ledger.reset();
        self.turns = 0;
    }
}

/// In-memory session table.
#[derive(Debug, Default)]
pub struct SessionManager {
    sessions: HashMap<String, Session>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_create(&mut self, key: &str) -> &mut Session {
        self.sessions.entry(key.to_string()).or_insert_with(|| {
            info!(session = key, "Session created");
            Session::new(key)
        })
    }

    pub fn get(&self, key: &str) -> Option<&Session> {
        self.sessions.get(key)
    }

    /// End a session, discarding its ledger. Returns false if it didn't exist.
    pub fn close(&mut self, key: &str) -> bool {
        self.sessions.remove(key).is_some()
    }

    /// Session keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.sessions.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Category, Direction};

    #[test]
    fn test_ledgers_are_isolated() {
        let mut mgr = SessionManager::new();
        mgr.get_or_create("alice")
            .ledger
            .adjust(Category::Hardware, Direction::Increase)
            .unwrap();

        let bob = mgr.get_or_create("bob");
        assert_eq!(bob.ledger, BudgetLedger::new());
        assert_ne!(mgr.get("alice").unwrap().ledger, BudgetLedger::new());
        assert_eq!(mgr.keys(), vec!["alice", "bob"]);
    }

    #[test]
    fn test_close_discards_state() {
        let mut mgr = SessionManager::new();
        mgr.get_or_create("s").ledger.adjust(Category::Telecom, Direction::Decrease).unwrap();
        assert!(mgr.close("s"));
        assert!(!mgr.close("s"));
        assert_eq!(mgr.get_or_create("s").ledger, BudgetLedger::new());
    }

    #[test]
    fn test_reset() {
        let mut session = Session::new("s");
        session.turns = 4;
        session.ledger.adjust(Category::Software, Direction::Increase).unwrap();
        let started = session.created_at;
        session.reset();
        assert_eq!(session.created_at, started);
        assert_eq!(session.turns, 0);
        assert_eq!(session.ledger, BudgetLedger::new());
    }
}
