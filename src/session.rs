//! Conversation session management
//!
//! Sessions hold a bounded window of prior exchanges per user. History is
//! handed to the query pipeline as one formatted string prefix; the
//! tool-calling loop itself never sees or mutates it.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// One completed user/assistant exchange
#[derive(Debug, Clone)]
struct Exchange {
    user: String,
    assistant: String,
}

#[derive(Debug)]
struct Session {
    exchanges: Vec<Exchange>,
    created_at: DateTime<Utc>,
}

/// In-memory session store with bounded history
///
/// Thread-safe behind an internal mutex; share via `Arc`.
pub struct SessionManager {
    sessions: Mutex<HashMap<String, Session>>,
    /// Maximum retained exchanges per session; oldest are evicted first
    max_history: usize,
}

impl SessionManager {
    /// Create a manager retaining at most `max_history` exchanges per session
    pub fn new(max_history: usize) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            max_history,
        }
    }

    /// Create a new session and return its id
    pub fn create_session(&self) -> String {
        let id = Uuid::new_v4().to_string();
        self.sessions.lock().unwrap().insert(
            id.clone(),
            Session {
                exchanges: Vec::new(),
                created_at: Utc::now(),
            },
        );
        id
    }

    /// Record a completed exchange, creating the session if needed
    pub fn add_exchange(
        &self,
        session_id: &str,
        user: impl Into<String>,
        assistant: impl Into<String>,
    ) {
        let mut sessions = self.sessions.lock().unwrap();
        let session = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Session {
                exchanges: Vec::new(),
                created_at: Utc::now(),
            });

        session.exchanges.push(Exchange {
            user: user.into(),
            assistant: assistant.into(),
        });
        while session.exchanges.len() > self.max_history {
            session.exchanges.remove(0);
        }
    }

    /// Formatted history for a session, or None when there is nothing to show
    pub fn history(&self, session_id: &str) -> Option<String> {
        let sessions = self.sessions.lock().unwrap();
        let session = sessions.get(session_id)?;
        if session.exchanges.is_empty() {
            return None;
        }

        let formatted: Vec<String> = session
            .exchanges
            .iter()
            .map(|e| format!("User: {}\nAssistant: {}", e.user, e.assistant))
            .collect();
        Some(formatted.join("\n"))
    }

    /// Drop all history for a session
    pub fn clear_session(&self, session_id: &str) {
        self.sessions.lock().unwrap().remove(session_id);
    }

    /// When a session was created, if it exists
    pub fn created_at(&self, session_id: &str) -> Option<DateTime<Utc>> {
        self.sessions
            .lock()
            .unwrap()
            .get(session_id)
            .map(|s| s.created_at)
    }
}
