use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Availability, BookId};

/// Kind of availability change that can be undone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Borrow,
    Return,
}

impl ActionKind {
    /// Availability the book had before this action ran.
    pub fn inverse_availability(self) -> Availability {
        match self {
            Self::Borrow => Availability::Available,
            Self::Return => Availability::Borrowed,
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Borrow => write!(f, "borrow"),
            Self::Return => write!(f, "return"),
        }
    }
}

/// One completed borrow or return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,
    pub book: BookId,
    pub recorded_at: DateTime<Utc>,
}

/// LIFO stack of actions awaiting undo.
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    entries: Vec<Action>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: ActionKind, book: BookId) {
        self.entries.push(Action {
            kind,
            book,
            recorded_at: Utc::now(),
        });
    }

    /// Remove and return the most recent action.
    pub fn pop(&mut self) -> Option<Action> {
        self.entries.pop()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
