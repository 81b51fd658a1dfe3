use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── BookId ─────────────────────────────────────────────────

/// Stable handle to a book inside an [`Inventory`](crate::Inventory).
///
/// Index into the inventory's backing store. Records are never removed,
/// so an id stays valid for the lifetime of the inventory that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(pub(crate) usize);

impl BookId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ─── Availability ───────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    #[default]
    Available,
    Borrowed,
}

impl Availability {
    pub fn is_available(self) -> bool {
        self == Self::Available
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available => write!(f, "available"),
            Self::Borrowed => write!(f, "borrowed"),
        }
    }
}

// ─── Book ───────────────────────────────────────────────────

/// A book record owned by the inventory.
///
/// Identity is the title compared case-insensitively; only
/// `availability` changes after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub availability: Availability,
    pub added_at: DateTime<Utc>,
}

impl Book {
    /// Create a new, available book.
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            availability: Availability::Available,
            added_at: Utc::now(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.availability.is_available()
    }
}

// ─── BookSummary (boundary view) ───────────────────────────

/// Lightweight view handed to the shell — not the owned record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSummary {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub available: bool,
}

impl BookSummary {
    /// Status label used by the shell listing.
    pub fn status_label(&self) -> &'static str {
        if self.available { "Available" } else { "Borrowed" }
    }
}

impl From<(BookId, &Book)> for BookSummary {
    fn from((id, book): (BookId, &Book)) -> Self {
        Self {
            id,
            title: book.title.clone(),
            author: book.author.clone(),
            available: book.is_available(),
        }
    }
}

// ─── Tests ─────────────────────────────────────────────────
