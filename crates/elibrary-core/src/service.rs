use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BorrowError, ReturnError, UndoError};
use crate::inventory::Inventory;
use crate::models::{Availability, BookId, BookSummary};
use crate::undo::{ActionKind, HistoryLog};

/// Result of a successful undo: which book changed and which action was reversed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoSummary {
    pub book: BookSummary,
    pub undone: ActionKind,
}

/// Borrow/return/undo facade over the inventory and its history log.
///
/// Every borrow and return checks its precondition before touching any
/// state, so a rejected request leaves both the book and the history
/// unchanged.
#[derive(Debug, Clone, Default)]
pub struct LibraryService {
    inventory: Inventory,
    history: HistoryLog,
}

impl LibraryService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing inventory with an empty history.
    pub fn with_inventory(inventory: Inventory) -> Self {
        Self {
            inventory,
            history: HistoryLog::new(),
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn add(&mut self, title: impl Into<String>, author: impl Into<String>) -> BookId {
        let id = self.inventory.add(title, author);
        debug!(book = %id, "book added");
        id
    }

    pub fn find_by_title(&self, title: &str) -> Option<BookSummary> {
        self.inventory
            .find_by_title(title)
            .and_then(|id| self.summary(id))
    }

    /// Mark the first book titled `title` as borrowed.
    pub fn borrow(&mut self, title: &str) -> Result<BookSummary, BorrowError> {
        let Some(id) = self.inventory.find_by_title(title) else {
            debug!(title, "borrow rejected: not found");
            return Err(BorrowError::NotFound(title.to_string()));
        };

        let book = self.inventory.book_mut(id);
        if !book.is_available() {
            debug!(title = %book.title, "borrow rejected: already borrowed");
            return Err(BorrowError::AlreadyBorrowed(book.title.clone()));
        }

        book.availability = Availability::Borrowed;
        let summary = BookSummary::from((id, &*book));
        self.history.push(ActionKind::Borrow, id);

        debug!(title = %summary.title, book = %id, "book borrowed");
        Ok(summary)
    }

    /// Mark the first book titled `title` as returned.
    pub fn return_book(&mut self, title: &str) -> Result<BookSummary, ReturnError> {
        let Some(id) = self.inventory.find_by_title(title) else {
            debug!(title, "return rejected: not found");
            return Err(ReturnError::NotFound(title.to_string()));
        };

        let book = self.inventory.book_mut(id);
        if book.is_available() {
            debug!(title = %book.title, "return rejected: not borrowed");
            return Err(ReturnError::NotBorrowed(book.title.clone()));
        }

        book.availability = Availability::Available;
        let summary = BookSummary::from((id, &*book));
        self.history.push(ActionKind::Return, id);

        debug!(title = %summary.title, book = %id, "book returned");
        Ok(summary)
    }

    /// Reverse the most recent borrow or return.
    ///
    /// The recorded kind alone decides the restored availability; the
    /// book's current state is not checked.
    pub fn undo(&mut self) -> Result<UndoSummary, UndoError> {
        let action = self.history.pop().ok_or(UndoError::NothingToUndo)?;

        let book = self.inventory.book_mut(action.book);
        book.availability = action.kind.inverse_availability();
        let summary = BookSummary::from((action.book, &*book));

        debug!(
            title = %summary.title,
            undone = %action.kind,
            remaining = self.history.len(),
            "action undone"
        );
        Ok(UndoSummary {
            book: summary,
            undone: action.kind,
        })
    }

    pub fn search<'a>(&'a self, keyword: &str) -> impl Iterator<Item = BookSummary> + use<'a> {
        self.inventory.search(keyword).map(BookSummary::from)
    }

    pub fn list_all(&self) -> impl Iterator<Item = BookSummary> + '_ {
        self.inventory.list_all().map(BookSummary::from)
    }

    fn summary(&self, id: BookId) -> Option<BookSummary> {
        self.inventory.get(id).map(|book| BookSummary::from((id, book)))
    }
}
