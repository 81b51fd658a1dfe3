use crate::models::{Book, BookId};
use crate::search::KeywordQuery;

/// Insertion-ordered store of every book in the catalog.
///
/// Books are never removed, so a [`BookId`] handed out by [`Inventory::add`]
/// always resolves. Lookups are linear scans.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    books: Vec<Book>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new, available book. Duplicate titles are accepted.
    pub fn add(&mut self, title: impl Into<String>, author: impl Into<String>) -> BookId {
        let id = BookId(self.books.len());
        self.books.push(Book::new(title, author));
        id
    }

    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.books.get(id.0)
    }

    /// Ids are only minted by `add` and never invalidated, so indexing
    /// with one from this inventory cannot go out of bounds.
    pub(crate) fn book_mut(&mut self, id: BookId) -> &mut Book {
        &mut self.books[id.0]
    }

    /// First book whose title equals `title`, ignoring case.
    pub fn find_by_title(&self, title: &str) -> Option<BookId> {
        let query = KeywordQuery::new(title);
        self.iter()
            .find(|(_, book)| query.matches_title(book))
            .map(|(id, _)| id)
    }

    /// Books whose title or author contains `keyword`, in insertion order.
    ///
    /// The iterator is lazy; calling `search` again re-scans.
    pub fn search<'a>(
        &'a self,
        keyword: &str,
    ) -> impl Iterator<Item = (BookId, &'a Book)> + use<'a> {
        let query = KeywordQuery::new(keyword);
        self.iter().filter(move |(_, book)| query.matches(book))
    }

    /// Every book in insertion order.
    pub fn list_all(&self) -> impl Iterator<Item = (BookId, &Book)> + '_ {
        self.iter()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BookId, &Book)> + '_ {
        self.books
            .iter()
            .enumerate()
            .map(|(index, book)| (BookId(index), book))
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Inventory {
        let mut inventory = Inventory::new();
        inventory.add("The Alchemist", "Paulo Coelho");
        inventory.add("1984", "George Orwell");
        inventory.add("Python Programming", "John Zelle");
        inventory
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let inventory = sample();
        let titles: Vec<&str> = inventory
            .list_all()
            .map(|(_, book)| book.title.as_str())
            .collect();
        assert_eq!(titles, vec!["The Alchemist", "1984", "Python Programming"]);
        assert_eq!(inventory.len(), 3);
    }

    #[test]
    fn test_add_returns_resolvable_id() {
        let mut inventory = Inventory::new();
        let id = inventory.add("Dune", "Frank Herbert");
        let book = inventory.get(id).unwrap();
        assert_eq!(book.title, "Dune");
        assert!(book.is_available());
    }

    #[test]
    fn test_find_by_title_ignores_case() {
        let inventory = sample();
        let id = inventory.find_by_title("the ALCHEMIST").unwrap();
        assert_eq!(inventory.get(id).unwrap().author, "Paulo Coelho");
        assert!(inventory.find_by_title("Alchemist").is_none());
    }

    #[test]
    fn test_find_by_title_returns_first_duplicate() {
        let mut inventory = Inventory::new();
        let first = inventory.add("Dune", "Frank Herbert");
        let second = inventory.add("dune", "Someone Else");

        assert_ne!(first, second);
        assert_eq!(inventory.find_by_title("DUNE"), Some(first));
        assert_eq!(inventory.len(), 2);
    }

    #[test]
    fn test_search_title_or_author() {
        let inventory = sample();

        let by_title: Vec<&str> = inventory
            .search("program")
            .map(|(_, b)| b.title.as_str())
            .collect();
        assert_eq!(by_title, vec!["Python Programming"]);

        let by_author: Vec<&str> = inventory
            .search("ORWELL")
            .map(|(_, b)| b.title.as_str())
            .collect();
        assert_eq!(by_author, vec!["1984"]);
    }

    #[test]
    fn test_search_multiple_matches_in_order() {
        let inventory = sample();
        // "o" appears in every record's title or author
        let ids: Vec<usize> = inventory.search("o").map(|(id, _)| id.index()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_search_no_matches_is_empty() {
        let inventory = sample();
        assert_eq!(inventory.search("tolkien").count(), 0);
    }

    #[test]
    fn test_search_is_restartable() {
        let inventory = sample();
        let first = inventory.search("alchemist").count();
        let second = inventory.search("alchemist").count();
        assert_eq!(first, 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_inventory() {
        let inventory = Inventory::new();
        assert!(inventory.is_empty());
        assert_eq!(inventory.list_all().count(), 0);
        assert!(inventory.find_by_title("anything").is_none());
    }
}
