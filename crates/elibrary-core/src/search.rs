use crate::models::Book;

/// Case-insensitive keyword matcher over book records.
///
/// The keyword is lowercased once; every candidate is compared against
/// its lowercased title and author.
#[derive(Debug, Clone)]
pub struct KeywordQuery {
    needle: String,
}

impl KeywordQuery {
    pub fn new(keyword: &str) -> Self {
        Self {
            needle: keyword.to_lowercase(),
        }
    }

    /// Exact title equality, ignoring case.
    pub fn matches_title(&self, book: &Book) -> bool {
        book.title.to_lowercase() == self.needle
    }

    /// Substring match against title or author, ignoring case.
    /// An empty keyword matches every book.
    pub fn matches(&self, book: &Book) -> bool {
        book.title.to_lowercase().contains(&self.needle)
            || book.author.to_lowercase().contains(&self.needle)
    }
}
