pub mod config;
pub mod error;
pub mod inventory;
pub mod models;
pub mod search;
pub mod service;
pub mod undo;

pub use config::{AppConfig, CatalogConfig, LoggingConfig, SeedBook};
pub use error::{BorrowError, ElibraryError, ExitCode, Result, ReturnError, UndoError};
pub use models::*;

pub use inventory::Inventory;
pub use search::KeywordQuery;
pub use service::{LibraryService, UndoSummary};
pub use undo::{Action, ActionKind, HistoryLog};
