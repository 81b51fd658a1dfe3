use thiserror::Error;

/// Reasons a borrow request is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BorrowError {
    #[error("Book not found: {0}")]
    NotFound(String),

    #[error("Book is already borrowed: {0}")]
    AlreadyBorrowed(String),
}

/// Reasons a return request is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReturnError {
    #[error("Book not found: {0}")]
    NotFound(String),

    #[error("Book was not borrowed: {0}")]
    NotBorrowed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UndoError {
    #[error("Nothing to undo")]
    NothingToUndo,
}

/// All errors that can occur in elibrary-core.
#[derive(Debug, Error)]
pub enum ElibraryError {
    #[error(transparent)]
    Borrow(#[from] BorrowError),

    #[error(transparent)]
    Return(#[from] ReturnError),

    #[error(transparent)]
    Undo(#[from] UndoError),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl ElibraryError {
    /// Stable machine-readable code used in JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Borrow(BorrowError::NotFound(_)) | Self::Return(ReturnError::NotFound(_)) => {
                "not_found"
            }
            Self::Borrow(BorrowError::AlreadyBorrowed(_)) => "already_borrowed",
            Self::Return(ReturnError::NotBorrowed(_)) => "not_borrowed",
            Self::Undo(UndoError::NothingToUndo) => "nothing_to_undo",
            Self::ConfigError(_) => "config",
            Self::Io(_) => "io",
            Self::TomlParse(_) | Self::TomlSerialize(_) => "toml",
        }
    }

    /// Process exit code the shell reports for this error.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Borrow(BorrowError::NotFound(_)) | Self::Return(ReturnError::NotFound(_)) => {
                ExitCode::NotFound
            }
            Self::Borrow(BorrowError::AlreadyBorrowed(_))
            | Self::Return(ReturnError::NotBorrowed(_))
            | Self::Undo(UndoError::NothingToUndo) => ExitCode::Conflict,
            Self::ConfigError(_) | Self::TomlParse(_) => ExitCode::InvalidArgs,
            Self::Io(_) | Self::TomlSerialize(_) => ExitCode::GeneralError,
        }
    }
}

/// Exit codes reported by the `elibrary` binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    NotFound = 2,
    InvalidArgs = 3,
    Conflict = 7,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

pub type Result<T> = std::result::Result<T, ElibraryError>;
