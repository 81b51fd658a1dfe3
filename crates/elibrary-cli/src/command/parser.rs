/// Menu shown by the interactive shell, one entry per numeric choice.
pub const MENU: &[(&str, &str)] = &[
    ("1", "Display all books"),
    ("2", "Borrow a book"),
    ("3", "Return a book"),
    ("4", "Undo last action"),
    ("5", "Search book by title/author"),
    ("0", "Exit"),
];

/// Word commands accepted besides the numeric menu choices.
pub const COMMANDS: &[&str] = &[
    "list",
    "borrow <title>",
    "return <title>",
    "undo",
    "search <keyword>",
    "add <title> by <author>",
    "help",
    "quit",
];

/// A parsed shell line. `None` arguments are prompted for interactively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandAction {
    Quit,
    List,
    Borrow(Option<String>),
    Return(Option<String>),
    Undo,
    Search(Option<String>),
    Add {
        title: Option<String>,
        author: Option<String>,
    },
    Help,
    Empty,
    Unknown(String),
}

/// Parse a raw shell line into a CommandAction.
pub fn parse_command(line: &str) -> CommandAction {
    let line = line.trim();
    if line.is_empty() {
        return CommandAction::Empty;
    }

    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, non_empty(rest)),
        None => (line, None),
    };

    match (head.to_lowercase().as_str(), rest) {
        ("0" | "q" | "quit" | "exit", None) => CommandAction::Quit,
        ("1" | "list" | "ls", None) => CommandAction::List,
        ("2" | "borrow", title) => CommandAction::Borrow(title),
        ("3" | "return", title) => CommandAction::Return(title),
        ("4" | "undo", None) => CommandAction::Undo,
        ("5" | "search" | "find", keyword) => CommandAction::Search(keyword),
        ("add", None) => CommandAction::Add {
            title: None,
            author: None,
        },
        ("add", Some(args)) => match args.rsplit_once(" by ") {
            Some((title, author)) => CommandAction::Add {
                title: non_empty(title),
                author: non_empty(author),
            },
            None => CommandAction::Add {
                title: non_empty(&args),
                author: None,
            },
        },
        ("help" | "?", None) => CommandAction::Help,
        _ => CommandAction::Unknown(line.to_string()),
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() { None } else { Some(s.to_string()) }
}
