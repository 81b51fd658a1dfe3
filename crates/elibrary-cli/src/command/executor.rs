use std::io::{self, BufRead, Write};

use elibrary_core::{
    ActionKind, BookSummary, ElibraryError, ExitCode, LibraryService, UndoSummary,
};
use serde_json::json;

use super::parser::{COMMANDS, MENU};
use super::{CommandAction, parse_command};

/// What the loop should do after a command ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Failed(ExitCode),
    Quit,
}

/// Line-oriented shell over a [`LibraryService`].
///
/// Reads commands from any `BufRead` and renders results to any `Write`,
/// either as text or as one JSON object per response.
pub struct Shell<'a, R, W> {
    service: &'a mut LibraryService,
    input: R,
    out: W,
    json: bool,
    /// Set while `run_script` runs: missing arguments fail instead of prompting.
    script: bool,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(service: &'a mut LibraryService, input: R, out: W, json: bool) -> Self {
        Self {
            service,
            input,
            out,
            json,
            script: false,
        }
    }

    /// Interactive menu loop. Ends on `0`/`quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            if !self.json {
                self.print_menu()?;
            }
            let Some(line) = self.prompt("Choose option: ")? else {
                break;
            };
            if self.execute(parse_command(&line))? == Outcome::Quit {
                break;
            }
        }
        if !self.json {
            writeln!(self.out, "Exiting E-Library. Goodbye!")?;
        }
        self.out.flush()
    }

    /// Run `lines` in order, stopping at the first failure.
    /// Returns the exit code of that failure, or `Success`.
    pub fn run_script<I, S>(&mut self, lines: I) -> io::Result<ExitCode>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.script = true;
        let mut code = ExitCode::Success;
        for line in lines {
            match self.execute(parse_command(line.as_ref()))? {
                Outcome::Continue => {}
                Outcome::Quit => break,
                Outcome::Failed(failed) => {
                    code = failed;
                    break;
                }
            }
        }
        self.script = false;
        self.out.flush()?;
        Ok(code)
    }

    pub fn execute(&mut self, action: CommandAction) -> io::Result<Outcome> {
        match action {
            CommandAction::Quit => Ok(Outcome::Quit),
            CommandAction::Empty => Ok(Outcome::Continue),
            CommandAction::Help => {
                self.print_help()?;
                Ok(Outcome::Continue)
            }
            CommandAction::List => {
                let books: Vec<BookSummary> = self.service.list_all().collect();
                self.render_list(&books)?;
                Ok(Outcome::Continue)
            }
            CommandAction::Search(keyword) => {
                let Some(keyword) = self.argument(keyword, "Enter keyword (title/author): ")?
                else {
                    return self.missing("keyword");
                };
                let results: Vec<BookSummary> = self.service.search(&keyword).collect();
                self.render_search(&keyword, &results)?;
                Ok(Outcome::Continue)
            }
            CommandAction::Borrow(title) => {
                let Some(title) = self.argument(title, "Enter book title to borrow: ")? else {
                    return self.missing("title");
                };
                match self.service.borrow(&title) {
                    Ok(book) => self.render_book("Borrowed", &book),
                    Err(e) => self.render_error(e.into()),
                }
            }
            CommandAction::Return(title) => {
                let Some(title) = self.argument(title, "Enter book title to return: ")? else {
                    return self.missing("title");
                };
                match self.service.return_book(&title) {
                    Ok(book) => self.render_book("Returned", &book),
                    Err(e) => self.render_error(e.into()),
                }
            }
            CommandAction::Undo => match self.service.undo() {
                Ok(summary) => self.render_undo(&summary),
                Err(e) => self.render_error(e.into()),
            },
            CommandAction::Add { title, author } => {
                let Some(title) = self.argument(title, "Enter book title: ")? else {
                    return self.missing("title");
                };
                let Some(author) = self.argument(author, "Enter author: ")? else {
                    return self.missing("author");
                };
                let id = self.service.add(title.as_str(), author.as_str());
                if self.json {
                    self.emit(&json!({"status": "ok", "data": {"id": id, "title": title, "author": author}}))?;
                } else {
                    writeln!(self.out, "Added: {title} by {author}")?;
                }
                Ok(Outcome::Continue)
            }
            CommandAction::Unknown(input) => {
                if self.json {
                    self.emit(&json!({"status": "error", "error": "invalid_choice", "message": format!("Invalid choice: {input}")}))?;
                } else {
                    writeln!(self.out, "Invalid choice. Try again.")?;
                }
                Ok(Outcome::Failed(ExitCode::InvalidArgs))
            }
        }
    }

    // ─── Input ─────────────────────────────────────────────────────────────

    /// Read one line, without its trailing newline. `None` at end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        if !self.json {
            write!(self.out, "{label}")?;
            self.out.flush()?;
        }
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Use the inline argument if present, otherwise prompt for it.
    /// Scripts never prompt.
    fn argument(&mut self, inline: Option<String>, label: &str) -> io::Result<Option<String>> {
        if inline.is_some() || self.script {
            return Ok(inline);
        }
        Ok(self
            .prompt(label)?
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()))
    }

    fn missing(&mut self, what: &str) -> io::Result<Outcome> {
        if self.json {
            self.emit(&json!({"status": "error", "error": "missing_argument", "message": format!("Missing {what}.")}))?;
        } else {
            writeln!(self.out, "Missing {what}.")?;
        }
        Ok(Outcome::Failed(ExitCode::InvalidArgs))
    }

    // ─── Rendering ─────────────────────────────────────────────────────────

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n=== E-Library Book Management ===")?;
        for (key, label) in MENU {
            writeln!(self.out, "{key}) {label}")?;
        }
        Ok(())
    }

    fn print_help(&mut self) -> io::Result<()> {
        if self.json {
            return self.emit(&json!({"status": "ok", "data": {"commands": COMMANDS}}));
        }
        writeln!(self.out, "Commands:")?;
        for cmd in COMMANDS {
            writeln!(self.out, "  {cmd}")?;
        }
        Ok(())
    }

    fn render_list(&mut self, books: &[BookSummary]) -> io::Result<()> {
        if self.json {
            return self.emit(&json!({"status": "ok", "data": {"items": books, "total": books.len()}}));
        }
        if books.is_empty() {
            return writeln!(self.out, "No books in the library.");
        }
        writeln!(self.out, "\n--- Library Inventory ---")?;
        for book in books {
            self.write_line(book)?;
        }
        Ok(())
    }

    fn render_search(&mut self, keyword: &str, results: &[BookSummary]) -> io::Result<()> {
        if self.json {
            return self.emit(&json!({
                "status": "ok",
                "data": {"items": results, "total": results.len(), "query": keyword}
            }));
        }
        writeln!(self.out, "\nSearch results for '{keyword}':")?;
        if results.is_empty() {
            return writeln!(self.out, "No matches found.");
        }
        for book in results {
            self.write_line(book)?;
        }
        Ok(())
    }

    fn render_book(&mut self, verb: &str, book: &BookSummary) -> io::Result<Outcome> {
        if self.json {
            self.emit(&json!({"status": "ok", "data": book}))?;
        } else {
            writeln!(self.out, "{verb}: {}", book.title)?;
        }
        Ok(Outcome::Continue)
    }

    fn render_undo(&mut self, summary: &UndoSummary) -> io::Result<Outcome> {
        if self.json {
            self.emit(&json!({"status": "ok", "data": summary}))?;
        } else {
            let kind = match summary.undone {
                ActionKind::Borrow => "Borrow",
                ActionKind::Return => "Return",
            };
            writeln!(self.out, "Undo: {kind} undone for '{}'", summary.book.title)?;
        }
        Ok(Outcome::Continue)
    }

    fn render_error(&mut self, err: ElibraryError) -> io::Result<Outcome> {
        if self.json {
            self.emit(&json!({"status": "error", "error": err.code(), "message": err.to_string()}))?;
        } else {
            writeln!(self.out, "{err}")?;
        }
        Ok(Outcome::Failed(err.exit_code()))
    }

    fn write_line(&mut self, book: &BookSummary) -> io::Result<()> {
        writeln!(
            self.out,
            "{} by {} - {}",
            book.title,
            book.author,
            book.status_label()
        )
    }

    fn emit(&mut self, val: &serde_json::Value) -> io::Result<()> {
        let line = serde_json::to_string(val).map_err(io::Error::other)?;
        writeln!(self.out, "{line}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn seeded() -> LibraryService {
        let mut service = LibraryService::new();
        service.add("The Alchemist", "Paulo Coelho");
        service.add("1984", "George Orwell");
        service.add("Python Programming", "John Zelle");
        service
    }

    fn run_text(service: &mut LibraryService, input: &str) -> String {
        let mut out = Vec::new();
        Shell::new(service, Cursor::new(input.to_string()), &mut out, false)
            .run()
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    fn script(service: &mut LibraryService, lines: &[&str], json: bool) -> (ExitCode, String) {
        let mut out = Vec::new();
        let code = Shell::new(service, io::empty(), &mut out, json)
            .run_script(lines)
            .unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_menu_display_all() {
        let mut service = seeded();
        let out = run_text(&mut service, "1\n0\n");
        assert!(out.contains("1) Display all books"));
        assert!(out.contains("The Alchemist by Paulo Coelho - Available"));
        assert!(out.contains("1984 by George Orwell - Available"));
        assert!(out.ends_with("Exiting E-Library. Goodbye!\n"));
    }

    #[test]
    fn test_menu_borrow_prompts_for_title() {
        let mut service = seeded();
        let out = run_text(&mut service, "2\n1984\n1\n0\n");
        assert!(out.contains("Enter book title to borrow: "));
        assert!(out.contains("Borrowed: 1984"));
        assert!(out.contains("1984 by George Orwell - Borrowed"));
    }

    #[test]
    fn test_menu_undo_and_nothing_to_undo() {
        let mut service = seeded();
        let out = run_text(&mut service, "borrow 1984\n4\n4\nquit\n");
        assert!(out.contains("Undo: Borrow undone for '1984'"));
        assert!(out.contains("Nothing to undo"));
        assert!(service.find_by_title("1984").unwrap().available);
    }

    #[test]
    fn test_invalid_choice_keeps_looping() {
        let mut service = seeded();
        let out = run_text(&mut service, "7\n1\n");
        assert!(out.contains("Invalid choice. Try again."));
        assert!(out.contains("--- Library Inventory ---"));
    }

    #[test]
    fn test_end_of_input_exits_cleanly() {
        let mut service = seeded();
        let out = run_text(&mut service, "");
        assert!(out.contains("Exiting E-Library. Goodbye!"));
    }

    #[test]
    fn test_empty_library_message() {
        let mut service = LibraryService::new();
        let (code, out) = script(&mut service, &["list"], false);
        assert_eq!(code, ExitCode::Success);
        assert_eq!(out, "No books in the library.\n");
    }

    #[test]
    fn test_search_no_matches() {
        let mut service = seeded();
        let (code, out) = script(&mut service, &["search tolkien"], false);
        assert_eq!(code, ExitCode::Success);
        assert!(out.contains("Search results for 'tolkien':"));
        assert!(out.contains("No matches found."));
    }

    #[test]
    fn test_script_stops_at_first_failure() {
        let mut service = seeded();
        let (code, out) = script(&mut service, &["borrow 1984", "borrow 1984", "undo"], false);
        assert_eq!(code, ExitCode::Conflict);
        assert!(out.contains("Book is already borrowed: 1984"));
        assert!(!out.contains("Undo:"));
        assert_eq!(service.history().len(), 1);
    }

    #[test]
    fn test_script_not_found_exit_code() {
        let mut service = seeded();
        let (code, _) = script(&mut service, &["return Dune"], false);
        assert_eq!(code, ExitCode::NotFound);
    }

    #[test]
    fn test_script_missing_argument_without_input() {
        let mut service = seeded();
        let (code, out) = script(&mut service, &["borrow"], false);
        assert_eq!(code, ExitCode::InvalidArgs);
        assert_eq!(out, "Missing title.\n");

        let (code, out) = script(&mut service, &["search"], false);
        assert_eq!(code, ExitCode::InvalidArgs);
        assert_eq!(out, "Missing keyword.\n");
    }

    #[test]
    fn test_script_does_not_read_input_for_missing_argument() {
        let mut service = seeded();
        let mut out = Vec::new();
        let code = Shell::new(&mut service, Cursor::new("1984\n".to_string()), &mut out, false)
            .run_script(["return"])
            .unwrap();
        assert_eq!(code, ExitCode::InvalidArgs);
        let out = String::from_utf8(out).unwrap();
        assert!(!out.contains("Enter book title"));
        assert_eq!(out, "Missing title.\n");
    }

    #[test]
    fn test_add_then_search() {
        let mut service = LibraryService::new();
        let (code, out) = script(&mut service, &["add Dune by Herbert", "search dun"], false);
        assert_eq!(code, ExitCode::Success);
        assert!(out.contains("Added: Dune by Herbert"));
        assert!(out.contains("Dune by Herbert - Available"));
    }

    #[test]
    fn test_json_borrow_and_error() {
        let mut service = seeded();
        let (code, out) = script(&mut service, &["borrow 1984", "borrow 1984"], true);
        assert_eq!(code, ExitCode::Conflict);

        let lines: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["status"], "ok");
        assert_eq!(lines[0]["data"]["available"], false);
        assert_eq!(lines[1]["status"], "error");
        assert_eq!(lines[1]["error"], "already_borrowed");
    }

    #[test]
    fn test_json_undo_payload() {
        let mut service = seeded();
        let (_, out) = script(&mut service, &["return 1984"], true);
        assert!(out.contains("not_borrowed"));

        let (code, out) = script(&mut service, &["borrow the alchemist", "undo"], true);
        assert_eq!(code, ExitCode::Success);
        let last: serde_json::Value = serde_json::from_str(out.lines().last().unwrap()).unwrap();
        assert_eq!(last["data"]["undone"], "borrow");
        assert_eq!(last["data"]["book"]["title"], "The Alchemist");
        assert_eq!(last["data"]["book"]["available"], true);
    }
}
