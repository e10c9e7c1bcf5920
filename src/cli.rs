//! Terminal front-end: command parsing and text rendering

use std::fmt::Write as _;
use std::str::FromStr;
use std::sync::Arc;

use crate::{
    error::AppError,
    form::BookForm,
    models::{Book, BookField},
};

pub const HELP: &str = "\
Commands:
  list                  fetch and show all books
  add                   open an empty form
  edit <id>             open the form for a book
  set <field> <value>   change title, author or year
  save                  submit the form
  cancel                leave the form (asks for confirmation)
  dismiss               close the error notification
  show                  print the form again
  help                  this text
  quit                  exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Add,
    Edit(String),
    Set { field: String, value: String },
    Save,
    Cancel,
    Dismiss,
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let command = match word {
            "list" | "ls" => Command::List,
            "add" | "new" => Command::Add,
            "edit" if !rest.is_empty() => Command::Edit(rest.to_string()),
            "edit" => return Err(AppError::BadRequest("usage: edit <id>".into())),
            "set" => {
                let (field, value) = rest
                    .split_once(char::is_whitespace)
                    .map(|(f, v)| (f, v.trim()))
                    .unwrap_or((rest, ""));
                if field.is_empty() {
                    return Err(AppError::BadRequest("usage: set <field> <value>".into()));
                }
                Command::Set {
                    field: field.to_string(),
                    value: value.to_string(),
                }
            }
            "save" | "submit" => Command::Save,
            "cancel" | "back" => Command::Cancel,
            "dismiss" => Command::Dismiss,
            "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(AppError::BadRequest(format!("unknown command: {}", other))),
        };
        Ok(command)
    }
}

/// Ask `prompt` on the terminal, defaulting to no.
///
/// A prompt that cannot be shown (no terminal, interrupted) counts as a decline.
pub fn confirm_on_terminal(prompt: &str) -> bool {
    answer_or_decline(
        dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact(),
    )
}

fn answer_or_decline(answer: dialoguer::Result<bool>) -> bool {
    answer.unwrap_or_else(|e| {
        tracing::warn!("Confirmation prompt failed: {}", e);
        false
    })
}

pub fn render_list(books: &[Arc<Book>]) -> String {
    if books.is_empty() {
        return "No books yet. Type `add` to create one.".to_string();
    }

    let mut out = String::new();
    for book in books {
        let _ = writeln!(out, "{}  {} - {} ({})", book.id, book.title, book.author, book.year);
    }
    out.trim_end().to_string()
}

pub fn render_form(form: &BookForm) -> String {
    let feedback = form.feedback();
    let mut out = String::new();

    let dialog = feedback.success_dialog();
    if dialog.open {
        let _ = writeln!(out, "=== {} ===", dialog.message);
    }
    let notification = feedback.notification();
    if notification.open {
        let _ = writeln!(
            out,
            "[error {}] {}  (type `dismiss` to close)",
            notification.error.code, notification.error.message
        );
    }

    let _ = writeln!(out, "{}", form.heading());
    for field in BookField::VISIBLE {
        let _ = writeln!(out, "  {:<7} * {}", field.label(), form.values().get(field));
        if let Some(hint) = feedback.field_error(field) {
            let _ = writeln!(out, "            ! {}", hint);
        }
    }

    let button = feedback.submit_button();
    let _ = write!(out, "  [Cancel]  [{}]", button.label);
    if feedback.overlay_visible() {
        let _ = write!(out, "\n  ...");
    }
    out
}
