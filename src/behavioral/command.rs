//! Command: wrap edits in objects so they can be queued, undone and redone.

use std::cell::RefCell;
use std::fmt;
use std::io::Write;
use std::rc::Rc;

use colored::Colorize;
use itertools::Itertools;
use tracing::debug;

use crate::application::Application;
use crate::error::Result;
use crate::menu::Menu;
use crate::registry::Registry;
use crate::session::Session;

#[derive(Default)]
pub struct TextEditor {
    content: String,
}

impl TextEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&mut self, text: &str) {
        self.content.push_str(text);
    }

    /// Removes up to `count` trailing characters and returns them.
    pub fn delete_last(&mut self, count: usize) -> String {
        let start = self
            .content
            .char_indices()
            .rev()
            .take(count)
            .last()
            .map_or(self.content.len(), |(index, _)| index);
        self.content.split_off(start)
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

pub type SharedEditor = Rc<RefCell<TextEditor>>;

pub trait Command {
    fn name(&self) -> &'static str;
    fn execute(&mut self);
    fn undo(&mut self);
}

pub struct WriteCommand {
    editor: SharedEditor,
    text: String,
}

impl WriteCommand {
    pub fn new(editor: SharedEditor, text: impl Into<String>) -> Self {
        Self {
            editor,
            text: text.into(),
        }
    }
}

impl Command for WriteCommand {
    fn name(&self) -> &'static str {
        "write"
    }

    fn execute(&mut self) {
        self.editor.borrow_mut().write(&self.text);
    }

    fn undo(&mut self) {
        self.editor
            .borrow_mut()
            .delete_last(self.text.chars().count());
    }
}

/// Remembers what it removed so undo can put it back.
pub struct DeleteCommand {
    editor: SharedEditor,
    count: usize,
    deleted: String,
}

impl DeleteCommand {
    pub fn new(editor: SharedEditor, count: usize) -> Self {
        Self {
            editor,
            count,
            deleted: String::new(),
        }
    }
}

impl Command for DeleteCommand {
    fn name(&self) -> &'static str {
        "delete"
    }

    fn execute(&mut self) {
        self.deleted = self.editor.borrow_mut().delete_last(self.count);
    }

    fn undo(&mut self) {
        self.editor.borrow_mut().write(&self.deleted);
    }
}

/// Commands before `current` are applied; the ones after it can be redone.
#[derive(Default)]
pub struct CommandHistory {
    history: Vec<Box<dyn Command>>,
    current: usize,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `command` and records it, discarding anything that could have been redone.
    pub fn execute(&mut self, mut command: Box<dyn Command>) {
        command.execute();
        self.history.truncate(self.current);
        self.history.push(command);
        self.current = self.history.len();
    }

    /// Returns the name of the undone command, or `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Option<&'static str> {
        if self.current == 0 {
            return None;
        }
        self.current -= 1;
        let command = &mut self.history[self.current];
        command.undo();
        Some(command.name())
    }

    pub fn redo(&mut self) -> Option<&'static str> {
        let command = self.history.get_mut(self.current)?;
        command.execute();
        self.current += 1;
        Some(command.name())
    }

    pub fn can_undo(&self) -> bool {
        self.current > 0
    }

    pub fn can_redo(&self) -> bool {
        self.current < self.history.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Write,
    Delete,
    Undo,
    Redo,
}

fn actions() -> Result<Registry<Action>> {
    Registry::new([
        ("write", Action::Write),
        ("delete", Action::Delete),
        ("undo", Action::Undo),
        ("redo", Action::Redo),
    ])
}

pub struct CommandApplication;

pub fn application() -> Box<dyn Application> {
    Box::new(CommandApplication)
}

impl fmt::Display for CommandApplication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Command")
    }
}

impl Application for CommandApplication {
    fn main(&mut self, session: &mut Session<'_>) -> Result<()> {
        let actions = actions()?;
        let editor: SharedEditor = Rc::new(RefCell::new(TextEditor::new()));
        let mut history = CommandHistory::new();

        Menu::new(&actions, "Editor action?")
            .on_miss(|input| format!("Unknown action: {input}"))
            .run(session, |session, _, action| {
                match action {
                    Action::Write => {
                        let Some(text) = session.prompt("Text to write? ")? else {
                            return Ok(());
                        };
                        history.execute(Box::new(WriteCommand::new(Rc::clone(&editor), text)));
                    }
                    Action::Delete => {
                        let Some(answer) = session.prompt("How many characters? ")? else {
                            return Ok(());
                        };
                        match answer.trim().parse::<usize>() {
                            Ok(count) => history
                                .execute(Box::new(DeleteCommand::new(Rc::clone(&editor), count))),
                            Err(_) => {
                                writeln!(session, "{}", format!("Not a count: {answer}").red())?;
                                return Ok(());
                            }
                        }
                    }
                    Action::Undo => match history.undo() {
                        Some(name) => writeln!(session, "Undid {name}.")?,
                        None => writeln!(session, "Nothing to undo.")?,
                    },
                    Action::Redo => match history.redo() {
                        Some(name) => writeln!(session, "Redid {name}.")?,
                        None => writeln!(session, "Nothing to redo.")?,
                    },
                }
                debug!(?action, "editor command applied");
                writeln!(session, "Content: \"{}\"", editor.borrow().content())?;
                let available = [("undo", history.can_undo()), ("redo", history.can_redo())]
                    .into_iter()
                    .filter_map(|(name, possible)| possible.then_some(name))
                    .join(", ");
                if !available.is_empty() {
                    writeln!(session, "{}", format!("Available: {available}").dimmed())?;
                }
                Ok(())
            })
    }
}
