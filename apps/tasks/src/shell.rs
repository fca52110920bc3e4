//! Line-oriented front end over the two views.
//!
//! The shell owns one [`ListView`] and one [`StatsView`], both registered
//! with the same [`TaskStore`], and a tab selector. Every input line is one
//! [`Command`]; after it runs the active tab is rendered again.

use crate::store::TaskStore;
use crate::views::{ListView, Markers, StatsView, View};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tasklet_core::reducer::Reduction;
use thiserror::Error;
use tracing::{debug, warn};

const HELP: &str = "\
Commands:
  add <text>              add a task
  toggle <row>, t <row>   mark a task done or not done
  delete <row>, d <row>   remove a task (also: rm <row>)
  tasks, stats            switch tab
  json                    print the task list as JSON
  help                    show this help
  quit, exit              leave";

/// The two tabs
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    /// Task list
    #[default]
    Tasks,
    /// Statistics
    Stats,
}

impl FromStr for Tab {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tasks" => Ok(Self::Tasks),
            "stats" => Ok(Self::Stats),
            _ => Err(()),
        }
    }
}

/// Errors from parsing or running a command
///
/// None of these change the task list.
#[derive(Error, Debug)]
pub enum CommandError {
    /// First word is not a known command
    #[error("unknown command `{0}`, type `help` for a list")]
    Unknown(String),

    /// Command needs an argument that was not given
    #[error("`{command}` needs {argument}")]
    MissingArgument {
        /// Command as typed
        command: &'static str,
        /// What was expected
        argument: &'static str,
    },

    /// Row argument is not a number
    #[error("`{0}` is not a row number")]
    InvalidRow(String),

    /// No task was drawn on that row
    #[error("no task on row {0}")]
    NoTaskAt(usize),

    /// Snapshot could not be encoded
    #[error("could not encode tasks: {0}")]
    Json(#[from] serde_json::Error),
}

/// One parsed input line
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Blank line: just draw the screen again
    Redraw,
    /// Add a task with this text
    Add(String),
    /// Toggle the task on this row
    Toggle(usize),
    /// Delete the task on this row
    Delete(usize),
    /// Switch tab
    Show(Tab),
    /// Print the current snapshot as JSON
    Json,
    /// Print the command list
    Help,
    /// Leave the shell
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        match word.to_ascii_lowercase().as_str() {
            "" => Ok(Self::Redraw),
            "add" | "a" => {
                if rest.is_empty() {
                    Err(CommandError::MissingArgument {
                        command: "add",
                        argument: "the task text",
                    })
                } else {
                    Ok(Self::Add(rest.to_string()))
                }
            }
            "toggle" | "t" => parse_row("toggle", rest).map(Self::Toggle),
            "delete" | "d" | "rm" => parse_row("delete", rest).map(Self::Delete),
            "tasks" => Ok(Self::Show(Tab::Tasks)),
            "stats" => Ok(Self::Show(Tab::Stats)),
            "json" => Ok(Self::Json),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            _ => Err(CommandError::Unknown(word.to_string())),
        }
    }
}

fn parse_row(command: &'static str, rest: &str) -> Result<usize, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingArgument {
            command,
            argument: "a row number",
        });
    }
    rest.parse()
        .map_err(|_| CommandError::InvalidRow(rest.to_string()))
}

/// What the caller should do after a line
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Print this and read the next line
    Continue(String),
    /// Stop reading
    Quit,
}

/// The interactive front end
pub struct Shell {
    store: TaskStore,
    list: ListView,
    stats: StatsView,
    tab: Tab,
}

impl Shell {
    /// Create a shell with both views registered on `store`
    #[must_use]
    pub fn new(store: &TaskStore) -> Self {
        Self {
            store: store.clone(),
            list: ListView::new(store),
            stats: StatsView::new(store),
            tab: Tab::default(),
        }
    }

    /// Start on `tab`
    #[must_use]
    pub const fn with_tab(mut self, tab: Tab) -> Self {
        self.tab = tab;
        self
    }

    /// Draw rows with `markers`
    #[must_use]
    pub fn with_markers(mut self, markers: Markers) -> Self {
        self.list = self.list.with_markers(markers);
        self
    }

    /// Active tab
    #[must_use]
    pub const fn tab(&self) -> Tab {
        self.tab
    }

    /// Handle one input line
    ///
    /// Errors are reported in the returned text, above the redrawn tab.
    pub fn execute(&mut self, line: &str) -> Outcome {
        let result = line.parse::<Command>().and_then(|command| match command {
            Command::Quit => Ok(None),
            command => self.dispatch(command).map(Some),
        });

        match result {
            Ok(None) => Outcome::Quit,
            Ok(Some(message)) => Outcome::Continue(self.frame(message.as_deref())),
            Err(error) => {
                warn!(input = line.trim(), %error, "Command rejected");
                Outcome::Continue(self.frame(Some(&format!("error: {error}"))))
            }
        }
    }

    /// Run a parsed command, returning an optional message for the user
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] when a row does not name a task on screen or
    /// the snapshot cannot be encoded.
    pub fn dispatch(&mut self, command: Command) -> Result<Option<String>, CommandError> {
        debug!(?command, tab = ?self.tab, "Dispatching command");
        match command {
            Command::Redraw | Command::Quit => Ok(None),
            Command::Add(text) => {
                self.list.set_draft(text);
                let reduction = self.list.submit();
                Ok(Self::unchanged_note(reduction, "nothing to add"))
            }
            Command::Toggle(row) => {
                let reduction = self.list.tap_row(row).ok_or(CommandError::NoTaskAt(row))?;
                Ok(Self::unchanged_note(reduction, "task is gone"))
            }
            Command::Delete(row) => {
                let reduction = self
                    .list
                    .tap_delete(row)
                    .ok_or(CommandError::NoTaskAt(row))?;
                Ok(Self::unchanged_note(reduction, "task is gone"))
            }
            Command::Show(tab) => {
                self.tab = tab;
                Ok(None)
            }
            Command::Json => {
                let snapshot = self.store.snapshot();
                Ok(Some(serde_json::to_string_pretty(&snapshot)?))
            }
            Command::Help => Ok(Some(HELP.to_string())),
        }
    }

    fn unchanged_note(reduction: Reduction, note: &str) -> Option<String> {
        (!reduction.is_changed()).then(|| note.to_string())
    }

    /// Draw the tab bar and the active tab
    pub fn render(&mut self) -> String {
        let bar = self.tab_bar();
        let body = match self.tab {
            Tab::Tasks => self.list.render().to_string(),
            Tab::Stats => self.stats.render().to_string(),
        };
        format!("{bar}\n\n{body}")
    }

    fn tab_bar(&self) -> String {
        let label = |title: &str, active: bool| {
            if active {
                format!("[{title}]")
            } else {
                format!(" {title} ")
            }
        };
        format!(
            "{} {}",
            label(self.list.title(), self.tab == Tab::Tasks),
            label(self.stats.title(), self.tab == Tab::Stats)
        )
    }

    fn frame(&mut self, message: Option<&str>) -> String {
        let screen = self.render();
        match message {
            Some(message) => format!("{message}\n\n{screen}"),
            None => screen,
        }
    }
}

impl fmt::Debug for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shell")
            .field("tab", &self.tab)
            .field("list", &self.list)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!("".parse::<Command>().unwrap(), Command::Redraw);
        assert_eq!(
            "add   Buy milk ".parse::<Command>().unwrap(),
            Command::Add("Buy milk".to_string())
        );
        assert_eq!("t 2".parse::<Command>().unwrap(), Command::Toggle(2));
        assert_eq!("RM 1".parse::<Command>().unwrap(), Command::Delete(1));
        assert_eq!("stats".parse::<Command>().unwrap(), Command::Show(Tab::Stats));
        assert_eq!("exit".parse::<Command>().unwrap(), Command::Quit);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            "frobnicate".parse::<Command>(),
            Err(CommandError::Unknown(word)) if word == "frobnicate"
        ));
        assert!(matches!(
            "add".parse::<Command>(),
            Err(CommandError::MissingArgument { command: "add", .. })
        ));
        assert!(matches!(
            "toggle".parse::<Command>(),
            Err(CommandError::MissingArgument { command: "toggle", .. })
        ));
        assert!(matches!(
            "delete two".parse::<Command>(),
            Err(CommandError::InvalidRow(raw)) if raw == "two"
        ));
    }

    #[test]
    fn tab_parses_case_insensitively() {
        assert_eq!(" Stats ".parse::<Tab>(), Ok(Tab::Stats));
        assert_eq!("TASKS".parse::<Tab>(), Ok(Tab::Tasks));
        assert_eq!("settings".parse::<Tab>(), Err(()));
    }
}
