// src/application/shell.rs
//
// Interactive session
//
// One shell run is one browsing session: the displayed creature, the shiny
// toggle, the browse cursor and the compare list live as long as the loop.
// Input and output are injected so sessions can be scripted in tests.

use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::application::commands;
use crate::application::error_handling::ErrorResponse;
use crate::application::state::AppState;
use crate::domain::CollectionKind;

pub const PROMPT: &str = "pokehub> ";

const HELP: &str = "\
Commands:
  search <name|id>       look up a creature (alias: s)
  random                 look up a random creature
  show                   show the current creature again
  shiny                  toggle the shiny sprite
  fav                    toggle the current creature in favorites
  team [add|remove <id>|clear]
  compare [add|remove <id>|clear]
  favorites [view <n>|clear]
  history [<n>|clear]    recent searches; a number searches that entry again
  browse [filter]        list creatures, optionally filtered
  next | prev | page <n> move through the browse list
  help
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Search(String),
    Random,
    Show,
    ToggleShiny,
    ToggleFavorite,
    List(CollectionKind),
    /// Search again for the n-th (1-based) entry of history or favorites
    Pick(CollectionKind, usize),
    Add(CollectionKind),
    Remove(CollectionKind, u32),
    Clear(CollectionKind),
    Browse(Option<String>),
    Next,
    Previous,
    Page(usize),
    Help,
    Quit,
}

fn parse_id(arg: Option<&str>) -> Result<u32, String> {
    arg.and_then(|s| s.parse().ok())
        .ok_or_else(|| "Expected a numeric creature id".to_string())
}

/// Sub-actions shared by the team and compare commands
fn parse_bounded(kind: CollectionKind, rest: &str) -> Result<ShellCommand, String> {
    let mut words = rest.split_whitespace();
    match words.next() {
        None | Some("list") => Ok(ShellCommand::List(kind)),
        Some("add") => Ok(ShellCommand::Add(kind)),
        Some("remove") | Some("rm") => Ok(ShellCommand::Remove(kind, parse_id(words.next())?)),
        Some("clear") => Ok(ShellCommand::Clear(kind)),
        Some(other) => Err(format!("Unknown {} action: {}", kind, other)),
    }
}

fn parse_position(arg: Option<&str>) -> Result<usize, String> {
    arg.and_then(|s| s.parse().ok())
        .filter(|&n| n > 0)
        .ok_or_else(|| "Expected a list position (1, 2, ...)".to_string())
}

/// Sub-actions shared by the history and favorites commands
fn parse_listing(kind: CollectionKind, rest: &str) -> Result<ShellCommand, String> {
    let mut words = rest.split_whitespace();
    match words.next() {
        None | Some("list") => Ok(ShellCommand::List(kind)),
        Some("clear") => Ok(ShellCommand::Clear(kind)),
        Some("view") => Ok(ShellCommand::Pick(kind, parse_position(words.next())?)),
        Some(number) if number.starts_with(|c: char| c.is_ascii_digit()) => {
            Ok(ShellCommand::Pick(kind, parse_position(Some(number))?))
        }
        Some(other) => Err(format!("Unknown {} action: {}", kind, other)),
    }
}

/// Parse one input line. Blank lines parse to `None`.
pub fn parse_command(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "search" | "s" => ShellCommand::Search(rest.to_string()),
        "random" => ShellCommand::Random,
        "show" => ShellCommand::Show,
        "shiny" => ShellCommand::ToggleShiny,
        "fav" | "favorite" | "favourite" => ShellCommand::ToggleFavorite,
        "favorites" | "favourites" => parse_listing(CollectionKind::Favorites, rest)?,
        "history" => parse_listing(CollectionKind::History, rest)?,
        "team" => parse_bounded(CollectionKind::Team, rest)?,
        "compare" => parse_bounded(CollectionKind::Compare, rest)?,
        "browse" => ShellCommand::Browse((!rest.is_empty()).then(|| rest.to_string())),
        "next" | "n" => ShellCommand::Next,
        "prev" | "previous" | "p" => ShellCommand::Previous,
        "page" => ShellCommand::Page(
            rest.parse()
                .map_err(|_| "Expected a page number".to_string())?,
        ),
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("Unknown command: {} (try 'help')", other)),
    };

    Ok(Some(command))
}

pub struct Shell<'a> {
    state: &'a AppState,
    shiny: bool,
}

impl<'a> Shell<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state, shiny: false }
    }

    fn show_current(&self, out: &mut impl Write) -> io::Result<()> {
        match commands::current_creature(self.state, self.shiny) {
            Some(view) => write!(out, "{}", view),
            None => writeln!(out, "Nothing displayed yet. Try 'search pikachu'."),
        }
    }

    fn report(out: &mut impl Write, error: &ErrorResponse) -> io::Result<()> {
        writeln!(out, "Error: {}", error)
    }

    fn list(&self, kind: CollectionKind, out: &mut impl Write) -> io::Result<()> {
        if kind == CollectionKind::History {
            let history = commands::search_suggestions(self.state);
            if history.is_empty() {
                return writeln!(out, "No recent searches.");
            }
            writeln!(out, "Recent searches:")?;
            for (position, name) in history.iter().enumerate() {
                writeln!(out, "  {}. {}", position + 1, name)?;
            }
            return Ok(());
        }
        if kind == CollectionKind::Compare {
            return write!(out, "{}", commands::compare_table(self.state));
        }

        let entries = commands::list_collection(self.state, kind);
        if entries.is_empty() {
            return writeln!(out, "The {} is empty.", kind);
        }
        writeln!(out, "{} ({}/{}):", kind, entries.len(), kind.capacity())?;
        for (position, entry) in entries.iter().enumerate() {
            if kind == CollectionKind::Favorites {
                writeln!(out, "  {}. {}", position + 1, entry)?;
            } else {
                writeln!(out, "  {}", entry)?;
            }
        }
        Ok(())
    }

    /// Query that re-displays the n-th entry of a listing
    fn picked_query(&self, kind: CollectionKind, position: usize) -> Option<String> {
        let index = position.checked_sub(1)?;
        match kind {
            CollectionKind::History => commands::search_suggestions(self.state).get(index).cloned(),
            _ => commands::list_collection(self.state, kind)
                .get(index)
                .map(|entry| entry.id.to_string()),
        }
    }

    async fn search(&self, query: &str, out: &mut impl Write) -> io::Result<()> {
        match commands::search_creature(self.state, query, self.shiny).await {
            Ok(Some(view)) => write!(out, "{}", view),
            Ok(None) => Ok(()),
            Err(e) => Self::report(out, &e),
        }
    }

    /// Run one command. Returns false when the session should end.
    pub async fn execute(&mut self, command: ShellCommand, out: &mut impl Write) -> io::Result<bool> {
        let state = self.state;

        match command {
            ShellCommand::Search(query) => self.search(&query, out).await?,
            ShellCommand::Pick(kind, position) => match self.picked_query(kind, position) {
                Some(query) => self.search(&query, out).await?,
                None => writeln!(out, "No entry {} in the {}.", position, kind)?,
            },
            ShellCommand::Random => match commands::random_creature(state, self.shiny).await {
                Ok(Some(view)) => write!(out, "{}", view)?,
                Ok(None) => {}
                Err(e) => Self::report(out, &e)?,
            },
            ShellCommand::Show => self.show_current(out)?,
            ShellCommand::ToggleShiny => {
                self.shiny = !self.shiny;
                writeln!(out, "Shiny sprites {}.", if self.shiny { "on" } else { "off" })?;
            }
            ShellCommand::ToggleFavorite => match commands::toggle_favorite(state) {
                Ok(true) => writeln!(out, "Added to favorites.")?,
                Ok(false) => writeln!(out, "Removed from favorites.")?,
                Err(e) => Self::report(out, &e)?,
            },
            ShellCommand::List(kind) => self.list(kind, out)?,
            ShellCommand::Add(kind) => {
                let added = match kind {
                    CollectionKind::Team => commands::add_to_team(state),
                    _ => commands::add_to_compare(state),
                };
                match added {
                    Ok(entry) => writeln!(out, "Added {} to the {}.", entry.name, kind)?,
                    Err(e) => Self::report(out, &e)?,
                }
            }
            ShellCommand::Remove(kind, id) => {
                match kind {
                    CollectionKind::Team => commands::remove_from_team(state, id),
                    _ => commands::remove_from_compare(state, id),
                }
                self.list(kind, out)?;
            }
            ShellCommand::Clear(kind) => {
                commands::clear_collection(state, kind);
                writeln!(out, "Cleared the {}.", kind)?;
            }
            ShellCommand::Browse(filter) => {
                match commands::browse(state, Some(filter.as_deref().unwrap_or("")), None).await {
                    Ok(page) => write!(out, "{}", page)?,
                    Err(e) => Self::report(out, &e)?,
                }
            }
            ShellCommand::Next => match commands::browse_next(state).await {
                Ok(page) => write!(out, "{}", page)?,
                Err(e) => Self::report(out, &e)?,
            },
            ShellCommand::Previous => match commands::browse_previous(state).await {
                Ok(page) => write!(out, "{}", page)?,
                Err(e) => Self::report(out, &e)?,
            },
            ShellCommand::Page(page) => match commands::browse(state, None, Some(page)).await {
                Ok(page) => write!(out, "{}", page)?,
                Err(e) => Self::report(out, &e)?,
            },
            ShellCommand::Help => writeln!(out, "{}", HELP)?,
            ShellCommand::Quit => return Ok(false),
        }

        Ok(true)
    }

    /// Read commands line by line until `quit` or end of input
    pub async fn run<R, W>(&mut self, input: R, out: &mut W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();
        log::info!("Shell session started");

        loop {
            write!(out, "{}", PROMPT)?;
            out.flush()?;

            let Some(line) = lines.next_line().await? else {
                writeln!(out)?;
                break;
            };

            match parse_command(&line) {
                Ok(Some(command)) => {
                    if !self.execute(command, out).await? {
                        break;
                    }
                }
                Ok(None) => {}
                Err(message) => writeln!(out, "{}", message)?,
            }
        }

        log::info!("Shell session ended");
        Ok(())
    }
}
