// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

use crate::{app::AppState, theme::Theme};
use std::path::PathBuf;

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Close the app
    Quit,
    // Display help
    Help,
    // Change theme
    Theme(String),
    // Fetch the sheet now
    Refresh,
    // Jump to a table page (1-based)
    Page(usize),
    // Write the snapshot files, optionally to another directory
    Export(Option<PathBuf>),
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// string returns `Err("")` as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" | "q!" | "quit!" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "r" | "refresh" => Ok(Command::Refresh),
            "theme" => {
                if rest.is_empty() {
                    Err("usage: theme <default|gruvbox>".to_string())
                } else {
                    Ok(Command::Theme(rest.to_string()))
                }
            }
            "page" => match rest.parse::<usize>() {
                Ok(n) if n >= 1 => Ok(Command::Page(n)),
                _ => Err("usage: page <n>, n from 1".to_string()),
            },
            "export" | "w" => Ok(Command::Export(
                (!rest.is_empty()).then(|| PathBuf::from(rest)),
            )),
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// Execute a parsed [`Command`] against the application state.
pub fn execute_command(s: &mut AppState, cmd: Command) {
    match cmd {
        Command::Quit => {
            s.quit = true;
        }
        Command::Help => {
            s.show_help = !s.show_help;
        }
        Command::Theme(name) => {
            s.theme = Theme::by_name(&name);
        }
        Command::Refresh => {
            s.request_refresh();
        }
        Command::Page(n) => {
            s.table.go_to(n, &s.snapshot.tickets);
        }
        Command::Export(dir) => {
            let dir = dir.unwrap_or_else(|| s.config.export.dir.clone());
            s.export_to(&dir);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quit() {
        assert_eq!(Command::parse("q"), Ok(Command::Quit));
        assert_eq!(Command::parse("quit"), Ok(Command::Quit));
        assert_eq!(Command::parse("  quit  "), Ok(Command::Quit));
    }

    #[test]
    fn parse_theme() {
        assert_eq!(
            Command::parse("theme gruvbox"),
            Ok(Command::Theme("gruvbox".to_string()))
        );
        assert!(Command::parse("theme").is_err());
    }

    #[test]
    fn parse_page() {
        assert_eq!(Command::parse("page 3"), Ok(Command::Page(3)));
        assert!(Command::parse("page 0").is_err());
        assert!(Command::parse("page two").is_err());
        assert!(Command::parse("page").is_err());
    }

    #[test]
    fn parse_export() {
        assert_eq!(Command::parse("export"), Ok(Command::Export(None)));
        assert_eq!(
            Command::parse("export /tmp/out"),
            Ok(Command::Export(Some(PathBuf::from("/tmp/out"))))
        );
        assert_eq!(Command::parse("w"), Ok(Command::Export(None)));
    }

    #[test]
    fn parse_refresh() {
        assert_eq!(Command::parse("r"), Ok(Command::Refresh));
        assert_eq!(Command::parse("refresh"), Ok(Command::Refresh));
    }

    #[test]
    fn parse_empty_returns_sentinel_err() {
        assert_eq!(Command::parse(""), Err(String::new()));
        assert_eq!(Command::parse("  "), Err(String::new()));
    }

    #[test]
    fn parse_unknown() {
        let err = Command::parse("frobnicate").unwrap_err();
        assert!(err.contains("frobnicate"));
    }
}
