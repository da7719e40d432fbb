use crate::error::{BrowserError, Result};
use crate::popup::PopupEvent;

/// A line typed into the terminal popup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Event(PopupEvent),
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
    <n>                 highlight link n in the page, open it and close
    filter <category>   show all, internal or external links
    search [text]       keep links whose text or URL contains text (empty clears)
    copy                copy every link to the clipboard
    open                open every link in background tabs
    help                show this help
    quit                close without acting";

/// Parse one input line; numbers are 1-based as printed
///
/// Only the command word is trimmed. Everything after the first separator is
/// the argument exactly as typed, so a search may start or end with spaces.
pub fn parse_command(line: &str) -> Result<Command> {
    let line = line.trim_start();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

    match word.to_ascii_lowercase().as_str() {
        "filter" | "f" => Ok(Command::Event(PopupEvent::SetCategory(rest.parse()?))),
        "search" | "s" | "/" => Ok(Command::Event(PopupEvent::SetSearch(rest.to_string()))),
        "copy" | "c" => Ok(Command::Event(PopupEvent::CopyAll)),
        "open" | "o" => Ok(Command::Event(PopupEvent::OpenAll)),
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        number if !number.is_empty() && rest.trim().is_empty() => match number.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(Command::Event(PopupEvent::Select(n - 1))),
            _ => Err(BrowserError::InvalidArgument(format!("unknown command '{}'", line.trim_end()))),
        },
        _ => Err(BrowserError::InvalidArgument(format!("unknown command '{}'", line.trim_end()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::Category;

    #[test]
    fn test_parse_events() {
        assert_eq!(
            parse_command("filter internal").unwrap(),
            Command::Event(PopupEvent::SetCategory(Category::Internal))
        );
        assert_eq!(
            parse_command("search Rust Book").unwrap(),
            Command::Event(PopupEvent::SetSearch("Rust Book".into()))
        );
        assert_eq!(parse_command("search").unwrap(), Command::Event(PopupEvent::SetSearch(String::new())));
        assert_eq!(parse_command("copy").unwrap(), Command::Event(PopupEvent::CopyAll));
        assert_eq!(parse_command("O").unwrap(), Command::Event(PopupEvent::OpenAll));
        assert_eq!(parse_command("q").unwrap(), Command::Quit);
        assert_eq!(parse_command("?").unwrap(), Command::Help);
    }

    #[test]
    fn test_search_keeps_argument_as_typed() {
        assert_eq!(
            parse_command("  search  Rust Book ").unwrap(),
            Command::Event(PopupEvent::SetSearch(" Rust Book ".into()))
        );
        assert_eq!(parse_command("s  ").unwrap(), Command::Event(PopupEvent::SetSearch(" ".into())));
        assert_eq!(parse_command("filter  external ").unwrap(), Command::Event(PopupEvent::SetCategory(Category::External)));
    }

    #[test]
    fn test_parse_selection_is_one_based() {
        assert_eq!(parse_command("1").unwrap(), Command::Event(PopupEvent::Select(0)));
        assert_eq!(parse_command(" 12 ").unwrap(), Command::Event(PopupEvent::Select(11)));
        assert!(parse_command("0").is_err());
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_command("").is_err());
        assert!(parse_command("filter sideways").is_err());
        assert!(parse_command("launch rockets").is_err());
        assert!(parse_command("3 4").is_err());
    }
}
