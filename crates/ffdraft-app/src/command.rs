// Line commands accepted on stdin.

use ffdraft_core::Position;

pub const USAGE: &str = "commands: search <name> | pick <name> | list <QB|RB|WR|TE|K|DEF> | count | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Pick(String),
    List(Position),
    Count,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("empty command")]
    Empty,

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error("unknown position {0:?}")]
    UnknownPosition(String),

    #[error("unknown command {0:?}")]
    UnknownCommand(String),
}

impl Command {
    /// Parse one input line. The verb is case-insensitive; the rest of the
    /// line (trimmed) is the argument, so names may contain spaces.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(ParseError::Empty);
        }

        let (verb, arg) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_lowercase().as_str() {
            "search" | "s" => non_empty(arg, "search").map(|a| Command::Search(a.to_string())),
            "pick" | "p" => non_empty(arg, "pick").map(|a| Command::Pick(a.to_string())),
            "list" | "l" => {
                let pos = non_empty(arg, "list")?;
                Position::from_str_pos(pos)
                    .map(Command::List)
                    .ok_or_else(|| ParseError::UnknownPosition(pos.to_string()))
            }
            "count" => Ok(Command::Count),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(ParseError::UnknownCommand(other.to_string())),
        }
    }
}

fn non_empty<'a>(arg: &'a str, cmd: &'static str) -> Result<&'a str, ParseError> {
    if arg.is_empty() {
        Err(ParseError::MissingArgument(cmd))
    } else {
        Ok(arg)
    }
}
