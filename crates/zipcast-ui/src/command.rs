//! Terminal input parsing. One line of input becomes one `UserEvent`.

/// Longest ZIP text the input field accepts.
pub const ZIP_INPUT_MAX_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {
    /// New ZIP field contents; empty clears the field.
    SetZip(String),
    /// Country name to select, or `None` to clear the selector.
    SelectCountry(Option<String>),
    /// Town name to select, or `None` to clear the selector.
    SelectTown(Option<String>),
    Predict,
    ListCountries,
    ListTowns,
    LearnMore,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Unknown(String),
    UnexpectedArgument(String),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::Unknown(cmd) => {
                write!(f, "Unknown command '{}'. Type 'help' for a list.", cmd)
            }
            CommandError::UnexpectedArgument(cmd) => {
                write!(f, "'{}' does not take an argument", cmd)
            }
        }
    }
}

impl std::error::Error for CommandError {}

pub const HELP_TEXT: &str = "\
Commands:
  zip <code>        enter a ZIP code (no argument clears it)
  country <name>    select a country (no argument clears it)
  town <name>       select a town/city (no argument clears it)
  predict           get the temperature prediction
  countries         list selectable countries
  towns             list selectable towns
  learn-more        open the PM Accelerator page in a browser
  help              show this text
  quit              exit";

/// Parse one input line. Blank lines yield `Ok(None)`.
///
/// # Errors
/// Returns `CommandError` for unknown commands or stray arguments.
pub fn parse_command(line: &str) -> Result<Option<UserEvent>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (cmd, arg) = match line.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (line, ""),
    };
    let optional = |arg: &str| (!arg.is_empty()).then(|| arg.to_string());

    let event = match cmd.to_ascii_lowercase().as_str() {
        "zip" | "z" => UserEvent::SetZip(arg.chars().take(ZIP_INPUT_MAX_LEN).collect()),
        "country" | "c" => UserEvent::SelectCountry(optional(arg)),
        "town" | "city" | "t" => UserEvent::SelectTown(optional(arg)),
        other => {
            let event = match other {
                "predict" | "p" | "get" => UserEvent::Predict,
                "countries" => UserEvent::ListCountries,
                "towns" | "cities" => UserEvent::ListTowns,
                "learn-more" | "linkedin" => UserEvent::LearnMore,
                "help" | "?" => UserEvent::Help,
                "quit" | "exit" | "q" => UserEvent::Quit,
                _ => return Err(CommandError::Unknown(cmd.to_string())),
            };
            if !arg.is_empty() {
                return Err(CommandError::UnexpectedArgument(cmd.to_string()));
            }
            event
        }
    };

    Ok(Some(event))
}
