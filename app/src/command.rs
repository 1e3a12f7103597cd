//! Console commands.

use thiserror::Error;

/// Why a line is not a command.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    /// Blank line.
    #[error("Empty command")]
    Empty,

    /// First word is not a command.
    #[error("Unknown command '{0}' (try 'help')")]
    Unknown(String),

    /// Known command, wrong arguments.
    #[error("Usage: {0}")]
    Usage(&'static str),
}

/// One console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List commands.
    Help,
    /// Sign in.
    Login {
        /// Login name.
        username: String,
        /// Password.
        password: String,
    },
    /// Sign out.
    Logout,
    /// Show the signed-in user.
    WhoAmI,
    /// Show the side menu.
    Menu,
    /// Go to a path.
    Go(String),
    /// Search the user list.
    Search(String),
    /// Open a user list row.
    Open(usize),
    /// Enter or leave edit mode on the open user.
    Edit,
    /// Change one field of the open user.
    Set {
        /// Field name.
        field: String,
        /// New value.
        value: String,
    },
    /// Save the open user.
    Save,
    /// Add a session storage entry.
    Session {
        /// Key.
        key: String,
        /// Value.
        value: String,
    },
    /// Add a local storage entry.
    Local {
        /// Key.
        key: String,
        /// Value.
        value: String,
    },
    /// Set a cookie.
    Cookie {
        /// Name.
        key: String,
        /// Value.
        value: String,
        /// Lifetime in minutes.
        expiry_minutes: Option<u32>,
    },
    /// Clear all storage.
    Reset,
    /// Leave the console.
    Quit,
}

/// Help text.
pub const HELP: &str = "\
Commands:
  login <username> <password>   sign in
  logout                        sign out
  whoami                        show the signed-in user
  menu                          show the side menu
  go <path>                     open a page (/welcome, /user-list, /user-detail/<id>, /storage)
  search <keyword>              search the user list
  open <row>                    open a row of the user list
  edit                          enter or leave edit mode on the open user
  set <field> <value>           change a field of the open user
  save                          save the open user
  session <key> <value>         add a session storage entry
  local <key> <value>           add a local storage entry
  cookie <name> <value> [min]   set a cookie (default 60 minutes)
  reset                         clear all storage
  quit                          leave";

impl Command {
    /// Parse one input line.
    ///
    /// # Errors
    ///
    /// Returns error if the line is blank, names no command, or has the
    /// wrong arguments.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match word.to_ascii_lowercase().as_str() {
            "" => return Err(CommandError::Empty),
            "help" | "?" => Self::Help,
            "login" => match args.as_slice() {
                [username, password] => Self::Login {
                    username: (*username).to_string(),
                    password: (*password).to_string(),
                },
                _ => return Err(CommandError::Usage("login <username> <password>")),
            },
            "logout" => Self::Logout,
            "whoami" => Self::WhoAmI,
            "menu" => Self::Menu,
            "go" => match args.as_slice() {
                [path] => Self::Go((*path).to_string()),
                _ => return Err(CommandError::Usage("go <path>")),
            },
            "search" => {
                if rest.is_empty() {
                    return Err(CommandError::Usage("search <keyword>"));
                }
                Self::Search(rest.to_string())
            },
            "open" => match args.as_slice() {
                [row] => row
                    .parse()
                    .map(Self::Open)
                    .map_err(|_| CommandError::Usage("open <row>"))?,
                _ => return Err(CommandError::Usage("open <row>")),
            },
            "edit" => Self::Edit,
            "set" => match rest.split_once(char::is_whitespace) {
                Some((field, value)) => Self::Set {
                    field: field.to_string(),
                    value: value.trim().to_string(),
                },
                None => return Err(CommandError::Usage("set <field> <value>")),
            },
            "save" => Self::Save,
            "session" => match args.as_slice() {
                [key, value] => Self::Session {
                    key: (*key).to_string(),
                    value: (*value).to_string(),
                },
                _ => return Err(CommandError::Usage("session <key> <value>")),
            },
            "local" => match args.as_slice() {
                [key, value] => Self::Local {
                    key: (*key).to_string(),
                    value: (*value).to_string(),
                },
                _ => return Err(CommandError::Usage("local <key> <value>")),
            },
            "cookie" => match args.as_slice() {
                [key, value] => Self::Cookie {
                    key: (*key).to_string(),
                    value: (*value).to_string(),
                    expiry_minutes: None,
                },
                [key, value, minutes] => Self::Cookie {
                    key: (*key).to_string(),
                    value: (*value).to_string(),
                    expiry_minutes: Some(
                        minutes
                            .parse()
                            .map_err(|_| CommandError::Usage("cookie <name> <value> [minutes]"))?,
                    ),
                },
                _ => return Err(CommandError::Usage("cookie <name> <value> [minutes]")),
            },
            "reset" => Self::Reset,
            "quit" | "exit" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(command)
    }

    /// Whether the command works without signing in.
    #[must_use]
    pub const fn is_public(&self) -> bool {
        matches!(self, Self::Help | Self::Login { .. } | Self::Quit)
    }
}
