//! Parsing of interactive input lines.

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `get_rooms [substring]`
    GetRooms(String),
    /// `login <room>`
    Login(String),
    /// `username <name>`; the name may be blank and is validated by the session
    UserName(String),
    Logout,
    Quit,
    /// Anything else is sent as chat text
    Chat(String),
    /// Blank line
    Empty,
}

impl Command {
    /// Split the line at the first space into a keyword and its argument
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return Self::Empty;
        }

        let (keyword, argument) = match line.split_once(' ') {
            Some((keyword, argument)) => (keyword, argument),
            None => (line, ""),
        };

        match keyword {
            "get_rooms" => Self::GetRooms(argument.to_string()),
            "login" => Self::Login(argument.trim().to_string()),
            "username" => Self::UserName(argument.trim().to_string()),
            "logout" if argument.trim().is_empty() => Self::Logout,
            "quit" if argument.trim().is_empty() => Self::Quit,
            _ => Self::Chat(line.to_string()),
        }
    }
}
