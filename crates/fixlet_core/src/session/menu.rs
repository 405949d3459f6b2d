//! Numbered menu selections.

/// One selectable action of the interactive menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    List,
    Query,
    Sort,
    Add,
    Delete,
    Exit,
}

/// Menu line shown before every selection.
pub const MENU_TEXT: &str = "1. List  2. Query  3. Sort  4. Add  5. Delete  6. Exit";

impl MenuChoice {
    /// Parses a menu number; surrounding whitespace is ignored.
    ///
    /// Returns `None` for anything outside `1..=6`.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::List),
            "2" => Some(Self::Query),
            "3" => Some(Self::Sort),
            "4" => Some(Self::Add),
            "5" => Some(Self::Delete),
            "6" => Some(Self::Exit),
            _ => None,
        }
    }

    /// Stable name used in log events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Query => "query",
            Self::Sort => "sort",
            Self::Add => "add",
            Self::Delete => "delete",
            Self::Exit => "exit",
        }
    }
}
