/// Storage value that marks the sidebar as open. Every other value, and a
/// missing key, means closed.
pub const SIDEBAR_OPEN_VALUE: &str = "true";

#[must_use]
pub fn parse_sidebar_flag(value: Option<&str>) -> bool {
    value == Some(SIDEBAR_OPEN_VALUE)
}

/// Sidebar state change applied by both the message and storage paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarTransition {
    Opened,
    Closed,
}

impl SidebarTransition {
    #[must_use]
    pub fn from_flag(sidebar_open: bool) -> Self {
        if sidebar_open { Self::Opened } else { Self::Closed }
    }

    #[must_use]
    pub fn sidebar_open(self) -> bool {
        matches!(self, Self::Opened)
    }
}
