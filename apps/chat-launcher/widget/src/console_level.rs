use tracing::Level;

/// Browser console method a log line is written through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConsoleMethod {
    Error,
    Warn,
    Info,
    Debug,
}

impl ConsoleMethod {
    pub(crate) fn for_level(level: Level) -> Self {
        if level == Level::ERROR {
            Self::Error
        } else if level == Level::WARN {
            Self::Warn
        } else if level == Level::INFO {
            Self::Info
        } else {
            Self::Debug
        }
    }
}

/// Strips the trailing newline the fmt layer appends to every event.
pub(crate) fn console_line(buffer: &[u8]) -> String {
    String::from_utf8_lossy(buffer).trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_map_to_matching_console_methods() {
        assert_eq!(ConsoleMethod::for_level(Level::ERROR), ConsoleMethod::Error);
        assert_eq!(ConsoleMethod::for_level(Level::WARN), ConsoleMethod::Warn);
        assert_eq!(ConsoleMethod::for_level(Level::INFO), ConsoleMethod::Info);
        assert_eq!(ConsoleMethod::for_level(Level::DEBUG), ConsoleMethod::Debug);
        assert_eq!(ConsoleMethod::for_level(Level::TRACE), ConsoleMethod::Debug);
    }

    #[test]
    fn console_line_drops_trailing_newline() {
        assert_eq!(
            console_line(b" INFO chat_launcher_core::controller: chat icon removed\n"),
            " INFO chat_launcher_core::controller: chat icon removed"
        );
        assert_eq!(console_line(b""), "");
    }
}
