// Header and delimiter lines

use super::constants::{HEADER_PREFIX_WIDTH, LINE_WIDTH};

/// Dashes needed after a header for `command`; never negative
///
/// Counts bytes, so non-ASCII commands get a shorter rule.
pub fn padding_width(command: &str) -> usize {
    LINE_WIDTH.saturating_sub(HEADER_PREFIX_WIDTH + command.len())
}

/// `-----CMD <index>: <command>` padded with dashes to the line width
pub fn header_line(index: usize, command: &str) -> String {
    format!(
        "-----CMD {}: {}{}",
        index,
        command,
        "-".repeat(padding_width(command))
    )
}

/// A full-width line of dashes
pub fn delimiter_line() -> String {
    "-".repeat(LINE_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::worker::constants::BLANK_COMMAND;

    #[test]
    fn test_header_fills_line_width() {
        let line = header_line(1, "wc -l");
        assert!(line.starts_with("-----CMD 1: wc -l---"));
        assert_eq!(line.len(), LINE_WIDTH);
    }

    #[test]
    fn test_blank_header() {
        let line = header_line(2, BLANK_COMMAND);
        assert_eq!(line, format!("-----CMD 2: <blank>{}", "-".repeat(61)));
    }

    #[test]
    fn test_long_command_clamps_padding() {
        let exact = "x".repeat(68);
        assert_eq!(padding_width(&exact), 0);
        assert_eq!(header_line(3, &exact).len(), LINE_WIDTH);

        let long = "y".repeat(200);
        assert_eq!(padding_width(&long), 0);
        assert_eq!(header_line(3, &long), format!("-----CMD 3: {}", long));
    }

    #[test]
    fn test_padding_counts_bytes() {
        // "é" is two bytes
        assert_eq!(padding_width("grep é"), 80 - 12 - 7);
        assert_eq!(header_line(1, "grep é").len(), LINE_WIDTH);
    }

    #[test]
    fn test_delimiter() {
        assert_eq!(delimiter_line(), "-".repeat(80));
    }
}
