//! Escape-sequence stripping for captured command output.
//!
//! Tool results recorded in a session are raw terminal output: compiler colours, progress
//! bars, cursor movement. None of it means anything in an HTML page, and the `list` command
//! must not replay it into the user's terminal either. Both paths run text through
//! [`strip_ansi_codes`] first.

/// Strips ANSI escape codes and stray control characters from a string
///
/// Removes CSI sequences (`ESC [ ... letter`, colours and cursor movement) and OSC sequences
/// (`ESC ] ... BEL` or `ESC ] ... ESC \`, window titles and hyperlinks). Tabs and line breaks
/// are kept.
///
/// # Examples
///
/// ```
/// use claude_code_transcripts::utils::terminal::strip_ansi_codes;
///
/// let text = "\x1b[31merror\x1b[0m: mismatched types";
/// assert_eq!(strip_ansi_codes(text), "error: mismatched types");
/// ```
pub fn strip_ansi_codes(text: &str) -> String {
    if !text.chars().any(|c| c.is_control() && c != '\n' && c != '\t' && c != '\r') {
        return text.to_string();
    }

    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            match chars.peek() {
                Some('[') => {
                    chars.next();
                    // Parameters run until the final byte, which is a letter (or ~)
                    for next_ch in chars.by_ref() {
                        if next_ch.is_ascii_alphabetic() || next_ch == '~' {
                            break;
                        }
                    }
                }
                Some(']') => {
                    chars.next();
                    while let Some(next_ch) = chars.next() {
                        if next_ch == '\x07' {
                            break;
                        }
                        if next_ch == '\x1b' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            }
            continue;
        }

        if ch.is_control() && ch != '\t' && ch != '\n' && ch != '\r' {
            continue;
        }

        result.push(ch);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_compiler_colours() {
        let text = "\x1b[1m\x1b[31merror[E0308]\x1b[0m\x1b[1m: mismatched types\x1b[0m";
        assert_eq!(strip_ansi_codes(text), "error[E0308]: mismatched types");
    }

    #[test]
    fn test_strip_cursor_movement() {
        let text = "\x1b[2K\x1b[1G   Compiling foo v0.1.0";
        assert_eq!(strip_ansi_codes(text), "   Compiling foo v0.1.0");
    }

    #[test]
    fn test_strip_osc_hyperlink() {
        let text = "\x1b]8;;https://example.com\x07link\x1b]8;;\x1b\\ done";
        assert_eq!(strip_ansi_codes(text), "link done");
    }

    #[test]
    fn test_strip_bell_and_backspace() {
        assert_eq!(strip_ansi_codes("Alert! \x07Test\x08"), "Alert! Test");
    }

    #[test]
    fn test_plain_text_unchanged() {
        let text = "Line 1\nLine 2\r\n\tTabbed 👋";
        assert_eq!(strip_ansi_codes(text), text);
    }

    #[test]
    fn test_only_escape_sequences() {
        assert_eq!(strip_ansi_codes("\x1b[31m\x1b[0m\x1b[2J"), "");
        assert_eq!(strip_ansi_codes(""), "");
    }
}
