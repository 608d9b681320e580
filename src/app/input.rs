use crate::utils::error::{ExplainError, Result};
use std::io::Read;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Argument,
    Stdin,
    Clipboard,
}

pub fn paste_hint() -> String {
    let ending = if cfg!(windows) {
        "Ctrl+Z then Enter"
    } else {
        "Ctrl+D"
    };
    format!(
        "Paste your error below (end with {}), or leave empty to use clipboard:",
        ending
    )
}

pub fn clipboard_hint() -> &'static str {
    match std::env::consts::OS {
        "linux" => "Try installing a clipboard tool: `sudo apt install xclip`",
        "macos" => "Ensure `pbpaste` is available in your PATH.",
        "windows" => "Try running in a full Windows terminal.",
        _ => "Unknown OS. Clipboard may not be supported.",
    }
}

pub fn read_clipboard() -> Result<String> {
    let mut clipboard = arboard::Clipboard::new().map_err(|e| ExplainError::ClipboardError {
        message: e.to_string(),
    })?;
    clipboard.get_text().map_err(|e| ExplainError::ClipboardError {
        message: e.to_string(),
    })
}

/// Picks the error text: argument first, then piped stdin, then typed stdin,
/// and finally the clipboard when nothing was typed at an interactive terminal.
pub fn resolve_error_input<R, F>(
    argument: Option<String>,
    stdin_is_terminal: bool,
    mut stdin: R,
    clipboard: F,
) -> Result<(String, InputSource)>
where
    R: Read,
    F: FnOnce() -> Result<String>,
{
    if let Some(error) = argument {
        return Ok((error, InputSource::Argument));
    }

    let mut typed = String::new();
    stdin.read_to_string(&mut typed)?;

    if !stdin_is_terminal || !typed.trim().is_empty() {
        return Ok((typed, InputSource::Stdin));
    }

    let pasted = clipboard()?;
    if pasted.trim().is_empty() {
        return Err(ExplainError::ValidationError {
            message: "Clipboard is empty. Please paste an error or type one.".to_string(),
        });
    }
    Ok((pasted, InputSource::Clipboard))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn no_clipboard() -> Result<String> {
        panic!("clipboard should not be read")
    }

    #[test]
    fn test_argument_wins() {
        let (text, source) = resolve_error_input(
            Some("KeyError: 'x'".to_string()),
            true,
            Cursor::new("ignored"),
            no_clipboard,
        )
        .unwrap();
        assert_eq!(text, "KeyError: 'x'");
        assert_eq!(source, InputSource::Argument);
    }

    #[test]
    fn test_piped_stdin_is_used_verbatim() {
        let traceback = "Traceback (most recent call last):\n  File \"a.py\", line 1\nNameError: name 'x' is not defined\n";
        let (text, source) =
            resolve_error_input(None, false, Cursor::new(traceback), no_clipboard).unwrap();
        assert_eq!(text, traceback);
        assert_eq!(source, InputSource::Stdin);
    }

    #[test]
    fn test_typed_input_at_terminal() {
        let (text, source) =
            resolve_error_input(None, true, Cursor::new("ZeroDivisionError"), no_clipboard)
                .unwrap();
        assert_eq!(text, "ZeroDivisionError");
        assert_eq!(source, InputSource::Stdin);
    }

    #[test]
    fn test_empty_terminal_input_falls_back_to_clipboard() {
        let (text, source) = resolve_error_input(None, true, Cursor::new("  \n"), || {
            Ok("ValueError: bad value".to_string())
        })
        .unwrap();
        assert_eq!(text, "ValueError: bad value");
        assert_eq!(source, InputSource::Clipboard);
    }

    #[test]
    fn test_empty_clipboard_is_rejected() {
        let result = resolve_error_input(None, true, Cursor::new(""), || Ok(String::new()));
        assert!(matches!(result, Err(ExplainError::ValidationError { .. })));
    }

    #[test]
    fn test_clipboard_failure_propagates() {
        let result = resolve_error_input(None, true, Cursor::new(""), || {
            Err(ExplainError::ClipboardError {
                message: "no display".to_string(),
            })
        });
        assert!(matches!(result, Err(ExplainError::ClipboardError { .. })));
    }

    #[test]
    fn test_paste_hint_mentions_ending() {
        assert!(paste_hint().contains("Ctrl+"));
        assert!(!clipboard_hint().is_empty());
    }
}
