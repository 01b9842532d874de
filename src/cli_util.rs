use std::io::{self, IsTerminal, Write};
use nu_ansi_term::Style;
use crate::EngineError;
use crate::theme::catppuccin::Mocha;

/// Characters shown on either side of the offending instruction.
const WINDOW_CHARS: usize = 32;

/// Pretty-print an [`EngineError`] with caret positioning to stderr.
/// If `program` is `Some("bf-tape")`, messages are prefixed with "bf-tape: ...".
/// Colours are only used when stderr is a terminal.
pub fn print_engine_error(program: Option<&str>, code: &str, err: &EngineError) {
    let styled = io::stderr().is_terminal();
    let report = render_engine_error(program, code, err, styled);
    let mut stderr = io::stderr().lock();
    let _ = stderr.write_all(report.as_bytes());
    let _ = stderr.flush();
}

/// Build the full error report: header line, then (for errors that point at an
/// instruction) a context window and a caret line.
pub fn render_engine_error(program: Option<&str>, code: &str, err: &EngineError, styled: bool) -> String {
    let prefix_program = |msg: &str| {
        if let Some(p) = program {
            format!("{p}: {msg}")
        } else {
            msg.to_string()
        }
    };

    let header = match err {
        EngineError::InvalidArgument(reason) => {
            return paint(styled, Style::new().fg(Mocha::RED).bold(), &prefix_program(&format!("Invalid argument: {reason}"))) + "\n";
        }
        EngineError::OutOfBounds { ptr, op, .. } => {
            let side = if *op == '<' { "underflow" } else { "overflow" };
            prefix_program(&format!("Runtime error: data pointer {side} (ptr={ptr}, op={op})"))
        }
        EngineError::UnmatchedBracket { kind, .. } => {
            prefix_program(&format!("Runtime error: unmatched bracket {kind}"))
        }
        EngineError::IoFailure { source, .. } => prefix_program(&format!("I/O error: {source}")),
    };

    match err.instruction() {
        Some(pos) => render_with_context(&header, code, pos, styled),
        None => header + "\n",
    }
}

/// Header with instruction index, a short window of the program and a caret
/// under the exact position. Slicing is done on char indices so UTF-8 input
/// is safe.
pub fn render_with_context(prefix: &str, code: &str, pos: usize, styled: bool) -> String {
    let header = format!("{prefix} at instruction {pos}");

    let total_chars = code.chars().count();
    let start_char = pos.saturating_sub(WINDOW_CHARS);
    let end_char = (pos + WINDOW_CHARS + 1).min(total_chars);

    // Newlines and tabs would break caret alignment.
    let window: Vec<char> = code
        .chars()
        .skip(start_char)
        .take(end_char.saturating_sub(start_char))
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();
    let caret_offset = pos.saturating_sub(start_char);

    let mut slice = String::new();
    for (i, c) in window.iter().enumerate() {
        if i == caret_offset {
            slice.push_str(&paint(styled, Style::new().fg(Mocha::PEACH).bold(), &c.to_string()));
        } else {
            slice.push_str(&paint(styled, Style::new().fg(Mocha::SURFACE2), &c.to_string()));
        }
    }

    let underline = format!("{}^", " ".repeat(caret_offset));

    format!(
        "{}\n  {}\n  {}\n",
        paint(styled, Style::new().fg(Mocha::RED).bold(), &header),
        slice,
        paint(styled, Style::new().fg(Mocha::YELLOW).bold(), &underline),
    )
}

fn paint(styled: bool, style: Style, text: &str) -> String {
    if styled {
        style.paint(text).to_string()
    } else {
        text.to_string()
    }
}
