//! Ticket number input.
//!
//! Reads the list of ticket numbers to check from a file, one integer per
//! line. Parsing fails fast on the first malformed line, before any
//! network traffic happens.

use std::path::Path;
use thiserror::Error;

use crate::types::TicketNumber;

/// Errors the binary maps to user-facing messages and exit code 1.
#[derive(Debug, Error)]
pub enum TicketFileError {
    #[error("No se encuentra el fichero {path}")]
    NotFound { path: String },

    #[error("Línea {line} no válida: {content:?}")]
    MalformedLine { line: usize, content: String },
}

/// Load ticket numbers from `path`, one per line.
///
/// Surrounding whitespace on a line is tolerated; fully blank lines are
/// not (one integer per line, no other content). Duplicate numbers are
/// kept as given — the input list's order drives all output.
pub fn load_tickets(path: &Path) -> Result<Vec<TicketNumber>, TicketFileError> {
    let contents = std::fs::read_to_string(path).map_err(|_| TicketFileError::NotFound {
        path: path.display().to_string(),
    })?;

    let mut numbers = Vec::new();
    for (idx, line) in contents.lines().enumerate() {
        match line.parse::<TicketNumber>() {
            Ok(n) => numbers.push(n),
            Err(_) => {
                return Err(TicketFileError::MalformedLine {
                    line: idx + 1,
                    content: line.to_string(),
                })
            }
        }
    }

    Ok(numbers)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
