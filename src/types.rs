//! Shared types for the lottery checker.
//!
//! These types form the data model used across all modules: the ticket
//! number under which a prize is looked up, the drawing status reported
//! by the results API, and the per-number prize result.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Ticket number
// ---------------------------------------------------------------------------

/// A lottery ticket number ("décimo"). Displayed zero-padded to five
/// digits, as printed on the physical ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TicketNumber(pub u32);

impl fmt::Display for TicketNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:05}", self.0)
    }
}

impl FromStr for TicketNumber {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u32>().map(TicketNumber)
    }
}

// ---------------------------------------------------------------------------
// Drawing status
// ---------------------------------------------------------------------------

/// Status of the drawing as reported by the `?s=1` query.
///
/// Wire codes 0–4 map to the five real states. Anything else — an
/// out-of-range code, an `error: true` response, or a transport failure —
/// collapses to [`DrawStatus::Error`], which the polling loop treats the
/// same as "not in progress".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawStatus {
    NotStarted,
    InProgress,
    FinishedUnofficial,
    FinishedOfficialPdf,
    FinishedBasedOnOfficial,
    Error,
}

impl DrawStatus {
    /// Map a wire status code to the enumerated status.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => DrawStatus::NotStarted,
            1 => DrawStatus::InProgress,
            2 => DrawStatus::FinishedUnofficial,
            3 => DrawStatus::FinishedOfficialPdf,
            4 => DrawStatus::FinishedBasedOnOfficial,
            _ => DrawStatus::Error,
        }
    }

    /// Whether winning numbers may still appear.
    pub fn is_in_progress(&self) -> bool {
        matches!(self, DrawStatus::InProgress)
    }

    /// The user-facing message for this status, as published upstream.
    pub fn message(&self) -> &'static str {
        match self {
            DrawStatus::NotStarted => {
                "El sorteo no ha comenzado aún. Todos los números aparecerán como no premiados."
            }
            DrawStatus::InProgress => {
                "El sorteo ha empezado. La lista de números premiados se va cargando poco a poco. \nUn número premiado podría llegar a tardar unos minutos en aparecer."
            }
            DrawStatus::FinishedUnofficial => {
                "El sorteo ha terminado y la lista de números y premios debería ser la correcta aunque, tomada al oído, no podemos estar seguros de ella."
            }
            DrawStatus::FinishedOfficialPdf => {
                "El sorteo ha terminado y existe una lista oficial en PDF."
            }
            DrawStatus::FinishedBasedOnOfficial => {
                "El sorteo ha terminado y la lista de números y premios está basada en la oficial. \nDe todas formas, recuerda que la única lista oficial es la que publica la ONLAE y deberías comprobar todos tus números contra ella."
            }
            DrawStatus::Error => "ERROR",
        }
    }
}

// ---------------------------------------------------------------------------
// Prize result
// ---------------------------------------------------------------------------

/// Result of a per-number prize query.
///
/// `Unknown` is the sentinel for a query the API flagged as an error (or
/// that failed in transport). The loop treats it as "no prize yet" and the
/// number stays queryable on later passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrizeResult {
    /// Prize amount in euros; 0 means no prize.
    Amount(u64),
    /// The API signaled an error for this query.
    Unknown,
}

impl PrizeResult {
    /// Whether this result confirms a positive prize.
    pub fn is_winner(&self) -> bool {
        matches!(self, PrizeResult::Amount(a) if *a > 0)
    }
}

impl fmt::Display for PrizeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrizeResult::Amount(a) => write!(f, "{}", group_thousands(*a)),
            PrizeResult::Unknown => write!(f, "error"),
        }
    }
}

/// Format an amount with comma thousands separators ("1,234,567"),
/// matching the upstream program's output.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
