//! Results API access.
//!
//! Defines the `DrawApi` trait and provides the HTTP implementation for
//! the El País Christmas Lottery results service. Tests substitute a
//! scripted in-memory implementation.

pub mod elpais;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::types::{DrawStatus, PrizeResult, TicketNumber};

/// Abstraction over the drawing-results service.
///
/// Failures are reported through sentinels rather than errors: a transport
/// failure, an unparseable body, and an API-signaled error all collapse to
/// [`DrawStatus::Error`] / [`PrizeResult::Unknown`] / `None`. The polling
/// loop treats all three identically, so the seam carries no `Result`.
#[async_trait]
pub trait DrawApi: Send + Sync {
    /// Query the current drawing status (`?s=1`).
    async fn fetch_status(&self) -> DrawStatus;

    /// Query the prize for a single ticket number (`?n=<num>`).
    async fn fetch_prize(&self, number: TicketNumber) -> PrizeResult;

    /// Query the draw date (`?t=1`), used only for display.
    async fn fetch_draw_date(&self) -> Option<NaiveDate>;
}
