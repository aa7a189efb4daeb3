//! Draw polling loop.
//!
//! Runs the full checking ceremony: draw date and status display, one
//! initial pass over every ticket, then a fixed-interval polling loop
//! while the draw is in progress. Winning numbers join a resolved-set the
//! moment a positive prize is observed and are never queried again.
//!
//! The sleep between passes goes through the [`PollClock`] seam so tests
//! can run the loop without waiting; production uses [`TokioClock`].

use async_trait::async_trait;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info};

use crate::api::DrawApi;
use crate::types::{DrawStatus, PrizeResult, TicketNumber};

// ---------------------------------------------------------------------------
// User-facing messages
// ---------------------------------------------------------------------------

const POLLING_BANNER: &str =
    "El sorteo se está realizando. Iremos comprobando números e indicado los premiados a continuación:";

const ALL_WINNERS_MSG: &str =
    "¡Enhorabuena! El sorteo ha terminado y todos tus números han sido premiados. Aún así recuerda comprobarlos en la fuente oficial";

/// The per-number result line, shared by the initial pass and the loop.
fn prize_line(number: TicketNumber, prize: PrizeResult) -> String {
    format!("El décimo del número {number} tiene un premio de: {prize}")
}

// ---------------------------------------------------------------------------
// Clock seam
// ---------------------------------------------------------------------------

/// Abstraction over the inter-pass delay, so the loop can be driven in
/// tests without real sleeps.
#[async_trait]
pub trait PollClock: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Production clock backed by the tokio timer.
pub struct TokioClock;

#[async_trait]
impl PollClock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

// ---------------------------------------------------------------------------
// Poll report
// ---------------------------------------------------------------------------

/// Summary of a completed run, returned to the binary for the final
/// message and to tests for loop-behavior assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollReport {
    /// Winning numbers with their prize amounts, in resolution order.
    pub winners: Vec<(TicketNumber, u64)>,
    /// How many ticket numbers were checked.
    pub total: usize,
    /// The last status observed before the loop exited.
    pub final_status: DrawStatus,
    /// Polling passes completed after the initial pass.
    pub passes: usize,
}

impl PollReport {
    /// The closing message: full congratulations when every number won,
    /// otherwise the won-out-of-total count.
    pub fn summary_message(&self) -> String {
        if self.winners.len() == self.total {
            ALL_WINNERS_MSG.to_string()
        } else {
            format!(
                "El sorteo ha terminado y has conseguido {} premios de {} números",
                self.winners.len(),
                self.total
            )
        }
    }
}

// ---------------------------------------------------------------------------
// Poller
// ---------------------------------------------------------------------------

/// The draw poller. Borrows the API client and clock; the interval comes
/// from configuration (120 s upstream).
pub struct DrawPoller<'a> {
    api: &'a dyn DrawApi,
    clock: &'a dyn PollClock,
    interval: Duration,
}

impl<'a> DrawPoller<'a> {
    pub fn new(api: &'a dyn DrawApi, clock: &'a dyn PollClock, interval: Duration) -> Self {
        Self {
            api,
            clock,
            interval,
        }
    }

    /// Run the full check against the given ticket numbers.
    ///
    /// Prints result lines as they are known; returns the report for the
    /// final summary. Status is re-fetched at the top of every polling
    /// iteration, so the loop exits as soon as the draw leaves the
    /// in-progress state or every number has resolved.
    pub async fn run(&self, tickets: &[TicketNumber]) -> PollReport {
        // Draw date for these results, display only
        if let Some(date) = self.api.fetch_draw_date().await {
            println!(
                "\nLos resultados para este sorteo son de fecha: {}\n",
                date.format("%d/%m/%Y")
            );
        }

        // Current situation of the draw
        let status = self.api.fetch_status().await;
        println!("{}\n", status.message());

        // Initial pass: every number, current prize (0 before the draw
        // starts; `error` on the sentinel)
        for &number in tickets {
            let prize = self.api.fetch_prize(number).await;
            println!("{}", prize_line(number, prize));
        }
        println!();

        info!(total = tickets.len(), status = ?status, "Initial pass complete");

        let mut resolved: HashSet<TicketNumber> = HashSet::new();
        let mut winners: Vec<(TicketNumber, u64)> = Vec::new();
        let mut passes = 0usize;

        if self.api.fetch_status().await.is_in_progress() {
            println!("{POLLING_BANNER}");
        }

        // While the draw is running, new winning numbers can still appear;
        // keep re-checking the ones not yet resolved.
        let final_status = loop {
            let status = self.api.fetch_status().await;
            if !status.is_in_progress() || winners.len() == tickets.len() {
                break status;
            }

            for &number in tickets {
                if resolved.contains(&number) {
                    continue;
                }
                let prize = self.api.fetch_prize(number).await;
                if let PrizeResult::Amount(amount) = prize {
                    if amount > 0 {
                        resolved.insert(number);
                        winners.push((number, amount));
                        println!("{}", prize_line(number, prize));
                    }
                }
            }

            passes += 1;
            debug!(
                pass = passes,
                resolved = winners.len(),
                total = tickets.len(),
                "Polling pass complete"
            );

            self.clock.sleep(self.interval).await;
        };

        info!(
            winners = winners.len(),
            total = tickets.len(),
            passes,
            final_status = ?final_status,
            "Polling finished"
        );

        PollReport {
            winners,
            total: tickets.len(),
            final_status,
            passes,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
