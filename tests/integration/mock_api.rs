//! Mock results API for integration testing.
//!
//! Provides a deterministic `DrawApi` implementation with a scripted
//! status sequence and a fixed prize table — all in-memory with no
//! external dependencies. Every query is counted so tests can assert
//! exactly which numbers were re-queried and how often.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use loteria::api::DrawApi;
use loteria::poller::PollClock;
use loteria::types::{DrawStatus, PrizeResult, TicketNumber};

/// A mock results API for deterministic testing.
///
/// Each `fetch_status` call advances through the scripted sequence; once
/// the script is exhausted the last entry repeats. Prizes come from a
/// fixed table; numbers absent from the table report no prize.
pub struct MockDrawApi {
    statuses: Vec<DrawStatus>,
    status_cursor: Mutex<usize>,
    prizes: HashMap<u32, PrizeResult>,
    draw_date: Option<NaiveDate>,
    prize_calls: Mutex<HashMap<u32, usize>>,
}

impl MockDrawApi {
    /// Create a mock with a status script and a prize table.
    pub fn new(statuses: Vec<DrawStatus>, prizes: Vec<(u32, PrizeResult)>) -> Self {
        assert!(!statuses.is_empty(), "status script must not be empty");
        Self {
            statuses,
            status_cursor: Mutex::new(0),
            prizes: prizes.into_iter().collect(),
            draw_date: None,
            prize_calls: Mutex::new(HashMap::new()),
        }
    }

    /// Attach a draw date to be reported by `fetch_draw_date`.
    #[allow(dead_code)]
    pub fn with_draw_date(mut self, date: NaiveDate) -> Self {
        self.draw_date = Some(date);
        self
    }

    /// How many status queries have been issued.
    pub fn status_call_count(&self) -> usize {
        *self.status_cursor.lock().unwrap()
    }

    /// How many prize queries have been issued for a given number.
    pub fn prize_calls_for(&self, number: u32) -> usize {
        self.prize_calls
            .lock()
            .unwrap()
            .get(&number)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl DrawApi for MockDrawApi {
    async fn fetch_status(&self) -> DrawStatus {
        let mut cursor = self.status_cursor.lock().unwrap();
        let idx = (*cursor).min(self.statuses.len() - 1);
        *cursor += 1;
        self.statuses[idx]
    }

    async fn fetch_prize(&self, number: TicketNumber) -> PrizeResult {
        *self
            .prize_calls
            .lock()
            .unwrap()
            .entry(number.0)
            .or_insert(0) += 1;
        self.prizes
            .get(&number.0)
            .copied()
            .unwrap_or(PrizeResult::Amount(0))
    }

    async fn fetch_draw_date(&self) -> Option<NaiveDate> {
        self.draw_date
    }
}

/// A clock that never sleeps; records every requested delay so tests can
/// assert the inter-pass cadence.
pub struct InstantClock {
    pub sleeps: Mutex<Vec<Duration>>,
}

impl InstantClock {
    pub fn new() -> Self {
        Self {
            sleeps: Mutex::new(Vec::new()),
        }
    }

    pub fn sleep_count(&self) -> usize {
        self.sleeps.lock().unwrap().len()
    }
}

#[async_trait]
impl PollClock for InstantClock {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}
