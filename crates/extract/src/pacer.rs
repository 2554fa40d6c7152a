// ABOUTME: Shared pacing of outgoing requests to keep a minimum interval between them.
// ABOUTME: Callers reserve start slots under a lock and sleep until their slot arrives.

use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;

/// Spaces request start times a fixed interval apart.
///
/// Each caller reserves the next free slot and sleeps until it arrives, so
/// concurrent callers queue up rather than stampede. The first caller passes
/// immediately and a zero interval disables pacing entirely.
#[derive(Debug)]
pub struct Pacer {
    interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl Pacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_slot: Mutex::new(None),
        }
    }

    /// Wait until this caller's reserved slot arrives.
    pub async fn pace(&self) {
        if self.interval.is_zero() {
            return;
        }

        let now = Instant::now();
        // reserve under the lock, sleep outside it
        let slot = {
            let mut next = self.next_slot.lock().expect("pacer lock poisoned");
            let slot = match *next {
                Some(at) if at > now => at,
                _ => now,
            };
            *next = Some(slot + self.interval);
            slot
        };

        if slot > now {
            tokio::time::sleep_until(slot).await;
        }
    }
}
