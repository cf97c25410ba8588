// [apps/monitor-daemon/src/rate_limiter.rs]
//! Sliding-window token bucket backing each BrandQueue's `maxPerMinute`
//! cap (spec.md §4.3/§5). A job start waits here before it is allowed
//! to occupy a concurrency permit.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::{Duration, Instant};

const WINDOW: Duration = Duration::from_secs(60);

pub struct SlidingWindowLimiter {
    max_per_minute: u32,
    starts: Mutex<VecDeque<Instant>>,
}

impl SlidingWindowLimiter {
    pub fn new(max_per_minute: u32) -> Self {
        Self {
            max_per_minute,
            starts: Mutex::new(VecDeque::new()),
        }
    }

    /// Blocks until a job start is admitted under the `maxPerMinute`
    /// sliding window, then records the start.
    pub async fn acquire_start_slot(&self) {
        loop {
            let wait = {
                let mut starts = self.starts.lock().unwrap();
                let now = Instant::now();
                while starts.front().is_some_and(|oldest| now.duration_since(*oldest) >= WINDOW) {
                    starts.pop_front();
                }
                if (starts.len() as u32) < self.max_per_minute {
                    starts.push_back(now);
                    None
                } else {
                    let oldest = *starts.front().unwrap();
                    Some(WINDOW - now.duration_since(oldest))
                }
            };

            match wait {
                None => return,
                Some(duration) => tokio::time::sleep(duration).await,
            }
        }
    }
}
