// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Sliding-window admission control for the gateway.
//!
//! The window is exact: every admission timestamp is kept in a queue until it
//! ages out of the trailing window, so at most `capacity` requests are
//! admitted in any interval of the window's length. Fixed-bucket counters
//! were rejected because they over-admit across bucket edges.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use thiserror::Error;

/// Construction error for [`RateWindow`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InvalidConfiguration {
    #[error("admission window must be a positive duration")]
    ZeroWindow,

    #[error("admission capacity must be positive")]
    ZeroCapacity,
}

/// Outcome of a single admission attempt. A decision, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionDecision {
    /// The request fit inside the rate budget and its timestamp was recorded.
    Admitted,
    /// The window is full; the request must be turned away.
    Rejected,
}

impl AdmissionDecision {
    pub fn is_admitted(self) -> bool {
        matches!(self, Self::Admitted)
    }
}

/// Process-wide sliding-window rate limiter.
///
/// Admission timestamps (monotonic milliseconds) live in an oldest-first
/// queue behind a single mutex. [`RateWindow::try_admit`] holds the lock
/// across evict-check-append, so concurrent callers observe the structure as
/// if their calls ran in some serial order; two callers can never both pass
/// the capacity check against the same queue state. The critical section is
/// synchronous and bounded, no await points.
#[derive(Debug)]
pub struct RateWindow {
    window_ms: u64,
    capacity: usize,
    admissions: Mutex<VecDeque<u64>>,
}

impl RateWindow {
    /// Create a gate admitting at most `capacity` requests per `window`.
    pub fn new(window: Duration, capacity: u32) -> Result<Self, InvalidConfiguration> {
        let window_ms = u64::try_from(window.as_millis()).unwrap_or(u64::MAX);
        if window_ms == 0 {
            return Err(InvalidConfiguration::ZeroWindow);
        }
        if capacity == 0 {
            return Err(InvalidConfiguration::ZeroCapacity);
        }

        Ok(Self {
            window_ms,
            capacity: capacity as usize,
            admissions: Mutex::new(VecDeque::with_capacity(capacity as usize)),
        })
    }

    /// Decide whether a request arriving at `now_ms` may proceed.
    ///
    /// Entries strictly older than the window are evicted first; an entry
    /// whose age is exactly the window length still counts against the
    /// budget. A `Rejected` outcome does not mutate the queue.
    pub fn try_admit(&self, now_ms: u64) -> AdmissionDecision {
        // No panic can occur while the lock is held, so a poisoned queue is
        // still structurally sound.
        let mut admissions = self
            .admissions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        while let Some(&oldest) = admissions.front() {
            if now_ms.saturating_sub(oldest) > self.window_ms {
                admissions.pop_front();
            } else {
                break;
            }
        }

        if admissions.len() < self.capacity {
            admissions.push_back(now_ms);
            AdmissionDecision::Admitted
        } else {
            AdmissionDecision::Rejected
        }
    }

    /// Window length in milliseconds.
    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    /// Maximum admissions per window.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate(window_ms: u64, capacity: u32) -> RateWindow {
        RateWindow::new(Duration::from_millis(window_ms), capacity).unwrap()
    }

    #[test]
    fn test_zero_window_rejected_at_construction() {
        let err = RateWindow::new(Duration::ZERO, 1).unwrap_err();
        assert_eq!(err, InvalidConfiguration::ZeroWindow);
    }

    #[test]
    fn test_zero_capacity_rejected_at_construction() {
        let err = RateWindow::new(Duration::from_secs(1), 0).unwrap_err();
        assert_eq!(err, InvalidConfiguration::ZeroCapacity);
    }

    #[test]
    fn test_admits_up_to_capacity_within_window() {
        let gate = gate(1000, 3);

        assert!(gate.try_admit(0).is_admitted());
        assert!(gate.try_admit(10).is_admitted());
        assert!(gate.try_admit(20).is_admitted());

        assert_eq!(gate.try_admit(30), AdmissionDecision::Rejected);
    }

    #[test]
    fn test_entry_exactly_window_old_still_counts() {
        let gate = gate(1000, 1);

        assert!(gate.try_admit(0).is_admitted());
        // Age exactly 1000: not yet evicted
        assert_eq!(gate.try_admit(1000), AdmissionDecision::Rejected);
        // Age 1001: evicted, slot free
        assert!(gate.try_admit(1001).is_admitted());
    }

    #[test]
    fn test_rejection_leaves_state_untouched() {
        let gate = gate(1000, 1);

        assert!(gate.try_admit(0).is_admitted());
        for _ in 0..5 {
            assert_eq!(gate.try_admit(500), AdmissionDecision::Rejected);
        }

        // The rejected calls must not have refreshed the window
        assert!(gate.try_admit(1001).is_admitted());
    }

    #[test]
    fn test_window_slides_continuously() {
        let gate = gate(100, 2);

        assert!(gate.try_admit(0).is_admitted());
        assert!(gate.try_admit(60).is_admitted());
        assert_eq!(gate.try_admit(90), AdmissionDecision::Rejected);

        // The t=0 entry ages out after t=100
        assert!(gate.try_admit(101).is_admitted());
        // t=60 and t=101 still occupy the window
        assert_eq!(gate.try_admit(140), AdmissionDecision::Rejected);
        // t=60 ages out after t=160
        assert!(gate.try_admit(161).is_admitted());
    }

    #[test]
    fn test_saturating_window_duration() {
        // A window longer than u64 milliseconds clamps instead of wrapping
        let gate = RateWindow::new(Duration::MAX, 1).unwrap();
        assert!(gate.try_admit(0).is_admitted());
        assert_eq!(gate.try_admit(u64::MAX), AdmissionDecision::Rejected);
    }
}
