//! Rate lock countdown.
//!
//! [`RateLockTimer`] is the pure countdown; it only moves when told to.
//! [`RateTicker`] is the periodic task that tells it to, and it is aborted
//! when dropped. Each start bumps an epoch, and ticks carrying an older
//! epoch are discarded, so a tick that was already queued when the user
//! navigated away can never touch a later lock.

use std::time::Duration;
use tokio::task::JoinHandle;

/// How long a quoted rate stays locked.
pub const RATE_LOCK_SECS: u32 = 30;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RateLockState {
    #[default]
    Idle,
    Running(u32),
    Expired,
}

#[derive(Debug, Clone, Default)]
pub struct RateLockTimer {
    state: RateLockState,
    epoch: u64,
}

impl RateLockTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RateLockState {
        self.state
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn seconds_remaining(&self) -> u32 {
        match self.state {
            RateLockState::Running(n) => n,
            RateLockState::Idle | RateLockState::Expired => 0,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, RateLockState::Running(_))
    }

    pub fn is_expired(&self) -> bool {
        self.state == RateLockState::Expired
    }

    /// (Re)start at the full lock duration, discarding any countdown in
    /// progress. Returns the new epoch.
    pub fn start(&mut self) -> u64 {
        self.epoch = self.epoch.wrapping_add(1);
        self.state = RateLockState::Running(RATE_LOCK_SECS);
        self.epoch
    }

    pub fn stop(&mut self) {
        self.state = RateLockState::Idle;
    }

    /// Advance by one second. Reaching zero lands in `Expired`.
    pub fn tick(&mut self) -> RateLockState {
        if let RateLockState::Running(n) = self.state {
            self.state = match n.saturating_sub(1) {
                0 => RateLockState::Expired,
                left => RateLockState::Running(left),
            };
        }
        self.state
    }

    /// Advance only if `epoch` belongs to the current lock.
    pub fn tick_for(&mut self, epoch: u64) -> Option<RateLockState> {
        if epoch != self.epoch || !self.is_running() {
            return None;
        }
        Some(self.tick())
    }
}

/// Owned periodic task feeding ticks for one rate lock.
pub struct RateTicker {
    epoch: u64,
    handle: JoinHandle<()>,
}

impl RateTicker {
    /// Call `on_tick(epoch)` every `period`, starting one period from now.
    /// The task ends when `on_tick` returns false or the ticker is dropped.
    pub fn spawn<F>(epoch: u64, period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut(u64) -> bool + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // The first tick completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                if !on_tick(epoch) {
                    break;
                }
            }
        });
        Self { epoch, handle }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

impl Drop for RateTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn test_start_runs_full_duration() {
        let mut t = RateLockTimer::new();
        assert_eq!(t.state(), RateLockState::Idle);
        t.start();
        assert_eq!(t.state(), RateLockState::Running(30));
    }

    #[test]
    fn test_restart_resets_to_full() {
        let mut t = RateLockTimer::new();
        t.start();
        for _ in 0..7 {
            t.tick();
        }
        assert_eq!(t.seconds_remaining(), 23);
        t.start();
        assert_eq!(t.seconds_remaining(), 30);
    }

    #[test]
    fn test_thirty_ticks_expire() {
        let mut t = RateLockTimer::new();
        t.start();
        for i in 1..30 {
            assert_eq!(t.tick(), RateLockState::Running(30 - i));
        }
        assert_eq!(t.tick(), RateLockState::Expired);
        assert_eq!(t.seconds_remaining(), 0);
        // Further ticks stay put.
        assert_eq!(t.tick(), RateLockState::Expired);
    }

    #[test]
    fn test_stop_from_any_state() {
        let mut t = RateLockTimer::new();
        t.stop();
        assert_eq!(t.state(), RateLockState::Idle);
        t.start();
        t.stop();
        assert_eq!(t.state(), RateLockState::Idle);
        t.start();
        for _ in 0..30 {
            t.tick();
        }
        assert!(t.is_expired());
        t.stop();
        assert_eq!(t.state(), RateLockState::Idle);
    }

    #[test]
    fn test_tick_in_idle_is_ignored() {
        let mut t = RateLockTimer::new();
        assert_eq!(t.tick(), RateLockState::Idle);
    }

    #[test]
    fn test_stale_epoch_is_ignored() {
        let mut t = RateLockTimer::new();
        let first = t.start();
        let second = t.start();
        assert_ne!(first, second);
        assert_eq!(t.tick_for(first), None);
        assert_eq!(t.seconds_remaining(), 30);
        assert_eq!(t.tick_for(second), Some(RateLockState::Running(29)));

        t.stop();
        assert_eq!(t.tick_for(second), None);
    }

    #[tokio::test]
    async fn test_ticker_delivers_epoch_and_stops_on_drop() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let ticker = RateTicker::spawn(7, Duration::from_millis(5), move |epoch| {
            tx.send(epoch).is_ok()
        });
        assert_eq!(ticker.epoch(), 7);
        assert_eq!(rx.recv().await, Some(7));
        assert_eq!(rx.recv().await, Some(7));

        drop(ticker);
        while rx.try_recv().is_ok() {}
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(rx.try_recv().is_err());
    }
}
