//! The screen state machine.
//!
//! Transitions are unconditional: any screen may move to any other. The
//! machine owns the lifecycle hooks that hang off particular screens: the
//! rate lock runs only while `send-rate` is current, and the draft is
//! cleared when a send flow starts or is left for the dashboard.

use crate::flow::draft::DraftStore;
use crate::flow::quote::RateTable;
use crate::flow::rate_lock::{RateLockState, RateLockTimer};
use crate::flow::screen::Screen;

/// What the caller must do with the periodic rate ticker after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    Start { epoch: u64 },
    Stop,
}

#[derive(Debug, Clone)]
pub struct FlowMachine {
    screen: Screen,
    pub draft: DraftStore,
    rate_lock: RateLockTimer,
}

impl FlowMachine {
    pub fn new(rates: RateTable) -> Self {
        Self {
            screen: Screen::Welcome,
            draft: DraftStore::new(rates),
            rate_lock: RateLockTimer::new(),
        }
    }

    pub fn current(&self) -> Screen {
        self.screen
    }

    pub fn rate_lock(&self) -> &RateLockTimer {
        &self.rate_lock
    }

    pub fn transition(&mut self, target: Screen) -> Option<TimerCommand> {
        let from = self.screen;
        if !from.is_expected_edge(target) {
            tracing::debug!(from = %from, to = %target, "unexpected screen transition");
        }
        tracing::debug!(from = %from, to = %target, "transition");

        if target == Screen::SendCountry
            || (target == Screen::Dashboard && from.is_send_flow())
        {
            self.draft.reset();
        }

        self.screen = target;

        if target == Screen::SendRate {
            let epoch = self.rate_lock.start();
            tracing::info!(epoch, "rate lock started");
            Some(TimerCommand::Start { epoch })
        } else if from == Screen::SendRate {
            self.rate_lock.stop();
            tracing::debug!("rate lock released");
            Some(TimerCommand::Stop)
        } else {
            None
        }
    }

    pub fn back(&mut self) -> Option<TimerCommand> {
        let target = self.screen.back();
        if target == self.screen {
            return None;
        }
        self.transition(target)
    }

    /// Apply one periodic tick. Ticks from a previous lock, or arriving
    /// after the rate screen was left, are ignored.
    pub fn rate_tick(&mut self, epoch: u64) -> Option<RateLockState> {
        if self.screen != Screen::SendRate {
            return None;
        }
        let state = self.rate_lock.tick_for(epoch)?;
        if state == RateLockState::Expired {
            tracing::info!(epoch, "rate lock expired");
        }
        Some(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::Country;

    fn machine() -> FlowMachine {
        FlowMachine::new(RateTable::new())
    }

    fn kenya() -> Country {
        Country {
            code: "KE".into(),
            name: "Kenya".into(),
            currency: "KES".into(),
            flag: "🇰🇪".into(),
        }
    }

    #[test]
    fn test_initial_screen_is_welcome() {
        assert_eq!(machine().current(), Screen::Welcome);
    }

    #[test]
    fn test_any_screen_can_reach_any_other() {
        let mut m = machine();
        for &from in Screen::ALL.iter() {
            for &to in Screen::ALL.iter() {
                m.transition(from);
                m.transition(to);
                assert_eq!(m.current(), to);
            }
        }
    }

    #[test]
    fn test_entering_rate_starts_lock() {
        let mut m = machine();
        m.transition(Screen::SendAmount);
        let cmd = m.transition(Screen::SendRate);
        assert_eq!(cmd, Some(TimerCommand::Start { epoch: m.rate_lock().epoch() }));
        assert_eq!(m.rate_lock().state(), RateLockState::Running(30));
    }

    #[test]
    fn test_reentering_rate_restarts_at_thirty() {
        let mut m = machine();
        m.transition(Screen::SendRate);
        let epoch = m.rate_lock().epoch();
        for _ in 0..10 {
            m.rate_tick(epoch);
        }
        assert_eq!(m.rate_lock().seconds_remaining(), 20);

        m.transition(Screen::SendRate);
        assert_eq!(m.rate_lock().seconds_remaining(), 30);
        assert_ne!(m.rate_lock().epoch(), epoch);
    }

    #[test]
    fn test_leaving_rate_always_idles_timer() {
        for &target in Screen::ALL.iter().filter(|s| **s != Screen::SendRate) {
            let mut m = machine();
            m.transition(Screen::SendRate);
            assert_eq!(m.transition(target), Some(TimerCommand::Stop));
            assert_eq!(m.rate_lock().state(), RateLockState::Idle);
        }
    }

    #[test]
    fn test_stale_tick_after_leaving_is_ignored() {
        let mut m = machine();
        m.transition(Screen::SendRate);
        let epoch = m.rate_lock().epoch();
        m.transition(Screen::SendBeneficiary);
        assert_eq!(m.rate_tick(epoch), None);

        m.transition(Screen::SendRate);
        assert_eq!(m.rate_tick(epoch), None);
        assert_eq!(m.rate_lock().seconds_remaining(), 30);
    }

    #[test]
    fn test_rate_lock_expires_after_thirty_ticks() {
        let mut m = machine();
        m.transition(Screen::SendRate);
        let epoch = m.rate_lock().epoch();
        let mut last = None;
        for _ in 0..30 {
            last = m.rate_tick(epoch);
        }
        assert_eq!(last, Some(RateLockState::Expired));
        assert_eq!(m.rate_tick(epoch), None);
    }

    #[test]
    fn test_send_country_resets_draft() {
        let mut m = machine();
        m.transition(Screen::SendCountry);
        m.draft.set_destination(&kenya());
        m.draft.set_amount_text("250").unwrap();
        m.transition(Screen::SendAmount);
        m.transition(Screen::SendCountry);
        assert!(!m.draft.has_destination());
        assert_eq!(m.draft.amount_text(), "");
    }

    #[test]
    fn test_abandoning_flow_resets_draft() {
        let mut m = machine();
        m.transition(Screen::SendCountry);
        m.draft.set_destination(&kenya());
        m.transition(Screen::SendAmount);
        m.transition(Screen::Dashboard);
        assert!(!m.draft.has_destination());
    }

    #[test]
    fn test_visiting_history_keeps_draft() {
        let mut m = machine();
        m.transition(Screen::SendCountry);
        m.draft.set_destination(&kenya());
        m.transition(Screen::History);
        // Only the dashboard and send-country reset the draft.
        assert!(m.draft.has_destination());
    }

    #[test]
    fn test_back_follows_static_table() {
        let mut m = machine();
        m.transition(Screen::SendRate);
        assert_eq!(m.back(), Some(TimerCommand::Stop));
        assert_eq!(m.current(), Screen::SendAmount);
        m.transition(Screen::Welcome);
        assert_eq!(m.back(), None);
        assert_eq!(m.current(), Screen::Welcome);
    }
}
