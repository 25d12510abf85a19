use crossterm::event::Event as CrosstermEvent;

#[derive(Debug)]
pub enum AppEvent {
    /// Terminal input event
    Terminal(CrosstermEvent),

    /// One second elapsed on the rate lock started at `epoch`
    RateTick { epoch: u64 },

    /// Tick for UI refresh and scheduled navigation
    Tick,
}
