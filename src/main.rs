mod app;
mod config;
mod flow;
mod logging;
mod provider;
mod ui;

use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::handler;
use crate::app::state::AppState;
use crate::flow::rate_lock::TICK_PERIOD;
use crate::flow::RateTicker;
use crate::provider::mock::{MockHistoryProvider, MockIdentityVerifier, MockRateProvider, MockSettlement};
use crate::provider::SettlementService;
use anyhow::Result;
use crossterm::{
    event::EventStream,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::*;
use std::collections::VecDeque;
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<()> {
    // Install panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    let cfg = config::load_config()?;
    logging::init(&cfg.logging)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, cfg).await;

    restore_terminal()?;

    if let Err(e) = result {
        tracing::error!(error = %e, "exiting on error");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    cfg: config::AppConfig,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();

    let tick_rate = Duration::from_millis(cfg.ui.tick_rate_ms.max(1));
    let rates = MockRateProvider::new(cfg.rates.clone());
    let mut state = AppState::new(
        cfg,
        &rates,
        &MockHistoryProvider,
        Box::new(MockIdentityVerifier::default()),
    );
    let mut settlement = MockSettlement;
    let mut rate_ticker: Option<RateTicker> = None;

    // Spawn terminal input task
    let term_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            if term_tx.send(AppEvent::Terminal(event)).is_err() {
                break;
            }
        }
    });

    // Spawn UI tick task
    let tick_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(tick_rate);
        loop {
            interval.tick().await;
            if tick_tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });

    tracing::info!(
        countries = state.countries.len(),
        rates = state.flow.draft.rates().len(),
        "session started"
    );

    // Initial render
    terminal.draw(|f| ui::render(f, &state))?;

    // Main event loop
    loop {
        let event = event_rx.recv().await;
        let Some(event) = event else { break };

        let mut actions: VecDeque<Action> = handler::handle_event(&mut state, event).into();

        while let Some(action) = actions.pop_front() {
            match action {
                Action::StartRateTicker { epoch } => {
                    let tx = event_tx.clone();
                    // Replacing the old ticker drops it, which aborts its task.
                    rate_ticker = Some(RateTicker::spawn(epoch, TICK_PERIOD, move |epoch| {
                        tx.send(AppEvent::RateTick { epoch }).is_ok()
                    }));
                    tracing::debug!(epoch, "rate ticker started");
                }
                Action::StopRateTicker => {
                    if let Some(ticker) = rate_ticker.take() {
                        tracing::debug!(epoch = ticker.epoch(), "rate ticker stopped");
                    }
                }
                Action::SubmitTransfer(request) => {
                    let result = settlement.submit(&request);
                    actions.extend(handler::apply_settlement(&mut state, &request, result));
                }
                Action::SaveConfig => {
                    if let Err(e) = config::save_config(&state.config) {
                        tracing::warn!(error = %e, "failed to save config");
                        state.status_message = Some(format!("Could not save settings: {}", e));
                    }
                }
                Action::Quit => state.should_quit = true,
            }
        }

        if state.should_quit {
            tracing::info!("session ended");
            break;
        }

        // Conditional render (only if dirty)
        if state.dirty {
            terminal.draw(|f| ui::render(f, &state))?;
            state.dirty = false;
        }
    }

    Ok(())
}
