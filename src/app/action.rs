use crate::flow::TimerCommand;
use crate::provider::TransferRequest;

/// Side effects requested by the handler, run by the main loop.
#[derive(Debug, PartialEq)]
pub enum Action {
    StartRateTicker { epoch: u64 },
    StopRateTicker,
    SubmitTransfer(TransferRequest),
    SaveConfig,
    Quit,
}

impl From<TimerCommand> for Action {
    fn from(cmd: TimerCommand) -> Self {
        match cmd {
            TimerCommand::Start { epoch } => Action::StartRateTicker { epoch },
            TimerCommand::Stop => Action::StopRateTicker,
        }
    }
}
