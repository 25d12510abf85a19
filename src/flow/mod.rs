//! Transfer flow core: screens, the draft, quoting, and the rate lock.
//!
//! Nothing in here touches the terminal, so all of it is exercised by plain
//! unit tests.

pub mod draft;
pub mod machine;
pub mod quote;
pub mod rate_lock;
pub mod screen;

pub use draft::{Beneficiary, FundingMethod};
pub use machine::{FlowMachine, TimerCommand};
pub use quote::RateTable;
pub use rate_lock::{RateLockState, RateTicker};
pub use screen::Screen;
