//! The closed set of screens and the static navigation graph between them.

use std::fmt;

/// One named view in the app. Exactly one is current at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    #[default]
    Welcome,
    Signup,
    KycUpload,
    KycSelfie,
    Dashboard,
    SendCountry,
    SendAmount,
    SendRate,
    SendBeneficiary,
    SendFunding,
    SendConfirm,
    SendSuccess,
    History,
    Profile,
}

impl Screen {
    pub const ALL: [Screen; 14] = [
        Screen::Welcome,
        Screen::Signup,
        Screen::KycUpload,
        Screen::KycSelfie,
        Screen::Dashboard,
        Screen::SendCountry,
        Screen::SendAmount,
        Screen::SendRate,
        Screen::SendBeneficiary,
        Screen::SendFunding,
        Screen::SendConfirm,
        Screen::SendSuccess,
        Screen::History,
        Screen::Profile,
    ];

    /// Kebab-case tag used in logs and the status bar.
    pub fn tag(self) -> &'static str {
        match self {
            Screen::Welcome => "welcome",
            Screen::Signup => "signup",
            Screen::KycUpload => "kyc-upload",
            Screen::KycSelfie => "kyc-selfie",
            Screen::Dashboard => "dashboard",
            Screen::SendCountry => "send-country",
            Screen::SendAmount => "send-amount",
            Screen::SendRate => "send-rate",
            Screen::SendBeneficiary => "send-beneficiary",
            Screen::SendFunding => "send-funding",
            Screen::SendConfirm => "send-confirm",
            Screen::SendSuccess => "send-success",
            Screen::History => "history",
            Screen::Profile => "profile",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Screen::Welcome => "Welcome",
            Screen::Signup => "Create Account",
            Screen::KycUpload => "Verify Identity",
            Screen::KycSelfie => "Take a Selfie",
            Screen::Dashboard => "Dashboard",
            Screen::SendCountry => "Send To",
            Screen::SendAmount => "Amount",
            Screen::SendRate => "Exchange Rate",
            Screen::SendBeneficiary => "Recipient Details",
            Screen::SendFunding => "Payment Method",
            Screen::SendConfirm => "Review Transfer",
            Screen::SendSuccess => "Transfer Sent",
            Screen::History => "Transaction History",
            Screen::Profile => "Profile",
        }
    }

    /// Where the "back" control leads. Root screens point at themselves.
    pub fn back(self) -> Screen {
        match self {
            Screen::Welcome => Screen::Welcome,
            Screen::Signup => Screen::Welcome,
            Screen::KycUpload => Screen::Signup,
            Screen::KycSelfie => Screen::KycUpload,
            Screen::Dashboard => Screen::Dashboard,
            Screen::SendCountry => Screen::Dashboard,
            Screen::SendAmount => Screen::SendCountry,
            Screen::SendRate => Screen::SendAmount,
            Screen::SendBeneficiary => Screen::SendRate,
            Screen::SendFunding => Screen::SendBeneficiary,
            Screen::SendConfirm => Screen::SendFunding,
            Screen::SendSuccess => Screen::Dashboard,
            Screen::History => Screen::Dashboard,
            Screen::Profile => Screen::Dashboard,
        }
    }

    /// Forward edges the app's own controls produce. Navigation is not
    /// restricted to these; the table only documents the intended graph.
    pub fn successors(self) -> &'static [Screen] {
        match self {
            Screen::Welcome => &[Screen::Signup],
            Screen::Signup => &[Screen::KycUpload],
            Screen::KycUpload => &[Screen::KycSelfie],
            Screen::KycSelfie => &[Screen::Dashboard],
            Screen::Dashboard => &[Screen::SendCountry, Screen::History, Screen::Profile],
            Screen::SendCountry => &[Screen::SendAmount],
            Screen::SendAmount => &[Screen::SendRate],
            Screen::SendRate => &[Screen::SendBeneficiary, Screen::SendRate],
            Screen::SendBeneficiary => &[Screen::SendFunding],
            Screen::SendFunding => &[Screen::SendConfirm],
            Screen::SendConfirm => &[Screen::SendSuccess],
            Screen::SendSuccess => &[Screen::Dashboard],
            Screen::History => &[],
            Screen::Profile => &[Screen::Welcome],
        }
    }

    /// True when `target` is a forward edge or the static back edge.
    pub fn is_expected_edge(self, target: Screen) -> bool {
        self.back() == target || self.successors().contains(&target)
    }

    pub fn is_send_flow(self) -> bool {
        matches!(
            self,
            Screen::SendCountry
                | Screen::SendAmount
                | Screen::SendRate
                | Screen::SendBeneficiary
                | Screen::SendFunding
                | Screen::SendConfirm
                | Screen::SendSuccess
        )
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
