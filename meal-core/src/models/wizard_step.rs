use std::fmt;

use serde::{Deserialize, Serialize};

/// The screens of the wizard, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WizardStep {
    #[default]
    Welcome,
    Budget,
    Location,
    Confirm,
    Result,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::Welcome,
        WizardStep::Budget,
        WizardStep::Location,
        WizardStep::Confirm,
        WizardStep::Result,
    ];

    pub fn index(&self) -> u8 {
        match self {
            Self::Welcome => 0,
            Self::Budget => 1,
            Self::Location => 2,
            Self::Confirm => 3,
            Self::Result => 4,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    /// The step one screen further along, or `None` on the last screen.
    pub fn next(&self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// The step one screen back, or `None` on the first screen.
    pub fn previous(&self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Welcome => "welcome",
            Self::Budget => "budget",
            Self::Location => "location",
            Self::Confirm => "confirm",
            Self::Result => "result",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.as_str(), self.index())
    }
}
