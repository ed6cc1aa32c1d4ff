pub mod controller;
pub mod state;

pub use controller::{
    DEFAULT_FETCH_DELAY, FetchCompletion, Transition, WizardController, WizardSettings,
};
pub use state::{ResultPhase, WizardDefaults, WizardState};
