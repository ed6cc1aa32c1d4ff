use std::fmt;

use meal_core::WizardState;

use crate::utils::{EMPTY_FIELD, format_rupiah};

/// The values shown on the confirmation step, formatted for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmationSummary {
    pub budget: String,
    pub price_estimate: String,
    pub location: String,
    pub radius: String,
}

impl From<&WizardState> for ConfirmationSummary {
    fn from(state: &WizardState) -> Self {
        let location = state.location_label();
        let location = if location.replace(',', "").trim().is_empty() {
            EMPTY_FIELD.to_string()
        } else {
            location
        };
        let radius = match state.radius.trim() {
            "" => EMPTY_FIELD.to_string(),
            radius => format!("{radius} meter"),
        };

        Self {
            budget: format_rupiah(&state.budget),
            price_estimate: format_rupiah(&state.price_estimate),
            location,
            radius,
        }
    }
}

impl fmt::Display for ConfirmationSummary {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Budget:          {}", self.budget)?;
        writeln!(f, "Perkiraan Harga: {}", self.price_estimate)?;
        writeln!(f, "Lokasi:          {}", self.location)?;
        writeln!(f, "Radius:          {}", self.radius)
    }
}
