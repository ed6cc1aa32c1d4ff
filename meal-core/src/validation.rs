//! Parsing and validation of the free-text wizard fields.
//!
//! The wizard stores budget, price estimate and radius as the text the user
//! typed. The helpers here turn that text into numbers; whether a bad value
//! blocks navigation depends on the [`ValidationPolicy`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::error::WizardError;
use crate::models::LocationLevel;
use crate::wizard::WizardState;

/// How strictly [`WizardController::advance`](crate::wizard::WizardController::advance)
/// checks the fields of the step being left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    /// Any text is accepted and navigation is never blocked.
    #[default]
    Permissive,
    /// Leaving the budget or location step requires well-formed values.
    Strict,
}

/// Error returned when a numeric field cannot be interpreted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseAmountError {
    #[error("value is required")]
    Empty,

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("'{0}' must not be negative")]
    Negative(String),

    #[error("'{0}' must be greater than zero")]
    NotPositive(String),
}

/// Trims whitespace, drops thousands separators and rewrites the decimal
/// mark as `.`.
///
/// Both `.` and `,` are accepted as separators. When both appear, the last
/// one is the decimal mark. A lone mark followed by exactly three digits is
/// grouping, so `"50.000"` and `"50,000"` both mean fifty thousand while
/// `"12,5"` means twelve and a half.
fn normalize_numeric_input(s: &str) -> String {
    let trimmed = s.trim();
    let is_mark = |c: char| c == '.' || c == ',';
    let decimal_at = trimmed.rfind(is_mark).filter(|&idx| {
        let mark = trimmed.as_bytes()[idx] as char;
        let mixed = trimmed.chars().any(|c| is_mark(c) && c != mark);
        let repeated = trimmed.matches(mark).count() > 1;
        mixed || (!repeated && trimmed.len() - idx - 1 != 3)
    });

    trimmed
        .char_indices()
        .filter_map(|(idx, c)| match c {
            _ if Some(idx) == decimal_at => Some('.'),
            '.' | ',' => None,
            _ => Some(c),
        })
        .collect()
}

/// Parses a rupiah amount such as `"50.000"`, `"50,000"` or `" 12500.50 "`.
///
/// Empty input and negative amounts are rejected.
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = normalize_numeric_input(s);
    if normalized.is_empty() {
        return Err(ParseAmountError::Empty);
    }
    let amount: Decimal = normalized
        .parse()
        .map_err(|_| ParseAmountError::NotANumber(s.trim().to_string()))?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ParseAmountError::Negative(s.trim().to_string()));
    }
    Ok(amount)
}

/// Parses a search radius in meters. Must be finite and greater than zero.
pub fn parse_radius(s: &str) -> Result<f64, ParseAmountError> {
    let normalized = normalize_numeric_input(s);
    if normalized.is_empty() {
        return Err(ParseAmountError::Empty);
    }
    let meters: f64 = normalized
        .parse()
        .map_err(|_| ParseAmountError::NotANumber(s.trim().to_string()))?;
    if !meters.is_finite() {
        return Err(ParseAmountError::NotANumber(s.trim().to_string()));
    }
    if meters <= 0.0 {
        return Err(ParseAmountError::NotPositive(s.trim().to_string()));
    }
    Ok(meters)
}

fn invalid(field: &'static str, reason: impl ToString) -> WizardError {
    let reason = reason.to_string();
    warn!(field, %reason, "rejected wizard input");
    WizardError::InvalidInput { field, reason }
}

/// Checks the fields collected on the budget step.
pub fn validate_budget_step(state: &WizardState) -> Result<(), WizardError> {
    parse_amount(&state.budget).map_err(|e| invalid("budget", e))?;
    parse_amount(&state.price_estimate).map_err(|e| invalid("price_estimate", e))?;
    Ok(())
}

/// Checks the fields collected on the location step.
///
/// Location dropdowns may be left unset; when set they must name one of the
/// offered options.
pub fn validate_location_step(state: &WizardState) -> Result<(), WizardError> {
    for level in LocationLevel::ALL {
        if let Some(value) = state.location(level) {
            if !level.is_offered(value) {
                return Err(invalid(
                    level.as_str(),
                    format!("'{value}' is not one of the offered options"),
                ));
            }
        }
    }
    parse_radius(&state.radius).map_err(|e| invalid("radius", e))?;
    Ok(())
}
