//! In-memory state of one wizard session.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{
    DailyMenu, GeoPoint, IngredientSummary, LocationLevel, RecipeSuggestion, Recommendation,
    WizardStep,
};
use crate::validation::{ParseAmountError, parse_amount, parse_radius};

/// Values a fresh or restarted session starts from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardDefaults {
    pub map_center: GeoPoint,
    /// Search radius in meters, as text.
    pub radius: String,
}

impl Default for WizardDefaults {
    fn default() -> Self {
        Self {
            map_center: GeoPoint::JAKARTA,
            radius: "2000".to_string(),
        }
    }
}

/// Sub-phase of [`WizardStep::Result`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultPhase {
    /// The fetch is outstanding.
    Loading,
    /// The lists hold the delivered recommendation.
    Ready,
    /// The fetch failed; `last_error` says why.
    Failed,
}

/// Everything the user has entered plus the delivered recommendation.
///
/// Budget, price estimate and radius hold the raw text the user typed; use
/// [`budget_amount`](Self::budget_amount) and friends to read them as
/// numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardState {
    pub step: WizardStep,
    pub budget: String,
    pub price_estimate: String,
    pub province: Option<String>,
    pub district: Option<String>,
    pub sub_district: Option<String>,
    pub map_center: GeoPoint,
    pub radius: String,
    pub is_submitting: bool,
    pub ingredients: Vec<IngredientSummary>,
    pub recipes: Vec<RecipeSuggestion>,
    pub daily_menus: Vec<DailyMenu>,
    /// Day shown from `daily_menus`; the first day once results arrive.
    pub selected_day: Option<u32>,
    pub last_error: Option<String>,
}

impl WizardState {
    pub fn new(defaults: &WizardDefaults) -> Self {
        Self {
            step: WizardStep::Welcome,
            budget: String::new(),
            price_estimate: String::new(),
            province: None,
            district: None,
            sub_district: None,
            map_center: defaults.map_center,
            radius: defaults.radius.clone(),
            is_submitting: false,
            ingredients: Vec::new(),
            recipes: Vec::new(),
            daily_menus: Vec::new(),
            selected_day: None,
            last_error: None,
        }
    }

    /// `None` unless the wizard is on the result step.
    pub fn result_phase(&self) -> Option<ResultPhase> {
        if self.step != WizardStep::Result {
            return None;
        }
        Some(if self.is_submitting {
            ResultPhase::Loading
        } else if self.last_error.is_some() {
            ResultPhase::Failed
        } else {
            ResultPhase::Ready
        })
    }

    pub fn location(&self, level: LocationLevel) -> Option<&str> {
        match level {
            LocationLevel::Province => self.province.as_deref(),
            LocationLevel::District => self.district.as_deref(),
            LocationLevel::SubDistrict => self.sub_district.as_deref(),
        }
    }

    /// The chosen dropdown values joined as `province, district, sub-district`.
    /// Unset levels are shown empty.
    pub fn location_label(&self) -> String {
        LocationLevel::ALL
            .iter()
            .map(|level| self.location(*level).unwrap_or_default())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn budget_amount(&self) -> Result<Decimal, ParseAmountError> {
        parse_amount(&self.budget)
    }

    pub fn price_estimate_amount(&self) -> Result<Decimal, ParseAmountError> {
        parse_amount(&self.price_estimate)
    }

    pub fn radius_meters(&self) -> Result<f64, ParseAmountError> {
        parse_radius(&self.radius)
    }

    pub fn recommendation(&self) -> Recommendation {
        Recommendation {
            ingredients: self.ingredients.clone(),
            recipes: self.recipes.clone(),
            daily_menus: self.daily_menus.clone(),
        }
    }

    /// Days the delivered recommendation has a menu for, in order.
    pub fn menu_days(&self) -> Vec<u32> {
        self.daily_menus.iter().map(|menu| menu.day).collect()
    }

    pub fn selected_menu(&self) -> Option<&DailyMenu> {
        let day = self.selected_day?;
        self.daily_menus.iter().find(|menu| menu.day == day)
    }

    /// Enters the loading phase with empty result lists.
    pub(crate) fn begin_submission(&mut self) {
        self.step = WizardStep::Result;
        self.is_submitting = true;
        self.clear_results();
        self.last_error = None;
    }

    /// Replaces both lists and ends the loading phase in one step.
    pub(crate) fn complete_submission(&mut self, recommendation: Recommendation) {
        let Recommendation {
            ingredients,
            recipes,
            daily_menus,
        } = recommendation;
        self.ingredients = ingredients;
        self.recipes = recipes;
        self.selected_day = daily_menus.first().map(|menu| menu.day);
        self.daily_menus = daily_menus;
        self.is_submitting = false;
        self.last_error = None;
    }

    pub(crate) fn fail_submission(&mut self, message: String) {
        self.clear_results();
        self.is_submitting = false;
        self.last_error = Some(message);
    }

    fn clear_results(&mut self) {
        self.ingredients.clear();
        self.recipes.clear();
        self.daily_menus.clear();
        self.selected_day = None;
    }
}
