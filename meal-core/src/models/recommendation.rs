use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the "top ingredients" table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientSummary {
    pub name: String,
    pub calorie_text: String,
    pub protein_text: String,
}

impl IngredientSummary {
    pub fn new(
        name: impl Into<String>,
        calorie_text: impl Into<String>,
        protein_text: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            calorie_text: calorie_text.into(),
            protein_text: protein_text.into(),
        }
    }
}

/// A suggested dish with its ingredient list, picture and cooking steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSuggestion {
    pub name: String,
    pub ingredients: Vec<String>,
    pub image_ref: String,
    /// Cooking steps in order. Empty when the source has none.
    #[serde(default)]
    pub instructions: Vec<String>,
}

impl RecipeSuggestion {
    pub fn new<I, S>(name: impl Into<String>, ingredients: I, image_ref: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            ingredients: ingredients.into_iter().map(Into::into).collect(),
            image_ref: image_ref.into(),
            instructions: Vec::new(),
        }
    }

    pub fn with_instructions<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.instructions = steps.into_iter().map(Into::into).collect();
        self
    }
}

/// One row of a day's nutrition table. Amounts are per portion; `cost` is
/// in rupiah.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionDetail {
    pub name: String,
    pub category: String,
    pub energy_kcal: Decimal,
    pub protein_g: Decimal,
    pub fat_g: Decimal,
    pub iron_mg: Decimal,
    pub vitamin_a_ug: Decimal,
    pub cost: Decimal,
}

/// The menu planned for one day: what to buy and what to cook with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyMenu {
    /// 1-based day number.
    pub day: u32,
    pub nutrition: Vec<NutritionDetail>,
    pub recipes: Vec<RecipeSuggestion>,
}

impl DailyMenu {
    pub fn total_cost(&self) -> Decimal {
        self.nutrition.iter().map(|row| row.cost).sum()
    }

    pub fn total_energy(&self) -> Decimal {
        self.nutrition.iter().map(|row| row.energy_kcal).sum()
    }
}

/// Everything a completed fetch delivers. Applied to the wizard as a unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub ingredients: Vec<IngredientSummary>,
    pub recipes: Vec<RecipeSuggestion>,
    /// Day-by-day menus, ordered by day. Sources without menu data leave
    /// this empty.
    #[serde(default)]
    pub daily_menus: Vec<DailyMenu>,
}

impl Recommendation {
    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty() && self.recipes.is_empty() && self.daily_menus.is_empty()
    }

    pub fn menu_for(&self, day: u32) -> Option<&DailyMenu> {
        self.daily_menus.iter().find(|menu| menu.day == day)
    }
}
