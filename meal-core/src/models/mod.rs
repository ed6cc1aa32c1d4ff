mod geo_point;
mod location;
mod recommendation;
mod wizard_step;

pub use geo_point::GeoPoint;
pub use location::LocationLevel;
pub use recommendation::{
    DailyMenu, IngredientSummary, NutritionDetail, RecipeSuggestion, Recommendation,
};
pub use wizard_step::WizardStep;
