use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::debug;

use super::factory::{SourceConfig, SourceFactory};
use super::recommender::{RecommendationRequest, RecommendationSource, SourceError};
use crate::models::{
    DailyMenu, IngredientSummary, NutritionDetail, RecipeSuggestion, Recommendation,
};

/// Days the mock plans a menu for. Every day gets the same menu.
const MENU_DAYS: [u32; 2] = [1, 2];

/// Stand-in backend that always answers with the same three ingredients,
/// three recipes and two-day menu, whatever the request.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockRecommendationSource;

impl MockRecommendationSource {
    pub fn payload() -> Recommendation {
        Recommendation {
            ingredients: vec![
                IngredientSummary::new("Ayam", "165 kcal", "31g"),
                IngredientSummary::new("Brokoli", "31 kcal", "2.5g"),
                IngredientSummary::new("Quinoa", "120 kcal", "4.4g"),
            ],
            recipes: vec![
                RecipeSuggestion::new(
                    "Ayam Panggang dengan Brokoli",
                    ["Ayam", "Brokoli", "Minyak Zaitun", "Bawang Putih"],
                    "/images/ayam-panggang.jpg",
                ),
                RecipeSuggestion::new(
                    "Quinoa Bowl dengan Sayuran",
                    ["Quinoa", "Brokoli", "Wortel", "Kacang Polong"],
                    "/images/quinoa-salad-foto-resep-utama.jpg",
                ),
                RecipeSuggestion::new(
                    "Sup Ayam dan Sayuran",
                    ["Ayam", "Brokoli", "Wortel", "Seledri"],
                    "/images/sup.jpeg",
                ),
            ],
            daily_menus: MENU_DAYS.into_iter().map(daily_menu).collect(),
        }
    }
}

/// Amounts are whole numbers or one decimal place.
fn amount(tenths: i64) -> Decimal {
    Decimal::new(tenths, 1).normalize()
}

fn nutrition(
    name: &str,
    category: &str,
    [energy, protein, fat, iron, vitamin_a]: [i64; 5],
    cost: i64,
) -> NutritionDetail {
    NutritionDetail {
        name: name.to_string(),
        category: category.to_string(),
        energy_kcal: amount(energy),
        protein_g: amount(protein),
        fat_g: amount(fat),
        iron_mg: amount(iron),
        vitamin_a_ug: amount(vitamin_a),
        cost: Decimal::from(cost),
    }
}

fn daily_menu(day: u32) -> DailyMenu {
    DailyMenu {
        day,
        nutrition: vec![
            nutrition("Nasi", "Makanan Pokok", [1300, 27, 3, 2, 0], 2000),
            nutrition("Bayam", "Sayuran", [230, 29, 4, 27, 4690], 1500),
            nutrition("Telur", "Hewani", [1550, 130, 110, 12, 980], 3000),
        ],
        recipes: vec![
            RecipeSuggestion::new(
                "Nasi Bayam Telur Orak-arik",
                [
                    "1 porsi nasi (130 kcal)",
                    "50 gram bayam, cincang kasar",
                    "1 butir telur ayam",
                    "1 siung bawang putih, cincang halus",
                    "1 sdm minyak goreng",
                    "Garam dan lada secukupnya",
                ],
                "",
            )
            .with_instructions([
                "Panaskan minyak di wajan, tumis bawang putih hingga harum.",
                "Masukkan bayam, tumis hingga layu.",
                "Pecahkan telur, orak-arik hingga matang bersama bayam.",
                "Tambahkan nasi, garam, dan lada, aduk hingga rata dan panas.",
                "Sajikan hangat.",
            ]),
            RecipeSuggestion::new(
                "Sup Bayam Telur",
                [
                    "50 gram bayam",
                    "1 butir telur",
                    "2 siung bawang putih",
                    "500ml kaldu ayam",
                    "Garam dan merica",
                ],
                "",
            )
            .with_instructions([
                "Tumis bawang putih hingga harum",
                "Tambahkan kaldu, didihkan",
                "Masukkan bayam dan telur",
                "Bumbui dengan garam dan merica",
                "Sajikan hangat",
            ]),
            RecipeSuggestion::new(
                "Telur Dadar Bayam",
                [
                    "2 butir telur",
                    "30 gram bayam cincang",
                    "Garam dan merica",
                    "2 sdm minyak goreng",
                ],
                "",
            )
            .with_instructions([
                "Kocok telur dengan bumbu",
                "Campurkan bayam cincang",
                "Goreng hingga matang",
                "Sajikan",
            ]),
        ],
    }
}

#[async_trait]
impl RecommendationSource for MockRecommendationSource {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Recommendation, SourceError> {
        debug!(budget = %request.budget, radius = %request.radius, "serving fixed recommendation");
        Ok(Self::payload())
    }
}

/// Registers [`MockRecommendationSource`] under the `mock` backend name.
pub struct MockSourceFactory;

#[async_trait]
impl SourceFactory for MockSourceFactory {
    fn backend_name(&self) -> &'static str {
        "mock"
    }

    async fn create(
        &self,
        _config: &SourceConfig,
    ) -> Result<Arc<dyn RecommendationSource>, SourceError> {
        Ok(Arc::new(MockRecommendationSource))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::wizard::{WizardDefaults, WizardState};

    #[test]
    fn payload_has_three_ingredients_and_three_recipes() {
        let payload = MockRecommendationSource::payload();

        assert_eq!(
            payload.ingredients,
            vec![
                IngredientSummary::new("Ayam", "165 kcal", "31g"),
                IngredientSummary::new("Brokoli", "31 kcal", "2.5g"),
                IngredientSummary::new("Quinoa", "120 kcal", "4.4g"),
            ]
        );
        let names: Vec<_> = payload.recipes.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Ayam Panggang dengan Brokoli",
                "Quinoa Bowl dengan Sayuran",
                "Sup Ayam dan Sayuran",
            ]
        );
    }

    #[test]
    fn payload_plans_the_same_menu_for_two_days() {
        let payload = MockRecommendationSource::payload();

        let days: Vec<_> = payload.daily_menus.iter().map(|menu| menu.day).collect();
        assert_eq!(days, vec![1, 2]);
        assert_eq!(payload.daily_menus[0].nutrition, payload.daily_menus[1].nutrition);

        let menu = payload.menu_for(1).unwrap();
        let bayam = &menu.nutrition[1];
        assert_eq!(bayam.name, "Bayam");
        assert_eq!(bayam.energy_kcal, dec!(23));
        assert_eq!(bayam.iron_mg, dec!(2.7));
        assert_eq!(bayam.vitamin_a_ug, dec!(469));
        assert_eq!(menu.total_cost(), dec!(6500));
        assert_eq!(menu.recipes[2].instructions.len(), 4);
    }

    #[tokio::test]
    async fn recommend_ignores_request_contents() {
        let mut state = WizardState::new(&WizardDefaults::default());
        state.budget = "not a number".to_string();
        let request = RecommendationRequest::from(&state);

        let result = MockRecommendationSource.recommend(&request).await.unwrap();

        assert_eq!(result, MockRecommendationSource::payload());
    }

    #[tokio::test]
    async fn factory_builds_mock_source() {
        let source = MockSourceFactory
            .create(&SourceConfig::default())
            .await
            .unwrap();

        assert_eq!(source.name(), "mock");
    }
}
