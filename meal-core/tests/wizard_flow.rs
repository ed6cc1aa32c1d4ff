//! Walks a whole session through the public controller API, the way a front
//! end would drive it.

use std::sync::Arc;

use meal_core::source::MockRecommendationSource;
use meal_core::wizard::{ResultPhase, Transition, WizardSettings};
use meal_core::{GeoPoint, IngredientSummary, WizardController, WizardStep};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

#[tokio::test(start_paused = true)]
async fn budget_to_recommendation_scenario() {
    let mut wizard =
        WizardController::new(Arc::new(MockRecommendationSource), WizardSettings::default());
    assert_eq!(wizard.step(), WizardStep::Welcome);

    wizard.advance().unwrap();
    assert_eq!(wizard.step(), WizardStep::Budget);
    wizard.set_budget("50000");

    wizard.advance().unwrap();
    assert_eq!(wizard.step(), WizardStep::Location);
    wizard.click_map(-6.21, 106.85);
    wizard.set_radius("1500");

    wizard.advance().unwrap();
    assert_eq!(wizard.step(), WizardStep::Confirm);
    assert_eq!(wizard.state().budget_amount().unwrap(), dec!(50000));
    assert_eq!(wizard.state().map_center, GeoPoint::new(-6.21, 106.85));

    wizard.advance().unwrap();
    assert_eq!(wizard.step(), WizardStep::Result);
    assert!(wizard.is_submitting());
    assert_eq!(wizard.result_phase(), Some(ResultPhase::Loading));

    let transition = wizard.next_completion().await.unwrap();
    assert!(matches!(transition, Transition::Completed { .. }));
    assert!(!wizard.is_submitting());
    assert_eq!(
        wizard.state().ingredients,
        vec![
            IngredientSummary::new("Ayam", "165 kcal", "31g"),
            IngredientSummary::new("Brokoli", "31 kcal", "2.5g"),
            IngredientSummary::new("Quinoa", "120 kcal", "4.4g"),
        ]
    );
    assert_eq!(wizard.state().recipes.len(), 3);
    assert!(wizard.state().recipes.iter().all(|r| !r.name.is_empty()));
    assert_eq!(wizard.state().selected_day, Some(1));
    assert_eq!(wizard.select_day(2), Ok(Transition::DaySelected { day: 2 }));
    let menu = wizard.state().selected_menu().unwrap();
    assert_eq!(menu.nutrition.len(), 3);
    assert_eq!(menu.recipes[0].name, "Nasi Bayam Telur Orak-arik");

    assert_eq!(wizard.restart(), Transition::Restarted);
    assert_eq!(wizard.step(), WizardStep::Welcome);
    assert!(wizard.state().budget.is_empty());
    assert!(wizard.state().recipes.is_empty());
    assert!(wizard.state().daily_menus.is_empty());
    assert_eq!(wizard.state().selected_day, None);
}

#[tokio::test(start_paused = true)]
async fn back_walks_down_from_result_to_budget_and_stops() {
    let mut wizard =
        WizardController::new(Arc::new(MockRecommendationSource), WizardSettings::default());
    for _ in 0..4 {
        wizard.advance().unwrap();
    }
    wizard.next_completion().await.unwrap();

    let steps: Vec<_> = (0..4)
        .map(|_| {
            wizard.back();
            wizard.step()
        })
        .collect();

    assert_eq!(
        steps,
        vec![
            WizardStep::Confirm,
            WizardStep::Location,
            WizardStep::Budget,
            WizardStep::Budget,
        ]
    );
}
