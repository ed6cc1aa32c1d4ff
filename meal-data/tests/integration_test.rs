//! Exercises the catalog loader and the csv backend against on-disk fixture
//! directories.

use std::path::{Path, PathBuf};

use meal_core::source::{
    MockSourceFactory, RecommendationRequest, SourceConfig, SourceError, SourceFactory,
    SourceRegistry,
};
use meal_core::wizard::{WizardDefaults, WizardState};
use meal_core::{IngredientSummary, RecommendationSource};
use meal_data::{CatalogError, CatalogLoader, CsvCatalogSource, CsvSourceFactory, NUTRITION_FILE};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn request() -> RecommendationRequest {
    RecommendationRequest::from(&WizardState::new(&WizardDefaults::default()))
}

#[test]
fn test_load_fixture_catalog() {
    let catalog = CatalogLoader::load_dir(&fixture("catalog")).expect("fixture should load");

    assert_eq!(catalog.ingredients.len(), 4);
    assert_eq!(catalog.recipes.len(), 4);
    assert_eq!(catalog.daily_menus.len(), 2);
    assert_eq!(
        catalog.ingredients[0],
        IngredientSummary::new("Tahu", "76 kcal", "8g")
    );
    assert_eq!(
        catalog.recipes[2].ingredients,
        vec!["Ikan Kembung", "Kemangi", "Tomat", "Cabai"]
    );
}

#[test]
fn test_load_missing_directory_reports_path() {
    let err = CatalogLoader::load_dir(Path::new("/this/path/does/not/exist")).unwrap_err();

    match err {
        CatalogError::Io { path, .. } => assert!(path.ends_with("ingredients.csv")),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_csv_source_serves_top_three() {
    let source = CsvCatalogSource::new(fixture("catalog"));

    let result = source.recommend(&request()).await.unwrap();

    let ingredient_names: Vec<_> = result.ingredients.iter().map(|i| i.name.as_str()).collect();
    let recipe_names: Vec<_> = result.recipes.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(ingredient_names, vec!["Tahu", "Bayam", "Telur"]);
    assert_eq!(
        recipe_names,
        vec!["Sayur Bening Bayam", "Tahu Telur", "Pepes Ikan Kembung"]
    );
}

#[tokio::test]
async fn test_csv_source_limit_is_configurable() {
    let source = CsvCatalogSource::new(fixture("catalog")).with_limit(1);

    let result = source.recommend(&request()).await.unwrap();

    assert_eq!(result.ingredients.len(), 1);
    assert_eq!(result.recipes.len(), 1);
}

#[tokio::test]
async fn test_csv_source_reports_invalid_data() {
    let source = CsvCatalogSource::new(fixture("broken_catalog"));

    let err = source.recommend(&request()).await.unwrap_err();

    assert!(matches!(err, SourceError::InvalidData(_)), "got {err:?}");
}

#[tokio::test]
async fn test_csv_source_reports_missing_files_as_unavailable() {
    let source = CsvCatalogSource::new(fixture("no_such_catalog"));

    let err = source.recommend(&request()).await.unwrap_err();

    assert!(matches!(err, SourceError::Unavailable(_)), "got {err:?}");
}

#[tokio::test]
async fn test_factory_requires_existing_directory() {
    let missing = SourceConfig::named("csv", fixture("no_such_catalog").display().to_string());
    let empty = SourceConfig::named("csv", "  ");

    assert!(matches!(
        CsvSourceFactory.create(&missing).await,
        Err(SourceError::Configuration(_))
    ));
    assert!(matches!(
        CsvSourceFactory.create(&empty).await,
        Err(SourceError::Configuration(_))
    ));
}

#[tokio::test]
async fn test_factory_builds_source_for_fixture() {
    let config = SourceConfig::named("csv", fixture("catalog").display().to_string());

    let source = CsvSourceFactory.create(&config).await.unwrap();

    assert_eq!(source.name(), "csv");
}

#[tokio::test]
async fn test_registry_picks_csv_for_a_catalog_location() {
    let mut registry = SourceRegistry::new();
    registry.register(Box::new(MockSourceFactory));
    registry.register(Box::new(CsvSourceFactory));
    let config = SourceConfig {
        backend: None,
        location: fixture("catalog").display().to_string(),
    };

    let backend = registry.resolve(&config).unwrap();
    let source = registry.create(backend, &config).await.unwrap();

    assert_eq!(backend, "csv");
    assert_eq!(source.name(), "csv");
    assert_eq!(registry.resolve(&SourceConfig::default()), Ok("mock"));
}

#[tokio::test]
async fn test_csv_source_serves_daily_menus() {
    let source = CsvCatalogSource::new(fixture("catalog"));

    let result = source.recommend(&request()).await.unwrap();

    let days: Vec<_> = result.daily_menus.iter().map(|menu| menu.day).collect();
    assert_eq!(days, vec![1, 2]);
    let day_one = result.menu_for(1).unwrap();
    assert_eq!(day_one.nutrition.len(), 3);
    assert_eq!(day_one.total_cost(), dec!(6500));
    assert_eq!(day_one.recipes[0].name, "Nasi Bayam Telur Orak-arik");
    assert_eq!(day_one.recipes[0].instructions.len(), 4);
    assert_eq!(result.menu_for(2).unwrap().nutrition[0].category, "Nabati");
}

#[tokio::test]
async fn test_catalog_without_nutrition_file_has_no_menus() {
    let dir = fixture("plain_catalog");
    assert!(!dir.join(NUTRITION_FILE).exists());

    let result = CsvCatalogSource::new(dir).recommend(&request()).await.unwrap();

    assert_eq!(result.recipes.len(), 1);
    assert!(result.recipes[0].instructions.is_empty());
    assert!(result.daily_menus.is_empty());
}
