//! CSV loader for the recommendation catalog.
//!
//! A catalog is a directory holding two required files and an optional
//! third. Headers are matched by name, so column order does not matter;
//! whitespace around values is trimmed.
//!
//! ### `ingredients.csv`
//!
//! | Column     | Notes                    |
//! |------------|--------------------------|
//! | `name`     | e.g. `Ayam`              |
//! | `calories` | display text, `165 kcal` |
//! | `protein`  | display text, `31g`      |
//!
//! ### `recipes.csv`
//!
//! | Column        | Notes                                        |
//! |---------------|----------------------------------------------|
//! | `name`        | e.g. `Sup Ayam dan Sayuran`                  |
//! | `ingredients` | `;`-separated, e.g. `Ayam;Brokoli;Wortel`    |
//! | `image`       | image reference, e.g. `/images/sup.jpeg`     |
//! | `instructions`| optional, `;`-separated cooking steps        |
//! | `day`         | optional; puts the recipe on that day's menu |
//!
//! ### `nutrition.csv` (optional)
//!
//! | Column      | Notes                               |
//! |-------------|-------------------------------------|
//! | `day`       | 1-based menu day                    |
//! | `name`      | e.g. `Bayam`                        |
//! | `category`  | e.g. `Sayuran`                      |
//! | `energy`    | kcal, decimal                       |
//! | `protein`   | grams, decimal                      |
//! | `fat`       | grams, decimal                      |
//! | `iron`      | milligrams, decimal                 |
//! | `vitamin_a` | micrograms, decimal                 |
//! | `cost`      | rupiah, plain number such as `1500` |
//!
//! Rows are kept in file order; the catalog's "top" entries are simply the
//! first recipes without a `day`. Day rows and day recipes are grouped into
//! daily menus ordered by day.

use std::collections::BTreeMap;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

use meal_core::{DailyMenu, IngredientSummary, NutritionDetail, RecipeSuggestion, Recommendation};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub const INGREDIENTS_FILE: &str = "ingredients.csv";
pub const RECIPES_FILE: &str = "recipes.csv";
pub const NUTRITION_FILE: &str = "nutrition.csv";

/// Errors that can occur when loading catalog data.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("cannot read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `row` is 1-based (header = row 0).
    #[error("{file} row {row}: name is empty")]
    MissingName { file: &'static str, row: usize },

    #[error("recipe '{0}' lists no ingredients")]
    EmptyRecipe(String),

    /// Menu days start at 1.
    #[error("{file} row {row}: day must be 1 or later")]
    InvalidDay { file: &'static str, row: usize },
}

impl From<csv::Error> for CatalogError {
    fn from(err: csv::Error) -> Self {
        CatalogError::CsvParse(err.to_string())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
struct IngredientRecord {
    name: String,
    calories: String,
    protein: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
struct RecipeRecord {
    name: String,
    #[serde(deserialize_with = "deserialize_list")]
    ingredients: Vec<String>,
    image: String,
    #[serde(default, deserialize_with = "deserialize_list")]
    instructions: Vec<String>,
    #[serde(default)]
    day: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
struct NutritionRecord {
    day: u32,
    name: String,
    category: String,
    #[serde(deserialize_with = "deserialize_decimal")]
    energy: Decimal,
    #[serde(deserialize_with = "deserialize_decimal")]
    protein: Decimal,
    #[serde(deserialize_with = "deserialize_decimal")]
    fat: Decimal,
    #[serde(deserialize_with = "deserialize_decimal")]
    iron: Decimal,
    #[serde(deserialize_with = "deserialize_decimal")]
    vitamin_a: Decimal,
    #[serde(deserialize_with = "deserialize_decimal")]
    cost: Decimal,
}

/// Splits a `;`-separated cell, dropping blank items.
fn deserialize_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(s.split(';')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect())
}

fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.trim().parse::<Decimal>().map_err(serde::de::Error::custom)
}

fn reader_for<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(reader)
}

/// Everything a catalog directory provides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub ingredients: Vec<IngredientSummary>,
    /// Recipes without a `day`.
    pub recipes: Vec<RecipeSuggestion>,
    pub daily_menus: Vec<DailyMenu>,
}

impl Catalog {
    /// The first `limit` ingredients and the first `limit` recipes. Daily
    /// menus are passed through whole.
    pub fn top(&self, limit: usize) -> Recommendation {
        Recommendation {
            ingredients: self.ingredients.iter().take(limit).cloned().collect(),
            recipes: self.recipes.iter().take(limit).cloned().collect(),
            daily_menus: self.daily_menus.clone(),
        }
    }
}

type DayRows<T> = Vec<(Option<u32>, T)>;

fn check_day(day: u32, file: &'static str, row: usize) -> Result<u32, CatalogError> {
    if day == 0 {
        return Err(CatalogError::InvalidDay { file, row });
    }
    Ok(day)
}

fn group_daily_menus(
    recipes: &DayRows<RecipeSuggestion>,
    nutrition: Vec<(u32, NutritionDetail)>,
) -> Vec<DailyMenu> {
    let mut menus: BTreeMap<u32, DailyMenu> = BTreeMap::new();
    for (day, detail) in nutrition {
        menu_entry(&mut menus, day).nutrition.push(detail);
    }
    for (day, recipe) in recipes {
        if let Some(day) = *day {
            menu_entry(&mut menus, day).recipes.push(recipe.clone());
        }
    }
    menus.into_values().collect()
}

fn menu_entry(menus: &mut BTreeMap<u32, DailyMenu>, day: u32) -> &mut DailyMenu {
    menus.entry(day).or_insert_with(|| DailyMenu {
        day,
        nutrition: Vec::new(),
        recipes: Vec::new(),
    })
}

/// Loader for catalog CSV files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Parse ingredient rows from any reader.
    pub fn parse_ingredients<R: Read>(reader: R) -> Result<Vec<IngredientSummary>, CatalogError> {
        reader_for(reader)
            .deserialize::<IngredientRecord>()
            .enumerate()
            .map(|(idx, result)| {
                let record = result?;
                if record.name.is_empty() {
                    return Err(CatalogError::MissingName {
                        file: INGREDIENTS_FILE,
                        row: idx + 1,
                    });
                }
                Ok(IngredientSummary::new(
                    record.name,
                    record.calories,
                    record.protein,
                ))
            })
            .collect()
    }

    /// Parse recipe rows from any reader, whatever their `day`. Every
    /// recipe needs at least one ingredient.
    pub fn parse_recipes<R: Read>(reader: R) -> Result<Vec<RecipeSuggestion>, CatalogError> {
        Ok(Self::parse_recipe_rows(reader)?
            .into_iter()
            .map(|(_, recipe)| recipe)
            .collect())
    }

    fn parse_recipe_rows<R: Read>(reader: R) -> Result<DayRows<RecipeSuggestion>, CatalogError> {
        reader_for(reader)
            .deserialize::<RecipeRecord>()
            .enumerate()
            .map(|(idx, result)| {
                let record = result?;
                let row = idx + 1;
                if record.name.is_empty() {
                    return Err(CatalogError::MissingName {
                        file: RECIPES_FILE,
                        row,
                    });
                }
                if record.ingredients.is_empty() {
                    return Err(CatalogError::EmptyRecipe(record.name));
                }
                let day = record
                    .day
                    .map(|day| check_day(day, RECIPES_FILE, row))
                    .transpose()?;
                let recipe = RecipeSuggestion::new(record.name, record.ingredients, record.image)
                    .with_instructions(record.instructions);
                Ok((day, recipe))
            })
            .collect()
    }

    /// Parse nutrition rows from any reader, tagged with their menu day.
    pub fn parse_nutrition<R: Read>(reader: R) -> Result<Vec<(u32, NutritionDetail)>, CatalogError> {
        reader_for(reader)
            .deserialize::<NutritionRecord>()
            .enumerate()
            .map(|(idx, result)| {
                let record = result?;
                let row = idx + 1;
                if record.name.is_empty() {
                    return Err(CatalogError::MissingName {
                        file: NUTRITION_FILE,
                        row,
                    });
                }
                let day = check_day(record.day, NUTRITION_FILE, row)?;
                Ok((
                    day,
                    NutritionDetail {
                        name: record.name,
                        category: record.category,
                        energy_kcal: record.energy,
                        protein_g: record.protein,
                        fat_g: record.fat,
                        iron_mg: record.iron,
                        vitamin_a_ug: record.vitamin_a,
                        cost: record.cost,
                    },
                ))
            })
            .collect()
    }

    /// Parse a catalog from the raw contents of its files. `nutrition` is
    /// `None` when the catalog has no nutrition file.
    pub fn parse(
        ingredients: &[u8],
        recipes: &[u8],
        nutrition: Option<&[u8]>,
    ) -> Result<Catalog, CatalogError> {
        let ingredients = Self::parse_ingredients(ingredients)?;
        let recipe_rows = Self::parse_recipe_rows(recipes)?;
        let nutrition = match nutrition {
            Some(bytes) => Self::parse_nutrition(bytes)?,
            None => Vec::new(),
        };
        let daily_menus = group_daily_menus(&recipe_rows, nutrition);
        Ok(Catalog {
            ingredients,
            recipes: recipe_rows
                .into_iter()
                .filter(|(day, _)| day.is_none())
                .map(|(_, recipe)| recipe)
                .collect(),
            daily_menus,
        })
    }

    /// Convenience wrapper: read the files from `dir` and parse them.
    pub fn load_dir(dir: &Path) -> Result<Catalog, CatalogError> {
        let ingredients = read_file(&dir.join(INGREDIENTS_FILE))?;
        let recipes = read_file(&dir.join(RECIPES_FILE))?;
        let nutrition = read_optional_file(&dir.join(NUTRITION_FILE))?;
        let catalog = Self::parse(&ingredients, &recipes, nutrition.as_deref())?;
        debug!(
            dir = %dir.display(),
            ingredients = catalog.ingredients.len(),
            recipes = catalog.recipes.len(),
            menus = catalog.daily_menus.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, CatalogError> {
    std::fs::read(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_optional_file(path: &Path) -> Result<Option<Vec<u8>>, CatalogError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(source) if source.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(CatalogError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
