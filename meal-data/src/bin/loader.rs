use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use meal_data::CatalogLoader;
use meal_data::source::TOP_N;

/// Check a recommendation catalog directory and print what it serves.
///
/// The directory must contain:
/// - ingredients.csv with columns name, calories, protein
/// - recipes.csv with columns name, ingredients (`;`-separated), image, and
///   optionally instructions (`;`-separated) and day
///
/// A nutrition.csv with per-day rows is read when present.
#[derive(Parser, Debug)]
#[command(name = "meal-catalog")]
#[command(version, about, long_about = None)]
struct Args {
    /// Catalog directory
    #[arg(short, long)]
    dir: PathBuf,

    /// Number of entries per list a wizard result would show
    #[arg(short, long, default_value_t = TOP_N)]
    limit: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Loading catalog from: {}", args.dir.display());

    let catalog = CatalogLoader::load_dir(&args.dir)
        .with_context(|| format!("Failed to load catalog: {}", args.dir.display()))?;

    println!(
        "Parsed {} ingredients, {} recipes and {} daily menus.",
        catalog.ingredients.len(),
        catalog.recipes.len(),
        catalog.daily_menus.len()
    );

    let top = catalog.top(args.limit);

    println!("\nTop {} ingredients:", args.limit);
    for ingredient in &top.ingredients {
        println!(
            "  {:<20} {:>10} {:>8}",
            ingredient.name, ingredient.calorie_text, ingredient.protein_text
        );
    }

    println!("\nTop {} recipes:", args.limit);
    for recipe in &top.recipes {
        println!("  {} ({})", recipe.name, recipe.image_ref);
        println!("    {}", recipe.ingredients.join(", "));
    }

    for menu in &top.daily_menus {
        println!(
            "\nDay {}: {} kcal, Rp {}",
            menu.day,
            menu.total_energy(),
            menu.total_cost()
        );
        for row in &menu.nutrition {
            println!("  {:<20} {:<15} {:>8} kcal", row.name, row.category, row.energy_kcal);
        }
        for recipe in &menu.recipes {
            println!("  {} ({} steps)", recipe.name, recipe.instructions.len());
        }
    }

    Ok(())
}
