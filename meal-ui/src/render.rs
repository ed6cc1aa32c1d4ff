//! Plain-text rendering of the wizard, one screen per step.

use std::fmt;

use meal_core::wizard::ResultPhase;
use meal_core::{DailyMenu, LocationLevel, RecipeSuggestion, WizardState, WizardStep};
use rust_decimal::Decimal;

use crate::models::ConfirmationSummary;
use crate::utils::{group_thousands, opt_text_display};

const RULE: &str = "────────────────────────────────────────────────────────";

/// The current screen of a wizard state, ready to print.
pub struct Screen<'a>(pub &'a WizardState);

impl fmt::Display for Screen<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let state = self.0;
        let body: fn(&mut fmt::Formatter<'_>, &WizardState) -> fmt::Result = match state.step {
            // Drawn without the card.
            WizardStep::Welcome => return write_welcome(f),
            WizardStep::Budget => write_budget,
            WizardStep::Location => write_location,
            WizardStep::Confirm => write_confirm,
            WizardStep::Result => match state.result_phase() {
                Some(ResultPhase::Loading) | None => write_loading,
                Some(ResultPhase::Ready) => write_result,
                Some(ResultPhase::Failed) => write_failure,
            },
        };

        write_card_header(f)?;
        body(f, state)?;
        writeln!(f, "{RULE}")?;
        write_buttons(f, state)
    }
}

fn write_card_header(f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "{RULE}")?;
    writeln!(f, "Rekomendasi Makanan AI")?;
    writeln!(
        f,
        "Dapatkan rekomendasi makanan berdasarkan budget dan lokasi Anda"
    )?;
    writeln!(f, "{RULE}")
}

fn write_welcome(f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "    Selamat Datang di Meali")?;
    writeln!(f, "    Buat menu sehat di era digital")?;
    writeln!(f)?;
    writeln!(f, "[next] Mulai")
}

fn write_budget(
    f: &mut fmt::Formatter<'_>,
    state: &WizardState,
) -> fmt::Result {
    writeln!(f, "Langkah 1: Masukkan Budget dan Perkiraan Harga")?;
    writeln!(f)?;
    writeln!(f, "Budget:          {}", input_text(&state.budget, "Masukkan budget Anda"))?;
    writeln!(
        f,
        "Perkiraan Harga: {}",
        input_text(&state.price_estimate, "Masukkan perkiraan harga")
    )
}

fn write_location(
    f: &mut fmt::Formatter<'_>,
    state: &WizardState,
) -> fmt::Result {
    writeln!(f, "Langkah 2: Pilih Lokasi Anda")?;
    for level in LocationLevel::ALL {
        writeln!(f)?;
        let selected = state.location(level);
        writeln!(
            f,
            "Pilih {}: {}",
            level.label(),
            opt_text_display(selected)
        )?;
        for (idx, option) in level.options().iter().enumerate() {
            let marker = if selected == Some(*option) { '*' } else { ' ' };
            writeln!(f, "  {marker} {}. {option}", idx + 1)?;
        }
    }
    writeln!(f)?;
    writeln!(f, "Peta:        {}", state.map_center)?;
    writeln!(
        f,
        "Radius Area: {} meter",
        input_text(&state.radius, "Masukkan radius")
    )
}

fn write_confirm(
    f: &mut fmt::Formatter<'_>,
    state: &WizardState,
) -> fmt::Result {
    writeln!(f, "Langkah 3: Konfirmasi Pilihan Anda")?;
    writeln!(f)?;
    write!(f, "{}", ConfirmationSummary::from(state))
}

fn write_loading(
    f: &mut fmt::Formatter<'_>,
    _state: &WizardState,
) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "Sedang menyiapkan rekomendasi...")?;
    writeln!(f)
}

fn write_result(
    f: &mut fmt::Formatter<'_>,
    state: &WizardState,
) -> fmt::Result {
    writeln!(f, "Langkah 4: Rekomendasi")?;
    writeln!(f)?;
    writeln!(f, "Top 3 Bahan Makanan Rekomendasi")?;
    let rows: Vec<_> = state
        .ingredients
        .iter()
        .map(|row| vec![row.name.clone(), row.calorie_text.clone(), row.protein_text.clone()])
        .collect();
    write_table(f, &["Nama Bahan", "Kalori", "Protein"], &rows)?;
    writeln!(f)?;
    writeln!(f, "Top 3 Rekomendasi Resep")?;
    if state.recipes.is_empty() {
        writeln!(f, "  (tidak ada resep)")?;
    }
    for (idx, recipe) in state.recipes.iter().enumerate() {
        write_recipe(f, idx + 1, recipe)?;
    }
    if let Some(menu) = state.selected_menu() {
        writeln!(f)?;
        write_daily_menu(f, state, menu)?;
    }
    Ok(())
}

fn write_recipe(
    f: &mut fmt::Formatter<'_>,
    number: usize,
    recipe: &RecipeSuggestion,
) -> fmt::Result {
    writeln!(f, "{number}. {}", recipe.name)?;
    if !recipe.image_ref.is_empty() {
        writeln!(f, "   Gambar: {}", recipe.image_ref)?;
    }
    writeln!(f, "   Bahan-bahan:")?;
    for ingredient in &recipe.ingredients {
        writeln!(f, "   - {ingredient}")?;
    }
    if !recipe.instructions.is_empty() {
        writeln!(f, "   Cara Memasak:")?;
        for (step, instruction) in recipe.instructions.iter().enumerate() {
            writeln!(f, "   {}. {instruction}", step + 1)?;
        }
    }
    Ok(())
}

fn write_daily_menu(
    f: &mut fmt::Formatter<'_>,
    state: &WizardState,
    menu: &DailyMenu,
) -> fmt::Result {
    writeln!(f, "Menu Harian: Hari ke-{}", menu.day)?;
    for day in state.menu_days() {
        let marker = if day == menu.day { '*' } else { ' ' };
        writeln!(f, "  {marker} Hari ke-{day}")?;
    }
    writeln!(f)?;
    writeln!(f, "Tabel Nutrisi")?;
    let rows: Vec<_> = menu
        .nutrition
        .iter()
        .map(|row| {
            vec![
                row.name.clone(),
                row.category.clone(),
                number_text(row.energy_kcal),
                number_text(row.protein_g),
                number_text(row.fat_g),
                number_text(row.iron_mg),
                number_text(row.vitamin_a_ug),
                group_thousands(row.cost),
            ]
        })
        .collect();
    write_table(f, &NUTRITION_HEADERS, &rows)?;
    if !menu.nutrition.is_empty() {
        writeln!(f, "  Total Estimasi Biaya: Rp {}", group_thousands(menu.total_cost()))?;
    }
    writeln!(f)?;
    writeln!(f, "Rekomendasi Resep")?;
    if menu.recipes.is_empty() {
        writeln!(f, "  (tidak ada resep)")?;
    }
    for (idx, recipe) in menu.recipes.iter().enumerate() {
        write_recipe(f, idx + 1, recipe)?;
    }
    Ok(())
}

const NUTRITION_HEADERS: [&str; 8] = [
    "Bahan Pangan",
    "Kategori",
    "Energy (kcal)",
    "Protein (g)",
    "Fat (g)",
    "Iron (mg)",
    "Vitamin A (μg)",
    "Estimasi Biaya (Rp)",
];

fn number_text(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Left-aligned columns sized to their widest cell. The last column is not
/// padded.
fn write_table(
    f: &mut fmt::Formatter<'_>,
    headers: &[&str],
    rows: &[Vec<String>],
) -> fmt::Result {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            rows.iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or_default()
        })
        .collect();

    write_table_row(f, &widths, headers.iter().copied())?;
    if rows.is_empty() {
        return writeln!(f, "  (tidak ada data)");
    }
    for row in rows {
        write_table_row(f, &widths, row.iter().map(String::as_str))?;
    }
    Ok(())
}

fn write_table_row<'a>(
    f: &mut fmt::Formatter<'_>,
    widths: &[usize],
    cells: impl Iterator<Item = &'a str>,
) -> fmt::Result {
    write!(f, " ")?;
    let last = widths.len().saturating_sub(1);
    for (col, cell) in cells.enumerate() {
        if col == last {
            write!(f, " {cell}")?;
        } else {
            let width = widths.get(col).copied().unwrap_or_default();
            write!(f, " {cell:<width$} ")?;
        }
    }
    writeln!(f)
}

fn write_failure(
    f: &mut fmt::Formatter<'_>,
    state: &WizardState,
) -> fmt::Result {
    writeln!(f, "Langkah 4: Rekomendasi")?;
    writeln!(f)?;
    writeln!(
        f,
        "Gagal memuat rekomendasi: {}",
        state.last_error.as_deref().unwrap_or("kesalahan tidak diketahui")
    )
}

fn write_buttons(
    f: &mut fmt::Formatter<'_>,
    state: &WizardState,
) -> fmt::Result {
    let back = state.step.index() > WizardStep::Budget.index();
    let forward = if state.step == WizardStep::Result {
        "[restart] Mulai Ulang"
    } else {
        "[next] Lanjut"
    };
    if back {
        writeln!(f, "[back] Kembali    {forward}")
    } else {
        writeln!(f, "{forward}")
    }
}

/// Typed text, or the field's placeholder in brackets when empty.
fn input_text(value: &str, placeholder: &str) -> String {
    if value.trim().is_empty() {
        format!("<{placeholder}>")
    } else {
        value.to_string()
    }
}
