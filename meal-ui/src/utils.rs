use meal_core::validation::parse_amount;
use rust_decimal::Decimal;

/// Placeholder shown for fields the user has not filled in.
pub const EMPTY_FIELD: &str = "—";

/// Groups the integer digits of `amount` Indonesian style: `.` between
/// thousands and `,` before the fraction.
pub fn group_thousands(amount: Decimal) -> String {
    let text = amount.normalize().to_string();
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, digit) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped},{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Formats user-typed money text for display.
///
/// Parseable amounts are grouped (`"50000"` → `"Rp 50.000"`); anything else
/// is echoed back as typed, so the screen always shows what the user entered.
/// Blank input shows [`EMPTY_FIELD`].
pub fn format_rupiah(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return EMPTY_FIELD.to_string();
    }
    match parse_amount(trimmed) {
        Ok(amount) => format!("Rp {}", group_thousands(amount)),
        Err(_) => format!("Rp {trimmed}"),
    }
}

/// Formats an optional text field, using [`EMPTY_FIELD`] when unset or blank.
pub fn opt_text_display(value: Option<&str>) -> &str {
    match value {
        Some(text) if !text.trim().is_empty() => text,
        _ => EMPTY_FIELD,
    }
}
