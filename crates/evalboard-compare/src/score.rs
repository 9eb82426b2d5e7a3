//! Score coercion

use evalboard_core::CellValue;

/// Lowest valid score
pub const MIN_SCORE: f64 = 0.0;

/// Highest valid score
pub const MAX_SCORE: f64 = 10.0;

/// Interpret a cell as a score
///
/// A cell is a score iff its text form parses as a finite decimal number
/// within `0..=10`. Surrounding whitespace is tolerated; nothing else is
/// (no thousands separators, no trailing units). Returns `None` for anything
/// that is not a score.
pub fn coerce_score(value: &CellValue) -> Option<f64> {
    let n = match value {
        CellValue::Number(n) => *n,
        CellValue::String(s) => s.trim().parse::<f64>().ok()?,
        CellValue::Empty | CellValue::Boolean(_) => return None,
    };
    in_range(n)
}

fn in_range(n: f64) -> Option<f64> {
    if n.is_finite() && (MIN_SCORE..=MAX_SCORE).contains(&n) {
        // -0.0 would otherwise display as "-0.00"
        Some(if n == 0.0 { 0.0 } else { n })
    } else {
        None
    }
}

/// The cell's score, or `0.0` when it is not a score
pub fn score_or_zero(value: &CellValue) -> f64 {
    coerce_score(value).unwrap_or(0.0)
}

/// Format a number with exactly two decimals, rounding halves away from zero
///
/// `{:.2}` alone rounds exact halves to even (`8.125` to `8.12`). A double
/// lies exactly halfway between two hundredths only when it is an odd
/// multiple of `1/8`, so only those values need rounding up by hand.
pub fn format_hundredths(n: f64) -> String {
    let eighths = n.abs() * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 == 1.0 {
        let hundredths = (n.abs() * 100.0).ceil().copysign(n);
        return format!("{:.2}", hundredths / 100.0);
    }
    format!("{:.2}", n)
}

/// Render a cell for display
///
/// Scores get exactly two decimals; everything else renders as its literal
/// text.
pub fn format_score(value: &CellValue) -> String {
    match coerce_score(value) {
        Some(n) => format_hundredths(n),
        None => value.to_text().into_owned(),
    }
}
