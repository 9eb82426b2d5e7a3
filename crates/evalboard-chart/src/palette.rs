//! Series colours

/// Base series colours, cycled in order
pub const SERIES_COLORS: [&str; 5] = ["#3498db", "#e74c3c", "#f39c12", "#2ecc71", "#9b59b6"];

/// Darker borders matching [`SERIES_COLORS`], used for per-bar colouring
pub const BORDER_COLORS: [&str; 5] = ["#2980b9", "#c0392b", "#e67e22", "#27ae60", "#8e44ad"];

/// Fill alpha for line and bar series (50%)
pub const SERIES_FILL_ALPHA: &str = "80";

/// Fill alpha for radar areas (25%)
pub const RADAR_FILL_ALPHA: &str = "40";

/// Base colour for the series at `index`
pub fn series_color(index: usize) -> &'static str {
    SERIES_COLORS[index % SERIES_COLORS.len()]
}

/// Border colour for the bar at `index`
pub fn border_color(index: usize) -> &'static str {
    BORDER_COLORS[index % BORDER_COLORS.len()]
}

/// Append a two-digit hex alpha to a `#rrggbb` colour
pub fn with_alpha(color: &str, alpha: &str) -> String {
    format!("{}{}", color, alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colors_cycle() {
        assert_eq!(series_color(0), "#3498db");
        assert_eq!(series_color(5), "#3498db");
        assert_eq!(border_color(6), "#c0392b");
    }

    #[test]
    fn test_with_alpha() {
        assert_eq!(with_alpha(series_color(1), SERIES_FILL_ALPHA), "#e74c3c80");
        assert_eq!(with_alpha(series_color(4), RADAR_FILL_ALPHA), "#9b59b640");
    }
}
