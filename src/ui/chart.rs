// NYHousing - ui/chart.rs
//
// Text bar charts and heatmap shading.

use crate::ui::format::{format_currency, truncate};
use std::io::{self, Write};

/// Widest label column in a bar chart before labels are cut.
const MAX_LABEL_WIDTH: usize = 28;

/// Light-to-dark shades for heatmap cells.
const SHADES: [char; 4] = ['░', '▒', '▓', '█'];

/// Bar length for `value` when `max` maps to `width` characters.
pub fn bar_len(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 || value <= 0.0 || width == 0 {
        return 0;
    }
    let len = (value / max * width as f64).round() as usize;
    // Any non-zero value gets at least one cell so it stays visible.
    len.clamp(1, width)
}

/// Shade for `value` relative to `max`.
pub fn shade(value: f64, max: f64) -> char {
    if max <= 0.0 {
        return SHADES[0];
    }
    let idx = ((value / max) * SHADES.len() as f64).floor() as usize;
    SHADES[idx.min(SHADES.len() - 1)]
}

/// Horizontal bar chart of (label, value) rows with currency values.
///
/// Rows are drawn in the order given.
pub fn render_bars<W: Write>(out: &mut W, rows: &[(String, f64)], width: usize) -> io::Result<()> {
    if rows.is_empty() {
        return writeln!(out, "  (no data)");
    }

    let label_width = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0)
        .min(MAX_LABEL_WIDTH);
    let max = rows.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);

    for (label, value) in rows {
        writeln!(
            out,
            "  {:<label_width$} │{:<width$} {}",
            truncate(label, label_width),
            "█".repeat(bar_len(*value, max, width)),
            format_currency(*value),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_len_scaling() {
        assert_eq!(bar_len(50.0, 100.0, 40), 20);
        assert_eq!(bar_len(100.0, 100.0, 40), 40);
        assert_eq!(bar_len(0.1, 100.0, 40), 1);
        assert_eq!(bar_len(0.0, 100.0, 40), 0);
        assert_eq!(bar_len(5.0, 0.0, 40), 0);
    }

    #[test]
    fn test_shade_bounds() {
        assert_eq!(shade(0.0, 10.0), '░');
        assert_eq!(shade(10.0, 10.0), '█');
        assert_eq!(shade(5.0, 0.0), '░');
    }

    #[test]
    fn test_render_bars_longest_for_max() {
        let rows = vec![
            ("Manhattan".to_string(), 2_000_000.0),
            ("Bronx".to_string(), 500_000.0),
        ];
        let mut buf = Vec::new();
        render_bars(&mut buf, &rows, 20).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].matches('█').count(), 20);
        assert_eq!(lines[1].matches('█').count(), 5);
        assert!(lines[0].ends_with("$2,000,000"));
    }

    #[test]
    fn test_render_bars_empty() {
        let mut buf = Vec::new();
        render_bars(&mut buf, &[], 20).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "  (no data)\n");
    }
}
