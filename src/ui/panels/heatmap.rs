// NYHousing - ui/panels/heatmap.rs
//
// Mean price grid: bathrooms down, bedrooms across. Empty cells are
// combinations with no listings, not zero prices.

use crate::app::dashboard::HeatmapGrid;
use crate::ui::chart::shade;
use crate::ui::format::format_compact_currency;
use std::io::{self, Write};

const CELL_WIDTH: usize = 9;
const MIN_ROW_LABEL_WIDTH: usize = 8;

pub fn render<W: Write>(out: &mut W, grid: &HeatmapGrid) -> io::Result<()> {
    let Some(max) = grid.max_value() else {
        return writeln!(out, "  (no data)");
    };

    // Labels are exact so near-equal bath counts stay distinguishable.
    let labels: Vec<String> = grid.baths.iter().map(ToString::to_string).collect();
    let label_width = labels
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max(MIN_ROW_LABEL_WIDTH);

    write!(out, "  {:>label_width$}", "bath\\bed")?;
    for beds in &grid.beds {
        write!(out, "{beds:>CELL_WIDTH$}")?;
    }
    writeln!(out)?;

    for (label, row) in labels.iter().zip(&grid.cells) {
        write!(out, "  {label:>label_width$}")?;
        for cell in row {
            match cell {
                Some(value) => {
                    let text = format!("{}{}", shade(*value, max), format_compact_currency(*value));
                    write!(out, "{text:>CELL_WIDTH$}")?;
                }
                None => write!(out, "{:>CELL_WIDTH$}", "·")?,
            }
        }
        writeln!(out)?;
    }

    writeln!(out, "  Shading: ░ low  ▒  ▓  █ high (max {})", format_compact_currency(max))
}
