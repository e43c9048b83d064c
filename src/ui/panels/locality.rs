// NYHousing - ui/panels/locality.rs
//
// Query 1: selected-locality price summary and the mean price of every
// locality, most expensive first.

use crate::app::dashboard::LocalityView;
use crate::core::query::GroupMean;
use crate::ui::chart::render_bars;
use crate::ui::format::{format_count, format_currency};
use std::io::{self, Write};

/// Summary lines for one locality, or the no-data message.
pub fn render_summary<W: Write>(out: &mut W, view: Option<&LocalityView>) -> io::Result<()> {
    let Some(view) = view else {
        return writeln!(out, "  No localities in the dataset.");
    };

    writeln!(out, "  Locality: {}", view.locality)?;
    match view.stats {
        Some(stats) => {
            writeln!(out, "  Average Price: {}", format_currency(stats.mean))?;
            writeln!(out, "  Lowest Price:  {}", format_currency(stats.min))?;
            writeln!(out, "  Highest Price: {}", format_currency(stats.max))?;
            writeln!(out, "  Listings:      {}", format_count(stats.count))
        }
        None => writeln!(out, "  No listings in this locality."),
    }
}

/// Bar chart of mean price per locality, in the given (ranked) order.
pub fn render_ranking<W: Write>(
    out: &mut W,
    ranked: &[(String, GroupMean)],
    bar_width: usize,
) -> io::Result<()> {
    let rows: Vec<(String, f64)> = ranked
        .iter()
        .map(|(locality, g)| (locality.clone(), g.mean))
        .collect();
    render_bars(out, &rows, bar_width)
}
