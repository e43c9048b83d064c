// NYHousing - ui/mod.rs
//
// Terminal presentation layer. Renders dashboard views as text to any
// `Write`; never computes aggregates itself.

pub mod chart;
pub mod format;
pub mod panels;

use crate::app::dashboard::Dashboard;
use crate::app::state::AppState;
use crate::ui::format::format_count;
use std::io::{self, Write};

/// Section title with an underline.
pub fn heading<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "=".repeat(title.chars().count()))
}

/// Smaller title inside a section.
pub fn subheading<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "  {title}")?;
    writeln!(out, "  {}", "-".repeat(title.chars().count()))
}

/// Dataset line printed at the top of every report.
pub fn render_header<W: Write>(out: &mut W, state: &AppState) -> io::Result<()> {
    writeln!(out, "New York Housing Market Analysis")?;
    let report = &state.load_report;
    writeln!(
        out,
        "Dataset: {} ({} listings, {} rows dropped during cleaning)",
        state.data_path.display(),
        format_count(state.collection.len()),
        format_count(report.dropped()),
    )
}

/// Render every section of one dashboard pass.
pub fn render_dashboard<W: Write>(
    out: &mut W,
    dashboard: &Dashboard,
    state: &AppState,
) -> io::Result<()> {
    let bar_width = state.options.bar_width;

    render_header(out, state)?;

    heading(out, "Map of All Listings")?;
    panels::map::render(out, &dashboard.all_points)?;

    heading(out, "Query 1: Average Price by Locality")?;
    panels::locality::render_summary(out, dashboard.locality.as_ref())?;
    subheading(out, "Average Price Across All Localities")?;
    panels::locality::render_ranking(out, &dashboard.by_locality, bar_width)?;

    heading(out, "Query 2: How Do Bedrooms Affect Home Prices?")?;
    subheading(out, "Average Price by Number of Bedrooms")?;
    panels::bedrooms::render(out, &dashboard.by_beds, bar_width)?;
    subheading(out, "Average Price by Bathrooms and Bedrooms (filtered)")?;
    panels::heatmap::render(out, &dashboard.heatmap)?;
    subheading(out, "Price Distribution by Bedrooms (filtered)")?;
    panels::boxplot::render(out, &dashboard.boxplot)?;

    heading(out, "Query 3: Find Homes Under a Selected Price")?;
    panels::listings::render_bounds(out, dashboard)?;
    subheading(out, "Map of Filtered Homes")?;
    panels::map::render(out, &dashboard.match_points)?;
    subheading(out, "Matching Listings")?;
    panels::listings::render_table(
        out,
        &state.collection,
        &dashboard.matches,
        state.options.table_rows,
    )?;

    heading(out, "Summary & Insights")?;
    panels::insights::render(out)
}
