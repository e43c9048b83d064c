// NYHousing - ui/panels/listings.rs
//
// Query 3: homes under the selected price, optionally restricted to a set of
// localities. Prints the active bounds, the match count, and a table.

use crate::app::dashboard::Dashboard;
use crate::core::model::{Listing, ListingCollection};
use crate::ui::format::{format_count, format_currency, format_rooms, truncate};
use crate::util::constants::MAX_ADDRESS_CELL_CHARS;
use std::io::{self, Write};

/// Header line describing the active price ceiling and control range.
pub fn render_bounds<W: Write>(out: &mut W, dashboard: &Dashboard) -> io::Result<()> {
    if let Some(range) = dashboard.price_range {
        writeln!(
            out,
            "  Price range: {} to {}",
            format_currency(range.min),
            format_currency(range.max)
        )?;
    }
    match dashboard.max_price {
        Some(max) => writeln!(out, "  Showing homes under {}", format_currency(max))?,
        None => writeln!(out, "  Showing homes at any price")?,
    }
    writeln!(
        out,
        "  Number of properties: {}",
        format_count(dashboard.matches.len())
    )
}

fn row<W: Write>(out: &mut W, listing: &Listing) -> io::Result<()> {
    writeln!(
        out,
        "  {:>14} {:>4} {:>5} {:>8} {:<24} {}",
        format_currency(listing.price),
        format_rooms(listing.beds),
        format_rooms(listing.baths),
        format!("{:.0}", listing.sqft),
        truncate(listing.locality.as_deref().unwrap_or("-"), 24),
        truncate(&listing.address, MAX_ADDRESS_CELL_CHARS),
    )
}

/// Table of the matching listings, at most `max_rows` of them.
pub fn render_table<W: Write>(
    out: &mut W,
    collection: &ListingCollection,
    matches: &[usize],
    max_rows: usize,
) -> io::Result<()> {
    if matches.is_empty() {
        return writeln!(out, "  No listings match the current filters.");
    }

    writeln!(
        out,
        "  {:>14} {:>4} {:>5} {:>8} {:<24} {}",
        "PRICE", "BEDS", "BATH", "SQFT", "LOCALITY", "ADDRESS"
    )?;
    for listing in collection.subset(matches).take(max_rows) {
        row(out, listing)?;
    }
    if matches.len() > max_rows {
        writeln!(out, "  … {} more", format_count(matches.len() - max_rows))?;
    }
    Ok(())
}
