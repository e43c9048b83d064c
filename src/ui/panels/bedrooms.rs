// NYHousing - ui/panels/bedrooms.rs
//
// Query 2: mean price by bedroom count, ascending by bedrooms.

use crate::core::model::RoomCount;
use crate::core::query::GroupMean;
use crate::ui::chart::render_bars;
use std::io::{self, Write};

pub fn render<W: Write>(
    out: &mut W,
    by_beds: &[(RoomCount, GroupMean)],
    bar_width: usize,
) -> io::Result<()> {
    let rows: Vec<(String, f64)> = by_beds
        .iter()
        .map(|(beds, g)| (format!("{beds} bd ({})", g.count), g.mean))
        .collect();
    render_bars(out, &rows, bar_width)
}
