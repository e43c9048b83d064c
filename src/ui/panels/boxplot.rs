// NYHousing - ui/panels/boxplot.rs
//
// Price distribution per bedroom count within the active filter, drawn as a
// five-number table.

use crate::core::model::RoomCount;
use crate::core::stats::FiveNumber;
use crate::ui::format::{format_compact_currency, format_count};
use std::io::{self, Write};

pub fn render<W: Write>(out: &mut W, rows: &[(RoomCount, FiveNumber)]) -> io::Result<()> {
    if rows.is_empty() {
        return writeln!(out, "  (no matching listings)");
    }

    writeln!(
        out,
        "  {:>4} {:>7} {:>9} {:>9} {:>9} {:>9} {:>9}",
        "beds", "count", "min", "q1", "median", "q3", "max"
    )?;
    for (beds, f) in rows {
        writeln!(
            out,
            "  {:>4} {:>7} {:>9} {:>9} {:>9} {:>9} {:>9}",
            beds,
            format_count(f.count),
            format_compact_currency(f.min),
            format_compact_currency(f.q1),
            format_compact_currency(f.median),
            format_compact_currency(f.q3),
            format_compact_currency(f.max),
        )?;
    }
    Ok(())
}
