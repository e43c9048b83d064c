// NYHousing - ui/panels/insights.rs
//
// Static closing commentary.

use std::io::{self, Write};

const INSIGHTS: &str = "\
  New York home prices are heavily skewed: most homes sit at the lower end
  of the market while a small number of extremely expensive properties pull
  the averages up.

  Square footage, bedrooms, and bathrooms track each other closely but do
  not correlate strongly with price. Price is driven more by neighbourhood
  and other non-numerical factors than by property size alone.";

pub fn render<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{INSIGHTS}")
}
