// NYHousing - app/dashboard.rs
//
// One rendering pass: evaluates every dashboard view for the current state.
// The query engine returns sparse aggregates; densifying them for grid-shaped
// views (the heatmap) happens here, not in core.

use crate::app::state::AppState;
use crate::core::model::{GeoPoint, ListingCollection, LoadReport, RoomCount};
use crate::core::query::{self, GroupMean, GroupedMeans, PriceRange};
use crate::core::stats::{FiveNumber, PriceStats};
use std::collections::BTreeMap;

/// Summary for the selected locality.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalityView {
    pub locality: String,
    /// `None` when the locality has no listings.
    pub stats: Option<PriceStats>,
}

/// Mean price on a dense (baths × beds) grid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeatmapGrid {
    /// Row labels, ascending.
    pub baths: Vec<RoomCount>,
    /// Column labels, ascending.
    pub beds: Vec<RoomCount>,
    /// `cells[row][col]`; `None` where no listing has that combination.
    pub cells: Vec<Vec<Option<f64>>>,
}

impl HeatmapGrid {
    /// Densify sparse (beds, baths) means into a grid over every observed
    /// bath value and every observed bed value.
    pub fn from_means(means: &GroupedMeans<(RoomCount, RoomCount)>) -> Self {
        let mut beds: Vec<RoomCount> = means.by_key().map(|((b, _), _)| *b).collect();
        beds.sort_unstable();
        beds.dedup();

        let mut baths: Vec<RoomCount> = means.by_key().map(|((_, b), _)| *b).collect();
        baths.sort_unstable();
        baths.dedup();

        let cells = baths
            .iter()
            .map(|&bath| {
                beds.iter()
                    .map(|&bed| means.get(&(bed, bath)).map(|g| g.mean))
                    .collect()
            })
            .collect();

        Self { baths, beds, cells }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Largest populated cell, for scaling shades.
    pub fn max_value(&self) -> Option<f64> {
        self.cells
            .iter()
            .flatten()
            .flatten()
            .copied()
            .max_by(f64::total_cmp)
    }
}

/// Everything one pass of the dashboard shows.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub total_listings: usize,
    pub load_report: LoadReport,

    /// Map of every listing with coordinates.
    pub all_points: Vec<GeoPoint>,

    /// Query 1: selected locality summary.
    pub locality: Option<LocalityView>,
    /// Query 1: mean price per locality, most expensive first.
    pub by_locality: Vec<(String, GroupMean)>,

    /// Query 2: mean price per bedroom count, ascending.
    pub by_beds: Vec<(RoomCount, GroupMean)>,
    /// Query 2: (baths × beds) mean price grid over the filtered listings.
    pub heatmap: HeatmapGrid,
    /// Query 2: price distribution per bedroom count over the filtered listings.
    pub boxplot: Vec<(RoomCount, FiveNumber)>,

    /// Query 3: range the max-price control spans.
    pub price_range: Option<PriceRange>,
    /// Query 3: effective price ceiling (after any outlier cap).
    pub max_price: Option<f64>,
    /// Query 3: matching row indices in row order.
    pub matches: Vec<usize>,
    /// Query 3: map of matching listings with coordinates.
    pub match_points: Vec<GeoPoint>,
}

/// Coordinates of the listings at `indices` (or all listings), skipping
/// those without a location.
pub fn map_points(collection: &ListingCollection, indices: Option<&[usize]>) -> Vec<GeoPoint> {
    match indices {
        Some(indices) => collection
            .subset(indices)
            .filter_map(|l| l.location)
            .collect(),
        None => collection
            .listings()
            .iter()
            .filter_map(|l| l.location)
            .collect(),
    }
}

/// Per-bedroom five-number price summaries over `indices`.
pub fn price_distribution_by_beds(
    collection: &ListingCollection,
    indices: &[usize],
) -> Vec<(RoomCount, FiveNumber)> {
    let mut by_beds: BTreeMap<RoomCount, Vec<f64>> = BTreeMap::new();
    for listing in collection.subset(indices) {
        by_beds.entry(listing.beds).or_default().push(listing.price);
    }

    by_beds
        .into_iter()
        .filter_map(|(beds, prices)| FiveNumber::from_values(&prices).map(|f| (beds, f)))
        .collect()
}

/// Evaluate every view for the current state.
pub fn build(state: &AppState) -> Dashboard {
    let collection = &state.collection;
    let matches = state.filtered_indices.clone();

    let locality = state.summary_locality.as_ref().map(|loc| LocalityView {
        locality: loc.clone(),
        stats: query::locality_summary(collection, loc),
    });

    let by_locality = query::mean_price_by_locality(collection, None).ranked();
    let by_beds = query::mean_price_by_beds(collection, None)
        .by_key()
        .map(|(k, g)| (*k, *g))
        .collect();

    let heatmap = HeatmapGrid::from_means(&query::mean_price_by_beds_baths(
        collection,
        Some(matches.as_slice()),
    ));
    let boxplot = price_distribution_by_beds(collection, &matches);

    let dashboard = Dashboard {
        total_listings: collection.len(),
        load_report: state.load_report,
        all_points: map_points(collection, None),
        locality,
        by_locality,
        by_beds,
        heatmap,
        boxplot,
        price_range: state.price_control_range(),
        max_price: state.effective_selection().effective_max_price(),
        match_points: map_points(collection, Some(matches.as_slice())),
        matches,
    };

    tracing::debug!(
        listings = dashboard.total_listings,
        localities = dashboard.by_locality.len(),
        matches = dashboard.matches.len(),
        "Dashboard built"
    );
    dashboard
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::DashboardOptions;
    use crate::core::filter::FilterSelection;
    use crate::core::model::test_support::listing;
    use std::path::PathBuf;

    fn beds(counts: &[u32]) -> Vec<RoomCount> {
        counts.iter().map(|&c| RoomCount::from(c)).collect()
    }

    fn state() -> AppState {
        let mut no_location = listing(50.0, 1, 1.0, None);
        no_location.location = None;

        let collection = ListingCollection::new(vec![
            listing(100.0, 1, 1.0, Some("Queens")),
            listing(300.0, 1, 1.0, Some("Queens")),
            listing(400.0, 2, 2.0, Some("Bronx")),
            listing(900.0, 3, 2.0, Some("Manhattan")),
            no_location,
        ]);
        AppState::new(
            collection,
            LoadReport::default(),
            PathBuf::from("test.csv"),
            DashboardOptions::default(),
        )
    }

    #[test]
    fn test_heatmap_densifies_with_gaps() {
        let s = state();
        let grid = HeatmapGrid::from_means(&query::mean_price_by_beds_baths(&s.collection, None));

        assert_eq!(grid.beds, beds(&[1, 2, 3]));
        let baths: Vec<f64> = grid.baths.iter().map(|b| b.value()).collect();
        assert_eq!(baths, vec![1.0, 2.0]);

        // row 1 bath: beds 1 only (100, 300, 50 -> 150)
        assert_eq!(grid.cells[0], vec![Some(150.0), None, None]);
        assert_eq!(grid.cells[1], vec![None, Some(400.0), Some(900.0)]);
        assert_eq!(grid.max_value(), Some(900.0));
    }

    #[test]
    fn test_empty_heatmap() {
        let grid = HeatmapGrid::from_means(&GroupedMeans::default());
        assert!(grid.is_empty());
        assert_eq!(grid.max_value(), None);
    }

    #[test]
    fn test_map_points_skip_missing_locations() {
        let s = state();
        assert_eq!(map_points(&s.collection, None).len(), 4);
        assert_eq!(map_points(&s.collection, Some(&[0, 4][..])).len(), 1);
    }

    #[test]
    fn test_build_full_pass() {
        let s = state();
        let d = build(&s);

        assert_eq!(d.total_listings, 5);
        let locality = d.locality.unwrap();
        assert_eq!(locality.locality, "Bronx");
        assert_eq!(locality.stats.unwrap().mean, 400.0);

        let ranked: Vec<&str> = d.by_locality.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(ranked, vec!["Manhattan", "Bronx", "Queens"]);

        let by_beds: Vec<RoomCount> = d.by_beds.iter().map(|(k, _)| *k).collect();
        assert_eq!(by_beds, beds(&[1, 2, 3]));

        assert_eq!(d.matches, vec![0, 1, 2, 3, 4]);
        assert_eq!(d.match_points.len(), 4);
        assert_eq!(d.max_price, None);
    }

    #[test]
    fn test_boxplot_and_heatmap_follow_filter() {
        let mut s = state();
        s.set_selection(FilterSelection {
            max_price: Some(400.0),
            ..Default::default()
        });
        let d = build(&s);

        let boxplot_beds: Vec<RoomCount> = d.boxplot.iter().map(|(k, _)| *k).collect();
        assert_eq!(boxplot_beds, beds(&[1, 2]));
        let one_bed = d.boxplot[0].1;
        assert_eq!(one_bed.count, 3);
        assert_eq!(one_bed.min, 50.0);
        assert_eq!(one_bed.max, 300.0);

        assert_eq!(d.heatmap.beds, beds(&[1, 2]));
        // Bar charts still cover the whole collection.
        assert_eq!(d.by_beds.len(), 3);
        assert_eq!(d.max_price, Some(400.0));
    }

    #[test]
    fn test_absent_locality_reports_no_data() {
        let mut s = state();
        s.set_summary_locality("Staten Island");
        let d = build(&s);
        assert_eq!(d.locality.unwrap().stats, None);
    }
}
