// NYHousing - core/query.rs
//
// Listing query engine: locality summaries, grouped price means, the
// outlier-capped price range, and the price/locality filter.
//
// Every function is a pure function of (collection, parameters). An empty
// selection is a normal outcome, represented as `None` or an empty map.

use crate::core::filter::{apply_filters, FilterSelection};
use crate::core::model::{Listing, ListingCollection, RoomCount};
use crate::core::stats::{quantile_sorted, PriceStats};
use std::collections::BTreeMap;

// =============================================================================
// Locality summary
// =============================================================================

/// Mean/min/max price of every listing in `locality`.
///
/// Returns `None` when no listing carries that locality.
pub fn locality_summary(collection: &ListingCollection, locality: &str) -> Option<PriceStats> {
    let stats = PriceStats::from_prices(
        collection
            .listings()
            .iter()
            .filter(|l| l.in_locality(locality))
            .map(|l| l.price),
    );

    match &stats {
        Some(s) => tracing::debug!(locality, count = s.count, "Locality summary computed"),
        None => tracing::debug!(locality, "Locality summary: no listings"),
    }
    stats
}

// =============================================================================
// Grouped means
// =============================================================================

/// Size and mean price of one group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupMean {
    pub count: usize,
    pub mean: f64,
}

/// Mean price per observed key.
///
/// Sparse: keys never seen in the input have no entry. Callers that need a
/// dense grid (heatmaps) fill the gaps themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedMeans<K: Ord> {
    groups: BTreeMap<K, GroupMean>,
}

impl<K: Ord> Default for GroupedMeans<K> {
    fn default() -> Self {
        Self {
            groups: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Clone> GroupedMeans<K> {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, key: &K) -> Option<&GroupMean> {
        self.groups.get(key)
    }

    /// Groups in ascending key order (bedroom count, ...).
    pub fn by_key(&self) -> impl Iterator<Item = (&K, &GroupMean)> {
        self.groups.iter()
    }

    /// Groups by descending mean price; equal means fall back to key order.
    pub fn ranked(&self) -> Vec<(K, GroupMean)> {
        let mut ranked: Vec<(K, GroupMean)> = self
            .groups
            .iter()
            .map(|(k, g)| (k.clone(), *g))
            .collect();
        // Stable sort keeps BTreeMap key order among ties.
        ranked.sort_by(|a, b| b.1.mean.total_cmp(&a.1.mean));
        ranked
    }

    /// Number of listings that were grouped.
    pub fn total_count(&self) -> usize {
        self.groups.values().map(|g| g.count).sum()
    }

    /// Mean of the group means weighted by group size. Equals the plain mean
    /// price of every grouped listing, up to rounding.
    pub fn weighted_mean(&self) -> Option<f64> {
        let total = self.total_count();
        if total == 0 {
            return None;
        }
        let sum: f64 = self
            .groups
            .values()
            .map(|g| g.mean * g.count as f64)
            .sum();
        Some(sum / total as f64)
    }
}

/// Group listings by `key_fn` and average their prices.
///
/// `subset` restricts the input to those row indices; `None` uses every row.
/// Rows for which `key_fn` returns `None` are left out.
pub fn grouped_means<K, F>(
    collection: &ListingCollection,
    subset: Option<&[usize]>,
    key_fn: F,
) -> GroupedMeans<K>
where
    K: Ord,
    F: Fn(&Listing) -> Option<K>,
{
    let mut sums: BTreeMap<K, (usize, f64)> = BTreeMap::new();

    let mut add = |listing: &Listing| {
        if let Some(key) = key_fn(listing) {
            let entry = sums.entry(key).or_insert((0, 0.0));
            entry.0 += 1;
            entry.1 += listing.price;
        }
    };

    match subset {
        Some(indices) => collection.subset(indices).for_each(&mut add),
        None => collection.listings().iter().for_each(&mut add),
    }

    let groups = sums
        .into_iter()
        .map(|(k, (count, sum))| {
            (
                k,
                GroupMean {
                    count,
                    mean: sum / count as f64,
                },
            )
        })
        .collect();

    GroupedMeans { groups }
}

/// Mean price per locality. Listings without a locality are not grouped.
pub fn mean_price_by_locality(
    collection: &ListingCollection,
    subset: Option<&[usize]>,
) -> GroupedMeans<String> {
    grouped_means(collection, subset, |l| l.locality.clone())
}

/// Mean price per bedroom count.
pub fn mean_price_by_beds(
    collection: &ListingCollection,
    subset: Option<&[usize]>,
) -> GroupedMeans<RoomCount> {
    grouped_means(collection, subset, |l| Some(l.beds))
}

/// Mean price per (bedrooms, bathrooms) combination.
pub fn mean_price_by_beds_baths(
    collection: &ListingCollection,
    subset: Option<&[usize]>,
) -> GroupedMeans<(RoomCount, RoomCount)> {
    grouped_means(collection, subset, |l| Some((l.beds, l.baths)))
}

// =============================================================================
// Price ranges
// =============================================================================

/// A price interval over some subset of the collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

/// The outlier cap and the range of prices left once it is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CappedPriceRange {
    /// Quantile the cap was computed at.
    pub quantile: f64,

    /// Price at `quantile`.
    pub cap: f64,

    /// Range of listings priced at or below `cap`.
    pub range: PriceRange,
}

/// Full [min, max] price range. `None` for an empty collection.
pub fn price_bounds(collection: &ListingCollection) -> Option<PriceRange> {
    PriceStats::from_prices(collection.listings().iter().map(|l| l.price)).map(|s| PriceRange {
        min: s.min,
        max: s.max,
    })
}

/// Compute the outlier cap at `quantile` (0.99 by default elsewhere) and the
/// range of the capped subset.
pub fn capped_price_range(collection: &ListingCollection, quantile: f64) -> Option<CappedPriceRange> {
    let mut prices: Vec<f64> = collection.listings().iter().map(|l| l.price).collect();
    prices.sort_by(f64::total_cmp);

    let cap = quantile_sorted(&prices, quantile)?;
    let min = *prices.first()?;
    // The quantile lies between two observed prices, so at least the lower
    // neighbour is <= cap and this never falls back.
    let max = prices
        .iter()
        .rev()
        .copied()
        .find(|&p| p <= cap)
        .unwrap_or(min);

    tracing::debug!(
        quantile,
        cap,
        min,
        max,
        above_cap = prices.iter().filter(|&&p| p > cap).count(),
        "Outlier cap computed"
    );

    Some(CappedPriceRange {
        quantile,
        cap,
        range: PriceRange { min, max },
    })
}

// =============================================================================
// Filtering
// =============================================================================

/// Listings priced at or below `max_price` (and `price_cap`, if given) whose
/// locality is in `localities`. An empty locality list accepts every
/// locality. Row order is preserved.
pub fn filter_by_price_and_localities<S: AsRef<str>>(
    collection: &ListingCollection,
    max_price: f64,
    localities: &[S],
    price_cap: Option<f64>,
) -> Vec<usize> {
    let selection = FilterSelection::price_and_localities(
        max_price,
        localities.iter().map(|s| s.as_ref().to_owned()),
        price_cap,
    );
    apply_filters(collection, &selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::refine;
    use crate::core::model::test_support::listing;

    fn five_rows() -> ListingCollection {
        ListingCollection::new(vec![
            listing(100_000.0, 1, 1.0, Some("Brooklyn")),
            listing(400_000.0, 2, 1.0, Some("Brooklyn")),
            listing(450_000.0, 2, 2.0, Some("Queens")),
            listing(600_000.0, 3, 2.0, Some("Brooklyn")),
            listing(900_000.0, 4, 3.0, Some("Bronx")),
        ])
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-6 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn test_locality_summary_min_mean_max() {
        let stats = locality_summary(&five_rows(), "Brooklyn").unwrap();
        assert_eq!(stats.count, 3);
        assert_eq!(stats.min, 100_000.0);
        assert_eq!(stats.max, 600_000.0);
        assert!(approx(stats.mean, 366_666.666_666));
        assert!(stats.min <= stats.mean && stats.mean <= stats.max);
    }

    #[test]
    fn test_locality_summary_absent_is_none() {
        assert!(locality_summary(&five_rows(), "Staten Island").is_none());
        assert!(locality_summary(&ListingCollection::default(), "Bronx").is_none());
    }

    #[test]
    fn test_every_locality_has_ordered_summary() {
        let collection = five_rows();
        for locality in collection.localities() {
            let s = locality_summary(&collection, &locality).unwrap();
            assert!(s.min <= s.mean && s.mean <= s.max, "{locality}: {s:?}");
        }
    }

    #[test]
    fn test_grouped_means_are_sparse() {
        let means = mean_price_by_beds_baths(&five_rows(), None);
        assert_eq!(means.len(), 5);
        let two_one = RoomCount::new(1.0).unwrap();
        assert_eq!(means.get(&(RoomCount::from(2), two_one)).unwrap().mean, 400_000.0);
        // (1 bed, 3 baths) never occurs and must not be zero-filled.
        assert!(means.get(&(RoomCount::from(1), RoomCount::new(3.0).unwrap())).is_none());
    }

    #[test]
    fn test_ranked_descending_by_mean() {
        let ranked = mean_price_by_locality(&five_rows(), None).ranked();
        let order: Vec<&str> = ranked.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(order, vec!["Bronx", "Queens", "Brooklyn"]);
    }

    #[test]
    fn test_ranked_ties_use_key_order() {
        let collection = ListingCollection::new(vec![
            listing(5.0, 1, 1.0, Some("Queens")),
            listing(5.0, 1, 1.0, Some("Bronx")),
        ]);
        let ranked = mean_price_by_locality(&collection, None).ranked();
        assert_eq!(ranked[0].0, "Bronx");
        assert_eq!(ranked[1].0, "Queens");
    }

    #[test]
    fn test_by_key_ascending_bedrooms() {
        let means = mean_price_by_beds(&five_rows(), None);
        let beds: Vec<f64> = means.by_key().map(|(k, _)| k.value()).collect();
        assert_eq!(beds, vec![1.0, 2.0, 3.0, 4.0]);
        let two = means.get(&RoomCount::from(2)).unwrap();
        assert_eq!(two.mean, 425_000.0);
        assert_eq!(two.count, 2);
    }

    #[test]
    fn test_fractional_bedrooms_form_their_own_group() {
        let mut half = listing(500_000.0, 0, 1.0, Some("Bronx"));
        half.beds = RoomCount::new(2.5).unwrap();
        let collection =
            ListingCollection::new(vec![listing(899_000.0, 3, 2.0, Some("Bronx")), half]);

        let beds: Vec<f64> = mean_price_by_beds(&collection, None)
            .by_key()
            .map(|(k, _)| k.value())
            .collect();
        assert_eq!(beds, vec![2.5, 3.0]);
        assert_eq!(locality_summary(&collection, "Bronx").unwrap().mean, 699_500.0);
    }

    #[test]
    fn test_weighted_group_means_reproduce_overall_mean() {
        let collection = five_rows();
        let overall = PriceStats::from_prices(collection.listings().iter().map(|l| l.price))
            .unwrap()
            .mean;
        for weighted in [
            mean_price_by_beds(&collection, None).weighted_mean(),
            mean_price_by_beds_baths(&collection, None).weighted_mean(),
            mean_price_by_locality(&collection, None).weighted_mean(),
        ] {
            assert!(approx(weighted.unwrap(), overall));
        }
    }

    #[test]
    fn test_grouped_means_respect_subset() {
        let collection = five_rows();
        let means = mean_price_by_locality(&collection, Some(&[0, 1, 4][..]));
        assert_eq!(means.len(), 2);
        assert_eq!(means.get(&"Brooklyn".to_string()).unwrap().mean, 250_000.0);
        assert!(means.get(&"Queens".to_string()).is_none());
    }

    #[test]
    fn test_grouped_means_empty_subset() {
        let means = mean_price_by_beds(&five_rows(), Some(&[][..]));
        assert!(means.is_empty());
        assert_eq!(means.weighted_mean(), None);
    }

    #[test]
    fn test_capped_range_below_true_max() {
        let collection = five_rows();
        let capped = capped_price_range(&collection, 0.99).unwrap();
        // position 3.96 between 600k and 900k
        assert!(approx(capped.cap, 888_000.0));
        assert!(capped.cap <= price_bounds(&collection).unwrap().max);
        assert_eq!(capped.range.min, 100_000.0);
        assert_eq!(capped.range.max, 600_000.0);
    }

    #[test]
    fn test_capped_range_equals_max_when_top_prices_tie() {
        let mut rows: Vec<_> = (0..98)
            .map(|i| listing(1_000.0 * (i + 1) as f64, 1, 1.0, None))
            .collect();
        rows.push(listing(500_000.0, 1, 1.0, None));
        rows.push(listing(500_000.0, 1, 1.0, None));
        let collection = ListingCollection::new(rows);

        let capped = capped_price_range(&collection, 0.99).unwrap();
        assert_eq!(capped.cap, 500_000.0);
        assert_eq!(capped.range.max, 500_000.0);
    }

    #[test]
    fn test_capped_range_empty_collection() {
        assert!(capped_price_range(&ListingCollection::default(), 0.99).is_none());
        assert!(price_bounds(&ListingCollection::default()).is_none());
    }

    #[test]
    fn test_filter_brooklyn_under_500k() {
        let result = filter_by_price_and_localities(&five_rows(), 500_000.0, &["Brooklyn"], None);
        assert_eq!(result, vec![0, 1]);
    }

    #[test]
    fn test_empty_locality_set_accepts_all() {
        let collection = five_rows();
        let none: [&str; 0] = [];
        let with_empty = filter_by_price_and_localities(&collection, 500_000.0, &none, None);
        let price_only = apply_filters(
            &collection,
            &FilterSelection {
                max_price: Some(500_000.0),
                ..Default::default()
            },
        );
        assert_eq!(with_empty, price_only);
        assert_eq!(with_empty, vec![0, 1, 2]);
    }

    #[test]
    fn test_filter_order_independent() {
        let collection = five_rows();
        let localities = [
            vec![],
            vec!["Brooklyn"],
            vec!["Queens", "Bronx"],
            vec!["Nowhere"],
        ];
        let prices = [0.0, 100_000.0, 450_000.0, 599_999.0, 1e9];

        for locs in &localities {
            for &max_price in &prices {
                let by_price = FilterSelection {
                    max_price: Some(max_price),
                    ..Default::default()
                };
                let by_locality = FilterSelection {
                    localities: locs.iter().map(|s| s.to_string()).collect(),
                    ..Default::default()
                };

                let price_first = refine(
                    &collection,
                    &apply_filters(&collection, &by_price),
                    &by_locality,
                );
                let locality_first = refine(
                    &collection,
                    &apply_filters(&collection, &by_locality),
                    &by_price,
                );
                let combined = filter_by_price_and_localities(&collection, max_price, locs, None);

                assert_eq!(price_first, locality_first, "{locs:?} {max_price}");
                assert_eq!(price_first, combined, "{locs:?} {max_price}");
            }
        }
    }

    #[test]
    fn test_filter_with_outlier_cap() {
        let collection = five_rows();
        let cap = capped_price_range(&collection, 0.5).unwrap().cap;
        assert_eq!(cap, 450_000.0);
        let none: [&str; 0] = [];
        let result = filter_by_price_and_localities(&collection, 1e9, &none, Some(cap));
        assert_eq!(result, vec![0, 1, 2]);
    }
}
