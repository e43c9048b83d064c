// NYHousing - core/filter.rs
//
// Composable filter engine for listings.
// All active criteria are AND-combined; an empty set accepts everything.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::model::{Listing, ListingCollection, RoomCount};
use std::collections::BTreeSet;

/// Complete filter selection for one rendering pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSelection {
    /// Inclusive maximum price. None = no upper bound.
    pub max_price: Option<f64>,

    /// Localities to include (empty = all).
    pub localities: BTreeSet<String>,

    /// Bedroom counts to include (empty = all).
    pub beds: BTreeSet<RoomCount>,

    /// Inclusive maximum bedroom count. None = no limit.
    pub max_beds: Option<RoomCount>,

    /// Bathroom counts to include (empty = all).
    pub baths: BTreeSet<RoomCount>,

    /// Outlier price cap. Applied on top of `max_price` when set.
    pub price_cap: Option<f64>,
}

impl FilterSelection {
    /// Returns true if no criteria are active.
    pub fn is_empty(&self) -> bool {
        self.max_price.is_none()
            && self.localities.is_empty()
            && self.beds.is_empty()
            && self.max_beds.is_none()
            && self.baths.is_empty()
            && self.price_cap.is_none()
    }

    /// Selection with only the price/locality/cap criteria set.
    pub fn price_and_localities<I, S>(max_price: f64, localities: I, price_cap: Option<f64>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            max_price: Some(max_price),
            localities: localities.into_iter().map(Into::into).collect(),
            price_cap,
            ..Default::default()
        }
    }

    /// The tighter of `max_price` and `price_cap`.
    pub fn effective_max_price(&self) -> Option<f64> {
        match (self.max_price, self.price_cap) {
            (Some(max), Some(cap)) => Some(max.min(cap)),
            (max, cap) => max.or(cap),
        }
    }

    /// Check a single listing against every active criterion.
    pub fn matches(&self, listing: &Listing) -> bool {
        if let Some(max) = self.effective_max_price() {
            if listing.price > max {
                return false;
            }
        }

        if !self.localities.is_empty() {
            match listing.locality.as_deref() {
                Some(loc) if self.localities.contains(loc) => {}
                _ => return false,
            }
        }

        if !self.beds.is_empty() && !self.beds.contains(&listing.beds) {
            return false;
        }

        if let Some(max_beds) = self.max_beds {
            if listing.beds > max_beds {
                return false;
            }
        }

        if !self.baths.is_empty() && !self.baths.contains(&listing.baths) {
            return false;
        }

        true
    }
}

/// Apply a selection to the whole collection, returning the indices of
/// matching listings in row order.
///
/// Indices rather than copies keep the collection the single owner of rows.
pub fn apply_filters(collection: &ListingCollection, selection: &FilterSelection) -> Vec<usize> {
    if selection.is_empty() {
        return (0..collection.len()).collect();
    }

    collection
        .listings()
        .iter()
        .enumerate()
        .filter(|(_, listing)| selection.matches(listing))
        .map(|(idx, _)| idx)
        .collect()
}

/// Narrow an existing subset further. Row order of `indices` is kept.
pub fn refine(
    collection: &ListingCollection,
    indices: &[usize],
    selection: &FilterSelection,
) -> Vec<usize> {
    indices
        .iter()
        .copied()
        .filter(|&i| collection.get(i).is_some_and(|l| selection.matches(l)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::test_support::listing;

    fn sample() -> ListingCollection {
        ListingCollection::new(vec![
            listing(100_000.0, 1, 1.0, Some("Brooklyn")),
            listing(400_000.0, 2, 1.5, Some("Brooklyn")),
            listing(450_000.0, 3, 2.0, Some("Queens")),
            listing(600_000.0, 2, 2.0, Some("Brooklyn")),
            listing(900_000.0, 4, 3.0, Some("Bronx")),
        ])
    }

    #[test]
    fn test_empty_selection_returns_all() {
        let result = apply_filters(&sample(), &FilterSelection::default());
        assert_eq!(result, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_max_price_is_inclusive() {
        let selection = FilterSelection {
            max_price: Some(450_000.0),
            ..Default::default()
        };
        assert_eq!(apply_filters(&sample(), &selection), vec![0, 1, 2]);
    }

    #[test]
    fn test_bed_and_bath_sets() {
        let selection = FilterSelection {
            beds: [RoomCount::from(2)].into_iter().collect(),
            baths: [RoomCount::new(2.0).unwrap()].into_iter().collect(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&sample(), &selection), vec![3]);
    }

    #[test]
    fn test_max_beds() {
        let selection = FilterSelection {
            max_beds: Some(RoomCount::from(2)),
            ..Default::default()
        };
        assert_eq!(apply_filters(&sample(), &selection), vec![0, 1, 3]);
    }

    #[test]
    fn test_price_cap_tightens_max_price() {
        let selection = FilterSelection {
            max_price: Some(1_000_000.0),
            price_cap: Some(500_000.0),
            ..Default::default()
        };
        assert_eq!(selection.effective_max_price(), Some(500_000.0));
        assert_eq!(apply_filters(&sample(), &selection), vec![0, 1, 2]);
    }

    #[test]
    fn test_locality_filter_excludes_missing_locality() {
        let collection = ListingCollection::new(vec![
            listing(1.0, 1, 1.0, None),
            listing(2.0, 1, 1.0, Some("Queens")),
        ]);
        let selection = FilterSelection {
            localities: ["Queens".to_string()].into_iter().collect(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&collection, &selection), vec![1]);
    }

    #[test]
    fn test_refine_keeps_subset_order() {
        let collection = sample();
        let selection = FilterSelection {
            localities: ["Brooklyn".to_string()].into_iter().collect(),
            ..Default::default()
        };
        assert_eq!(refine(&collection, &[3, 2, 0], &selection), vec![3, 0]);
    }
}
