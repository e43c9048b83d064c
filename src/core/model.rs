// NYHousing - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

// =============================================================================
// Listing (one cleaned row of the dataset)
// =============================================================================

/// A single property listing.
///
/// Only rows with price, beds, baths, and area present survive cleaning, so
/// those fields are not optional here. Locality and coordinates may be absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    /// Asking price in dollars (non-negative).
    pub price: f64,

    /// Bedroom count. Usually whole, but the source has fractional values.
    pub beds: RoomCount,

    /// Bathroom count; half-baths and imputed fractions occur in the data.
    pub baths: RoomCount,

    /// Property area in square feet.
    pub sqft: f64,

    /// Neighbourhood / borough label.
    pub locality: Option<String>,

    /// Coordinates, present only when both latitude and longitude are.
    pub location: Option<GeoPoint>,

    /// Street address as it appears in the source.
    pub address: String,
}

impl Listing {
    /// True if the listing belongs to `locality` (exact, case-sensitive).
    pub fn in_locality(&self, locality: &str) -> bool {
        self.locality.as_deref() == Some(locality)
    }
}

// =============================================================================
// RoomCount
// =============================================================================

/// Bedroom or bathroom count.
///
/// Wraps an `f64` that is always finite, which makes a total order and
/// bitwise hashing sound. Room counts can then key `BTreeMap`s and
/// `BTreeSet`s: every distinct value in the data is its own group.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(transparent)]
pub struct RoomCount(f64);

impl RoomCount {
    /// Returns `None` for NaN or infinite values.
    pub fn new(value: f64) -> Option<Self> {
        if value.is_finite() {
            // Fold -0.0 into 0.0 so equal values share one bit pattern.
            Some(Self(value + 0.0))
        } else {
            None
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<u32> for RoomCount {
    fn from(count: u32) -> Self {
        Self(f64::from(count))
    }
}

impl PartialEq for RoomCount {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for RoomCount {}

impl PartialOrd for RoomCount {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RoomCount {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for RoomCount {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

/// Shortest text that parses back to the same value, so distinct keys never
/// share a label ("3" and "2.999", not "3" twice). Width flags are honoured.
impl fmt::Display for RoomCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for RoomCount {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| format!("'{s}' is not a number"))?;
        RoomCount::new(value).ok_or_else(|| format!("'{s}' is not a valid room count"))
    }
}

// =============================================================================
// GeoPoint
// =============================================================================

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

// =============================================================================
// Listing Collection
// =============================================================================

/// The cleaned, immutable set of all listings.
///
/// Built once at load time and only ever shared by reference afterwards.
/// Subsets are expressed as row indices into `listings()`, in row order.
#[derive(Debug, Clone, Default)]
pub struct ListingCollection {
    listings: Vec<Listing>,
}

impl ListingCollection {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self { listings }
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn get(&self, index: usize) -> Option<&Listing> {
        self.listings.get(index)
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Distinct, non-missing localities in ascending order.
    ///
    /// These are the only values a locality selector should offer.
    pub fn localities(&self) -> Vec<String> {
        self.listings
            .iter()
            .filter_map(|l| l.locality.as_deref())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    /// Iterate the listings at `indices`. Out-of-range indices are skipped.
    pub fn subset<'a>(&'a self, indices: &'a [usize]) -> impl Iterator<Item = &'a Listing> + 'a {
        indices.iter().filter_map(move |&i| self.listings.get(i))
    }
}

/// Statistics for a load: how many rows were read and why any were dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Data rows read from the source (header excluded).
    pub rows_read: usize,

    /// Rows that became listings.
    pub rows_kept: usize,

    /// Rows missing price, beds, bath, or area.
    pub dropped_missing: usize,

    /// Rows with every essential value present but a negative price.
    pub dropped_invalid: usize,
}

impl LoadReport {
    pub fn dropped(&self) -> usize {
        self.dropped_missing + self.dropped_invalid
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Minimal listing for tests; everything not passed in is filler.
    pub fn listing(price: f64, beds: u32, baths: f64, locality: Option<&str>) -> Listing {
        Listing {
            price,
            beds: RoomCount::from(beds),
            baths: RoomCount::new(baths).unwrap(),
            sqft: 1_000.0,
            locality: locality.map(str::to_owned),
            location: Some(GeoPoint {
                latitude: 40.7,
                longitude: -73.9,
            }),
            address: format!("{price} Test St"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::listing;
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_room_count_rejects_non_finite() {
        assert!(RoomCount::new(f64::NAN).is_none());
        assert!(RoomCount::new(f64::INFINITY).is_none());
        assert!(RoomCount::new(0.0).is_some());
        assert!(RoomCount::new(2.5).is_some());
    }

    #[test]
    fn test_room_count_negative_zero_equals_zero() {
        let a = RoomCount::new(-0.0).unwrap();
        let b = RoomCount::new(0.0).unwrap();
        assert_eq!(a, b);
        let set: HashSet<RoomCount> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_room_count_ordering_and_display() {
        let mut v: Vec<RoomCount> = [2.5, 1.0, 2.373860858]
            .iter()
            .map(|&b| RoomCount::new(b).unwrap())
            .collect();
        v.sort();
        let shown: Vec<String> = v.iter().map(|b| b.to_string()).collect();
        assert_eq!(shown, vec!["1", "2.373860858", "2.5"]);
        assert_eq!(format!("{:>4}", RoomCount::from(3)), "   3");
    }

    #[test]
    fn test_distinct_room_counts_have_distinct_labels() {
        let near = RoomCount::new(2.999).unwrap();
        let whole = RoomCount::new(3.0).unwrap();
        assert_ne!(near, whole);
        assert_ne!(near.to_string(), whole.to_string());
    }

    #[test]
    fn test_room_count_from_str() {
        assert_eq!("1.5".parse::<RoomCount>().unwrap().value(), 1.5);
        assert_eq!("4".parse::<RoomCount>().unwrap(), RoomCount::from(4));
        assert!("many".parse::<RoomCount>().is_err());
        assert!("inf".parse::<RoomCount>().is_err());
    }

    #[test]
    fn test_localities_sorted_distinct_non_missing() {
        let collection = ListingCollection::new(vec![
            listing(1.0, 1, 1.0, Some("Queens")),
            listing(2.0, 1, 1.0, None),
            listing(3.0, 1, 1.0, Some("Bronx")),
            listing(4.0, 1, 1.0, Some("Queens")),
        ]);
        assert_eq!(collection.localities(), vec!["Bronx", "Queens"]);
    }

    #[test]
    fn test_subset_preserves_order_and_skips_out_of_range() {
        let collection = ListingCollection::new(vec![
            listing(1.0, 1, 1.0, None),
            listing(2.0, 1, 1.0, None),
            listing(3.0, 1, 1.0, None),
        ]);
        let prices: Vec<f64> = collection.subset(&[2, 0, 9]).map(|l| l.price).collect();
        assert_eq!(prices, vec![3.0, 1.0]);
    }
}
