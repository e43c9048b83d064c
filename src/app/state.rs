// NYHousing - app/state.rs
//
// Application state management. Holds the loaded collection, the current
// filter selection, the selected summary locality, and the filtered indices.

use crate::core::dataset::{load_listings, load_workbook, DataFormat};
use crate::core::filter::FilterSelection;
use crate::core::model::{Listing, ListingCollection, LoadReport};
use crate::core::query::{self, CappedPriceRange, PriceRange};
use crate::platform::config::AppConfig;
use crate::platform::fs::{open_dataset, read_workbook};
use crate::util::constants;
use crate::util::error::LoadError;
use std::path::{Path, PathBuf};

/// Presentation and query options that stay fixed for a session.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardOptions {
    /// Quantile used for the outlier price cap.
    pub outlier_quantile: f64,

    /// Whether price filtering is capped at the outlier quantile.
    pub cap_outliers: bool,

    /// Rows shown in the listings table.
    pub table_rows: usize,

    /// Width of the longest bar in bar charts.
    pub bar_width: usize,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            outlier_quantile: constants::DEFAULT_OUTLIER_QUANTILE,
            cap_outliers: false,
            table_rows: constants::DEFAULT_TABLE_ROWS,
            bar_width: constants::DEFAULT_BAR_WIDTH,
        }
    }
}

impl From<&AppConfig> for DashboardOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            outlier_quantile: config.outlier_quantile,
            cap_outliers: config.cap_outliers,
            table_rows: config.table_rows,
            bar_width: config.bar_width,
        }
    }
}

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// Where the dataset was loaded from.
    pub data_path: PathBuf,

    /// All cleaned listings. Never mutated after construction.
    pub collection: ListingCollection,

    /// Cleaning statistics from the load.
    pub load_report: LoadReport,

    /// Distinct localities, ascending. The valid choices for
    /// `summary_locality` and the locality filter.
    pub localities: Vec<String>,

    /// Full price range of the collection.
    pub price_bounds: Option<PriceRange>,

    /// Outlier cap and the capped price range.
    pub capped_range: Option<CappedPriceRange>,

    /// Locality whose summary is shown.
    pub summary_locality: Option<String>,

    /// Current filter configuration, as the user chose it.
    pub selection: FilterSelection,

    /// Indices of listings matching the effective filter (into `collection`).
    pub filtered_indices: Vec<usize>,

    /// Session options.
    pub options: DashboardOptions,
}

impl AppState {
    /// Build state around an already-loaded collection.
    ///
    /// The summary locality defaults to the first locality in sort order and
    /// the filter starts empty, so every listing matches.
    pub fn new(
        collection: ListingCollection,
        load_report: LoadReport,
        data_path: PathBuf,
        options: DashboardOptions,
    ) -> Self {
        let localities = collection.localities();
        let price_bounds = query::price_bounds(&collection);
        let capped_range = query::capped_price_range(&collection, options.outlier_quantile);

        let mut state = Self {
            data_path,
            summary_locality: localities.first().cloned(),
            localities,
            price_bounds,
            capped_range,
            collection,
            load_report,
            selection: FilterSelection::default(),
            filtered_indices: Vec::new(),
            options,
        };
        state.apply_filters();
        state
    }

    /// Load the dataset at `path` and build state around it. Spreadsheet
    /// extensions are read as workbooks, everything else as CSV.
    pub fn load(path: &Path, options: DashboardOptions) -> Result<Self, LoadError> {
        let (collection, report) = match DataFormat::from_path(path) {
            DataFormat::Csv => load_listings(open_dataset(path)?, path)?,
            DataFormat::Workbook => load_workbook(read_workbook(path)?, path)?,
        };
        Ok(Self::new(collection, report, path.to_path_buf(), options))
    }

    /// The user's selection with the outlier cap applied when enabled.
    pub fn effective_selection(&self) -> FilterSelection {
        let mut selection = self.selection.clone();
        if self.options.cap_outliers {
            if let Some(capped) = self.capped_range {
                selection.price_cap = Some(capped.cap);
            }
        }
        selection
    }

    /// Range a max-price control should span: capped when the cap is on.
    pub fn price_control_range(&self) -> Option<PriceRange> {
        if self.options.cap_outliers {
            self.capped_range.map(|c| c.range)
        } else {
            self.price_bounds
        }
    }

    /// Replace the filter selection and recompute matches.
    pub fn set_selection(&mut self, selection: FilterSelection) {
        self.selection = selection;
        self.apply_filters();
    }

    /// Choose the locality for the summary. Unknown names are kept; the
    /// summary then reports no data.
    pub fn set_summary_locality(&mut self, locality: impl Into<String>) {
        let locality = locality.into();
        if !self.localities.contains(&locality) {
            tracing::debug!(locality = %locality, "Selected locality not present in dataset");
        }
        self.summary_locality = Some(locality);
    }

    /// Recompute filtered indices from the collection and current selection.
    pub fn apply_filters(&mut self) {
        let selection = self.effective_selection();
        self.filtered_indices = crate::core::filter::apply_filters(&self.collection, &selection);
        tracing::debug!(
            matches = self.filtered_indices.len(),
            total = self.collection.len(),
            "Filters applied"
        );
    }

    /// Matching listings in row order.
    pub fn filtered_listings(&self) -> Vec<&Listing> {
        self.collection.subset(&self.filtered_indices).collect()
    }
}
