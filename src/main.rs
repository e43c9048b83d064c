// NYHousing - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading and logging initialisation
// 3. Dataset load (fatal on failure)
// 4. Dispatch to the requested dashboard view

use clap::{Args, Parser, Subcommand};
use nyhousing::app::dashboard::{self, Dashboard};
use nyhousing::app::state::{AppState, DashboardOptions};
use nyhousing::core::export::{export_csv, export_json, ExportFormat};
use nyhousing::core::filter::FilterSelection;
use nyhousing::core::model::RoomCount;
use nyhousing::core::query;
use nyhousing::platform::config::{load_config, AppConfig, PlatformPaths};
use nyhousing::platform::fs::{create_export_file, is_not_found};
use nyhousing::ui::{self, format::format_count, panels};
use nyhousing::util::constants;
use nyhousing::util::error::{ExportError, HousingError, Result};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// NYHousing - explore the New York housing listings dataset.
///
/// Loads the listings table once and prints dashboard views: locality
/// summaries, mean-price charts, a bath/bed heatmap, price distributions,
/// and filtered listings.
#[derive(Parser, Debug)]
#[command(name = "nyhousing", version, about)]
struct Cli {
    /// Listings table (.xlsx/.xls/.ods workbook, otherwise CSV). Defaults to
    /// [data] path in config.toml, then NY-House-Dataset.xlsx in the current
    /// directory.
    #[arg(long = "data", global = true)]
    data: Option<PathBuf>,

    /// Config file to use instead of the platform default.
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

/// Filter controls shared by the filtered views.
#[derive(Args, Debug, Clone, Default)]
struct FilterArgs {
    /// Inclusive maximum price in dollars.
    #[arg(long = "max-price")]
    max_price: Option<f64>,

    /// Accept only these localities (repeatable; none = all).
    #[arg(short = 'l', long = "locality")]
    localities: Vec<String>,

    /// Accept only these bedroom counts (repeatable; none = all).
    #[arg(long = "beds")]
    beds: Vec<RoomCount>,

    /// Inclusive maximum bedroom count.
    #[arg(long = "max-beds")]
    max_beds: Option<RoomCount>,

    /// Accept only these bathroom counts (repeatable; none = all).
    #[arg(long = "baths")]
    baths: Vec<RoomCount>,

    /// Cap prices at the outlier quantile (99th percentile by default).
    #[arg(long = "cap-outliers")]
    cap_outliers: bool,
}

impl FilterArgs {
    fn selection(&self) -> FilterSelection {
        FilterSelection {
            max_price: self.max_price,
            localities: self.localities.iter().cloned().collect(),
            beds: self.beds.iter().copied().collect(),
            max_beds: self.max_beds,
            baths: self.baths.iter().copied().collect(),
            price_cap: None,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Full dashboard (default).
    Report {
        #[command(flatten)]
        filter: FilterArgs,

        /// Locality for the price summary (defaults to the first locality).
        #[arg(short = 's', long = "summary")]
        summary: Option<String>,
    },

    /// List localities with their listing counts.
    Localities,

    /// Average, lowest, and highest price in one locality.
    Summary {
        /// Locality name, exactly as listed by `localities`.
        locality: String,
    },

    /// Mean price per locality, most expensive first.
    ByLocality,

    /// Mean price per bedroom count.
    ByBeds,

    /// Mean price grid by bathrooms and bedrooms.
    Heatmap {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Price distribution per bedroom count.
    Boxplot {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Coordinates of matching listings.
    Map {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Matching listings table, with optional export.
    Filter {
        #[command(flatten)]
        filter: FilterArgs,

        /// Write matches to this file (.json for JSON, otherwise CSV).
        #[arg(short = 'o', long = "export")]
        export: Option<PathBuf>,

        /// Rows to print (overrides [display] table_rows).
        #[arg(long = "rows")]
        rows: Option<usize>,
    },
}

impl Command {
    fn filter(&self) -> Option<&FilterArgs> {
        match self {
            Self::Report { filter, .. }
            | Self::Heatmap { filter }
            | Self::Boxplot { filter }
            | Self::Map { filter }
            | Self::Filter { filter, .. } => Some(filter),
            Self::Localities | Self::Summary { .. } | Self::ByLocality | Self::ByBeds => None,
        }
    }
}

fn stdout_error(e: io::Error) -> HousingError {
    HousingError::Io {
        path: PathBuf::from("<stdout>"),
        operation: "write report",
        source: e,
    }
}

/// Write the filtered listings to `path`.
fn export_matches(state: &AppState, path: &Path) -> Result<usize> {
    let listings = state.filtered_listings();
    let mut writer = create_export_file(path)?;

    let count = match ExportFormat::from_path(path) {
        ExportFormat::Csv => export_csv(&listings, &mut writer, path)?,
        ExportFormat::Json => export_json(&listings, &mut writer, path)?,
    };
    writer.flush().map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(path = %path.display(), count, "Export complete");
    Ok(count)
}

fn render_command<W: Write>(
    out: &mut W,
    command: &Command,
    state: &AppState,
    view: &Dashboard,
) -> io::Result<()> {
    let bar_width = state.options.bar_width;

    match command {
        Command::Report { .. } => ui::render_dashboard(out, view, state),
        Command::Localities => {
            let means = query::mean_price_by_locality(&state.collection, None);
            for (locality, group) in means.by_key() {
                writeln!(out, "{locality}\t{}", format_count(group.count))?;
            }
            Ok(())
        }
        Command::Summary { .. } => panels::locality::render_summary(out, view.locality.as_ref()),
        Command::ByLocality => panels::locality::render_ranking(out, &view.by_locality, bar_width),
        Command::ByBeds => panels::bedrooms::render(out, &view.by_beds, bar_width),
        Command::Heatmap { .. } => panels::heatmap::render(out, &view.heatmap),
        Command::Boxplot { .. } => panels::boxplot::render(out, &view.boxplot),
        Command::Map { .. } => panels::map::render(out, &view.match_points),
        Command::Filter { rows, .. } => {
            panels::listings::render_bounds(out, view)?;
            panels::listings::render_table(
                out,
                &state.collection,
                &view.matches,
                rows.unwrap_or(state.options.table_rows),
            )
        }
    }
}

fn run(cli: Cli, config: AppConfig) -> Result<()> {
    let data_path = cli
        .data
        .or_else(|| config.data_path.clone())
        .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_DATA_FILE));

    let command = cli.command.unwrap_or(Command::Report {
        filter: FilterArgs::default(),
        summary: None,
    });

    let mut options = DashboardOptions::from(&config);
    if command.filter().is_some_and(|f| f.cap_outliers) {
        options.cap_outliers = true;
    }

    let mut state = AppState::load(&data_path, options).map_err(|e| {
        if is_not_found(&e) {
            eprintln!("Hint: pass --data <FILE> or set [data] path in config.toml");
        }
        e
    })?;

    if let Some(filter) = command.filter() {
        state.set_selection(filter.selection());
    }
    match &command {
        Command::Summary { locality } => state.set_summary_locality(locality.as_str()),
        Command::Report {
            summary: Some(locality),
            ..
        } => state.set_summary_locality(locality.as_str()),
        _ => {}
    }

    let view = dashboard::build(&state);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    render_command(&mut out, &command, &state, &view).map_err(stdout_error)?;
    out.flush().map_err(stdout_error)?;

    if let Command::Filter {
        export: Some(path), ..
    } = &command
    {
        let count = export_matches(&state, path)?;
        eprintln!("Exported {count} listings to {}", path.display());
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let platform_paths = PlatformPaths::resolve();
    let (config_path, required) = match cli.config {
        Some(ref path) => (path.clone(), true),
        None => (platform_paths.config_file(), false),
    };
    let (config, config_warnings) = load_config(&config_path, required);

    nyhousing::util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = constants::APP_VERSION,
        debug = cli.debug,
        config = %config_path.display(),
        "NYHousing starting"
    );
    for warning in &config_warnings {
        tracing::warn!("{}", warning);
    }

    if let Err(e) = run(cli, config) {
        tracing::error!(error = %e, "Fatal error");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
