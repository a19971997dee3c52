//! Command implementations behind the `stow` binary.
//!
//! Each command returns its stdout text and exit code so it can be exercised
//! without spawning a process.

use crate::api::{
    parse_request, SearchReportResponse, SearchResultResponse, EXIT_INVALID_REQUEST, EXIT_OK,
};
use anyhow::Context;
use serde::Serialize;
use std::path::{Path, PathBuf};
use u_stow_catalog::{
    save_catalog, to_json_string, CatalogLoader, SyntheticGenerator, SyntheticSpec,
};
use u_stow_core::{Catalog, CatalogProvider, SearchConfig};
use u_stow_grid::SearchService;

/// Text to print and the exit code to return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub exit_code: i32,
}

impl CommandOutput {
    fn ok(stdout: String) -> Self {
        Self {
            stdout,
            exit_code: EXIT_OK,
        }
    }
}

/// Validates `body` and searches the provider's current catalog.
///
/// Prints the ranked results, or results plus rejections when `report` is set.
/// A request that fails validation yields the error body and
/// [`EXIT_INVALID_REQUEST`] without touching the catalog.
pub fn search<P: CatalogProvider>(
    provider: P,
    body: &str,
    config: SearchConfig,
    report: bool,
) -> anyhow::Result<CommandOutput> {
    let service = SearchService::with_config(provider, config)?;

    let request = match parse_request(body, service.config().max_vehicles) {
        Ok(request) => request,
        Err(invalid) => {
            log::info!("rejected request: {:?}", invalid.messages());
            return Ok(CommandOutput {
                stdout: serde_json::to_string(&invalid)?,
                exit_code: EXIT_INVALID_REQUEST,
            });
        }
    };

    let search_report = service.search_report(&request);
    log::info!(
        "{} of {} locations matched",
        search_report.results.len(),
        search_report.examined()
    );

    let stdout = if report {
        serde_json::to_string(&SearchReportResponse::from(search_report))?
    } else {
        let results: Vec<SearchResultResponse> =
            search_report.results.into_iter().map(Into::into).collect();
        serde_json::to_string(&results)?
    };
    Ok(CommandOutput::ok(stdout))
}

/// Catalog statistics printed by `stow inspect`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogSummary {
    pub path: PathBuf,
    pub locations: usize,
    pub listings: usize,
    pub empty_locations: usize,
    pub total_area: u64,
    pub cheapest_listing_in_cents: Option<u64>,
    pub config: SearchConfig,
}

impl CatalogSummary {
    fn new(path: &Path, catalog: &Catalog, config: SearchConfig) -> Self {
        let listings = catalog.locations().iter().flat_map(|l| l.listings());
        Self {
            path: path.to_path_buf(),
            locations: catalog.len(),
            listings: catalog.listing_count(),
            empty_locations: catalog.locations().iter().filter(|l| l.is_empty()).count(),
            total_area: catalog.locations().iter().map(|l| l.total_area()).sum(),
            cheapest_listing_in_cents: listings.map(|l| l.price_in_cents()).min(),
            config,
        }
    }

    fn to_text(&self) -> String {
        let cheapest = self
            .cheapest_listing_in_cents
            .map(|c| format!("{}.{:02}", c / 100, c % 100))
            .unwrap_or_else(|| "-".to_string());
        [
            format!("Catalog: {}", self.path.display()),
            format!(
                "  Locations:        {} ({} empty)",
                self.locations, self.empty_locations
            ),
            format!("  Listings:         {}", self.listings),
            format!("  Total area:       {}", self.total_area),
            format!("  Cheapest listing: {}", cheapest),
            format!("  Grid unit:        {}", self.config.unit),
            format!("  Max vehicles:     {}", self.config.max_vehicles),
        ]
        .join("\n")
    }
}

/// Loads the catalog and summarizes it.
///
/// With `strict`, a missing or unparsable file and duplicate ids are errors;
/// otherwise they are logged and the tolerant result is summarized.
pub fn inspect(
    loader: &CatalogLoader,
    config: SearchConfig,
    strict: bool,
    json: bool,
) -> anyhow::Result<CommandOutput> {
    let catalog = if strict {
        loader
            .load_strict()
            .map_err(u_stow_core::Error::from)
            .with_context(|| format!("loading {}", loader.path().display()))?
    } else {
        loader.load()
    };

    if let Err(e) = catalog.validate() {
        if strict {
            return Err(e).context("catalog failed validation");
        }
        log::warn!("{}", e);
    }

    let summary = CatalogSummary::new(loader.path(), &catalog, config);
    let stdout = if json {
        serde_json::to_string_pretty(&summary)?
    } else {
        summary.to_text()
    };
    Ok(CommandOutput::ok(stdout))
}

/// Generates a synthetic catalog, writing it to `output` or printing it.
pub fn generate(
    spec: &SyntheticSpec,
    seed: Option<u64>,
    output: Option<&Path>,
) -> anyhow::Result<CommandOutput> {
    let mut generator = match seed {
        Some(seed) => SyntheticGenerator::with_seed(seed),
        None => SyntheticGenerator::new(),
    };
    let catalog = generator.catalog(spec);

    let stdout = match output {
        Some(path) => {
            save_catalog(&catalog, path)
                .with_context(|| format!("writing {}", path.display()))?;
            format!(
                "Wrote {} locations ({} listings) to {}",
                catalog.len(),
                catalog.listing_count(),
                path.display()
            )
        }
        None => to_json_string(&catalog)?,
    };
    Ok(CommandOutput::ok(stdout))
}
